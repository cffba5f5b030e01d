//! Start-at-login registration through a per-user LaunchAgent.
//!
//! `install` writes `com.<user>.quiper.plist` into the LaunchAgents
//! directory and loads it with `launchctl`; `uninstall` unloads and deletes
//! it. The agent keeps the app alive and starts it at login.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, warn};

use crate::error::LoginItemError;
use crate::model::constants::*;

/// Contents of the LaunchAgent property list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchAgent {
    pub label: String,
    pub program_arguments: Vec<String>,
    pub run_at_load: bool,
    pub keep_alive: bool,
}

impl LaunchAgent {
    /// Agent labelled `com.<user>.quiper`.
    pub fn for_user(user: &str, program_arguments: Vec<String>) -> Self {
        Self {
            label: format!("com.{}.{}", user, APP_NAME.to_lowercase()),
            program_arguments,
            run_at_load: true,
            keep_alive: true,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.plist", self.label)
    }

    /// XML property list understood by launchd.
    pub fn to_plist(&self) -> String {
        let arguments: String = self
            .program_arguments
            .iter()
            .map(|arg| format!("        <string>{}</string>\n", xml_escape(arg)))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>{label}</string>
    <key>ProgramArguments</key>
    <array>
{arguments}    </array>
    <key>RunAtLoad</key>
    <{run_at_load}/>
    <key>KeepAlive</key>
    <{keep_alive}/>
</dict>
</plist>
"#,
            label = xml_escape(&self.label),
            arguments = arguments,
            run_at_load = self.run_at_load,
            keep_alive = self.keep_alive,
        )
    }
}

fn xml_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UninstallOutcome {
    Removed,
    NotFound,
}

impl UninstallOutcome {
    /// Console text reported to the user.
    pub fn message(self) -> &'static str {
        match self {
            Self::Removed => UNINSTALLED_MESSAGE,
            Self::NotFound => NOT_INSTALLED_MESSAGE,
        }
    }
}

/// Registers the app to start at login.
pub trait LoginItemRegistrar {
    /// Returns the path of the written registration.
    fn install(&self) -> Result<PathBuf, LoginItemError>;
    fn uninstall(&self) -> Result<UninstallOutcome, LoginItemError>;
    fn is_installed(&self) -> bool;
}

/// [`LoginItemRegistrar`] backed by `~/Library/LaunchAgents`.
#[derive(Debug, Clone)]
pub struct LaunchAgentRegistrar {
    agents_dir: PathBuf,
    agent: LaunchAgent,
    launchctl: Option<PathBuf>,
}

impl LaunchAgentRegistrar {
    pub fn new(agents_dir: impl Into<PathBuf>, agent: LaunchAgent) -> Self {
        Self {
            agents_dir: agents_dir.into(),
            agent,
            launchctl: Some(PathBuf::from("launchctl")),
        }
    }

    /// Agent for the current user that relaunches the running executable.
    pub fn for_current_process(agents_dir: impl Into<PathBuf>) -> Result<Self, LoginItemError> {
        let exe = env::current_exe().map_err(LoginItemError::Executable)?;
        let agent = LaunchAgent::for_user(
            &current_user()?,
            vec![exe.to_string_lossy().into_owned()],
        );
        Ok(Self::new(agents_dir, agent))
    }

    /// Only touch the plist; never run `launchctl`.
    pub fn without_launchctl(mut self) -> Self {
        self.launchctl = None;
        self
    }

    pub fn agent(&self) -> &LaunchAgent {
        &self.agent
    }

    pub fn plist_path(&self) -> PathBuf {
        self.agents_dir.join(self.agent.file_name())
    }

    fn launchctl(&self, verb: &'static str, plist: &Path) -> Result<(), LoginItemError> {
        let Some(program) = &self.launchctl else {
            return Ok(());
        };
        let status = Command::new(program)
            .arg(verb)
            .arg(plist)
            .status()
            .map_err(|source| LoginItemError::Launchctl { verb, source })?;
        if !status.success() {
            warn!(verb, %status, "launchctl reported failure");
        }
        Ok(())
    }
}

impl LoginItemRegistrar for LaunchAgentRegistrar {
    fn install(&self) -> Result<PathBuf, LoginItemError> {
        let path = self.plist_path();
        let io_err = |source| LoginItemError::Io {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.agents_dir).map_err(io_err)?;
        fs::write(&path, self.agent.to_plist()).map_err(io_err)?;
        self.launchctl("load", &path)?;
        info!(path = %path.display(), "installed launch agent");
        Ok(path)
    }

    fn uninstall(&self) -> Result<UninstallOutcome, LoginItemError> {
        let path = self.plist_path();
        if !path.exists() {
            return Ok(UninstallOutcome::NotFound);
        }
        self.launchctl("unload", &path)?;
        fs::remove_file(&path).map_err(|source| LoginItemError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "removed launch agent");
        Ok(UninstallOutcome::Removed)
    }

    fn is_installed(&self) -> bool {
        self.plist_path().exists()
    }
}

/// Login name from `$USER`, falling back to the home directory name.
fn current_user() -> Result<String, LoginItemError> {
    if let Some(user) = env::var("USER").ok().filter(|u| !u.is_empty()) {
        return Ok(user);
    }
    dirs::home_dir()
        .as_deref()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or(LoginItemError::HomeDirUnavailable)
}
