//! Command line interface.

use clap::Parser;

use crate::launcher::LoginItemRegistrar;
use crate::model::INSTALLED_MESSAGE;

#[derive(Debug, Clone, Parser, PartialEq, Eq)]
#[command(
    name = "quiper",
    version,
    about = "Menu-bar overlay for web chat services, toggled by a global hotkey."
)]
pub struct Cli {
    /// Start Quiper at login (LaunchAgent) and exit.
    #[arg(long)]
    pub install: bool,

    /// Remove the login registration and exit.
    #[arg(long)]
    pub uninstall: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    Install,
    Uninstall,
    Run,
}

impl Cli {
    /// `--install` wins when both flags are given.
    pub fn mode(&self) -> LaunchMode {
        if self.install {
            LaunchMode::Install
        } else if self.uninstall {
            LaunchMode::Uninstall
        } else {
            LaunchMode::Run
        }
    }
}

/// Runs `--install` / `--uninstall` and returns the console message.
pub fn run_login_command(
    mode: LaunchMode,
    registrar: &dyn LoginItemRegistrar,
) -> anyhow::Result<Option<&'static str>> {
    match mode {
        LaunchMode::Install => {
            registrar.install()?;
            Ok(Some(INSTALLED_MESSAGE))
        }
        LaunchMode::Uninstall => Ok(Some(registrar.uninstall()?.message())),
        LaunchMode::Run => Ok(None),
    }
}
