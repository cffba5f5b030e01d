#![allow(unexpected_cfgs)] // Silence cfg warnings inside objc macros

#[cfg(target_os = "macos")]
mod macos_main;

use clap::Parser;

use quiper::cli::{run_login_command, Cli, LaunchMode};
use quiper::launcher::LaunchAgentRegistrar;
use quiper::logging;
use quiper::storage::AppPaths;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let paths = AppPaths::resolve();
    logging::init(&paths.log_dir);

    match cli.mode() {
        LaunchMode::Run => run_app(paths),
        mode => {
            let registrar = LaunchAgentRegistrar::for_current_process(&paths.launch_agents_dir)?;
            if let Some(message) = run_login_command(mode, &registrar)? {
                println!("{message}");
            }
            Ok(())
        }
    }
}

#[cfg(target_os = "macos")]
fn run_app(paths: AppPaths) -> anyhow::Result<()> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");
    macos_main::run(paths);
    Ok(())
}

#[cfg(not(target_os = "macos"))]
fn run_app(_paths: AppPaths) -> anyhow::Result<()> {
    anyhow::bail!("the Quiper overlay needs macOS; only --install/--uninstall work here")
}
