//! Tracing setup: one plain-text log file with UTC timestamps.

use std::env;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use tracing::Level;
use tracing_subscriber::fmt::time::UtcTime;

use crate::model::constants::{LOG_FILE_NAME, LOG_LEVEL_ENV};

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Level from `QUIPER_LOG`, `info` when unset or unparsable.
pub fn log_level() -> Level {
    parse_level(env::var(LOG_LEVEL_ENV).ok().as_deref())
}

fn parse_level(value: Option<&str>) -> Level {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(Level::INFO)
}

/// Installs the global subscriber writing to `<log_dir>/quiper.log`.
///
/// Falls back to stderr when the file cannot be opened. Later calls are
/// no-ops.
pub fn init(log_dir: &Path) {
    let _ = TRACING_INIT.get_or_init(|| {
        let level = log_level();
        let file = fs::create_dir_all(log_dir).and_then(|_| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_dir.join(LOG_FILE_NAME))
        });

        match file {
            Ok(file) => {
                let subscriber = tracing_subscriber::fmt()
                    .with_timer(UtcTime::rfc_3339())
                    .with_max_level(level)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .finish();
                let _ = tracing::subscriber::set_global_default(subscriber);
            }
            Err(err) => {
                let subscriber = tracing_subscriber::fmt()
                    .with_timer(UtcTime::rfc_3339())
                    .with_max_level(level)
                    .with_writer(std::io::stderr)
                    .finish();
                let _ = tracing::subscriber::set_global_default(subscriber);
                tracing::warn!(%err, dir = %log_dir.display(), "log file unavailable, logging to stderr");
            }
        }
    });
}
