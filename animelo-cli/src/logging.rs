/// Tracing subscriber setup.
///
/// `RUST_LOG` wins when set. Otherwise `--verbose` means debug and the default
/// is warn. While the interactive session owns the terminal, stderr logging is
/// cut down to errors so it doesn't draw over the screen; use a log file to
/// see everything.
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::bail;

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }))
}

pub fn init(verbose: bool, log_file: Option<&Path>, interactive: bool) {
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .unwrap_or_else(|e| bail(format!("Failed to open log file {}: {e}", path.display())));
            tracing_subscriber::fmt()
                .with_env_filter(filter(verbose))
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            let filter = if interactive { EnvFilter::new("error") } else { filter(verbose) };
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
    }
}
