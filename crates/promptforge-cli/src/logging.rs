//! Tracing initialization for the CLI.

use std::path::Path;
use std::sync::Once;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Environment variable holding per-target log directives.
pub const LOG_ENV: &str = "PROMPTFORGE_LOG";

const LOG_FILE_PREFIX: &str = "promptforge.log";

/// Initialize logging.
///
/// Reads `PROMPTFORGE_LOG` (e.g. `PROMPTFORGE_LOG=promptforge_core=debug`),
/// falling back to `promptforge=info`, or `promptforge=debug` when `verbose`.
/// Events go to a daily-rolling file under `logs_dir` and, at `warn` and above
/// (`debug` when verbose), to stderr.
///
/// Only the first call installs a subscriber. Keep the returned guard alive
/// until exit so buffered file output is flushed.
pub fn init_logging(logs_dir: Option<&Path>, verbose: bool) -> Option<WorkerGuard> {
    let mut guard = None;
    INIT.call_once(|| {
        guard = install(logs_dir, verbose);
    });
    guard
}

fn install(logs_dir: Option<&Path>, verbose: bool) -> Option<WorkerGuard> {
    let fallback = if verbose {
        "promptforge=debug"
    } else {
        "promptforge=info"
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let stderr_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(stderr_level);

    let (file_layer, guard) = match logs_dir.filter(|dir| std::fs::create_dir_all(dir).is_ok()) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();
    if installed.is_err() {
        // Another subscriber is already global
        return None;
    }
    guard
}
