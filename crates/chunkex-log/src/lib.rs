//! Structured logging for the chunk exporter.
//!
//! Installs a `tracing` subscriber with console output and, when enabled in
//! the config, a JSON log file for post-mortem analysis of failed exports.

use chunkex_config::Config;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config sets one.
const DEFAULT_FILTER: &str = "info";

/// File name of the JSON log inside the log directory.
pub const LOG_FILE: &str = "chunkex.log";

/// Initialize the global tracing subscriber.
///
/// Filter precedence is `RUST_LOG`, then `config.log.log_level`, then `info`.
/// If `config.log.file_logging` is set and `log_dir` is given, JSON lines are
/// also written to `<log_dir>/chunkex.log`. A log file that cannot be created
/// is skipped; console logging still works.
///
/// # Examples
///
/// ```no_run
/// use chunkex_config::Config;
/// use chunkex_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, config: Option<&Config>) {
    let filter_str = filter_directive(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    // Console layer goes to stderr so command responses on stdout stay clean.
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    let file_logging = config.is_some_and(|c| c.log.file_logging);
    if file_logging
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Filter directive taken from the config, or the default.
fn filter_directive(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.log.log_level.trim().is_empty() => config.log.log_level.clone(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
