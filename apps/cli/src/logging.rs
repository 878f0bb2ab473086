//! Logging initialization for the importer binary
//!
//! Human-readable or JSON lines on stdout, optionally mirrored to a daily-rotated
//! file. `RUST_LOG` overrides the configured level.

use std::fs;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Keeps the file writer alive; dropping it flushes buffered lines.
pub struct LoggingGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Install the global subscriber; keep the returned guard alive for the whole run.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<LoggingGuard> {
    let subscriber = tracing_subscriber::registry().with(build_env_filter(config));

    let file_guard = if config.json {
        init_json_logging_with_subscriber(subscriber, config)?
    } else {
        init_human_logging_with_subscriber(subscriber, config)?
    };

    tracing::debug!(
        level = %config.level,
        json = config.json,
        file_directory = ?config.file_directory,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// `RUST_LOG` if set, otherwise the configured level for the importer crates.
fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // reqwest/hyper are noisy below warn
        EnvFilter::new(format!(
            "snomed_importer={},snomed_import={},snomed_code_client={},reqwest=warn,hyper=warn",
            config.level, config.level, config.level
        ))
    })
}

/// JSON lines carrying the current span (the page being imported).
fn init_json_logging_with_subscriber<S>(
    subscriber: S,
    config: &LoggingConfig,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>>
where
    S: SubscriberExt + for<'a> tracing_subscriber::registry::LookupSpan<'a> + Send + Sync + 'static,
{
    let console_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_writer(std::io::stdout);

    match &config.file_directory {
        Some(directory) => {
            let (file_appender, file_guard) = create_file_appender(directory, config)?;
            let file_layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .with_writer(file_appender);

            subscriber.with(console_layer).with(file_layer).init();
            Ok(Some(file_guard))
        }
        // stdout only
        None => {
            subscriber.with(console_layer).init();
            Ok(None)
        }
    }
}

/// Plain text on stdout; the file copy has ANSI colours turned off.
fn init_human_logging_with_subscriber<S>(
    subscriber: S,
    config: &LoggingConfig,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>>
where
    S: SubscriberExt + for<'a> tracing_subscriber::registry::LookupSpan<'a> + Send + Sync + 'static,
{
    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_writer(std::io::stdout);

    match &config.file_directory {
        Some(directory) => {
            let (file_appender, file_guard) = create_file_appender(directory, config)?;
            let file_layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(file_appender);

            subscriber.with(console_layer).with(file_layer).init();
            Ok(Some(file_guard))
        }
        None => {
            subscriber.with(console_layer).init();
            Ok(None)
        }
    }
}

/// Daily-rotated `<prefix>.YYYY-MM-DD` files, written off the main thread.
fn create_file_appender(
    directory: &str,
    config: &LoggingConfig,
) -> anyhow::Result<(
    tracing_appender::non_blocking::NonBlocking,
    tracing_appender::non_blocking::WorkerGuard,
)> {
    fs::create_dir_all(directory)?;

    let file_appender = tracing_appender::rolling::daily(directory, &config.file_prefix);
    Ok(tracing_appender::non_blocking(file_appender))
}
