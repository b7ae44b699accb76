use std::fs;
use std::io;

use drivedesk_config::LogConfig;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber.
///
/// Console output is filtered by `RUST_LOG` when set, otherwise by
/// `config.level`. With files enabled, errors go to a daily plain-text log and
/// everything at `info` and above goes to a daily JSON log under `config.dir`.
pub fn init_tracing(config: &LogConfig) -> io::Result<()> {
    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={level},drivedesk_core={level},drivedesk_db={level},sqlx=warn",
            env!("CARGO_CRATE_NAME"),
            level = config.level
        ))
    });

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    if !config.files_enabled {
        tracing_subscriber::registry().with(console_layer).init();
        return Ok(());
    }

    fs::create_dir_all(&config.dir)?;

    let error_appender = RollingFileAppender::new(Rotation::DAILY, &config.dir, "drivedesk.log");
    let error_layer = fmt::layer()
        .with_writer(error_appender)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let json_appender = RollingFileAppender::new(Rotation::DAILY, &config.dir, "drivedesk.json");
    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(error_layer)
        .with(json_layer)
        .init();

    info!(dir = %config.dir, "file logging enabled");
    Ok(())
}
