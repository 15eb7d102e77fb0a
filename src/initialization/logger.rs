//! Log output setup.

use std::io::Write;

use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Installs the global logger.
///
/// `RUST_LOG` seeds the filters and `level` overrides them for this crate
/// and globally, so `RUST_LOG=domain_hosts::resolve=trace` still narrows in
/// on one module.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();
    builder
        .filter_level(level)
        // Malformed or truncated UDP answers are routine; hickory recovers on its own
        .filter_module("hickory_proto", LevelFilter::Error)
        .filter_module("hickory_resolver", LevelFilter::Warn)
        .filter_module("domain_hosts", level);

    match format {
        LogFormat::Json => builder.format(|buf, record| {
            let line = json_line(
                chrono::Utc::now().timestamp_millis(),
                record.level(),
                record.target(),
                &record.args().to_string(),
            );
            writeln!(buf, "{line}")
        }),
        LogFormat::Plain => builder.format(|buf, record| {
            let (marker, level) = level_style(record.level());
            writeln!(
                buf,
                "{} {} [{}] {}",
                marker,
                record.target().cyan(),
                level,
                record.args()
            )
        }),
    };

    builder.try_init().map_err(InitializationError::from)
}

/// One JSON object per record: `ts` in epoch milliseconds, `level`, `target`, `msg`.
fn json_line(ts: i64, level: Level, target: &str, msg: &str) -> String {
    serde_json::json!({
        "ts": ts,
        "level": level.as_str(),
        "target": target,
        "msg": msg,
    })
    .to_string()
}

fn level_style(level: Level) -> (&'static str, ColoredString) {
    let name = level.as_str();
    match level {
        Level::Error => ("❌", name.red()),
        Level::Warn => ("⚠️", name.yellow()),
        Level::Info => ("✔️", name.green()),
        Level::Debug => ("🔍", name.blue()),
        Level::Trace => ("🔬", name.purple()),
    }
}
