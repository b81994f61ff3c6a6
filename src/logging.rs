//! Optional terminal logger for binaries and services embedding the crate.
//!
//! The library only emits through the `log` macros; nothing is printed until
//! a caller installs a logger, e.g. with [`init`].

use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};
use thiserror::Error;


#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("unknown log level `{0}`: expected debug, info, warn, error, off or none")]
    UnknownLevel(String),

    #[error("a logger is already installed")]
    AlreadyInstalled(#[from] log::SetLoggerError),
}


/// Parses `"debug" | "info" | "warn" | "error"`, or `"off" | "none"` to silence.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "debug"        => Ok(LevelFilter::Debug),
        "info"         => Ok(LevelFilter::Info),
        "warn"         => Ok(LevelFilter::Warn),
        "error"        => Ok(LevelFilter::Error),
        "off" | "none" => Ok(LevelFilter::Off),
        other          => Err(LoggingError::UnknownLevel(other.to_string())),
    }
}


/// Installs a terminal logger at `level` for the whole process.
///
/// # Errors
/// [`LoggingError::UnknownLevel`] for an unrecognized level, and
/// [`LoggingError::AlreadyInstalled`] when called twice.
pub fn init(level: &str) -> Result<(), LoggingError> {
    let filter = parse_level(level)?;
    CombinedLogger::init(vec![TermLogger::new(
        filter,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])?;
    Ok(())
}
