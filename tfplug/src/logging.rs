//! Log setup for provider processes
//!
//! Terraform captures the provider's stderr and filters it with `TF_LOG`,
//! so the subscriber writes there and takes its level from the same
//! variable.

use crate::error::{Result, TfplugError};
use tracing_subscriber::EnvFilter;

/// Log level for the provider process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Level from `TF_LOG`, falling back to `Info`
    pub fn from_env() -> Self {
        std::env::var("TF_LOG")
            .ok()
            .and_then(|v| Self::parse(&v))
            .unwrap_or(LogLevel::Info)
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "TRACE" | "JSON" => Some(LogLevel::Trace),
            "DEBUG" => Some(LogLevel::Debug),
            "INFO" => Some(LogLevel::Info),
            "WARN" => Some(LogLevel::Warn),
            "ERROR" => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Install the global subscriber. `RUST_LOG` directives, when present,
/// override `level`. Fails if a subscriber is already installed.
pub fn init_tracing(level: LogLevel) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|e| TfplugError::LoggingError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn parse_accepts_terraform_levels() {
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse(" warn "), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("JSON"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::parse("loud"), None);
    }

    #[test]
    #[serial]
    fn from_env_reads_tf_log() {
        env::set_var("TF_LOG", "ERROR");
        assert_eq!(LogLevel::from_env(), LogLevel::Error);

        env::set_var("TF_LOG", "nonsense");
        assert_eq!(LogLevel::from_env(), LogLevel::Info);

        env::remove_var("TF_LOG");
        assert_eq!(LogLevel::from_env(), LogLevel::Info);
    }

    #[test]
    fn second_init_reports_error() {
        let _ = init_tracing(LogLevel::Debug);
        assert!(matches!(
            init_tracing(LogLevel::Debug),
            Err(TfplugError::LoggingError(_))
        ));
    }
}
