//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges.
//! All errors are collected, not just the first.

use crate::config::schema::EchoConfig;

/// Upper bound on the json-mode delay.
pub const MAX_DELAY_MS: u64 = 60_000;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address must not be empty")]
    EmptyBindAddress,

    #[error("echo.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("echo.delay_ms must be at most 60000, got {0}")]
    DelayTooLong(u64),

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &EchoConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.trim().is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }
    if config.echo.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if config.echo.delay_ms > MAX_DELAY_MS {
        errors.push(ValidationError::DelayTooLong(config.echo.delay_ms));
    }
    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
