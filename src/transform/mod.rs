//! Body transforms.
//!
//! # Modes
//! - `json`: wait the configured delay, then parse and re-encode the body
//! - `base64`: URL-safe base64 of the raw body, no delay
//!
//! A `Transform` is built once from configuration and shared read-only by
//! every request.

pub mod base64;
pub mod json;

use std::time::Duration;

use crate::config::{EchoMode, HandlerConfig};

/// Runtime form of an [`EchoMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// JSON round-trip after `delay`.
    Json { delay: Duration },
    /// URL-safe base64.
    Base64,
}

impl Transform {
    /// Build the transform selected by the handler configuration.
    pub fn from_config(config: &HandlerConfig) -> Self {
        match config.mode {
            EchoMode::Json => Transform::Json {
                delay: Duration::from_millis(config.delay_ms),
            },
            EchoMode::Base64 => Transform::Base64,
        }
    }

    /// The mode this transform implements.
    pub fn mode(&self) -> EchoMode {
        match self {
            Transform::Json { .. } => EchoMode::Json,
            Transform::Base64 => EchoMode::Base64,
        }
    }

    /// Latency applied before the request is processed.
    pub fn delay(&self) -> Duration {
        match self {
            Transform::Json { delay } => *delay,
            Transform::Base64 => Duration::ZERO,
        }
    }

    /// Transform a request body into the bytes appended to the response.
    pub fn apply(&self, body: &[u8]) -> Vec<u8> {
        match self {
            Transform::Json { .. } => json::normalize(body),
            Transform::Base64 => base64::encode_url_safe(body).into_bytes(),
        }
    }
}
