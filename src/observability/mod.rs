//! Observability subsystem.
//!
//! Structured logs only: `tracing` events from every subsystem plus
//! per-request spans from `tower_http::trace::TraceLayer`.

pub mod logging;
