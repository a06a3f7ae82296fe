//! HTTP echo server library.
//!
//! Every request, whatever its method or path, is answered with a dump of its
//! headers followed by a transform of its body: canonical JSON re-encoding
//! (after a fixed delay) or URL-safe base64.

pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod transform;

pub use config::{EchoConfig, EchoMode};
pub use http::EchoServer;
pub use lifecycle::Shutdown;
pub use transform::Transform;
