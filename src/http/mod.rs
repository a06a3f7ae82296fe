//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing middleware)
//!     → echo.rs (dump headers, read body)
//!     → transform (json / base64)
//!     → 200 OK to client
//! ```

pub mod echo;
pub mod server;

pub use echo::echo_handler;
pub use server::{EchoServer, EchoState};
