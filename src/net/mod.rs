//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ADDR argument
//!     → listener.rs (parse `:port`, dual-stack bind)
//!     → TcpListener handed to the HTTP server
//! ```
//!
//! Bind failure is the only fatal runtime error the service has.

pub mod listener;

pub use listener::{bind, parse_listen_addr, ListenAddr, ListenerError};
