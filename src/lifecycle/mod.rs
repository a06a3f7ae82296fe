//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse args → Load config → Init logging → Bind → Serve
//!
//! Shutdown:
//!     signals.rs (SIGINT/SIGTERM) → shutdown.rs trigger
//!     → server stops accepting → in-flight requests drain → exit 0
//! ```
//!
//! Bind failure is fatal: the process exits non-zero before serving.

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_signal;
