//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → command-line overrides (cli.rs)
//!     → validation.rs (semantic checks, once, on the merged result)
//!     → EchoConfig (immutable for the life of the process)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults; with no file the listen address is the only input
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{EchoConfig, EchoMode, HandlerConfig, ListenerConfig, ObservabilityConfig};
pub use validation::{validate_config, ValidationError};
