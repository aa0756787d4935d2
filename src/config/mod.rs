//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → TUNNEL_SHARED_SECRET override
//!     → validation.rs (semantic checks)
//!     → TunnelConfig (validated, immutable)
//!     → handed to the HTTP server before it accepts connections
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigError, SecretSource};
pub use schema::{
    LimitsConfig, ListenerConfig, ObservabilityConfig, Secret, TunnelConfig, TunnelSection,
    UpstreamConfig,
};
