//! Builds the `AppConfig` from the process environment.
//! The configuration is parsed once at startup and handed down to whoever needs it.

mod error;
mod types;

// Re-export config structs
pub use error::{ConfigError, ConfigResult};
pub use types::{
    parse_allowed_origins, AppConfig, DbConfig, Environment, NetConfig, SslRequire, DEFAULT_HOST,
    DEFAULT_PORT,
};
