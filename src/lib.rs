//! Email pre-registration API: records signups in Postgres and reports how many there are.

pub mod app;
pub mod config;
pub mod database;
mod error;
pub mod web;

pub use app::{serve, App, AppState};
pub use error::{Error, Result};

use tracing_subscriber::EnvFilter;

/// Human readable, compact logs. `RUST_LOG` overrides the default `debug` filter.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_env_filter(env_filter_or("debug"))
        .compact()
        .init();
}

/// JSON logs, one object per line. `RUST_LOG` overrides the default `info` filter.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter_or("info"))
        .json()
        .init();
}

fn env_filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
