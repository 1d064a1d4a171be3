//! The configuration structs used to build the AppConfig, and their impls.
use std::{
    net::{IpAddr, Ipv4Addr},
    str::FromStr,
};

use figment::{providers::Env, Figment};
use secrecy::{ExposeSecret, SecretString};
use serde::{de, Deserialize, Deserializer};
use sqlx::{
    postgres::{PgConnectOptions, PgSslMode},
    ConnectOptions,
};
use strum_macros::AsRefStr;
use tracing::{info, warn};

use crate::config::{ConfigError, ConfigResult};

pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Every environment variable the application reads.
const ENV_VARS: [&str; 6] = [
    "ALLOWED_ORIGINS",
    "DATABASE_URL",
    "DATABASE_SSL",
    "APP_ENVIRONMENT",
    "HOST",
    "PORT",
];

// ###################################
// ->   STRUCTS
// ###################################
#[derive(AsRefStr, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Local,
    Production,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub db_config: DbConfig,
    /// Exact-match origins allowed to call the API from a browser.
    /// Empty means every origin is allowed.
    pub allowed_origins: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: IpAddr,
    pub app_port: u16,
}

#[derive(Clone, Debug)]
pub struct DbConfig {
    pub url: Option<SecretString>,
    pub require_ssl: SslRequire,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SslRequire {
    Require,
    #[default]
    Disable,
}

/// Raw view of the process environment, keys are lowercased by `figment`.
#[derive(Deserialize, Debug, Default)]
struct EnvVars {
    allowed_origins: Option<String>,
    database_url: Option<SecretString>,
    database_ssl: Option<bool>,
    app_environment: Option<String>,
    host: Option<IpAddr>,
    #[serde(default, deserialize_with = "empty_as_none")]
    port: Option<u16>,
}

/// An environment value is either parsed by `figment` already or left as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue<T> {
    Parsed(T),
    Text(String),
}

/// A variable that is set but empty counts as unset.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: std::fmt::Display,
{
    match Option::<RawValue<T>>::deserialize(deserializer)? {
        Some(RawValue::Parsed(value)) => Ok(Some(value)),
        Some(RawValue::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RawValue::Text(text)) => text.trim().parse().map(Some).map_err(de::Error::custom),
        None => Ok(None),
    }
}

// ###################################
// ->   IMPLs
// ###################################
impl AppConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_figment(Figment::from(Env::raw().only(&ENV_VARS)))
    }

    pub fn from_figment(figment: Figment) -> ConfigResult<Self> {
        let vars: EnvVars = figment.extract()?;

        let environment = vars
            .app_environment
            .map(Environment::try_from)
            .transpose()?
            .unwrap_or_default();
        let secure_transport = vars
            .database_ssl
            .unwrap_or(matches!(environment, Environment::Production));

        if vars.database_url.is_none() {
            warn!(
                "{:<20} - DATABASE_URL is not set, falling back to PG* environment defaults",
                "load_config"
            );
        }

        let allowed_origins = parse_allowed_origins(vars.allowed_origins.as_deref().unwrap_or(""));
        if allowed_origins.is_empty() {
            warn!(
                "{:<20} - ALLOWED_ORIGINS is empty, every origin will be allowed",
                "load_config"
            );
        }

        info!(
            "{:<20} - environment: {}, secure transport: {secure_transport}",
            "load_config",
            environment.as_ref()
        );

        Ok(AppConfig {
            net_config: NetConfig {
                host: vars.host.unwrap_or(DEFAULT_HOST),
                app_port: vars.port.unwrap_or(DEFAULT_PORT),
            },
            db_config: DbConfig {
                url: vars.database_url,
                require_ssl: secure_transport.into(),
            },
            allowed_origins,
        })
    }
}

impl DbConfig {
    /// Builds the connection options from the connection string.
    /// Without a connection string the libpq `PG*` environment variables and defaults apply.
    /// The transport setting always wins over an `sslmode` present in the connection string.
    pub fn connection_options(&self) -> ConfigResult<PgConnectOptions> {
        let opts = match &self.url {
            Some(url) => PgConnectOptions::from_str(url.expose_secret())
                .map_err(|er| ConfigError::InvalidDatabaseUrl(er.to_string()))?,
            None => PgConnectOptions::new(),
        };

        Ok(opts
            .ssl_mode(self.require_ssl.into())
            .log_statements(tracing::log::LevelFilter::Trace))
    }

    pub fn secure_transport(&self) -> bool {
        matches!(self.require_ssl, SslRequire::Require)
    }
}

impl From<bool> for SslRequire {
    fn from(secure: bool) -> Self {
        if secure {
            SslRequire::Require
        } else {
            SslRequire::Disable
        }
    }
}

impl From<SslRequire> for PgSslMode {
    fn from(value: SslRequire) -> Self {
        match value {
            // Encrypted, but the server certificate is not verified.
            SslRequire::Require => PgSslMode::Require,
            SslRequire::Disable => PgSslMode::Disable,
        }
    }
}

/// Splits a comma separated list, trimming entries and dropping the empty ones.
pub fn parse_allowed_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

// ###################################
// ->   TRY FROMs
// ###################################

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail(value)),
        }
    }
}

// ###################################
// ->   TESTS
// ###################################
