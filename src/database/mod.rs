//! The persistent store: a Postgres pool plus the SQL for the `preinscriptions` table.

mod signups;

pub use signups::{NewSignup, SignupBmc, SignupRecord};

use std::time::Duration;

use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use tracing::info;

use crate::config::{ConfigResult, DbConfig};

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS preinscriptions (
        id BIGSERIAL PRIMARY KEY,
        email TEXT NOT NULL,
        country TEXT,
        interest TEXT,
        lang TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )"#;

const CREATE_EMAIL_INDEX_SQL: &str = r#"
    CREATE UNIQUE INDEX IF NOT EXISTS preinscriptions_email_unique
    ON preinscriptions (lower(email))"#;

/// Owns the connection pool. Cheap to clone, every clone shares the same pool.
#[derive(Clone, Debug)]
pub struct DbManager {
    db: PgPool,
}

impl DbManager {
    /// Builds the pool without connecting, the first query opens the first connection.
    pub fn init(db_config: &DbConfig) -> ConfigResult<Self> {
        let con_opts = db_config.connection_options()?;
        Ok(Self::with_options(con_opts))
    }

    pub fn with_options(con_opts: PgConnectOptions) -> Self {
        info!("{:<20} - Initializing the DB pool", "init_db");
        let max_cons = if cfg!(test) { 1 } else { 5 };

        let db_pool = PgPoolOptions::new()
            .max_connections(max_cons)
            .acquire_timeout(Duration::from_secs(3))
            .connect_lazy_with(con_opts);

        Self { db: db_pool }
    }

    /// Creates the signups table and the case-insensitive unique index on `email`.
    /// Safe to run on every start.
    pub async fn ensure_schema(&self) -> Result<()> {
        info!("{:<20} - Ensuring the 'preinscriptions' schema", "ensure_schema");

        sqlx::query(CREATE_TABLE_SQL)
            .execute(&self.db)
            .await
            .map_err(Error::Schema)?;
        sqlx::query(CREATE_EMAIL_INDEX_SQL)
            .execute(&self.db)
            .await
            .map_err(Error::Schema)?;

        Ok(())
    }

    pub fn db(&self) -> &PgPool {
        &self.db
    }
}

// ###################################
// ->   ERROR
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to initialize the schema: {0}")]
    Schema(#[source] sqlx::Error),
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
