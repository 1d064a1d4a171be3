use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::debug;

use super::{DbManager, Result};
use crate::web::types::ValidEmail;

// ###################################
// ->   STRUCTS
// ###################################
/// A stored pre-registration.
#[derive(Debug, Clone, FromRow)]
pub struct SignupRecord {
    pub id: i64,
    pub email: String,
    pub country: Option<String>,
    pub interest: Option<String>,
    pub lang: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated signup ready to be inserted.
/// `None` fields are stored as SQL `NULL`.
#[derive(Debug, Clone)]
pub struct NewSignup {
    pub email: ValidEmail,
    pub country: Option<String>,
    pub interest: Option<String>,
    pub lang: Option<String>,
}

/// Backend model controller for the `preinscriptions` table.
pub struct SignupBmc;

// ###################################
// ->   IMPLs
// ###################################
impl SignupBmc {
    /// Inserts the signup unless a record with the same lower-cased email exists.
    /// Returns `true` if a row was written. A duplicate is not an error.
    pub async fn insert_if_absent(dm: &DbManager, signup: &NewSignup) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO preinscriptions (email, country, interest, lang)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (lower(email)) DO NOTHING
        "#,
        )
        .bind(signup.email.as_ref())
        .bind(signup.country.as_deref())
        .bind(signup.interest.as_deref())
        .bind(signup.lang.as_deref())
        .execute(dm.db())
        .await?;

        let inserted = result.rows_affected() == 1;
        debug!(inserted, "conditional insert done");

        Ok(inserted)
    }

    pub async fn count(dm: &DbManager) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM preinscriptions")
            .fetch_one(dm.db())
            .await?;

        Ok(count)
    }

    /// Case-insensitive lookup, goes through the unique index.
    pub async fn find_by_email(dm: &DbManager, email: &str) -> Result<Option<SignupRecord>> {
        let record = sqlx::query_as::<_, SignupRecord>(
            r#"
            SELECT id, email, country, interest, lang, created_at
            FROM preinscriptions
            WHERE lower(email) = lower($1)
        "#,
        )
        .bind(email.trim())
        .fetch_optional(dm.db())
        .await?;

        Ok(record)
    }
}
