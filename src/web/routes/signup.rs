use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::{
    database::{self, NewSignup, SignupBmc},
    web::{
        types::{DataParsingError, SignupRequest, SignupResponse},
        WebResult,
    },
    AppState,
};

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("data parsing error: {0}")]
    DataParsing(#[from] DataParsingError),
    #[error("store error: {0}")]
    Store(#[from] database::Error),
}

// ###################################
// ->   API
// ###################################
/// Records a pre-registration and returns the new total.
/// Signing up twice with the same email (in any case) is not an error, the count is just unchanged.
#[tracing::instrument(
    name = "Saving new signup to the database",
    skip_all,
    fields(email = tracing::field::Empty)
)]
pub async fn signup(
    State(app_state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> WebResult<Json<SignupResponse>> {
    // A body that is not a JSON object carries no email.
    let request = payload
        .map(|Json(body)| SignupRequest::from(body))
        .unwrap_or_else(|rejection| {
            debug!("{:<12} - unreadable body: {rejection}", "SIGNUP");
            SignupRequest::default()
        });

    let signup = NewSignup::try_from(request).map_err(SignupError::DataParsing)?;
    tracing::Span::current().record("email", signup.email.as_ref());

    let dm = &app_state.database_mgr;
    let inserted = SignupBmc::insert_if_absent(dm, &signup)
        .await
        .inspect_err(|er| error!("{:<12} - insert failed: {er}", "SIGNUP"))
        .map_err(SignupError::Store)?;
    let count = SignupBmc::count(dm)
        .await
        .inspect_err(|er| error!("{:<12} - count query failed: {er}", "SIGNUP"))
        .map_err(SignupError::Store)?;

    info!(inserted, count, "SUCCESS");

    Ok(Json(SignupResponse { ok: true, count }))
}
