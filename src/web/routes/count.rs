use axum::{extract::State, Json};
use tracing::error;

use crate::{
    database::{self, SignupBmc},
    web::{types::CountResponse, WebResult},
    AppState,
};

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum CountError {
    #[error("store error: {0}")]
    Store(#[from] database::Error),
}

// ###################################
// ->   API
// ###################################
#[tracing::instrument(name = "Counting the signups", skip_all)]
pub async fn count(State(app_state): State<AppState>) -> WebResult<Json<CountResponse>> {
    let count = SignupBmc::count(&app_state.database_mgr)
        .await
        .inspect_err(|er| error!("{:<12} - count query failed: {er}", "COUNT"))
        .map_err(CountError::Store)?;

    Ok(Json(CountResponse { count }))
}
