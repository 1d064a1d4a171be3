use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use strum_macros::AsRefStr;

use super::routes::{CountError, SignupError};
use super::types::DataParsingError;

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("origin is not in the allow-list: {0}")]
    OriginNotAllowed(String),

    #[error("count error: {0}")]
    Count(#[from] CountError),
    #[error("signup error: {0}")]
    Signup(#[from] SignupError),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            Error::OriginNotAllowed(_) => (StatusCode::FORBIDDEN, OriginNotAllowed),
            Error::Count(_) => (StatusCode::INTERNAL_SERVER_ERROR, CountFailed),
            Error::Signup(SignupError::DataParsing(DataParsingError::EmailRequired)) => {
                (StatusCode::BAD_REQUEST, EmailRequired)
            }
            Error::Signup(SignupError::DataParsing(DataParsingError::EmailInvalid)) => {
                (StatusCode::BAD_REQUEST, EmailInvalid)
            }
            Error::Signup(SignupError::Store(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, SignupFailed)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// The stable, machine-readable error code sent to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ClientError {
    EmailRequired,
    EmailInvalid,
    CountFailed,
    SignupFailed,
    OriginNotAllowed,
}

/// Body of every error response: `{"error": "<code>"}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ClientError,
}
