use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE, ORIGIN},
        Method, Uri,
    },
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;
use uuid::Uuid;

use crate::web::{log, origin::OriginFilter, Error, ErrorBody, WebResult, REQUEST_ID_HEADER};

/// Rejects requests whose declared origin is not allowed, before any handler runs.
pub async fn origin_gate(
    State(filter): State<OriginFilter>,
    req: Request,
    next: Next,
) -> WebResult<Response> {
    if filter.is_allowed(req.headers().get(ORIGIN)) {
        return Ok(next.run(req).await);
    }

    let origin = req
        .headers()
        .get(ORIGIN)
        .map(|o| String::from_utf8_lossy(o.as_bytes()).into_owned())
        .unwrap_or_default();
    warn!("{:<12} - blocked origin: {origin}", "ORIGIN_GATE");

    Err(Error::OriginNotAllowed(origin))
}

/// Turns a `web::Error` stashed in the response extensions into the client facing
/// `{"error": "<code>"}` body and logs one line per request.
pub async fn response_mapper(req_method: Method, uri: Uri, resp: Response) -> Response {
    let req_id = resp
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|id| id.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let web_error = resp.extensions().get::<Arc<Error>>().cloned();
    let client_status_and_error = web_error
        .as_deref()
        .map(Error::status_code_and_client_error);

    log::log_request(
        &req_id,
        &req_method,
        &uri,
        resp.status(),
        web_error.as_deref(),
        client_status_and_error,
    );

    let Some((status, client_error)) = client_status_and_error else {
        return resp;
    };

    let mut err_resp = (status, Json(ErrorBody { error: client_error })).into_response();
    // Keep what the inner layers already set: request id, CORS headers.
    let (parts, _body) = resp.into_parts();
    for (name, value) in parts.headers.iter() {
        if name != CONTENT_TYPE && name != CONTENT_LENGTH {
            err_resp.headers_mut().append(name.clone(), value.clone());
        }
    }

    err_resp
}
