use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderName, Request, Response},
    middleware, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{MakeSpan, OnRequest, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::{
    web::{midware, routes::routes, REQUEST_ID_HEADER},
    App, AppState,
};

/// The core async function returning a future that will serve this application.
///
/// Current implementation might return an IO error from `axum::serve`
pub async fn serve(app: App) -> Result<(), ServeError> {
    let App {
        app_state,
        listener,
    } = app;

    axum::serve(listener, build_router(app_state)).await?;

    Ok(())
}

/// All the routes wrapped in the middleware stack.
///
/// Requests go through the layers top to bottom, responses bottom to top:
/// request id -> trace -> response mapper -> request id propagation -> origin gate -> CORS -> routes
pub fn build_router(app_state: AppState) -> Router {
    let x_request_id: HeaderName = HeaderName::from_static(REQUEST_ID_HEADER);
    let origin_filter = app_state.origin_filter.clone();
    let cors_layer = origin_filter.cors_layer();

    Router::new().merge(routes(app_state)).layer(
        ServiceBuilder::new()
            // Set UUID per request
            .layer(SetRequestIdLayer::new(
                x_request_id.clone(),
                MakeRequestUuid,
            ))
            .layer(build_trace_layer())
            // The response mapper has to see the propagated request id header,
            // so the propagation layer sits below it.
            .layer(middleware::map_response(midware::response_mapper))
            .layer(PropagateRequestIdLayer::new(x_request_id))
            // Rejected origins never reach CORS handling or the handlers.
            .layer(middleware::from_fn_with_state(
                origin_filter,
                midware::origin_gate,
            ))
            .layer(cors_layer),
    )
}

/// A helper function that sets up the `tower_http::TraceLayer` - tracing configuration.
fn build_trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl MakeSpan<Body> + Clone,
    impl OnRequest<Body> + Clone,
    impl OnResponse<Body> + Clone,
> {
    TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            let uuid = req
                .headers()
                .get(REQUEST_ID_HEADER)
                .map(|uuid| uuid.to_str().unwrap_or("").to_string());

            tracing::error_span!(
                "serve",
                id = uuid,
                method = req.method().to_string(),
                path = req.uri().path()
            )
        })
        .on_request(|req: &Request<Body>, _s: &Span| tracing::info!("START @ {}", req.uri()))
        .on_response(|res: &Response<Body>, latency: Duration, _s: &Span| {
            let st_code = res.status().as_u16();

            if (400..=599).contains(&st_code) {
                tracing::error!("END in: {:?} - STATUS: {st_code}", latency)
            } else {
                tracing::info!("END in: {:?} - STATUS: {st_code}", latency)
            }
        })
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
