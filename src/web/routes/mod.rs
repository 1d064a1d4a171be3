//! Contains all the routes that this application can handle.

mod count;
mod health;
mod signup;

// re-export errors
pub use count::CountError;
pub use signup::SignupError;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;
use count::count;
use health::{health, home};
use signup::signup;

/// All the routes of the server
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/count", get(count))
        .route("/signup", post(signup))
        .nest("/api", api_routes())
        .with_state(app_state)
        // Probes never touch the store.
        .route("/", get(home))
        .route("/health", get(health))
}

/// API - Routes nested under "/api" path
fn api_routes() -> Router<AppState> {
    Router::new().route("/count", get(count))
}
