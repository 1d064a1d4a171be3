//! Cross-origin gate: decides which callers may reach the handlers at all,
//! and which CORS headers allowed browser callers get back.

use std::{collections::HashSet, sync::Arc};

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

#[derive(Clone, Debug, Default)]
pub struct OriginFilter {
    allowed: Arc<HashSet<String>>,
}

impl OriginFilter {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: Arc::new(origins.into_iter().map(Into::into).collect()),
        }
    }

    /// - no declared origin: allowed (server-to-server, curl, ...)
    /// - empty allow-list: every origin is allowed
    /// - otherwise the origin must be an exact member of the list
    pub fn is_allowed(&self, origin: Option<&HeaderValue>) -> bool {
        let Some(origin) = origin else {
            return true;
        };
        if self.allowed.is_empty() {
            return true;
        }

        origin
            .to_str()
            .is_ok_and(|origin| self.allowed.contains(origin))
    }

    pub fn is_permissive(&self) -> bool {
        self.allowed.is_empty()
    }

    /// CORS headers for the requests that made it through the gate.
    /// The request origin is mirrored back, preflight requests are answered here.
    pub fn cors_layer(&self) -> CorsLayer {
        let filter = self.clone();

        CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(move |origin, _parts| {
                filter.is_allowed(Some(origin))
            }))
            .allow_methods([
                Method::GET,
                Method::HEAD,
                Method::PUT,
                Method::PATCH,
                Method::POST,
                Method::DELETE,
            ])
            .allow_headers(AllowHeaders::mirror_request())
    }
}
