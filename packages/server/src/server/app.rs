//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::kernel::ServerDeps;
use crate::server::middleware::moderator_auth_middleware;
use crate::server::routes::{
    get_location_handler, get_resolved_entry_handler, health_handler,
    list_resolved_entries_handler, resolve_handler, update_entry_handler,
};

const AUTH_KEY_HEADER_LOWER: &str = "auth-key";

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub deps: Arc<ServerDeps>,
}

/// CORS policy. An empty origin list allows any origin.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(AUTH_KEY_HEADER_LOWER)])
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, allowed_origins: &[String]) -> Router {
    let app_state = AxumAppState {
        deps: Arc::new(deps),
    };

    // Moderator-only routes
    let admin = Router::new()
        .route("/locations", get(list_resolved_entries_handler))
        .route("/locations/update", post(update_entry_handler))
        .route("/locations/:entry_id", get(get_resolved_entry_handler))
        .route_layer(middleware::from_fn(moderator_auth_middleware));

    Router::new()
        .route("/get-location", get(get_location_handler))
        .route("/resolve", post(resolve_handler))
        .route("/healthcheck", get(health_handler))
        .nest("/admin", admin)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
