//! HTTP routes of the directory server.

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::state::SharedState;

pub mod files;
pub mod health;

/// Methods advertised to cross-origin callers.
const ALLOWED_METHODS: [Method; 3] = [Method::GET, Method::POST, Method::OPTIONS];

/// Compose all route trees, wiring in shared state.
pub fn router(state: SharedState) -> Router<()> {
    let root = state.root_dir().to_path_buf();
    health::router()
        .merge(files::router(&root))
        .with_state(state)
}

/// Full application: routes plus the cross-origin and tracing layers.
///
/// Every response, not only preflights, carries the allow-origin, allow-methods
/// and allow-headers headers.
pub fn app(state: SharedState) -> Router<()> {
    router(state)
        .layer(cors_layer())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Permissive CORS: any origin, the three allowed methods, and `Content-Type`.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE])
}
