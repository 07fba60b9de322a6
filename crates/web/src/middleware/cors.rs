use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Any origin may call the api with the methods and headers browsers need for
/// plain JSON requests.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
}
