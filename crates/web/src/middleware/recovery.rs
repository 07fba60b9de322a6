use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::common::RouteErrorResponse;

/// Turns a panic in a handler into a generic 500 response.
pub fn handle_panic(why: Box<dyn Any + Send + 'static>) -> Response {
    let detail = why
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| why.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    log::error!("request handler panicked: {}", detail);

    RouteErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR).into_response()
}
