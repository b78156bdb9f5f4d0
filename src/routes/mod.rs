use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::{BoxError, Json, Router};
use tower::timeout::error::Elapsed;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::models::ErrorDto;
use crate::state::Services;

pub mod convert;
pub mod root;

/// Every route behind request tracing and an overall request timeout.
pub fn create_app(services: Services, request_timeout: Duration) -> Router {
    Router::new()
        .merge(root::create_route())
        .merge(convert::create_route(services))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(HandleErrorLayer::new(handle_layer_error))
                .layer(TimeoutLayer::new(request_timeout)),
        )
}

async fn handle_layer_error(err: BoxError) -> (StatusCode, Json<ErrorDto>) {
    if err.is::<Elapsed>() {
        error!("Request timed out");
        (StatusCode::REQUEST_TIMEOUT, Json(ErrorDto { detail: "Request timed out.".to_string() }))
    } else {
        error!("Unhandled error: {}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorDto { detail: err.to_string() }))
    }
}
