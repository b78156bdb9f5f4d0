use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::models::{RootDto, RootLinks};
use crate::util::consts::{NAME, VERSION};

pub fn create_route() -> Router {
    Router::new().route("/", get(root_links)).route("/health", get(health))
}

pub async fn root_links() -> Json<RootDto> {
    Json(RootDto {
        version: VERSION,
        name: NAME,
        _links: RootLinks {
            convert: "/api/convert-pdf",
        },
    })
}

#[tracing::instrument]
pub async fn health() -> StatusCode {
    StatusCode::OK
}
