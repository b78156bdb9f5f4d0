use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::warn;

use crate::error::ConvertError;
use crate::models::{ConvertPdfDto, ConvertPdfResultDto};
use crate::state::Services;

pub fn create_route(services: Services) -> Router {
    Router::new().route("/api/convert-pdf", post(convert_pdf)).with_state(services)
}

#[tracing::instrument(skip(services, payload))]
pub async fn convert_pdf(State(services): State<Services>, payload: Result<Json<ConvertPdfDto>, JsonRejection>) -> Result<Json<ConvertPdfResultDto>, ConvertError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected request: {}", rejection.body_text());
        ConvertError::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    })?;
    let images = services.convert_service.convert_pdf(&request.url).await?;
    Ok(Json(ConvertPdfResultDto { images }))
}
