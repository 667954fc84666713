use axum::Json;
use combined_events::{
    dto::scoring::PreviewPointsRequest,
    scoring::{PointsPreview, preview_points},
};
use validator::Validate;

use crate::error::ApiResult;

#[utoipa::path(
    post,
    path = "/api/scoring/preview",
    request_body = PreviewPointsRequest,
    responses(
        (status = 200, description = "Points the performance would score", body = PointsPreview),
        (status = 400, description = "Validation or parse error"),
        (status = 422, description = "No scoring table for the discipline")
    ),
    tag = "scoring"
)]
pub async fn preview(Json(req): Json<PreviewPointsRequest>) -> ApiResult<Json<PointsPreview>> {
    req.validate()?;

    let preview = preview_points(req.discipline, &req.performance, req.gender)?;

    Ok(Json(preview))
}
