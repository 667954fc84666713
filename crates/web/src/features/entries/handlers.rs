use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use combined_events::{
    dto::entry::{CreateEntryRequest, UpdateResultRequest},
    models::{CombinedEvent, CombinedEventDetail, Discipline, DisciplineResult},
    services::CombinedEventService,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiResult, WebError};

#[utoipa::path(
    post,
    path = "/api/entries",
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Entry created with one empty result per discipline", body = CombinedEventDetail),
        (status = 400, description = "Validation error or unknown code"),
        (status = 404, description = "Athlete or competition not found"),
        (status = 409, description = "Athlete already registered in this event")
    ),
    tag = "entries"
)]
pub async fn create_entry(
    State(service): State<CombinedEventService>,
    Json(req): Json<CreateEntryRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let detail = service.create_entry(req.to_new_entry()?).await?;

    Ok((StatusCode::CREATED, Json(detail)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/entries/{id}",
    params(
        ("id" = Uuid, Path, description = "Combined event entry id")
    ),
    responses(
        (status = 200, description = "Entry with its results in day order", body = CombinedEventDetail),
        (status = 404, description = "Entry not found")
    ),
    tag = "entries"
)]
pub async fn get_entry(
    State(service): State<CombinedEventService>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CombinedEventDetail>> {
    Ok(Json(service.get_entry(id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/entries/{id}",
    params(
        ("id" = Uuid, Path, description = "Combined event entry id")
    ),
    responses(
        (status = 204, description = "Entry and its results deleted"),
        (status = 404, description = "Entry not found")
    ),
    tag = "entries"
)]
pub async fn delete_entry(
    State(service): State<CombinedEventService>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    service.delete_entry(id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    put,
    path = "/api/entries/{id}/results/{discipline}",
    params(
        ("id" = Uuid, Path, description = "Combined event entry id"),
        ("discipline" = String, Path, description = "Discipline code, e.g. 100M or LJ")
    ),
    request_body = UpdateResultRequest,
    responses(
        (status = 200, description = "Result scored and stored", body = DisciplineResult),
        (status = 400, description = "Validation or parse error"),
        (status = 404, description = "Entry not found"),
        (status = 409, description = "Concurrent modification, retry"),
        (status = 422, description = "Discipline not in event or implausible performance")
    ),
    tag = "entries"
)]
pub async fn update_result(
    State(service): State<CombinedEventService>,
    Path((id, discipline)): Path<(Uuid, String)>,
    Json(req): Json<UpdateResultRequest>,
) -> ApiResult<Json<DisciplineResult>> {
    req.validate()?;
    let discipline: Discipline = discipline.parse()?;

    let result = service
        .update_result(id, discipline, &req.performance, req.wind)
        .await?;

    Ok(Json(result))
}

#[utoipa::path(
    post,
    path = "/api/entries/{id}/recalculate",
    params(
        ("id" = Uuid, Path, description = "Combined event entry id")
    ),
    responses(
        (status = 200, description = "Totals re-derived from stored results", body = CombinedEvent),
        (status = 404, description = "Entry not found")
    ),
    tag = "entries"
)]
pub async fn recalculate(
    State(service): State<CombinedEventService>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CombinedEvent>> {
    Ok(Json(service.recalculate(id).await?))
}
