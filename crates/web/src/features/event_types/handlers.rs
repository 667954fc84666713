use axum::{
    Json,
    extract::{Path, Query},
};
use combined_events::{
    dto::scoring::{DisciplineInfo, DisciplineQuery},
    models::{EventType, Gender},
    scoring::{EventTypeInfo, list_event_types},
};

use crate::error::{ApiResult, WebError};

#[utoipa::path(
    get,
    path = "/api/event-types",
    responses(
        (status = 200, description = "Every supported combined event", body = Vec<EventTypeInfo>)
    ),
    tag = "event-types"
)]
pub async fn list_all() -> Json<Vec<EventTypeInfo>> {
    Json(list_event_types())
}

#[utoipa::path(
    get,
    path = "/api/event-types/{event_type}/disciplines",
    params(
        ("event_type" = String, Path, description = "Event type code, e.g. DECATHLON"),
        DisciplineQuery
    ),
    responses(
        (status = 200, description = "Disciplines in day order", body = Vec<DisciplineInfo>),
        (status = 400, description = "Unknown event type or gender")
    ),
    tag = "event-types"
)]
pub async fn list_disciplines(
    Path(event_type): Path<String>,
    Query(query): Query<DisciplineQuery>,
) -> ApiResult<Json<Vec<DisciplineInfo>>> {
    let event_type: EventType = event_type.parse()?;

    let gender = match (query.gender.as_deref(), event_type.expected_gender()) {
        (Some(gender), _) => gender.parse::<Gender>()?,
        (None, Some(expected)) => expected,
        (None, None) => {
            return Err(WebError::BadRequest(format!(
                "gender is required for {event_type}"
            )));
        }
    };

    Ok(Json(DisciplineInfo::programme(event_type, gender)))
}
