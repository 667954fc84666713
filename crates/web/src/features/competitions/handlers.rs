use axum::{
    Json,
    extract::{Path, Query, State},
};
use combined_events::{
    dto::{entry::EntryListQuery, ranking::RankingEntry, statistics::CompetitionStatistics},
    models::{CombinedEvent, EventType},
    services::CombinedEventService,
};
use uuid::Uuid;

use crate::error::ApiResult;

#[utoipa::path(
    get,
    path = "/api/competitions/{id}/entries",
    params(
        ("id" = Uuid, Path, description = "Competition id"),
        EntryListQuery
    ),
    responses(
        (status = 200, description = "Entries, best total first", body = Vec<CombinedEvent>),
        (status = 400, description = "Unknown event type")
    ),
    tag = "competitions"
)]
pub async fn list_entries(
    State(service): State<CombinedEventService>,
    Path(id): Path<Uuid>,
    Query(query): Query<EntryListQuery>,
) -> ApiResult<Json<Vec<CombinedEvent>>> {
    let entries = service.list_entries_for_competition(id, query.event_type()?).await?;

    Ok(Json(entries))
}

#[utoipa::path(
    get,
    path = "/api/competitions/{id}/rankings/{event_type}",
    params(
        ("id" = Uuid, Path, description = "Competition id"),
        ("event_type" = String, Path, description = "Event type code, e.g. HEPTATHLON")
    ),
    responses(
        (status = 200, description = "Standings, possibly up to two minutes old", body = Vec<RankingEntry>),
        (status = 400, description = "Unknown event type")
    ),
    tag = "competitions"
)]
pub async fn get_ranking(
    State(service): State<CombinedEventService>,
    Path((id, event_type)): Path<(Uuid, String)>,
) -> ApiResult<Json<Vec<RankingEntry>>> {
    let event_type: EventType = event_type.parse()?;

    Ok(Json(service.ranking_for(id, event_type).await?))
}

#[utoipa::path(
    get,
    path = "/api/competitions/{id}/statistics",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    responses(
        (status = 200, description = "Aggregate over every entry of the competition", body = CompetitionStatistics)
    ),
    tag = "competitions"
)]
pub async fn get_statistics(
    State(service): State<CombinedEventService>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CompetitionStatistics>> {
    Ok(Json(service.statistics_for(id).await?))
}
