use axum::{Router, routing::get};
use combined_events::services::CombinedEventService;

use super::handlers::{get_ranking, get_statistics, list_entries};

pub fn routes() -> Router<CombinedEventService> {
    Router::new()
        .route("/:id/entries", get(list_entries))
        .route("/:id/rankings/:event_type", get(get_ranking))
        .route("/:id/statistics", get(get_statistics))
}
