use axum::{Router, routing::get};
use combined_events::services::CombinedEventService;

use super::handlers::{list_all, list_disciplines};

pub fn routes() -> Router<CombinedEventService> {
    Router::new()
        .route("/", get(list_all))
        .route("/:event_type/disciplines", get(list_disciplines))
}
