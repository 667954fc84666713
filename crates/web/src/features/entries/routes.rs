use axum::{
    Router,
    routing::{get, post, put},
};
use combined_events::services::CombinedEventService;

use super::handlers::{create_entry, delete_entry, get_entry, recalculate, update_result};

pub fn routes() -> Router<CombinedEventService> {
    Router::new()
        .route("/", post(create_entry))
        .route("/:id", get(get_entry).delete(delete_entry))
        .route("/:id/results/:discipline", put(update_result))
        .route("/:id/recalculate", post(recalculate))
}
