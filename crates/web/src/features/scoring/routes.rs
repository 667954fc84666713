use axum::{Router, routing::post};
use combined_events::services::CombinedEventService;

use super::handlers::preview;

pub fn routes() -> Router<CombinedEventService> {
    Router::new().route("/preview", post(preview))
}
