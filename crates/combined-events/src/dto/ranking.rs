use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Gender;

/// One row of the standings of a (competition, event type) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RankingEntry {
    pub rank: i64,
    pub combined_event_id: Uuid,
    pub athlete_id: Uuid,
    pub gender: Gender,
    pub total_points: i32,
    pub is_complete: bool,
}
