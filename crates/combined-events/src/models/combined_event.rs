use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Discipline, EventType, Gender};
use crate::error::{CombinedEventError, Result};

/// Longest performance text an entry stores.
pub const MAX_PERFORMANCE_LEN: usize = 32;

/// One athlete's participation in one combined event at one competition.
///
/// `total_points` and `is_complete` are derived from the entry's discipline
/// results and only change through [`EntryTotals`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CombinedEvent {
    pub combined_event_id: Uuid,
    pub event_type: EventType,
    pub gender: Gender,
    pub athlete_id: Uuid,
    pub competition_id: Uuid,
    pub total_points: i32,
    pub is_complete: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CombinedEvent {
    pub fn totals(&self) -> EntryTotals {
        EntryTotals {
            total_points: self.total_points,
            is_complete: self.is_complete,
        }
    }
}

/// Performance, points and validity for one discipline of one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DisciplineResult {
    pub result_id: Uuid,
    pub combined_event_id: Uuid,
    pub discipline: Discipline,
    /// 1-based position in the event's discipline order
    pub day_order: i16,
    pub performance: Option<String>,
    pub points: i32,
    pub wind: Option<Decimal>,
    pub is_valid: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CombinedEventDetail {
    #[serde(flatten)]
    pub entry: CombinedEvent,
    pub results: Vec<DisciplineResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCombinedEvent {
    pub event_type: EventType,
    pub gender: Gender,
    pub athlete_id: Uuid,
    pub competition_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewDisciplineResult {
    pub discipline: Discipline,
    pub day_order: i16,
}

/// A scored submission ready to be written onto a discipline result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultUpdate {
    pub discipline: Discipline,
    pub performance: String,
    pub points: i32,
    pub wind: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EntryTotals {
    pub total_points: i32,
    pub is_complete: bool,
}

impl EntryTotals {
    /// Sum of valid points, complete only when every result is valid.
    pub fn from_results(results: &[DisciplineResult]) -> Result<Self> {
        let mut count = 0usize;
        let mut total_points = 0i32;
        for result in results.iter().filter(|r| r.is_valid) {
            count += 1;
            total_points = total_points
                .checked_add(result.points)
                .ok_or(CombinedEventError::TotalOutOfRange)?;
        }

        Ok(Self {
            total_points,
            is_complete: count == results.len(),
        })
    }
}

/// Aggregation fields of an entry, without discipline detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EntrySummary {
    pub combined_event_id: Uuid,
    pub athlete_id: Uuid,
    pub event_type: EventType,
    pub total_points: i32,
    pub is_complete: bool,
}
