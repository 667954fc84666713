use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{Discipline, DisciplineKind, EventType, Gender};
use crate::scoring::disciplines_for;

/// Request payload for previewing the points of a performance
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PreviewPointsRequest {
    pub discipline: Discipline,

    #[validate(length(min = 1, max = 32, message = "Performance must be between 1 and 32 characters"))]
    pub performance: String,

    pub gender: Gender,
}

/// Query parameters for an event programme
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DisciplineQuery {
    /// Required only for events whose programme depends on gender
    pub gender: Option<String>,
}

/// One discipline of an event programme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DisciplineInfo {
    pub day_order: i16,
    pub discipline: Discipline,
    pub kind: DisciplineKind,
}

impl DisciplineInfo {
    pub fn programme(event_type: EventType, gender: Gender) -> Vec<Self> {
        (1i16..)
            .zip(disciplines_for(event_type, gender))
            .map(|(day_order, &discipline)| Self {
                day_order,
                discipline,
                kind: discipline.kind(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_programme_is_numbered_from_one() {
        let programme = DisciplineInfo::programme(EventType::PentathlonIndoor, Gender::Female);
        assert_eq!(programme.len(), 5);
        assert_eq!(programme[0].day_order, 1);
        assert_eq!(programme[0].discipline, Discipline::Hurdles60);
        assert_eq!(programme[0].kind, DisciplineKind::Track);
        assert_eq!(programme[4].day_order, 5);
        assert_eq!(programme[4].discipline, Discipline::Run800);
    }
}
