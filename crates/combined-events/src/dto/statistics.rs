use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{EntrySummary, EventType};

/// Aggregate view over every entry of a competition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompetitionStatistics {
    pub competition_id: Uuid,
    pub total_entries: i64,
    pub completed_entries: i64,
    /// Mean total of completed entries, two decimal places
    pub average_completed_points: Option<Decimal>,
    pub best_entry: Option<EntrySummary>,
    pub entries_by_event_type: BTreeMap<EventType, i64>,
}

impl CompetitionStatistics {
    pub fn from_summaries(competition_id: Uuid, summaries: &[EntrySummary]) -> Self {
        let completed: Vec<&EntrySummary> = summaries.iter().filter(|s| s.is_complete).collect();

        let average_completed_points = if completed.is_empty() {
            None
        } else {
            let sum: i64 = completed.iter().map(|s| i64::from(s.total_points)).sum();
            let average = Decimal::from(sum) / Decimal::from(completed.len());
            Some(average.round_dp(2))
        };

        // first maximum wins, so earlier entries keep ties
        let best_entry = summaries
            .iter()
            .fold(None::<&EntrySummary>, |best, s| match best {
                Some(b) if b.total_points >= s.total_points => Some(b),
                _ => Some(s),
            })
            .cloned();

        let mut entries_by_event_type = BTreeMap::new();
        for summary in summaries {
            *entries_by_event_type.entry(summary.event_type).or_insert(0) += 1;
        }

        Self {
            competition_id,
            total_entries: summaries.len() as i64,
            completed_entries: completed.len() as i64,
            average_completed_points,
            best_entry,
            entries_by_event_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(event_type: EventType, total_points: i32, is_complete: bool) -> EntrySummary {
        EntrySummary {
            combined_event_id: Uuid::new_v4(),
            athlete_id: Uuid::new_v4(),
            event_type,
            total_points,
            is_complete,
        }
    }

    #[test]
    fn test_statistics_aggregate() {
        let summaries = vec![
            summary(EventType::Decathlon, 8000, true),
            summary(EventType::Decathlon, 7001, true),
            summary(EventType::Heptathlon, 9000, false),
            summary(EventType::Heptathlon, 6000, true),
        ];

        let stats = CompetitionStatistics::from_summaries(Uuid::nil(), &summaries);
        assert_eq!(stats.total_entries, 4);
        assert_eq!(stats.completed_entries, 3);
        assert_eq!(stats.average_completed_points, Some(Decimal::new(700033, 2)));
        assert_eq!(stats.best_entry.as_ref().unwrap().total_points, 9000);
        assert_eq!(stats.entries_by_event_type[&EventType::Decathlon], 2);
        assert_eq!(stats.entries_by_event_type[&EventType::Heptathlon], 2);
    }

    #[test]
    fn test_statistics_empty_competition() {
        let stats = CompetitionStatistics::from_summaries(Uuid::nil(), &[]);
        assert_eq!(stats.total_entries, 0);
        assert!(stats.average_completed_points.is_none());
        assert!(stats.best_entry.is_none());
        assert!(stats.entries_by_event_type.is_empty());
    }
}
