use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::cache::CacheStore;
use crate::dto::ranking::RankingEntry;
use crate::error::{CombinedEventError, Result};
use crate::models::{CombinedEvent, EventType};

/// Read-through cache of the standings of one (competition, event type) pair.
#[derive(Clone)]
pub struct RankingCache {
    cache: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl RankingCache {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(120);

    pub fn new(cache: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn key(competition_id: Uuid, event_type: EventType) -> String {
        format!("ranking:{competition_id}:{event_type}")
    }

    pub async fn get(
        &self,
        competition_id: Uuid,
        event_type: EventType,
    ) -> Result<Option<Vec<RankingEntry>>> {
        let key = Self::key(competition_id, event_type);
        let Some(raw) = self.cache.get(&key).await? else {
            debug!(%key, "ranking cache miss");
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(rankings) => {
                debug!(%key, "ranking cache hit");
                Ok(Some(rankings))
            }
            Err(error) => {
                warn!(%key, %error, "discarding unreadable cached ranking");
                self.cache.delete(&key).await?;
                Ok(None)
            }
        }
    }

    pub async fn put(
        &self,
        competition_id: Uuid,
        event_type: EventType,
        rankings: &[RankingEntry],
    ) -> Result<()> {
        let value = serde_json::to_string(rankings)
            .map_err(|e| CombinedEventError::Cache(e.to_string()))?;
        self.cache
            .set(&Self::key(competition_id, event_type), value, self.ttl)
            .await
    }

    pub async fn invalidate(&self, competition_id: Uuid, event_type: EventType) -> Result<()> {
        let key = Self::key(competition_id, event_type);
        debug!(%key, "invalidating cached ranking");
        self.cache.delete(&key).await
    }
}

fn standing_order(a: &CombinedEvent, b: &CombinedEvent) -> Ordering {
    b.total_points
        .cmp(&a.total_points)
        .then(a.created_at.cmp(&b.created_at))
}

/// Standard competition ranking: equal totals share a rank and the next rank skips.
pub fn rank_entries(entries: &[CombinedEvent]) -> Vec<RankingEntry> {
    let mut ordered: Vec<&CombinedEvent> = entries.iter().collect();
    ordered.sort_by(|a, b| standing_order(a, b));

    let mut rankings: Vec<RankingEntry> = Vec::with_capacity(ordered.len());
    for (index, entry) in ordered.into_iter().enumerate() {
        let rank = match rankings.last() {
            Some(previous) if previous.total_points == entry.total_points => previous.rank,
            _ => index as i64 + 1,
        };

        rankings.push(RankingEntry {
            rank,
            combined_event_id: entry.combined_event_id,
            athlete_id: entry.athlete_id,
            gender: entry.gender,
            total_points: entry.total_points,
            is_complete: entry.is_complete,
        });
    }

    rankings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::models::Gender;

    fn entry(total_points: i32, seconds: i64) -> CombinedEvent {
        let created_at = chrono::DateTime::from_timestamp(1_700_000_000 + seconds, 0)
            .unwrap()
            .naive_utc();
        CombinedEvent {
            combined_event_id: Uuid::new_v4(),
            event_type: EventType::Decathlon,
            gender: Gender::Male,
            athlete_id: Uuid::new_v4(),
            competition_id: Uuid::nil(),
            total_points,
            is_complete: false,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn test_key_format() {
        let id = Uuid::nil();
        assert_eq!(
            RankingCache::key(id, EventType::HeptathlonIndoor),
            "ranking:00000000-0000-0000-0000-000000000000:HEPTATHLON_INDOOR"
        );
    }

    #[test]
    fn test_ties_share_a_rank() {
        let entries = vec![entry(7000, 0), entry(8000, 1), entry(7000, 2), entry(6500, 3)];
        let rankings = rank_entries(&entries);

        let ranks: Vec<i64> = rankings.iter().map(|r| r.rank).collect();
        let totals: Vec<i32> = rankings.iter().map(|r| r.total_points).collect();
        assert_eq!(ranks, vec![1, 2, 2, 4]);
        assert_eq!(totals, vec![8000, 7000, 7000, 6500]);
        assert_eq!(rankings[1].combined_event_id, entries[0].combined_event_id);
    }

    #[tokio::test]
    async fn test_cache_round_trip_and_invalidate() {
        let cache = RankingCache::new(Arc::new(MemoryCache::new()), RankingCache::DEFAULT_TTL);
        let competition_id = Uuid::new_v4();
        let rankings = rank_entries(&[entry(5000, 0)]);

        assert!(cache.get(competition_id, EventType::Decathlon).await.unwrap().is_none());
        cache
            .put(competition_id, EventType::Decathlon, &rankings)
            .await
            .unwrap();
        assert_eq!(
            cache.get(competition_id, EventType::Decathlon).await.unwrap(),
            Some(rankings)
        );
        assert!(cache.get(competition_id, EventType::Heptathlon).await.unwrap().is_none());

        cache
            .invalidate(competition_id, EventType::Decathlon)
            .await
            .unwrap();
        assert!(cache.get(competition_id, EventType::Decathlon).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unreadable_value_is_a_miss() {
        let store = Arc::new(MemoryCache::new());
        let cache = RankingCache::new(store.clone(), RankingCache::DEFAULT_TTL);
        let competition_id = Uuid::new_v4();
        store
            .set(
                &RankingCache::key(competition_id, EventType::Decathlon),
                "not json".to_string(),
                Duration::from_secs(60),
            )
            .await
            .unwrap();

        assert!(cache.get(competition_id, EventType::Decathlon).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }
}
