use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use super::{CombinedEventStore, EntryFilter, EntryTransaction};
use crate::error::{CombinedEventError, Result};
use crate::models::{
    CombinedEvent, CombinedEventDetail, DisciplineResult, EntrySummary, EntryTotals,
    NewCombinedEvent, NewDisciplineResult, ResultUpdate,
};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    entries: HashMap<Uuid, CombinedEvent>,
    /// Results per entry, kept in day order
    results: HashMap<Uuid, Vec<DisciplineResult>>,
}

impl MemoryState {
    fn entry(&self, combined_event_id: Uuid) -> Result<&CombinedEvent> {
        self.entries
            .get(&combined_event_id)
            .ok_or(CombinedEventError::NotFound)
    }

    fn entries_ranked(&self, competition_id: Uuid) -> Vec<&CombinedEvent> {
        let mut entries: Vec<&CombinedEvent> = self
            .entries
            .values()
            .filter(|entry| entry.competition_id == competition_id)
            .collect();
        entries.sort_by(|a, b| {
            b.total_points
                .cmp(&a.total_points)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.combined_event_id.cmp(&b.combined_event_id))
        });
        entries
    }
}

/// Process-local store used by tests and by `STORE_BACKEND=memory`.
///
/// A transaction owns the whole state for its lifetime and works on a copy of it,
/// so units of work are serialized and a dropped handle leaves no trace.
#[derive(Clone, Default)]
pub struct MemoryCombinedEventStore {
    state: Arc<Mutex<MemoryState>>,
    fail_next_commit: Arc<AtomicBool>,
}

impl MemoryCombinedEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next commit fail with [`CombinedEventError::TransactionAborted`],
    /// as a serialization failure would on a database backend.
    pub fn inject_commit_failure(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl CombinedEventStore for MemoryCombinedEventStore {
    async fn begin(&self) -> Result<Box<dyn EntryTransaction>> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();

        Ok(Box::new(MemoryEntryTransaction {
            guard: Some(guard),
            working,
            fail_next_commit: self.fail_next_commit.clone(),
        }))
    }

    async fn find_entry(&self, combined_event_id: Uuid) -> Result<CombinedEventDetail> {
        let state = self.state.lock().await;
        let entry = state.entry(combined_event_id)?.clone();
        let results = state
            .results
            .get(&combined_event_id)
            .cloned()
            .unwrap_or_default();

        Ok(CombinedEventDetail { entry, results })
    }

    async fn find_many(&self, filter: &EntryFilter) -> Result<Vec<CombinedEvent>> {
        let state = self.state.lock().await;

        Ok(state
            .entries_ranked(filter.competition_id)
            .into_iter()
            .filter(|entry| filter.event_type.is_none_or(|t| entry.event_type == t))
            .cloned()
            .collect())
    }

    async fn entry_summaries(&self, competition_id: Uuid) -> Result<Vec<EntrySummary>> {
        let state = self.state.lock().await;

        Ok(state
            .entries_ranked(competition_id)
            .into_iter()
            .map(|entry| EntrySummary {
                combined_event_id: entry.combined_event_id,
                athlete_id: entry.athlete_id,
                event_type: entry.event_type,
                total_points: entry.total_points,
                is_complete: entry.is_complete,
            })
            .collect())
    }
}

pub struct MemoryEntryTransaction {
    guard: Option<OwnedMutexGuard<MemoryState>>,
    working: MemoryState,
    fail_next_commit: Arc<AtomicBool>,
}

impl MemoryEntryTransaction {
    fn state(&mut self) -> Result<&mut MemoryState> {
        if self.guard.is_none() {
            return Err(CombinedEventError::TransactionAborted(
                "transaction already finished".to_string(),
            ));
        }
        Ok(&mut self.working)
    }
}

fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

#[async_trait]
impl EntryTransaction for MemoryEntryTransaction {
    async fn insert_entry(&mut self, new_entry: &NewCombinedEvent) -> Result<CombinedEvent> {
        let state = self.state()?;

        let duplicate = state.entries.values().any(|entry| {
            entry.athlete_id == new_entry.athlete_id
                && entry.competition_id == new_entry.competition_id
                && entry.event_type == new_entry.event_type
        });
        if duplicate {
            return Err(CombinedEventError::ConstraintViolation(
                "Athlete is already registered in this event".to_string(),
            ));
        }

        let timestamp = now();
        let entry = CombinedEvent {
            combined_event_id: Uuid::new_v4(),
            event_type: new_entry.event_type,
            gender: new_entry.gender,
            athlete_id: new_entry.athlete_id,
            competition_id: new_entry.competition_id,
            total_points: 0,
            is_complete: false,
            created_at: timestamp,
            updated_at: timestamp,
        };

        state.entries.insert(entry.combined_event_id, entry.clone());
        state.results.insert(entry.combined_event_id, Vec::new());
        Ok(entry)
    }

    async fn insert_result(
        &mut self,
        combined_event_id: Uuid,
        new_result: &NewDisciplineResult,
    ) -> Result<DisciplineResult> {
        let state = self.state()?;
        state.entry(combined_event_id)?;

        let results = state.results.entry(combined_event_id).or_default();
        if results.iter().any(|r| r.discipline == new_result.discipline) {
            return Err(CombinedEventError::ConstraintViolation(format!(
                "Result for {} already exists",
                new_result.discipline
            )));
        }

        let result = DisciplineResult {
            result_id: Uuid::new_v4(),
            combined_event_id,
            discipline: new_result.discipline,
            day_order: new_result.day_order,
            performance: None,
            points: 0,
            wind: None,
            is_valid: false,
            updated_at: now(),
        };

        results.push(result.clone());
        results.sort_by_key(|r| r.day_order);
        Ok(result)
    }

    async fn lock_entry(&mut self, combined_event_id: Uuid) -> Result<CombinedEvent> {
        Ok(self.state()?.entry(combined_event_id)?.clone())
    }

    async fn results_for(&mut self, combined_event_id: Uuid) -> Result<Vec<DisciplineResult>> {
        let state = self.state()?;
        Ok(state
            .results
            .get(&combined_event_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn update_result(
        &mut self,
        combined_event_id: Uuid,
        update: &ResultUpdate,
    ) -> Result<DisciplineResult> {
        let result = self
            .state()?
            .results
            .get_mut(&combined_event_id)
            .and_then(|results| {
                results
                    .iter_mut()
                    .find(|r| r.discipline == update.discipline)
            })
            .ok_or(CombinedEventError::NotFound)?;

        result.performance = Some(update.performance.clone());
        result.points = update.points;
        result.wind = update.wind;
        result.is_valid = true;
        result.updated_at = now();

        Ok(result.clone())
    }

    async fn update_totals(
        &mut self,
        combined_event_id: Uuid,
        totals: &EntryTotals,
    ) -> Result<CombinedEvent> {
        let entry = self
            .state()?
            .entries
            .get_mut(&combined_event_id)
            .ok_or(CombinedEventError::NotFound)?;

        entry.total_points = totals.total_points;
        entry.is_complete = totals.is_complete;
        entry.updated_at = now();

        Ok(entry.clone())
    }

    async fn delete_results(&mut self, combined_event_id: Uuid) -> Result<u64> {
        let removed = self
            .state()?
            .results
            .get_mut(&combined_event_id)
            .map(std::mem::take)
            .unwrap_or_default();

        Ok(removed.len() as u64)
    }

    async fn delete_entry(&mut self, combined_event_id: Uuid) -> Result<()> {
        let state = self.state()?;
        state
            .entries
            .remove(&combined_event_id)
            .ok_or(CombinedEventError::NotFound)?;
        state.results.remove(&combined_event_id);
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        let mut guard = self.guard.take().ok_or_else(|| {
            CombinedEventError::TransactionAborted("transaction already finished".to_string())
        })?;

        if self.fail_next_commit.swap(false, Ordering::SeqCst) {
            return Err(CombinedEventError::TransactionAborted(
                "could not serialize access due to concurrent update".to_string(),
            ));
        }

        *guard = std::mem::take(&mut self.working);
        Ok(())
    }
}
