use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::ranking::{RankingCache, rank_entries};
use crate::dto::ranking::RankingEntry;
use crate::dto::statistics::CompetitionStatistics;
use crate::error::{CombinedEventError, Result};
use crate::models::{
    CombinedEvent, CombinedEventDetail, Discipline, DisciplineResult, EntryTotals, EventType,
    MAX_PERFORMANCE_LEN, NewCombinedEvent, NewDisciplineResult, ResultUpdate,
};
use crate::repository::{CombinedEventStore, EntryFilter, EntryTransaction, ReferenceResolver};
use crate::scoring::{ParseError, compute_points, disciplines_for, is_plausible};

/// Entry lifecycle: registration, result submission, repair, deletion and reads.
///
/// Every write runs inside one [`EntryTransaction`]; the ranking of the touched
/// (competition, event type) pair is invalidated once the transaction commits.
#[derive(Clone)]
pub struct CombinedEventService {
    store: Arc<dyn CombinedEventStore>,
    references: Arc<dyn ReferenceResolver>,
    rankings: RankingCache,
    enforce_plausibility: bool,
}

fn log_abort<T>(outcome: Result<T>) -> Result<T> {
    if let Err(CombinedEventError::TransactionAborted(reason)) = &outcome {
        warn!(%reason, "transaction aborted");
    }
    outcome
}

impl CombinedEventService {
    pub fn new(
        store: Arc<dyn CombinedEventStore>,
        references: Arc<dyn ReferenceResolver>,
        rankings: RankingCache,
    ) -> Self {
        Self {
            store,
            references,
            rankings,
            enforce_plausibility: true,
        }
    }

    /// Enables or disables the plausibility check run before scoring a submission.
    pub fn with_plausibility_gate(mut self, enabled: bool) -> Self {
        self.enforce_plausibility = enabled;
        self
    }

    pub fn rankings(&self) -> &RankingCache {
        &self.rankings
    }

    async fn invalidate_ranking(&self, competition_id: Uuid, event_type: EventType) {
        if let Err(error) = self.rankings.invalidate(competition_id, event_type).await {
            warn!(%competition_id, %event_type, %error, "failed to invalidate ranking cache");
        }
    }

    /// Registers an athlete and creates one empty result per discipline, in day order.
    #[instrument(
        skip(self, new_entry),
        fields(
            athlete_id = %new_entry.athlete_id,
            competition_id = %new_entry.competition_id,
            event_type = %new_entry.event_type,
        )
    )]
    pub async fn create_entry(&self, new_entry: NewCombinedEvent) -> Result<CombinedEventDetail> {
        if disciplines_for(new_entry.event_type, new_entry.gender).is_empty() {
            return Err(CombinedEventError::UnknownEventType(
                new_entry.event_type.to_string(),
            ));
        }
        if !self.references.athlete_exists(new_entry.athlete_id).await? {
            return Err(CombinedEventError::NotFound);
        }
        if !self
            .references
            .competition_exists(new_entry.competition_id)
            .await?
        {
            return Err(CombinedEventError::NotFound);
        }

        let mut tx = self.store.begin().await?;
        let detail = log_abort(self.insert_entry(tx.as_mut(), &new_entry).await)?;
        log_abort(tx.commit().await)?;

        info!(
            combined_event_id = %detail.entry.combined_event_id,
            disciplines = detail.results.len(),
            "created combined event entry"
        );
        self.invalidate_ranking(new_entry.competition_id, new_entry.event_type)
            .await;

        Ok(detail)
    }

    async fn insert_entry(
        &self,
        tx: &mut dyn EntryTransaction,
        new_entry: &NewCombinedEvent,
    ) -> Result<CombinedEventDetail> {
        let entry = tx.insert_entry(new_entry).await?;

        let disciplines = disciplines_for(new_entry.event_type, new_entry.gender);
        let mut results = Vec::with_capacity(disciplines.len());
        for (day_order, &discipline) in (1i16..).zip(disciplines) {
            let new_result = NewDisciplineResult {
                discipline,
                day_order,
            };
            results.push(tx.insert_result(entry.combined_event_id, &new_result).await?);
        }

        Ok(CombinedEventDetail { entry, results })
    }

    /// Scores and stores one performance, then recomputes the entry totals atomically.
    #[instrument(skip(self, performance), fields(%combined_event_id, %discipline))]
    pub async fn update_result(
        &self,
        combined_event_id: Uuid,
        discipline: Discipline,
        performance: &str,
        wind: Option<Decimal>,
    ) -> Result<DisciplineResult> {
        let performance = performance.trim();
        if performance.chars().count() > MAX_PERFORMANCE_LEN {
            return Err(ParseError::TooLong(MAX_PERFORMANCE_LEN).into());
        }
        if self.enforce_plausibility && !is_plausible(discipline, performance) {
            warn!(performance, "rejected implausible performance");
            return Err(CombinedEventError::ImplausiblePerformance {
                discipline,
                performance: performance.to_string(),
            });
        }

        let mut tx = self.store.begin().await?;
        let (entry, result) = log_abort(
            self.write_result(tx.as_mut(), combined_event_id, discipline, performance, wind)
                .await,
        )?;
        log_abort(tx.commit().await)?;

        debug!(
            points = result.points,
            total_points = entry.total_points,
            is_complete = entry.is_complete,
            "stored discipline result"
        );
        self.invalidate_ranking(entry.competition_id, entry.event_type)
            .await;

        Ok(result)
    }

    async fn write_result(
        &self,
        tx: &mut dyn EntryTransaction,
        combined_event_id: Uuid,
        discipline: Discipline,
        performance: &str,
        wind: Option<Decimal>,
    ) -> Result<(CombinedEvent, DisciplineResult)> {
        let entry = tx.lock_entry(combined_event_id).await?;
        if !disciplines_for(entry.event_type, entry.gender).contains(&discipline) {
            return Err(CombinedEventError::DisciplineNotInEvent {
                discipline,
                event_type: entry.event_type,
            });
        }

        let points = compute_points(discipline, performance, entry.gender)?;
        let update = ResultUpdate {
            discipline,
            performance: performance.to_string(),
            points,
            wind: wind.map(|w| w.round_dp(1)),
        };
        let result = tx.update_result(combined_event_id, &update).await?;

        let totals = EntryTotals::from_results(&tx.results_for(combined_event_id).await?)?;
        let entry = tx.update_totals(combined_event_id, &totals).await?;

        Ok((entry, result))
    }

    /// Re-derives total and completion from the stored results. Writes only on change.
    #[instrument(skip(self), fields(%combined_event_id))]
    pub async fn recalculate(&self, combined_event_id: Uuid) -> Result<CombinedEvent> {
        let mut tx = self.store.begin().await?;
        let (entry, changed) =
            log_abort(self.refresh_totals(tx.as_mut(), combined_event_id).await)?;
        log_abort(tx.commit().await)?;

        if changed {
            info!(
                total_points = entry.total_points,
                is_complete = entry.is_complete,
                "repaired entry totals"
            );
            self.invalidate_ranking(entry.competition_id, entry.event_type)
                .await;
        } else {
            debug!("entry totals already consistent");
        }

        Ok(entry)
    }

    async fn refresh_totals(
        &self,
        tx: &mut dyn EntryTransaction,
        combined_event_id: Uuid,
    ) -> Result<(CombinedEvent, bool)> {
        let entry = tx.lock_entry(combined_event_id).await?;
        let totals = EntryTotals::from_results(&tx.results_for(combined_event_id).await?)?;
        if totals == entry.totals() {
            return Ok((entry, false));
        }

        let entry = tx.update_totals(combined_event_id, &totals).await?;
        Ok((entry, true))
    }

    /// Removes the entry together with all of its discipline results.
    #[instrument(skip(self), fields(%combined_event_id))]
    pub async fn delete_entry(&self, combined_event_id: Uuid) -> Result<()> {
        let mut tx = self.store.begin().await?;
        let (entry, removed) =
            log_abort(Self::remove_entry(tx.as_mut(), combined_event_id).await)?;
        log_abort(tx.commit().await)?;

        info!(results_removed = removed, "deleted combined event entry");
        self.invalidate_ranking(entry.competition_id, entry.event_type)
            .await;

        Ok(())
    }

    async fn remove_entry(
        tx: &mut dyn EntryTransaction,
        combined_event_id: Uuid,
    ) -> Result<(CombinedEvent, u64)> {
        let entry = tx.lock_entry(combined_event_id).await?;
        let removed = tx.delete_results(combined_event_id).await?;
        tx.delete_entry(combined_event_id).await?;
        Ok((entry, removed))
    }

    pub async fn get_entry(&self, combined_event_id: Uuid) -> Result<CombinedEventDetail> {
        self.store.find_entry(combined_event_id).await
    }

    pub async fn list_entries_for_competition(
        &self,
        competition_id: Uuid,
        event_type: Option<EventType>,
    ) -> Result<Vec<CombinedEvent>> {
        let filter = EntryFilter {
            competition_id,
            event_type,
        };
        self.store.find_many(&filter).await
    }

    /// Standings of one event at one competition, served from the cache when fresh.
    #[instrument(skip(self), fields(%competition_id, %event_type))]
    pub async fn ranking_for(
        &self,
        competition_id: Uuid,
        event_type: EventType,
    ) -> Result<Vec<RankingEntry>> {
        match self.rankings.get(competition_id, event_type).await {
            Ok(Some(rankings)) => return Ok(rankings),
            Ok(None) => {}
            Err(error) => warn!(%error, "ranking cache unavailable, reading from store"),
        }

        let filter = EntryFilter::competition(competition_id).with_event_type(event_type);
        let rankings = rank_entries(&self.store.find_many(&filter).await?);

        if let Err(error) = self.rankings.put(competition_id, event_type, &rankings).await {
            warn!(%error, "failed to cache ranking");
        }

        Ok(rankings)
    }

    #[instrument(skip(self), fields(%competition_id))]
    pub async fn statistics_for(&self, competition_id: Uuid) -> Result<CompetitionStatistics> {
        let summaries = self.store.entry_summaries(competition_id).await?;
        Ok(CompetitionStatistics::from_summaries(
            competition_id,
            &summaries,
        ))
    }
}
