//! Persistence seam of the combined-event core.
//!
//! Every multi-step write goes through an [`EntryTransaction`], so the write of a
//! discipline result and the recomputation of its entry's totals commit together.

pub mod memory;
pub mod postgres;
pub mod references;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    CombinedEvent, CombinedEventDetail, DisciplineResult, EntrySummary, EntryTotals, EventType,
    NewCombinedEvent, NewDisciplineResult, ResultUpdate,
};

pub use memory::MemoryCombinedEventStore;
pub use postgres::PgCombinedEventStore;
pub use references::{AllowAllReferences, KnownReferences, PgReferenceResolver, ReferenceResolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryFilter {
    pub competition_id: Uuid,
    pub event_type: Option<EventType>,
}

impl EntryFilter {
    pub fn competition(competition_id: Uuid) -> Self {
        Self {
            competition_id,
            event_type: None,
        }
    }

    pub fn with_event_type(mut self, event_type: EventType) -> Self {
        self.event_type = Some(event_type);
        self
    }
}

#[async_trait]
pub trait CombinedEventStore: Send + Sync {
    /// Opens a unit of work. Dropping the handle without committing rolls it back.
    async fn begin(&self) -> Result<Box<dyn EntryTransaction>>;

    async fn find_entry(&self, combined_event_id: Uuid) -> Result<CombinedEventDetail>;

    /// Entries matching `filter`, best total first, then oldest first.
    async fn find_many(&self, filter: &EntryFilter) -> Result<Vec<CombinedEvent>>;

    async fn entry_summaries(&self, competition_id: Uuid) -> Result<Vec<EntrySummary>>;
}

#[async_trait]
pub trait EntryTransaction: Send {
    async fn insert_entry(&mut self, new_entry: &NewCombinedEvent) -> Result<CombinedEvent>;

    async fn insert_result(
        &mut self,
        combined_event_id: Uuid,
        new_result: &NewDisciplineResult,
    ) -> Result<DisciplineResult>;

    /// Loads the entry and holds it exclusively until commit or rollback.
    async fn lock_entry(&mut self, combined_event_id: Uuid) -> Result<CombinedEvent>;

    /// Results of the entry in day order.
    async fn results_for(&mut self, combined_event_id: Uuid) -> Result<Vec<DisciplineResult>>;

    async fn update_result(
        &mut self,
        combined_event_id: Uuid,
        update: &ResultUpdate,
    ) -> Result<DisciplineResult>;

    async fn update_totals(
        &mut self,
        combined_event_id: Uuid,
        totals: &EntryTotals,
    ) -> Result<CombinedEvent>;

    async fn delete_results(&mut self, combined_event_id: Uuid) -> Result<u64>;

    async fn delete_entry(&mut self, combined_event_id: Uuid) -> Result<()>;

    async fn commit(&mut self) -> Result<()>;
}
