pub mod combined_event;
pub mod discipline;
pub mod event_type;
pub mod gender;

pub use combined_event::{
    CombinedEvent, CombinedEventDetail, DisciplineResult, EntrySummary, EntryTotals,
    MAX_PERFORMANCE_LEN, NewCombinedEvent, NewDisciplineResult, ResultUpdate,
};
pub use discipline::{Discipline, DisciplineKind, MarkUnit};
pub use event_type::{EventCategory, EventType};
pub use gender::Gender;
