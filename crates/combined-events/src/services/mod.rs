pub mod combined_event;
pub mod ranking;

pub use combined_event::CombinedEventService;
pub use ranking::{RankingCache, rank_entries};
