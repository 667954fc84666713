pub mod competitions;
pub mod entries;
pub mod event_types;
pub mod scoring;
