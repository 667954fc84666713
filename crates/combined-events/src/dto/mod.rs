pub mod entry;
pub mod ranking;
pub mod scoring;
pub mod statistics;
