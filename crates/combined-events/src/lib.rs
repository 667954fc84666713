//! Scoring and entry bookkeeping for athletics combined events.
//!
//! The [`scoring`] modules are pure: they parse performances, look up discipline
//! programmes and coefficients and turn marks into points. [`services`] runs the
//! entry lifecycle over a [`repository::CombinedEventStore`] and keeps the cached
//! rankings fresh.

pub mod cache;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod scoring;
pub mod services;

pub use database::Database;
pub use error::{CombinedEventError, Result};
