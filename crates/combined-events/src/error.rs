use thiserror::Error;

use crate::models::{Discipline, EventType, Gender};
use crate::scoring::performance::ParseError;

#[derive(Debug, Error)]
pub enum CombinedEventError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid performance: {0}")]
    Parse(#[from] ParseError),

    #[error("No scoring coefficients for {discipline} ({gender})")]
    UnknownDiscipline { discipline: Discipline, gender: Gender },

    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    #[error("Discipline {discipline} is not part of {event_type}")]
    DisciplineNotInEvent {
        discipline: Discipline,
        event_type: EventType,
    },

    #[error("Invalid gender: {0}")]
    InvalidGender(String),

    #[error("Invalid discipline: {0}")]
    InvalidDiscipline(String),

    #[error("Implausible performance '{performance}' for {discipline}")]
    ImplausiblePerformance {
        discipline: Discipline,
        performance: String,
    },

    #[error("Performance '{performance}' for {discipline} scores outside the points range")]
    PointsOutOfRange {
        discipline: Discipline,
        performance: String,
    },

    #[error("Entry total exceeds the points range")]
    TotalOutOfRange,

    #[error("Not found")]
    NotFound,

    #[error("Transaction aborted: {0}")]
    TransactionAborted(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Cache error: {0}")]
    Cache(String),
}

pub type Result<T> = std::result::Result<T, CombinedEventError>;

impl From<sqlx::Error> for CombinedEventError {
    fn from(error: sqlx::Error) -> Self {
        // 40001 serialization_failure, 40P01 deadlock_detected
        if let sqlx::Error::Database(ref db_err) = error
            && matches!(db_err.code().as_deref(), Some("40001") | Some("40P01"))
        {
            return Self::TransactionAborted(db_err.message().to_string());
        }
        Self::Database(error)
    }
}

impl CombinedEventError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            CombinedEventError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            CombinedEventError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    /// True for errors caused by the submitted data rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Parse(_)
                | Self::UnknownEventType(_)
                | Self::DisciplineNotInEvent { .. }
                | Self::InvalidGender(_)
                | Self::InvalidDiscipline(_)
                | Self::ImplausiblePerformance { .. }
                | Self::PointsOutOfRange { .. }
                | Self::TotalOutOfRange
        )
    }
}
