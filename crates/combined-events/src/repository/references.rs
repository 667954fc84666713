use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;

/// Existence checks for the athlete and competition an entry points at.
#[async_trait]
pub trait ReferenceResolver: Send + Sync {
    async fn athlete_exists(&self, athlete_id: Uuid) -> Result<bool>;

    async fn competition_exists(&self, competition_id: Uuid) -> Result<bool>;
}

#[derive(Clone)]
pub struct PgReferenceResolver {
    pool: PgPool,
}

impl PgReferenceResolver {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReferenceResolver for PgReferenceResolver {
    async fn athlete_exists(&self, athlete_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM athletes WHERE athlete_id = $1)",
        )
        .bind(athlete_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn competition_exists(&self, competition_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM competitions WHERE competition_id = $1)",
        )
        .bind(competition_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

/// Accepts every id. Athletes and competitions are managed elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAllReferences;

#[async_trait]
impl ReferenceResolver for AllowAllReferences {
    async fn athlete_exists(&self, _athlete_id: Uuid) -> Result<bool> {
        Ok(true)
    }

    async fn competition_exists(&self, _competition_id: Uuid) -> Result<bool> {
        Ok(true)
    }
}

/// Fixed set of known ids.
#[derive(Debug, Clone, Default)]
pub struct KnownReferences {
    athletes: HashSet<Uuid>,
    competitions: HashSet<Uuid>,
}

impl KnownReferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_athlete(mut self, athlete_id: Uuid) -> Self {
        self.athletes.insert(athlete_id);
        self
    }

    pub fn with_competition(mut self, competition_id: Uuid) -> Self {
        self.competitions.insert(competition_id);
        self
    }
}

#[async_trait]
impl ReferenceResolver for KnownReferences {
    async fn athlete_exists(&self, athlete_id: Uuid) -> Result<bool> {
        Ok(self.athletes.contains(&athlete_id))
    }

    async fn competition_exists(&self, competition_id: Uuid) -> Result<bool> {
        Ok(self.competitions.contains(&competition_id))
    }
}
