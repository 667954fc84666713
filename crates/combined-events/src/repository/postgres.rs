use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use super::{CombinedEventStore, EntryFilter, EntryTransaction};
use crate::error::{CombinedEventError, Result};
use crate::models::{
    CombinedEvent, CombinedEventDetail, DisciplineResult, EntrySummary, EntryTotals,
    NewCombinedEvent, NewDisciplineResult, ResultUpdate,
};

#[derive(FromRow)]
struct EntryRow {
    combined_event_id: Uuid,
    event_type: String,
    gender: String,
    athlete_id: Uuid,
    competition_id: Uuid,
    total_points: i32,
    is_complete: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl TryFrom<EntryRow> for CombinedEvent {
    type Error = CombinedEventError;

    fn try_from(row: EntryRow) -> Result<Self> {
        Ok(Self {
            combined_event_id: row.combined_event_id,
            event_type: row.event_type.parse()?,
            gender: row.gender.parse()?,
            athlete_id: row.athlete_id,
            competition_id: row.competition_id,
            total_points: row.total_points,
            is_complete: row.is_complete,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct ResultRow {
    result_id: Uuid,
    combined_event_id: Uuid,
    discipline: String,
    day_order: i16,
    performance: Option<String>,
    points: i32,
    wind: Option<Decimal>,
    is_valid: bool,
    updated_at: NaiveDateTime,
}

impl TryFrom<ResultRow> for DisciplineResult {
    type Error = CombinedEventError;

    fn try_from(row: ResultRow) -> Result<Self> {
        Ok(Self {
            result_id: row.result_id,
            combined_event_id: row.combined_event_id,
            discipline: row.discipline.parse()?,
            day_order: row.day_order,
            performance: row.performance,
            points: row.points,
            wind: row.wind,
            is_valid: row.is_valid,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct SummaryRow {
    combined_event_id: Uuid,
    athlete_id: Uuid,
    event_type: String,
    total_points: i32,
    is_complete: bool,
}

fn map_write_error(error: sqlx::Error) -> CombinedEventError {
    let error = CombinedEventError::from(error);
    if error.is_foreign_key_violation() {
        return CombinedEventError::ConstraintViolation(
            "Athlete or competition does not exist".to_string(),
        );
    }
    if error.is_unique_violation() {
        return CombinedEventError::ConstraintViolation(
            "Athlete is already registered in this event".to_string(),
        );
    }
    error
}

/// PostgreSQL-backed store; every unit of work runs at SERIALIZABLE isolation.
#[derive(Clone)]
pub struct PgCombinedEventStore {
    pool: PgPool,
}

impl PgCombinedEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CombinedEventStore for PgCombinedEventStore {
    async fn begin(&self) -> Result<Box<dyn EntryTransaction>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        Ok(Box::new(PgEntryTransaction { tx: Some(tx) }))
    }

    async fn find_entry(&self, combined_event_id: Uuid) -> Result<CombinedEventDetail> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let entry = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT combined_event_id, event_type, gender, athlete_id, competition_id,
                   total_points, is_complete, created_at, updated_at
            FROM combined_events
            WHERE combined_event_id = $1
            "#,
        )
        .bind(combined_event_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CombinedEventError::NotFound)?;

        let results = sqlx::query_as::<_, ResultRow>(
            r#"
            SELECT result_id, combined_event_id, discipline, day_order, performance,
                   points, wind, is_valid, updated_at
            FROM combined_event_results
            WHERE combined_event_id = $1
            ORDER BY day_order
            "#,
        )
        .bind(combined_event_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(CombinedEventDetail {
            entry: entry.try_into()?,
            results: results
                .into_iter()
                .map(DisciplineResult::try_from)
                .collect::<Result<_>>()?,
        })
    }

    async fn find_many(&self, filter: &EntryFilter) -> Result<Vec<CombinedEvent>> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT combined_event_id, event_type, gender, athlete_id, competition_id,
                   total_points, is_complete, created_at, updated_at
            FROM combined_events
            WHERE competition_id =
            "#,
        );
        query.push_bind(filter.competition_id);

        if let Some(event_type) = filter.event_type {
            query.push(" AND event_type = ");
            query.push_bind(event_type.as_str());
        }

        query.push(" ORDER BY total_points DESC, created_at ASC");

        let rows: Vec<EntryRow> = query.build_query_as().fetch_all(&self.pool).await?;

        rows.into_iter().map(CombinedEvent::try_from).collect()
    }

    async fn entry_summaries(&self, competition_id: Uuid) -> Result<Vec<EntrySummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT combined_event_id, athlete_id, event_type, total_points, is_complete
            FROM combined_events
            WHERE competition_id = $1
            ORDER BY total_points DESC, created_at ASC
            "#,
        )
        .bind(competition_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(EntrySummary {
                    combined_event_id: row.combined_event_id,
                    athlete_id: row.athlete_id,
                    event_type: row.event_type.parse()?,
                    total_points: row.total_points,
                    is_complete: row.is_complete,
                })
            })
            .collect()
    }
}

pub struct PgEntryTransaction {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgEntryTransaction {
    fn conn(&mut self) -> Result<&mut PgConnection> {
        self.tx.as_deref_mut().ok_or_else(|| {
            CombinedEventError::TransactionAborted("transaction already finished".to_string())
        })
    }
}

#[async_trait]
impl EntryTransaction for PgEntryTransaction {
    async fn insert_entry(&mut self, new_entry: &NewCombinedEvent) -> Result<CombinedEvent> {
        let row = sqlx::query_as::<_, EntryRow>(
            r#"
            INSERT INTO combined_events (
                combined_event_id, event_type, gender, athlete_id, competition_id,
                total_points, is_complete
            )
            VALUES ($1, $2, $3, $4, $5, 0, FALSE)
            RETURNING combined_event_id, event_type, gender, athlete_id, competition_id,
                      total_points, is_complete, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_entry.event_type.as_str())
        .bind(new_entry.gender.as_str())
        .bind(new_entry.athlete_id)
        .bind(new_entry.competition_id)
        .fetch_one(self.conn()?)
        .await
        .map_err(map_write_error)?;

        row.try_into()
    }

    async fn insert_result(
        &mut self,
        combined_event_id: Uuid,
        new_result: &NewDisciplineResult,
    ) -> Result<DisciplineResult> {
        let row = sqlx::query_as::<_, ResultRow>(
            r#"
            INSERT INTO combined_event_results (
                result_id, combined_event_id, discipline, day_order, points, is_valid
            )
            VALUES ($1, $2, $3, $4, 0, FALSE)
            RETURNING result_id, combined_event_id, discipline, day_order, performance,
                      points, wind, is_valid, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(combined_event_id)
        .bind(new_result.discipline.as_str())
        .bind(new_result.day_order)
        .fetch_one(self.conn()?)
        .await
        .map_err(map_write_error)?;

        row.try_into()
    }

    async fn lock_entry(&mut self, combined_event_id: Uuid) -> Result<CombinedEvent> {
        let row = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT combined_event_id, event_type, gender, athlete_id, competition_id,
                   total_points, is_complete, created_at, updated_at
            FROM combined_events
            WHERE combined_event_id = $1
            FOR UPDATE
            "#,
        )
        .bind(combined_event_id)
        .fetch_optional(self.conn()?)
        .await?
        .ok_or(CombinedEventError::NotFound)?;

        row.try_into()
    }

    async fn results_for(&mut self, combined_event_id: Uuid) -> Result<Vec<DisciplineResult>> {
        let rows = sqlx::query_as::<_, ResultRow>(
            r#"
            SELECT result_id, combined_event_id, discipline, day_order, performance,
                   points, wind, is_valid, updated_at
            FROM combined_event_results
            WHERE combined_event_id = $1
            ORDER BY day_order
            "#,
        )
        .bind(combined_event_id)
        .fetch_all(self.conn()?)
        .await?;

        rows.into_iter().map(DisciplineResult::try_from).collect()
    }

    async fn update_result(
        &mut self,
        combined_event_id: Uuid,
        update: &ResultUpdate,
    ) -> Result<DisciplineResult> {
        let row = sqlx::query_as::<_, ResultRow>(
            r#"
            UPDATE combined_event_results
            SET
                performance = $3,
                points = $4,
                wind = $5,
                is_valid = TRUE,
                updated_at = CURRENT_TIMESTAMP
            WHERE combined_event_id = $1 AND discipline = $2
            RETURNING result_id, combined_event_id, discipline, day_order, performance,
                      points, wind, is_valid, updated_at
            "#,
        )
        .bind(combined_event_id)
        .bind(update.discipline.as_str())
        .bind(&update.performance)
        .bind(update.points)
        .bind(update.wind)
        .fetch_optional(self.conn()?)
        .await?
        .ok_or(CombinedEventError::NotFound)?;

        row.try_into()
    }

    async fn update_totals(
        &mut self,
        combined_event_id: Uuid,
        totals: &EntryTotals,
    ) -> Result<CombinedEvent> {
        let row = sqlx::query_as::<_, EntryRow>(
            r#"
            UPDATE combined_events
            SET
                total_points = $2,
                is_complete = $3,
                updated_at = CURRENT_TIMESTAMP
            WHERE combined_event_id = $1
            RETURNING combined_event_id, event_type, gender, athlete_id, competition_id,
                      total_points, is_complete, created_at, updated_at
            "#,
        )
        .bind(combined_event_id)
        .bind(totals.total_points)
        .bind(totals.is_complete)
        .fetch_optional(self.conn()?)
        .await?
        .ok_or(CombinedEventError::NotFound)?;

        row.try_into()
    }

    async fn delete_results(&mut self, combined_event_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM combined_event_results
            WHERE combined_event_id = $1
            "#,
        )
        .bind(combined_event_id)
        .execute(self.conn()?)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_entry(&mut self, combined_event_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM combined_events
            WHERE combined_event_id = $1
            "#,
        )
        .bind(combined_event_id)
        .execute(self.conn()?)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CombinedEventError::NotFound);
        }

        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        let tx = self.tx.take().ok_or_else(|| {
            CombinedEventError::TransactionAborted("transaction already finished".to_string())
        })?;
        tx.commit().await?;
        Ok(())
    }
}
