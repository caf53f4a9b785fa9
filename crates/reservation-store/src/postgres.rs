use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    ListQuery, PaginatedResult, ReservationId, ReservationRecord, Result, SpecialRequestRecord,
    store::ReservationStore,
};

const SELECT_COLUMNS: &str = r#"
    id, guest_profile_id, status, check_in, check_out, room_type, assigned_room_number,
    special_requests, cancellation_reason, created_at, confirmed_at, checked_in_at,
    checked_out_at, cancelled_at
"#;

/// PostgreSQL-backed reservation store.
#[derive(Clone)]
pub struct PostgresReservationStore {
    pool: PgPool,
}

impl PostgresReservationStore {
    /// Creates a new PostgreSQL reservation store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_record(row: PgRow) -> Result<ReservationRecord> {
        let requests_json: serde_json::Value = row.try_get("special_requests")?;
        let special_requests: Vec<SpecialRequestRecord> = serde_json::from_value(requests_json)?;

        Ok(ReservationRecord {
            id: ReservationId::from_uuid(row.try_get::<Uuid, _>("id")?),
            guest_profile_id: row.try_get("guest_profile_id")?,
            status: row.try_get("status")?,
            check_in: row.try_get("check_in")?,
            check_out: row.try_get("check_out")?,
            room_type: row.try_get("room_type")?,
            assigned_room_number: row.try_get("assigned_room_number")?,
            special_requests,
            cancellation_reason: row.try_get("cancellation_reason")?,
            created_at: row.try_get("created_at")?,
            confirmed_at: row.try_get("confirmed_at")?,
            checked_in_at: row.try_get("checked_in_at")?,
            checked_out_at: row.try_get("checked_out_at")?,
            cancelled_at: row.try_get("cancelled_at")?,
        })
    }
}

#[async_trait]
impl ReservationStore for PostgresReservationStore {
    async fn upsert(&self, record: ReservationRecord) -> Result<()> {
        let special_requests = serde_json::to_value(&record.special_requests)?;

        sqlx::query(
            r#"
            INSERT INTO reservations (
                id, guest_profile_id, status, check_in, check_out, room_type,
                assigned_room_number, special_requests, cancellation_reason, created_at,
                confirmed_at, checked_in_at, checked_out_at, cancelled_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (id) DO UPDATE SET
                guest_profile_id = EXCLUDED.guest_profile_id,
                status = EXCLUDED.status,
                check_in = EXCLUDED.check_in,
                check_out = EXCLUDED.check_out,
                room_type = EXCLUDED.room_type,
                assigned_room_number = EXCLUDED.assigned_room_number,
                special_requests = EXCLUDED.special_requests,
                cancellation_reason = EXCLUDED.cancellation_reason,
                created_at = EXCLUDED.created_at,
                confirmed_at = EXCLUDED.confirmed_at,
                checked_in_at = EXCLUDED.checked_in_at,
                checked_out_at = EXCLUDED.checked_out_at,
                cancelled_at = EXCLUDED.cancelled_at
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.guest_profile_id)
        .bind(&record.status)
        .bind(record.check_in)
        .bind(record.check_out)
        .bind(&record.room_type)
        .bind(&record.assigned_room_number)
        .bind(special_requests)
        .bind(&record.cancellation_reason)
        .bind(record.created_at)
        .bind(record.confirmed_at)
        .bind(record.checked_in_at)
        .bind(record.checked_out_at)
        .bind(record.cancelled_at)
        .execute(&self.pool)
        .await?;

        metrics::counter!("reservation_store_upserts_total").increment(1);
        tracing::debug!(reservation_id = %record.id, status = %record.status, "reservation upserted");

        Ok(())
    }

    async fn find(&self, id: ReservationId) -> Result<Option<ReservationRecord>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM reservations WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_record).transpose()
    }

    async fn list(&self, query: ListQuery) -> Result<PaginatedResult<ReservationRecord>> {
        const FILTER: &str = r#"
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR room_type = $2)
              AND ($3::text IS NULL OR guest_profile_id = $3)
        "#;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM reservations {FILTER}"))
            .bind(&query.status)
            .bind(&query.room_type)
            .bind(&query.guest_profile_id)
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM reservations {FILTER} \
             ORDER BY created_at DESC, id DESC LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query(&sql)
            .bind(&query.status)
            .bind(&query.room_type)
            .bind(&query.guest_profile_id)
            .bind(i64::try_from(query.pagination.per_page).unwrap_or(i64::MAX))
            .bind(i64::try_from(query.pagination.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        let items = rows
            .into_iter()
            .map(Self::row_to_record)
            .collect::<Result<Vec<_>>>()?;

        Ok(PaginatedResult::new(
            items,
            total as usize,
            query.pagination,
        ))
    }

    async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservations")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }
}
