use crate::domain::{models::entry::Entry, ports::EntryRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqliteEntryRepo {
    pool: SqlitePool,
}

impl SqliteEntryRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryRepository for SqliteEntryRepo {
    async fn create(&self, entry: &Entry) -> Result<Entry, AppError> {
        sqlx::query_as::<_, Entry>(
            "INSERT INTO entries (id, member_id, member_name, location, timestamp, checkout_time, duration_min, staff_id) VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&entry.id)
            .bind(&entry.member_id)
            .bind(&entry.member_name)
            .bind(&entry.location)
            .bind(entry.timestamp)
            .bind(entry.checkout_time)
            .bind(entry.duration_min)
            .bind(&entry.staff_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Entry>, AppError> {
        sqlx::query_as::<_, Entry>("SELECT * FROM entries WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_member(&self, member_id: &str) -> Result<Vec<Entry>, AppError> {
        sqlx::query_as::<_, Entry>(
            "SELECT * FROM entries WHERE member_id = ? ORDER BY timestamp DESC",
        )
            .bind(member_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Entry>, AppError> {
        sqlx::query_as::<_, Entry>(
            "SELECT * FROM entries ORDER BY timestamp DESC LIMIT ?",
        )
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn close(&self, id: &str, checkout_time: DateTime<Utc>, duration_min: i64) -> Result<Entry, AppError> {
        sqlx::query_as::<_, Entry>(
            "UPDATE entries SET checkout_time = ?, duration_min = ? WHERE id = ? RETURNING *",
        )
            .bind(checkout_time)
            .bind(duration_min)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
