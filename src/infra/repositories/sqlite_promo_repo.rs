use crate::domain::{models::promo::Promo, ports::PromoRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqlitePromoRepo {
    pool: SqlitePool,
}

impl SqlitePromoRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromoRepository for SqlitePromoRepo {
    async fn list_active(&self) -> Result<Vec<Promo>, AppError> {
        sqlx::query_as::<_, Promo>(
            "SELECT * FROM promos WHERE active = TRUE ORDER BY created_at DESC",
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
