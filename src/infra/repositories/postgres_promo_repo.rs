use crate::domain::{models::promo::Promo, ports::PromoRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresPromoRepo {
    pool: PgPool,
}

impl PostgresPromoRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromoRepository for PostgresPromoRepo {
    async fn list_active(&self) -> Result<Vec<Promo>, AppError> {
        sqlx::query_as::<_, Promo>(
            "SELECT * FROM promos WHERE active = TRUE ORDER BY created_at DESC",
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
