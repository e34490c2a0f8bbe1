use crate::domain::{models::payment::Payment, ports::PaymentRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqlitePaymentRepo {
    pool: SqlitePool,
}

impl SqlitePaymentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for SqlitePaymentRepo {
    async fn create(&self, payment: &Payment) -> Result<Payment, AppError> {
        sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (id, member_id, member_name, amount_cents, currency, plan, status, stripe_id, paid_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&payment.id)
            .bind(&payment.member_id)
            .bind(&payment.member_name)
            .bind(payment.amount_cents)
            .bind(&payment.currency)
            .bind(&payment.plan)
            .bind(&payment.status)
            .bind(&payment.stripe_id)
            .bind(payment.paid_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_member(&self, member_id: &str) -> Result<Vec<Payment>, AppError> {
        sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE member_id = ? ORDER BY paid_at DESC",
        )
            .bind(member_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
