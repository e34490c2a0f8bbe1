use crate::domain::{models::member::Member, ports::MemberRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

pub struct PostgresMemberRepo {
    pool: PgPool,
}

impl PostgresMemberRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepo {
    async fn create(&self, member: &Member) -> Result<Member, AppError> {
        sqlx::query_as::<_, Member>(
            "INSERT INTO members (id, phone, name, email, password_hash, membership_plan, join_date, expiry_date, is_active, role, stripe_customer_id, home_location, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING *",
        )
            .bind(&member.id)
            .bind(&member.phone)
            .bind(&member.name)
            .bind(&member.email)
            .bind(&member.password_hash)
            .bind(&member.membership_plan)
            .bind(member.join_date)
            .bind(member.expiry_date)
            .bind(member.is_active)
            .bind(&member.role)
            .bind(&member.stripe_customer_id)
            .bind(&member.home_location)
            .bind(member.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Member>, AppError> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Member>, AppError> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE phone = $1 LIMIT 1")
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, AppError> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE email = $1 LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<Member>, AppError> {
        sqlx::query_as::<_, Member>("SELECT * FROM members ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, member: &Member) -> Result<Member, AppError> {
        sqlx::query_as::<_, Member>(
            "UPDATE members SET phone = $1, name = $2, email = $3, password_hash = $4, membership_plan = $5, join_date = $6, expiry_date = $7, is_active = $8, role = $9, stripe_customer_id = $10, home_location = $11 WHERE id = $12 RETURNING *",
        )
            .bind(&member.phone)
            .bind(&member.name)
            .bind(&member.email)
            .bind(&member.password_hash)
            .bind(&member.membership_plan)
            .bind(member.join_date)
            .bind(member.expiry_date)
            .bind(member.is_active)
            .bind(&member.role)
            .bind(&member.stripe_customer_id)
            .bind(&member.home_location)
            .bind(&member.id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Postgres member update failed: {:?}", e);
                AppError::Database(e)
            })
    }
}
