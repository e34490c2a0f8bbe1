use crate::domain::{models::member::Member, ports::MemberRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::error;

pub struct SqliteMemberRepo {
    pool: SqlitePool,
}

impl SqliteMemberRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepo {
    async fn create(&self, member: &Member) -> Result<Member, AppError> {
        sqlx::query_as::<_, Member>(
            "INSERT INTO members (id, phone, name, email, password_hash, membership_plan, join_date, expiry_date, is_active, role, stripe_customer_id, home_location, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
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
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Member>, AppError> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE phone = ? LIMIT 1")
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, AppError> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE email = ? LIMIT 1")
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
            "UPDATE members SET phone = ?, name = ?, email = ?, password_hash = ?, membership_plan = ?, join_date = ?, expiry_date = ?, is_active = ?, role = ?, stripe_customer_id = ?, home_location = ? WHERE id = ? RETURNING *",
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
                error!("SQLite member update failed: {:?}", e);
                AppError::Database(e)
            })
    }
}
