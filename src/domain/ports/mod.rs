use crate::domain::models::{
    auth::RefreshTokenRecord,
    entry::Entry,
    member::Member,
    payment::{CheckoutSession, Payment},
    plan::Plan,
    promo::Promo,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn create(&self, member: &Member) -> Result<Member, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Member>, AppError>;
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Member>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, AppError>;
    async fn list_all(&self) -> Result<Vec<Member>, AppError>;
    async fn update(&self, member: &Member) -> Result<Member, AppError>;
}

#[async_trait]
pub trait EntryRepository: Send + Sync {
    async fn create(&self, entry: &Entry) -> Result<Entry, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Entry>, AppError>;
    async fn list_by_member(&self, member_id: &str) -> Result<Vec<Entry>, AppError>;
    async fn list_recent(&self, limit: i64) -> Result<Vec<Entry>, AppError>;
    async fn close(&self, id: &str, checkout_time: DateTime<Utc>, duration_min: i64) -> Result<Entry, AppError>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: &Payment) -> Result<Payment, AppError>;
    async fn list_by_member(&self, member_id: &str) -> Result<Vec<Payment>, AppError>;
}

#[async_trait]
pub trait PromoRepository: Send + Sync {
    async fn list_active(&self) -> Result<Vec<Promo>, AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_refresh_family(&self, family_id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_checkout_session(
        &self,
        member: &Member,
        plan: Plan,
    ) -> Result<CheckoutSession, AppError>;
}
