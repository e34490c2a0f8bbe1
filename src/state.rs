use std::sync::Arc;
use crate::domain::ports::{
    AuthRepository, EmailService, EntryRepository, MemberRepository,
    PaymentGateway, PaymentRepository, PromoRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::reminder::ReminderService;
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub member_repo: Arc<dyn MemberRepository>,
    pub entry_repo: Arc<dyn EntryRepository>,
    pub payment_repo: Arc<dyn PaymentRepository>,
    pub promo_repo: Arc<dyn PromoRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub auth_service: Arc<AuthService>,
    pub reminder_service: Arc<ReminderService>,
    pub email_service: Arc<dyn EmailService>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
    pub templates: Arc<Tera>,
}
