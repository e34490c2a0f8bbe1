use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2};
use rand::rngs::OsRng;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;
use tera::Tera;

use crate::config::Config;
use crate::domain::models::member::{Member, NewMemberParams};
use crate::domain::models::plan::Plan;
use crate::domain::ports::MemberRepository;
use crate::state::AppState;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::infra::payments::stripe_gateway::StripeGateway;
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::reminder::ReminderService;
use crate::infra::repositories::{
    postgres_member_repo::PostgresMemberRepo, postgres_entry_repo::PostgresEntryRepo,
    postgres_payment_repo::PostgresPaymentRepo, postgres_promo_repo::PostgresPromoRepo,
    postgres_auth_repo::PostgresAuthRepo,
    sqlite_member_repo::SqliteMemberRepo, sqlite_entry_repo::SqliteEntryRepo,
    sqlite_payment_repo::SqlitePaymentRepo, sqlite_promo_repo::SqlitePromoRepo,
    sqlite_auth_repo::SqliteAuthRepo,
};

pub fn load_templates() -> Arc<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_template("reminder.html", include_str!("../templates/reminder.html"))
        .expect("Failed to load reminder template");
    Arc::new(tera)
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
    ));

    let payment_gateway = Arc::new(StripeGateway::new(
        config.stripe_secret_key.clone(),
        config.app_base_url.clone(),
    ));

    let templates = load_templates();

    let state = if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let auth_repo = Arc::new(PostgresAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));
        let member_repo = Arc::new(PostgresMemberRepo::new(pool.clone()));
        let reminder_service = Arc::new(ReminderService::new(
            member_repo.clone(),
            email_service.clone(),
            templates.clone(),
            config.app_base_url.clone(),
        ));

        AppState {
            config: config.clone(),
            member_repo,
            entry_repo: Arc::new(PostgresEntryRepo::new(pool.clone())),
            payment_repo: Arc::new(PostgresPaymentRepo::new(pool.clone())),
            promo_repo: Arc::new(PostgresPromoRepo::new(pool.clone())),
            auth_repo,
            auth_service,
            reminder_service,
            email_service,
            payment_gateway,
            templates,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));
        let member_repo = Arc::new(SqliteMemberRepo::new(pool.clone()));
        let reminder_service = Arc::new(ReminderService::new(
            member_repo.clone(),
            email_service.clone(),
            templates.clone(),
            config.app_base_url.clone(),
        ));

        AppState {
            config: config.clone(),
            member_repo,
            entry_repo: Arc::new(SqliteEntryRepo::new(pool.clone())),
            payment_repo: Arc::new(SqlitePaymentRepo::new(pool.clone())),
            promo_repo: Arc::new(SqlitePromoRepo::new(pool.clone())),
            auth_repo,
            auth_service,
            reminder_service,
            email_service,
            payment_gateway,
            templates,
        }
    };

    ensure_admin_account(&state).await;

    state
}

/// Creates the bootstrap admin account on first startup so the admin
/// dashboard is reachable before any member exists.
pub async fn ensure_admin_account(state: &AppState) {
    let existing = state.member_repo.find_by_phone(&state.config.admin_phone).await
        .expect("Failed to query for admin account");

    if existing.is_some() {
        return;
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(state.config.admin_password.as_bytes(), &salt)
        .expect("Failed to hash admin password")
        .to_string();

    let mut admin = Member::new(NewMemberParams {
        qr_id: None,
        phone: state.config.admin_phone.clone(),
        name: "Admin User".to_string(),
        email: None,
        password_hash,
        plan: Plan::TwelveMonth,
        home_location: None,
    });
    admin.role = "ADMIN".to_string();
    admin.is_active = true;

    state.member_repo.create(&admin).await
        .expect("Failed to create admin account");

    info!("Bootstrap admin account created: {}", admin.id);
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
