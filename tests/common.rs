use gym_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_member_repo::SqliteMemberRepo,
        sqlite_entry_repo::SqliteEntryRepo,
        sqlite_payment_repo::SqlitePaymentRepo,
        sqlite_promo_repo::SqlitePromoRepo,
        sqlite_auth_repo::SqliteAuthRepo,
    },
    domain::models::member::Member,
    domain::models::payment::CheckoutSession,
    domain::models::plan::Plan,
    domain::ports::{EmailService, PaymentGateway},
    domain::services::auth_service::AuthService,
    domain::services::reminder::ReminderService,
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    Router,
};
use async_trait::async_trait;
use tera::Tera;
use tower::ServiceExt;
use serde_json::Value;

/// Records every outgoing mail; recipients in `fail_for` error instead.
pub struct MockEmailService {
    pub sent: Mutex<Vec<(String, String)>>,
    pub fail_for: Mutex<HashSet<String>>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_for: Mutex::new(HashSet::new()),
        }
    }

    #[allow(dead_code)]
    pub fn fail_for(&self, recipient: &str) {
        self.fail_for.lock().unwrap().insert(recipient.to_string());
    }

    #[allow(dead_code)]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(&self, recipient: &str, subject: &str, _html_body: &str) -> Result<(), AppError> {
        if self.fail_for.lock().unwrap().contains(recipient) {
            return Err(AppError::Gateway("mock mail failure".to_string()));
        }
        self.sent.lock().unwrap().push((recipient.to_string(), subject.to_string()));
        Ok(())
    }
}

pub struct MockPaymentGateway;

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_checkout_session(
        &self,
        member: &Member,
        _plan: Plan,
    ) -> Result<CheckoutSession, AppError> {
        Ok(CheckoutSession {
            id: format!("cs_test_{}", member.id),
            url: "https://checkout.stripe.test/pay".to_string(),
        })
    }
}

#[allow(dead_code)]
pub struct AuthHeaders {
    pub access_token: String,
    pub refresh_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub fn extract_cookie(cookies: &[String], name: &str) -> String {
    let prefix = format!("{name}=");
    let cookie = cookies.iter()
        .find(|c| c.starts_with(&prefix))
        .unwrap_or_else(|| panic!("No {name} cookie returned"));
    let start = prefix.len();
    let end = cookie[start..].find(';').unwrap_or(cookie.len() - start);
    cookie[start..start + end].to_string()
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub mailer: Arc<MockEmailService>,
}

#[allow(dead_code)]
pub const WEBHOOK_SECRET: &str = "whsec_test_secret";

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let mut tera = Tera::default();
        tera.add_raw_template(
            "reminder.html",
            "<html>Mock Reminder for {{ member_name }}: {{ days_left }} {{ day_word }}</html>",
        ).unwrap();
        let templates = Arc::new(tera);

        let priv_key_pem = include_str!("../tests/keys/test_private.pem");
        let pub_key_pem = include_str!("../tests/keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            app_base_url: "http://localhost:3000".to_string(),
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            stripe_secret_key: "sk_test_dummy".to_string(),
            stripe_webhook_secret: WEBHOOK_SECRET.to_string(),
            jwt_secret_key: priv_key_pem.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
            admin_phone: "+85512000000".to_string(),
            admin_password: "admin-test-password".to_string(),
        };

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));
        let member_repo = Arc::new(SqliteMemberRepo::new(pool.clone()));
        let mailer = Arc::new(MockEmailService::new());

        let reminder_service = Arc::new(ReminderService::new(
            member_repo.clone(),
            mailer.clone(),
            templates.clone(),
            config.app_base_url.clone(),
        ));

        let state = Arc::new(AppState {
            config: config.clone(),
            member_repo,
            entry_repo: Arc::new(SqliteEntryRepo::new(pool.clone())),
            payment_repo: Arc::new(SqlitePaymentRepo::new(pool.clone())),
            promo_repo: Arc::new(SqlitePromoRepo::new(pool.clone())),
            auth_repo,
            auth_service,
            reminder_service,
            email_service: mailer.clone(),
            payment_gateway: Arc::new(MockPaymentGateway),
            templates,
        });

        gym_backend::infra::factory::ensure_admin_account(&state).await;

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            mailer,
        }
    }

    /// Signs up a member through the public endpoint and returns its QR id.
    pub async fn signup_member(&self, name: &str, phone: &str, email: Option<&str>, plan: &str) -> String {
        let payload = serde_json::json!({
            "name": name,
            "phone": phone,
            "email": email,
            "plan": plan,
            "password": "password123"
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/signup")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Signup failed in test helper: status {}", response.status());
        }

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        body_json["memberId"].as_str().expect("No memberId in signup response").to_string()
    }

    #[allow(dead_code)]
    pub async fn login(&self, identifier: &str, password: &str) -> AuthHeaders {
        let payload = serde_json::json!({
            "identifier": identifier,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token = extract_cookie(&cookies, "access_token");
        let refresh_token = extract_cookie(&cookies, "refresh_token");

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        AuthHeaders {
            access_token,
            refresh_token,
            csrf_token,
        }
    }

    /// Logs in as the bootstrap admin created by `ensure_admin_account`.
    #[allow(dead_code)]
    pub async fn login_admin(&self) -> AuthHeaders {
        self.login("+85512000000", "admin-test-password").await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
