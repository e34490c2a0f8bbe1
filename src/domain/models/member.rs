use chrono::{DateTime, Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::domain::models::plan::Plan;

/// A gym member. The row id doubles as the QR identifier printed on the
/// membership card, so check-in scans look members up by primary key.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Member {
    pub id: String,
    pub phone: String,
    pub name: String,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub membership_plan: String,
    pub join_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub is_active: bool,
    pub role: String,
    pub stripe_customer_id: Option<String>,
    pub home_location: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewMemberParams {
    pub qr_id: Option<String>,
    pub phone: String,
    pub name: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub plan: Plan,
    pub home_location: Option<String>,
}

impl Member {
    /// New signups start inactive; payment confirmation flips the flag.
    /// Expiry is always derived as join date plus the plan duration.
    pub fn new(params: NewMemberParams) -> Self {
        let now = Utc::now();
        Self {
            id: params.qr_id.unwrap_or_else(generate_qr_id),
            phone: params.phone,
            name: params.name,
            email: params.email,
            password_hash: params.password_hash,
            membership_plan: params.plan.as_str().to_string(),
            join_date: now,
            expiry_date: now + Duration::days(params.plan.duration_days()),
            is_active: false,
            role: "MEMBER".to_string(),
            stripe_customer_id: None,
            home_location: params.home_location,
            created_at: now,
        }
    }

    pub fn is_staff(&self) -> bool {
        self.role == "STAFF" || self.role == "ADMIN"
    }

    pub fn is_admin(&self) -> bool {
        self.role == "ADMIN"
    }
}

/// QR identifiers carry a recognizable prefix so lookup endpoints can tell
/// them apart from phone numbers and emails.
pub fn generate_qr_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!("GYM-{}-{}", Utc::now().timestamp_millis(), suffix.to_uppercase())
}
