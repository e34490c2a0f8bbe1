use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A payment recorded from a verified gateway notification. Append-only.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub member_id: String,
    pub member_name: String,
    pub amount_cents: i64,
    pub currency: String,
    pub plan: String,
    pub status: String,
    pub stripe_id: Option<String>,
    pub paid_at: DateTime<Utc>,
}

impl Payment {
    pub fn completed(
        member_id: String,
        member_name: String,
        amount_cents: i64,
        plan: String,
        stripe_id: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            member_id,
            member_name,
            amount_cents,
            currency: "usd".to_string(),
            plan,
            status: "COMPLETED".to_string(),
            stripe_id: Some(stripe_id),
            paid_at: Utc::now(),
        }
    }
}

/// Hosted checkout session handed back to the frontend for redirect.
#[derive(Debug, Serialize, Clone)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}
