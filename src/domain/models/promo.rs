use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Marketing banner shown on the member dashboard. Managed out of band;
/// the application only ever reads these.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Promo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
