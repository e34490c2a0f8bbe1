use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One check-in at a gym location. Written exactly once per accepted scan;
/// the only later mutation is closing it out with a checkout time.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub member_id: String,
    pub member_name: String,
    pub location: String,
    pub timestamp: DateTime<Utc>,
    pub checkout_time: Option<DateTime<Utc>>,
    pub duration_min: Option<i64>,
    pub staff_id: Option<String>,
}

impl Entry {
    pub fn new(member_id: String, member_name: String, location: String, staff_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            member_id,
            member_name,
            location,
            timestamp: Utc::now(),
            checkout_time: None,
            duration_min: None,
            staff_id,
        }
    }
}
