use serde::Deserialize;

use crate::domain::models::plan::Plan;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub plan: Plan,
    pub password: String,
    /// Pre-generated card id from the kiosk flow; generated server-side when absent.
    pub qr_id: Option<String>,
    pub home_location: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateEntryRequest {
    pub qr_id: String,
    pub location: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    /// Phone number (any accepted format) or email address.
    pub identifier: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateCheckoutSessionRequest {
    pub plan: Plan,
}

#[derive(Deserialize)]
pub struct CreateStaffRequest {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub password: String,
    /// "STAFF" or "ADMIN".
    pub role: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupQuery {
    pub qr_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct RecentEntriesQuery {
    pub limit: Option<i64>,
}
