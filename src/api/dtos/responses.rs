use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::member::Member;
use crate::domain::services::membership::{days_until_expiry, status_for, MembershipStatus};

/// Scanner kiosk contract. `success: false` still returns HTTP 200 so the
/// kiosk can render the rejection without special-casing error bodies.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_status: Option<MembershipStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_left: Option<i64>,
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub success: bool,
    pub member_id: String,
    pub member_name: String,
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionResponse {
    pub success: bool,
    pub session_id: String,
    pub url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemindersResponse {
    pub success: bool,
    pub count: u32,
    pub message: String,
}

/// Member projection safe to hand to clients: no password hash, plus the
/// computed status and days-left the dashboard renders.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub id: String,
    pub phone: String,
    pub name: String,
    pub email: Option<String>,
    pub membership_plan: String,
    pub join_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub is_active: bool,
    pub role: String,
    pub home_location: Option<String>,
    pub status: MembershipStatus,
    pub days_left: i64,
}

impl MemberView {
    pub fn from_member(member: &Member, now: DateTime<Utc>) -> Self {
        Self {
            id: member.id.clone(),
            phone: member.phone.clone(),
            name: member.name.clone(),
            email: member.email.clone(),
            membership_plan: member.membership_plan.clone(),
            join_date: member.join_date,
            expiry_date: member.expiry_date,
            is_active: member.is_active,
            role: member.role.clone(),
            home_location: member.home_location.clone(),
            status: status_for(member.expiry_date, now),
            days_left: days_until_expiry(member.expiry_date, now),
        }
    }
}
