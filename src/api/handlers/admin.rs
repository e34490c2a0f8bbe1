use axum::{extract::{Query, State}, response::IntoResponse, Json};
use argon2::{password_hash::{PasswordHasher, SaltString}, Argon2};
use chrono::Utc;
use rand::rngs::OsRng;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateStaffRequest, RecentEntriesQuery};
use crate::api::dtos::responses::{MemberView, RemindersResponse};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::member::{Member, NewMemberParams};
use crate::domain::models::plan::Plan;
use crate::domain::services::phone::{normalize_phone, validate_phone};
use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_ENTRIES_LIMIT: i64 = 100;

pub async fn list_members(
    State(state): State<Arc<AppState>>,
    admin: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    ensure_admin(&admin)?;

    let now = Utc::now();
    let members: Vec<MemberView> = state.member_repo.list_all().await?
        .iter()
        .map(|m| MemberView::from_member(m, now))
        .collect();

    Ok(Json(json!({ "success": true, "members": members })))
}

pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    admin: AuthUser,
    Query(query): Query<RecentEntriesQuery>,
) -> Result<impl IntoResponse, AppError> {
    ensure_admin(&admin)?;

    let limit = query.limit.unwrap_or(DEFAULT_ENTRIES_LIMIT).clamp(1, 1000);
    let entries = state.entry_repo.list_recent(limit).await?;

    Ok(Json(json!({ "success": true, "entries": entries })))
}

pub async fn send_reminders(
    State(state): State<Arc<AppState>>,
    admin: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    ensure_admin(&admin)?;

    let count = state.reminder_service.run_sweep(Utc::now()).await?;

    Ok(Json(RemindersResponse {
        success: true,
        count,
        message: format!("{count} reminder(s) sent"),
    }))
}

/// Creates a STAFF or ADMIN account. Staff accounts are active immediately
/// and never go through the payment flow.
pub async fn create_staff(
    State(state): State<Arc<AppState>>,
    admin: AuthUser,
    Json(payload): Json<CreateStaffRequest>,
) -> Result<impl IntoResponse, AppError> {
    ensure_admin(&admin)?;

    if payload.role != "STAFF" && payload.role != "ADMIN" {
        return Err(AppError::Validation("Role must be STAFF or ADMIN".into()));
    }
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".into()));
    }
    if payload.password.len() < 8 {
        return Err(AppError::Validation("Password must be at least 8 characters".into()));
    }
    if !validate_phone(&payload.phone) {
        return Err(AppError::Validation("Invalid phone number".into()));
    }

    let phone = normalize_phone(&payload.phone);
    if state.member_repo.find_by_phone(&phone).await?.is_some() {
        return Err(AppError::Conflict("Phone number already registered".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    let mut staff = Member::new(NewMemberParams {
        qr_id: None,
        phone,
        name: payload.name,
        email: payload.email,
        password_hash,
        plan: Plan::TwelveMonth,
        home_location: None,
    });
    staff.role = payload.role;
    staff.is_active = true;

    let created = state.member_repo.create(&staff).await?;

    info!("Staff account created: {} ({})", created.id, created.role);

    Ok(Json(json!({
        "success": true,
        "member": MemberView::from_member(&created, Utc::now())
    })))
}

fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    if !user.0.is_admin() {
        return Err(AppError::Forbidden("Admin access required".into()));
    }
    Ok(())
}
