use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{LookupQuery, SignupRequest};
use crate::api::dtos::responses::{MemberView, SignupResponse};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::member::{Member, NewMemberParams};
use crate::domain::services::phone::{normalize_phone, validate_phone};
use crate::error::AppError;
use std::sync::Arc;
use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2};
use chrono::Utc;
use rand::rngs::OsRng;
use tracing::info;

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".into()));
    }
    if payload.password.len() < 8 {
        return Err(AppError::Validation("Password must be at least 8 characters".into()));
    }
    if !validate_phone(&payload.phone) {
        return Err(AppError::Validation("Invalid phone number".into()));
    }
    // Pre-printed card ids must carry the same prefix the lookup gate
    // requires, or the card could check in but never be looked up.
    if let Some(qr_id) = &payload.qr_id
        && !qr_id.to_ascii_uppercase().starts_with("GYM-") {
        return Err(AppError::Validation("QR ID must start with GYM-".into()));
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

    let member = Member::new(NewMemberParams {
        qr_id: payload.qr_id,
        phone,
        name: payload.name,
        email: payload.email,
        password_hash,
        plan: payload.plan,
        home_location: payload.home_location,
    });

    let created = state.member_repo.create(&member).await?;

    info!("Member signed up: {} ({})", created.id, created.membership_plan);

    Ok(Json(SignupResponse {
        success: true,
        member_id: created.id,
        member_name: created.name,
        message: "Account created successfully".to_string(),
    }))
}

/// Resolution order mirrors the kiosk flow: a QR id wins over a phone
/// number over an email.
pub async fn lookup_member(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LookupQuery>,
) -> Result<impl IntoResponse, AppError> {
    if query.qr_id.is_none() && query.phone.is_none() && query.email.is_none() {
        return Err(AppError::Validation("Member identifier required".into()));
    }

    let mut member = None;

    if let Some(qr_id) = &query.qr_id
        && qr_id.to_ascii_uppercase().starts_with("GYM-") {
        member = state.member_repo.find_by_id(qr_id).await?;
    }

    if member.is_none()
        && let Some(phone) = &query.phone {
        member = state.member_repo.find_by_phone(&normalize_phone(phone)).await?;
    }

    if member.is_none()
        && let Some(email) = &query.email {
        member = state.member_repo.find_by_email(email).await?;
    }

    let member = member.ok_or(AppError::NotFound("Member not found".into()))?;

    Ok(Json(serde_json::json!({
        "member": MemberView::from_member(&member, Utc::now())
    })))
}

pub async fn list_member_entries(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(member_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    ensure_self_or_staff(&user, &member_id)?;

    let entries = state.entry_repo.list_by_member(&member_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "entries": entries })))
}

pub async fn list_member_payments(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(member_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    ensure_self_or_staff(&user, &member_id)?;

    let payments = state.payment_repo.list_by_member(&member_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "payments": payments })))
}

fn ensure_self_or_staff(user: &AuthUser, member_id: &str) -> Result<(), AppError> {
    if user.0.id != member_id && !user.0.is_staff() {
        return Err(AppError::Forbidden("Cannot access another member's records".into()));
    }
    Ok(())
}
