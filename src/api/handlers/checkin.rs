use axum::{extract::{Path, State}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::ValidateEntryRequest;
use crate::api::dtos::responses::CheckinResponse;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::entry::Entry;
use crate::domain::services::membership::{days_until_expiry, status_for, MembershipStatus};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::{info, warn};

/// Validates a scanned QR code and, when the membership allows it, records
/// exactly one Entry. Rejections are 200-level responses with
/// `success: false` so the scanner kiosk can display them directly.
pub async fn validate_entry(
    State(state): State<Arc<AppState>>,
    staff: AuthUser,
    Json(payload): Json<ValidateEntryRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !staff.0.is_staff() {
        return Err(AppError::Forbidden("Staff access required".into()));
    }
    if payload.qr_id.trim().is_empty() || payload.location.trim().is_empty() {
        return Err(AppError::Validation("QR ID and location required".into()));
    }

    let member = match state.member_repo.find_by_id(&payload.qr_id).await? {
        Some(m) => m,
        None => {
            warn!("Check-in rejected at {}: unknown QR id", payload.location);
            return Ok(Json(CheckinResponse {
                success: false,
                member_name: None,
                membership_status: None,
                days_left: None,
                message: "Invalid QR code. Member not found.".to_string(),
            }));
        }
    };

    let now = Utc::now();
    let status = status_for(member.expiry_date, now);
    let days_left = days_until_expiry(member.expiry_date, now);

    if status == MembershipStatus::Expired {
        warn!("Check-in rejected for {}: membership expired {} days ago", member.id, -days_left);
        return Ok(Json(CheckinResponse {
            success: false,
            member_name: Some(member.name),
            membership_status: Some(status),
            days_left: Some(days_left),
            message: "Membership expired. Please renew to access the gym.".to_string(),
        }));
    }

    let entry = Entry::new(
        member.id.clone(),
        member.name.clone(),
        payload.location.clone(),
        Some(staff.0.id.clone()),
    );
    state.entry_repo.create(&entry).await?;

    info!("Check-in recorded: member {} at {}", member.id, payload.location);

    Ok(Json(CheckinResponse {
        success: true,
        member_name: Some(member.name.clone()),
        membership_status: Some(status),
        days_left: Some(days_left),
        message: format!("Welcome, {}! Entry logged successfully.", member.name),
    }))
}

/// Closes an open entry with the checkout time and visit duration in
/// whole minutes, rounded up.
pub async fn checkout_entry(
    State(state): State<Arc<AppState>>,
    staff: AuthUser,
    Path(entry_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !staff.0.is_staff() {
        return Err(AppError::Forbidden("Staff access required".into()));
    }

    let entry = state.entry_repo.find_by_id(&entry_id).await?
        .ok_or(AppError::NotFound("Entry not found".into()))?;

    if entry.checkout_time.is_some() {
        return Err(AppError::Conflict("Entry already checked out".into()));
    }

    let now = Utc::now();
    let elapsed_secs = now.signed_duration_since(entry.timestamp).num_seconds().max(0);
    let duration_min = if elapsed_secs % 60 > 0 { elapsed_secs / 60 + 1 } else { elapsed_secs / 60 };

    let closed = state.entry_repo.close(&entry.id, now, duration_min).await?;

    info!("Checkout recorded: entry {} after {} min", closed.id, duration_min);

    Ok(Json(closed))
}
