use axum::{body::Bytes, extract::State, http::HeaderMap, response::IntoResponse, Json};
use chrono::{Duration, Utc};
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::dtos::requests::CreateCheckoutSessionRequest;
use crate::api::dtos::responses::CheckoutSessionResponse;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::payment::Payment;
use crate::domain::models::plan::Plan;
use crate::error::AppError;
use crate::infra::payments::webhook::{self, StripeCheckoutSession, StripeEvent};
use crate::state::AppState;

pub async fn create_checkout_session(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(payload): Json<CreateCheckoutSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let member = state.member_repo.find_by_id(&auth.0.id).await?
        .ok_or(AppError::NotFound("Member not found".into()))?;

    let session = state.payment_gateway
        .create_checkout_session(&member, payload.plan)
        .await?;

    info!("Checkout session {} created for member {}", session.id, member.id);

    Ok(Json(CheckoutSessionResponse {
        success: true,
        session_id: session.id,
        url: session.url,
    }))
}

/// Stripe webhook receiver. The body must stay raw bytes: the signature is
/// computed over the exact payload, so any re-serialization breaks it.
pub async fn stripe_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let sig_header = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Validation("Missing Stripe-Signature header".into()))?;

    webhook::verify_signature(&body, sig_header, &state.config.stripe_webhook_secret, Utc::now())?;

    let event: StripeEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("Malformed webhook payload: {e}")))?;

    if event.event_type != "checkout.session.completed" {
        info!("Ignoring webhook event type {}", event.event_type);
        return Ok(Json(json!({ "received": true })));
    }

    let session: StripeCheckoutSession = serde_json::from_value(event.data.object)
        .map_err(|e| AppError::Validation(format!("Malformed checkout session: {e}")))?;
    let member_id = session.client_reference_id
        .or(session.metadata.member_id)
        .ok_or(AppError::Validation("Webhook session carries no member reference".into()))?;

    let Some(mut member) = state.member_repo.find_by_id(&member_id).await? else {
        // Acknowledge so the gateway stops retrying; nothing to update.
        warn!("Webhook for unknown member {member_id}, session {}", session.id);
        return Ok(Json(json!({ "received": true })));
    };

    let plan = match session.metadata.plan.as_deref() {
        Some(p) => Plan::from_str(p)?,
        None => Plan::from_str(&member.membership_plan)?,
    };

    let now = Utc::now();
    // Renewals start from now, not from the old expiry. A lapsed member who
    // pays in month three gets a full period, not a backdated one.
    member.expiry_date = now + Duration::days(plan.duration_days());
    member.is_active = true;
    member.membership_plan = plan.as_str().to_string();
    if session.customer.is_some() {
        member.stripe_customer_id = session.customer.clone();
    }
    let member = state.member_repo.update(&member).await?;

    let payment = Payment::completed(
        member.id.clone(),
        member.name.clone(),
        session.amount_total.unwrap_or(plan.price_cents()),
        plan.as_str().to_string(),
        session.id.clone(),
    );
    state.payment_repo.create(&payment).await?;

    info!(
        "Payment recorded for member {}: plan {}, new expiry {}",
        member.id, plan, member.expiry_date
    );

    Ok(Json(json!({ "received": true })))
}
