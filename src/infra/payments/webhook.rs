//! Stripe webhook signature verification and event payloads.
//!
//! Signature header format: `t=<unix>,v1=<hex hmac>`, where the HMAC-SHA256
//! is keyed with the endpoint secret over `"<t>.<raw body>"`.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::error::AppError;

/// Events older or newer than this are rejected to limit replays.
const TOLERANCE_SECS: i64 = 300;

/// The object payload stays raw JSON so unrelated event types never fail
/// deserialization; only `checkout.session.completed` gets typed further.
#[derive(Debug, Deserialize)]
pub struct StripeEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: StripeEventData,
}

#[derive(Debug, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct StripeCheckoutSession {
    pub id: String,
    pub client_reference_id: Option<String>,
    pub customer: Option<String>,
    pub amount_total: Option<i64>,
    #[serde(default)]
    pub metadata: StripeMetadata,
}

#[derive(Debug, Default, Deserialize)]
pub struct StripeMetadata {
    pub member_id: Option<String>,
    pub member_name: Option<String>,
    pub plan: Option<String>,
}

pub fn verify_signature(
    payload: &[u8],
    sig_header: &str,
    secret: &str,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let mut timestamp = "";
    let mut signature = "";
    for part in sig_header.split(',') {
        if let Some(t) = part.strip_prefix("t=") {
            timestamp = t;
        } else if let Some(v) = part.strip_prefix("v1=") {
            signature = v;
        }
    }

    if timestamp.is_empty() || signature.is_empty() {
        return Err(AppError::Validation("Invalid Stripe-Signature header".into()));
    }

    let signed_payload = format!("{timestamp}.{}", std::str::from_utf8(payload).unwrap_or(""));
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .map_err(|_| AppError::Internal)?;
    mac.update(signed_payload.as_bytes());

    // Constant-time comparison via hmac::verify_slice
    let sig_bytes = hex::decode(signature)
        .map_err(|_| AppError::Validation("Invalid signature hex".into()))?;
    mac.verify_slice(&sig_bytes)
        .map_err(|_| AppError::Validation("Webhook signature mismatch".into()))?;

    let ts: i64 = timestamp.parse()
        .map_err(|_| AppError::Validation("Invalid signature timestamp".into()))?;
    if (now.timestamp() - ts).abs() > TOLERANCE_SECS {
        return Err(AppError::Validation("Webhook timestamp outside tolerance".into()));
    }

    Ok(())
}

/// Test helper and reference implementation of the signing side.
pub fn sign_payload(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let signed_payload = format!("{timestamp}.{}", std::str::from_utf8(payload).unwrap_or(""));
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(signed_payload.as_bytes());
    let sig = hex::encode(mac.finalize().into_bytes());
    format!("t={timestamp},v1={sig}")
}
