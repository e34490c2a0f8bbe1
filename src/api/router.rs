use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{admin, auth, checkin, health, member, payment, promo};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Public
        .route("/api/v1/signup", post(member::signup))
        .route("/api/v1/members/lookup", get(member::lookup_member))
        .route("/api/v1/promos", get(promo::list_promos))

        // Member self-service
        .route("/api/v1/members/{member_id}/entries", get(member::list_member_entries))
        .route("/api/v1/members/{member_id}/payments", get(member::list_member_payments))
        .route("/api/v1/payments/checkout-session", post(payment::create_checkout_session))

        // Check-in desk
        .route("/api/v1/entries/validate", post(checkin::validate_entry))
        .route("/api/v1/entries/{entry_id}/checkout", post(checkin::checkout_entry))

        // Admin dashboard
        .route("/api/v1/admin/members", get(admin::list_members).post(admin::create_staff))
        .route("/api/v1/admin/entries", get(admin::list_entries))
        .route("/api/v1/admin/send-reminders", post(admin::send_reminders))

        // Gateway callbacks
        .route("/api/v1/webhooks/stripe", post(payment::stripe_webhook))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        member_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
