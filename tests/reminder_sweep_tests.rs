mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{Duration, Utc};
use common::TestApp;
use serde_json::Value;
use tower::ServiceExt;

async fn set_expiry(app: &TestApp, member_id: &str, days: i64) {
    let mut member = app.state.member_repo.find_by_id(member_id).await.unwrap().unwrap();
    // Mid-day offset keeps the ceiling day count stable while the test runs
    member.expiry_date = Utc::now() + Duration::days(days) - Duration::hours(12);
    app.state.member_repo.update(&member).await.unwrap();
}

#[tokio::test]
async fn test_sweep_mails_only_the_7_and_1_day_cutoffs() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    let week = app.signup_member("Week Out", "012000010", Some("week@example.com"), "1-month").await;
    let tomorrow = app.signup_member("Tomorrow", "012000011", Some("tomorrow@example.com"), "1-month").await;
    let midway = app.signup_member("Midway", "012000012", Some("midway@example.com"), "1-month").await;
    let lapsed = app.signup_member("Lapsed", "012000013", Some("lapsed@example.com"), "1-month").await;

    set_expiry(&app, &week, 7).await;
    set_expiry(&app, &tomorrow, 1).await;
    set_expiry(&app, &midway, 4).await;
    set_expiry(&app, &lapsed, -3).await;

    let response = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/admin/send-reminders")
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 2);

    let sent = app.mailer.sent.lock().unwrap();
    let recipients: Vec<&str> = sent.iter().map(|(r, _)| r.as_str()).collect();
    assert!(recipients.contains(&"week@example.com"));
    assert!(recipients.contains(&"tomorrow@example.com"));
    assert_eq!(recipients.len(), 2);

    let subjects: Vec<&str> = sent.iter().map(|(_, s)| s.as_str()).collect();
    assert!(subjects.contains(&"Membership Expiring in 7 days"));
    assert!(subjects.contains(&"Membership Expiring in 1 day"));
}

#[tokio::test]
async fn test_sweep_continues_past_individual_failures() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    let broken = app.signup_member("Broken", "012000020", Some("broken@example.com"), "1-month").await;
    let fine = app.signup_member("Fine", "012000021", Some("fine@example.com"), "1-month").await;
    let no_email = app.signup_member("No Email", "012000022", None, "1-month").await;

    set_expiry(&app, &broken, 7).await;
    set_expiry(&app, &fine, 7).await;
    set_expiry(&app, &no_email, 7).await;

    app.mailer.fail_for("broken@example.com");

    let response = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/admin/send-reminders")
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .body(Body::empty())
            .unwrap(),
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    // Only the deliverable mail counts; the failure and the missing
    // address are skipped without aborting the sweep.
    assert_eq!(body["count"], 1);
    assert_eq!(app.mailer.sent_count(), 1);
    assert_eq!(app.mailer.sent.lock().unwrap()[0].0, "fine@example.com");
}
