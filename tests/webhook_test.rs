use common::{ADMIN_TOKEN, PAYER, SECRET, ScriptedRail, charge_body, entry, spawn_app, wait_until};
use serde_json::{Value, json};
use splitpay::domain::split::PayerRecord;
use splitpay::interfaces::http::signature::{SIGNATURE_HEADER, sign};
use std::time::Duration;

mod common;

const LONG_DELAY: Duration = Duration::from_secs(3600);

async fn post_signed(base_url: &str, body: Vec<u8>, signature: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base_url}/api/webhook"))
        .header("content-type", "application/json")
        .header(SIGNATURE_HEADER, signature)
        .body(body)
        .send()
        .await
        .unwrap()
}

fn configured_payer() -> PayerRecord {
    PayerRecord::new(
        PAYER,
        Some(json!([
            entry(40, "gtb", "0000000001", "Rent"),
            entry(60, "opay", "0000000002", "Savings")
        ])),
    )
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app(Some(SECRET), vec![], ScriptedRail::new(), LONG_DELAY).await;
    let body: Value = reqwest::get(format!("{}/health", app.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_valid_event_is_accepted_and_scheduled() {
    let app = spawn_app(Some(SECRET), vec![configured_payer()], ScriptedRail::new(), LONG_DELAY).await;
    let body = charge_body("ref-1", PAYER, 1_000_000);
    let signature = sign(&body, SECRET);

    let response = post_signed(&app.base_url, body, &signature).await;
    assert_eq!(response.status(), 200);

    assert_eq!(app.scheduler.pending().await, vec!["ref-1".to_string()]);
    assert!(wait_until(|| !app.notifier.sent().is_empty()).await);
    let alert = &app.notifier.sent()[0];
    assert_eq!(alert.subject, "Credit Alert: NGN 10000");
    assert_eq!(
        alert.body,
        "We received NGN 10000. Your custom split will execute in 60 minutes."
    );
    // Nothing moves before the delay.
    assert!(app.rail.calls().is_empty());
}

#[tokio::test]
async fn test_invalid_signature_is_rejected() {
    let app = spawn_app(Some(SECRET), vec![configured_payer()], ScriptedRail::new(), LONG_DELAY).await;
    let body = charge_body("ref-1", PAYER, 1_000_000);

    let wrong_secret = sign(&body, "not-the-secret");
    let response = post_signed(&app.base_url, body.clone(), &wrong_secret).await;
    assert_eq!(response.status(), 400);
    assert_eq!(response.text().await.unwrap(), "Invalid Signature");

    let unsigned = reqwest::Client::new()
        .post(format!("{}/api/webhook", app.base_url))
        .body(body)
        .send()
        .await
        .unwrap();
    assert_eq!(unsigned.status(), 400);

    assert!(app.scheduler.pending().await.is_empty());
    assert!(app.notifier.sent().is_empty());
}

#[tokio::test]
async fn test_reencoded_body_is_rejected() {
    let app = spawn_app(Some(SECRET), vec![configured_payer()], ScriptedRail::new(), LONG_DELAY).await;
    let body = charge_body("ref-1", PAYER, 1_000_000);
    let signature = sign(&body, SECRET);
    let value: Value = serde_json::from_slice(&body).unwrap();
    let pretty = serde_json::to_vec_pretty(&value).unwrap();

    let response = post_signed(&app.base_url, pretty, &signature).await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_missing_secret_is_server_error() {
    let app = spawn_app(None, vec![configured_payer()], ScriptedRail::new(), LONG_DELAY).await;
    let body = charge_body("ref-1", PAYER, 1_000_000);
    let signature = sign(&body, SECRET);

    let response = post_signed(&app.base_url, body, &signature).await;
    assert_eq!(response.status(), 500);
    assert!(app.scheduler.pending().await.is_empty());
}

#[tokio::test]
async fn test_other_events_are_acknowledged_and_ignored() {
    let app = spawn_app(Some(SECRET), vec![configured_payer()], ScriptedRail::new(), LONG_DELAY).await;
    let body = serde_json::to_vec(&json!({"event": "transfer.success", "data": {}})).unwrap();
    let signature = sign(&body, SECRET);

    let response = post_signed(&app.base_url, body, &signature).await;
    assert_eq!(response.status(), 200);
    assert!(app.scheduler.pending().await.is_empty());
}

#[tokio::test]
async fn test_signed_but_malformed_payload_is_rejected() {
    let app = spawn_app(Some(SECRET), vec![], ScriptedRail::new(), LONG_DELAY).await;
    let body = br#"{"event":"charge.success","data":{"amount":"lots"}}"#.to_vec();
    let signature = sign(&body, SECRET);

    let response = post_signed(&app.base_url, body, &signature).await;
    assert_eq!(response.status(), 400);
    assert!(app.scheduler.pending().await.is_empty());
}

#[tokio::test]
async fn test_redelivered_event_is_absorbed() {
    let app = spawn_app(Some(SECRET), vec![configured_payer()], ScriptedRail::new(), LONG_DELAY).await;
    let body = charge_body("ref-1", PAYER, 1_000_000);
    let signature = sign(&body, SECRET);

    for _ in 0..3 {
        let response = post_signed(&app.base_url, body.clone(), &signature).await;
        assert_eq!(response.status(), 200);
    }
    assert_eq!(app.scheduler.pending().await, vec!["ref-1".to_string()]);
}

#[tokio::test]
async fn test_run_management_requires_admin_token() {
    let app = spawn_app(Some(SECRET), vec![configured_payer()], ScriptedRail::new(), LONG_DELAY).await;
    let body = charge_body("ref-1", PAYER, 1_000_000);
    let signature = sign(&body, SECRET);
    post_signed(&app.base_url, body, &signature).await;

    let client = reqwest::Client::new();
    let anonymous = client
        .get(format!("{}/api/runs", app.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(anonymous.status(), 401);

    let listed: Value = client
        .get(format!("{}/api/runs", app.base_url))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, json!({"pending": ["ref-1"]}));

    let cancelled = client
        .delete(format!("{}/api/runs/ref-1", app.base_url))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(cancelled.status(), 200);
    assert!(app.scheduler.pending().await.is_empty());

    let again = client
        .delete(format!("{}/api/runs/ref-1", app.base_url))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), 404);
}

#[tokio::test]
async fn test_end_to_end_split_after_delay() {
    let app = spawn_app(
        Some(SECRET),
        vec![configured_payer()],
        ScriptedRail::new(),
        Duration::from_millis(50),
    )
    .await;
    let body = charge_body("ref-1", PAYER, 1_000_000);
    let signature = sign(&body, SECRET);

    let response = post_signed(&app.base_url, body, &signature).await;
    assert_eq!(response.status(), 200);

    assert!(wait_until(|| app.notifier.sent().len() == 2).await);
    let subjects = app.notifier.subjects();
    assert!(subjects.contains(&"Credit Alert: NGN 10000".to_string()));
    assert!(subjects.contains(&"Transaction Report: NGN 10000".to_string()));

    let report = app
        .notifier
        .sent()
        .into_iter()
        .find(|n| n.subject.starts_with("Transaction Report"))
        .unwrap();
    assert_eq!(
        report.body,
        "Funds Distributed:\n- Rent (40%): NGN 4000 [Sent to gtb]\n- Savings (60%): NGN 6000 [Sent to opay]\n"
    );
    assert_eq!(app.rail.calls().len(), 4);
    assert!(app.scheduler.pending().await.is_empty());
}

#[tokio::test]
async fn test_unconfigured_payer_gets_setup_notice() {
    let app = spawn_app(
        Some(SECRET),
        vec![PayerRecord::new(PAYER, None)],
        ScriptedRail::new(),
        Duration::from_millis(10),
    )
    .await;
    let body = charge_body("ref-1", PAYER, 250_000);
    let signature = sign(&body, SECRET);
    post_signed(&app.base_url, body, &signature).await;

    assert!(wait_until(|| app.notifier.sent().len() == 2).await);
    assert!(app.notifier.subjects().contains(&"Setup Required".to_string()));
    assert!(app.rail.calls().is_empty());
}

#[tokio::test]
async fn test_redelivery_does_not_repeat_credit_alert() {
    let app = spawn_app(Some(SECRET), vec![configured_payer()], ScriptedRail::new(), LONG_DELAY).await;
    let body = charge_body("ref-1", PAYER, 1_000_000);
    let signature = sign(&body, SECRET);

    post_signed(&app.base_url, body.clone(), &signature).await;
    post_signed(&app.base_url, body, &signature).await;

    assert!(wait_until(|| !app.notifier.sent().is_empty()).await);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(app.notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_empty_secret_is_treated_as_missing() {
    let app = spawn_app(Some(""), vec![configured_payer()], ScriptedRail::new(), LONG_DELAY).await;
    let body = charge_body("ref-1", PAYER, 1_000_000);
    let signature = sign(&body, "");

    let response = post_signed(&app.base_url, body, &signature).await;
    assert_eq!(response.status(), 500);
    assert_eq!(response.text().await.unwrap(), "Secret missing");
    assert!(app.scheduler.pending().await.is_empty());
}

#[tokio::test]
async fn test_wrong_admin_token_is_unauthorized() {
    let app = spawn_app(Some(SECRET), vec![], ScriptedRail::new(), LONG_DELAY).await;
    let client = reqwest::Client::new();

    for token in ["admin-tokeN", "admin", ""] {
        let response = client
            .get(format!("{}/api/runs", app.base_url))
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 401, "token {token:?}");
    }
}
