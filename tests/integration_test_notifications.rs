mod common;

use axum::http::StatusCode;
use common::{booking_payload, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_denial_notifies_both_roles() {
    let app = TestApp::new().await;

    let (_, booking) = app
        .create_booking(booking_payload("2024-08-19", "MANHÃ", "Algoritmos"))
        .await;
    let token = booking["confirmation_token"].as_str().unwrap();

    app.request(
        "POST",
        &format!("/api/v1/confirmations/{}/deny", token),
        Some(json!({"reason": "Agenda cheia"})),
    )
    .await;

    assert_eq!(app.unread_count("admin").await, 1);
    assert_eq!(app.unread_count("editor").await, 1);

    let (status, feed) = app.get("/api/v1/notifications/admin").await;
    assert_eq!(status, StatusCode::OK);
    let items = feed.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["booking_id"], booking["id"]);
    assert_eq!(items[0]["event_type"], "teacher-denial");
    assert_eq!(items[0]["discipline"], "Algoritmos");
    assert_eq!(items[0]["cancellation_reason"], "Agenda cheia");
}

#[tokio::test]
async fn test_acknowledge_clears_only_the_acting_role() {
    let app = TestApp::new().await;

    let (_, booking) = app
        .create_booking(booking_payload("2024-08-19", "MANHÃ", "Algoritmos"))
        .await;
    let token = booking["confirmation_token"].as_str().unwrap();
    app.request("POST", &format!("/api/v1/confirmations/{}/deny", token), None)
        .await;

    let (status, body) = app
        .request("POST", "/api/v1/notifications/admin/ack", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["acknowledged"], 1);

    assert_eq!(app.unread_count("admin").await, 0);
    assert_eq!(app.unread_count("editor").await, 1);

    let (_, feed) = app.get("/api/v1/notifications/admin").await;
    assert!(feed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_new_event_rearms_after_acknowledgement() {
    let app = TestApp::new().await;

    let (_, first) = app
        .create_booking(booking_payload("2024-08-19", "MANHÃ", "Algoritmos"))
        .await;
    let token = first["confirmation_token"].as_str().unwrap();
    app.request("POST", &format!("/api/v1/confirmations/{}/deny", token), None)
        .await;
    app.request("POST", "/api/v1/notifications/admin/ack", None)
        .await;
    assert_eq!(app.unread_count("admin").await, 0);

    let (_, second) = app
        .create_booking(booking_payload("2024-08-20", "MANHÃ", "Banco de Dados"))
        .await;
    let token = second["confirmation_token"].as_str().unwrap();
    app.request("POST", &format!("/api/v1/confirmations/{}/deny", token), None)
        .await;

    assert_eq!(app.unread_count("admin").await, 1);
    let (_, feed) = app.get("/api/v1/notifications/admin").await;
    assert_eq!(feed.as_array().unwrap().len(), 1);
    assert_eq!(feed[0]["booking_id"], second["id"]);
}

#[tokio::test]
async fn test_editor_cancellation_notifies_admin_only() {
    let app = TestApp::new().await;

    let (_, booking) = app
        .create_booking(booking_payload("2024-08-19", "MANHÃ", "Algoritmos"))
        .await;

    app.request(
        "POST",
        &format!("/api/v1/bookings/{}/cancel", booking["id"].as_str().unwrap()),
        Some(json!({"cancelled_by": "editor", "reason": "Sem roteiro"})),
    )
    .await;

    assert_eq!(app.unread_count("admin").await, 1);
    assert_eq!(app.unread_count("editor").await, 0);

    let (_, feed) = app.get("/api/v1/notifications/admin").await;
    assert_eq!(feed[0]["event_type"], "editor-cancellation");
    assert_eq!(feed[0]["cancellation_reason"], "Sem roteiro");
}

#[tokio::test]
async fn test_admin_cancellation_notifies_editor_only() {
    let app = TestApp::new().await;

    let (_, booking) = app
        .create_booking(booking_payload("2024-08-19", "MANHÃ", "Algoritmos"))
        .await;

    app.request(
        "POST",
        &format!("/api/v1/bookings/{}/cancel", booking["id"].as_str().unwrap()),
        Some(json!({"cancelled_by": "admin", "reason": "Estúdio indisponível"})),
    )
    .await;

    assert_eq!(app.unread_count("admin").await, 0);
    assert_eq!(app.unread_count("editor").await, 1);

    let (_, feed) = app.get("/api/v1/notifications/editor").await;
    assert_eq!(feed[0]["event_type"], "admin-cancellation");
}

#[tokio::test]
async fn test_upload_completion_notifies_admin() {
    let app = TestApp::new().await;

    let (_, booking) = app
        .create_booking(booking_payload("2024-08-19", "MANHÃ", "Algoritmos"))
        .await;
    let id = booking["id"].as_str().unwrap().to_string();

    app.request(
        "PATCH",
        &format!("/api/v1/bookings/{}", id),
        Some(json!({"upload_completed": true})),
    )
    .await;

    assert_eq!(app.unread_count("admin").await, 1);
    assert_eq!(app.unread_count("editor").await, 0);

    // Re-saving with the flag still set is not a new event.
    app.request("POST", "/api/v1/notifications/admin/ack", None)
        .await;
    app.request(
        "PATCH",
        &format!("/api/v1/bookings/{}", id),
        Some(json!({"upload_completed": true, "editor_notes": "ok"})),
    )
    .await;
    assert_eq!(app.unread_count("admin").await, 0);

    // Clearing and completing again re-arms the same flag.
    app.request(
        "PATCH",
        &format!("/api/v1/bookings/{}", id),
        Some(json!({"upload_completed": false})),
    )
    .await;
    app.request(
        "PATCH",
        &format!("/api/v1/bookings/{}", id),
        Some(json!({"upload_completed": true})),
    )
    .await;
    assert_eq!(app.unread_count("admin").await, 1);
}

#[tokio::test]
async fn test_deleting_a_booking_removes_its_notifications() {
    let app = TestApp::new().await;

    let (_, booking) = app
        .create_booking(booking_payload("2024-08-19", "MANHÃ", "Algoritmos"))
        .await;
    let token = booking["confirmation_token"].as_str().unwrap();
    app.request("POST", &format!("/api/v1/confirmations/{}/deny", token), None)
        .await;
    assert_eq!(app.unread_count("admin").await, 1);

    app.request(
        "DELETE",
        &format!("/api/v1/bookings/{}", booking["id"].as_str().unwrap()),
        None,
    )
    .await;

    assert_eq!(app.unread_count("admin").await, 0);
    assert_eq!(app.unread_count("editor").await, 0);
}
