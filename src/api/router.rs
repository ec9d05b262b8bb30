use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{booking, confirmation, discipline, health, notification};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Bookings
        .route("/api/v1/bookings", get(booking::list_bookings).post(booking::create_booking))
        .route(
            "/api/v1/bookings/{booking_id}",
            get(booking::get_booking)
                .patch(booking::update_booking)
                .delete(booking::delete_booking),
        )
        .route("/api/v1/bookings/{booking_id}/cancel", post(booking::cancel_booking))
        .route("/api/v1/bookings/{booking_id}/advance-status", post(booking::advance_status))

        // Slot availability
        .route("/api/v1/slots", get(booking::find_by_slot))

        // Disciplines
        .route(
            "/api/v1/disciplines/{discipline}",
            axum::routing::patch(discipline::update_discipline),
        )
        .route("/api/v1/disciplines/{discipline}/progress", get(discipline::get_progress))
        .route(
            "/api/v1/disciplines/{discipline}/revert-completion",
            post(discipline::revert_completion),
        )

        // Public confirmation link (one-time token, no session)
        .route("/api/v1/confirmations/{token}", get(confirmation::get_confirmation))
        .route("/api/v1/confirmations/{token}/confirm", post(confirmation::confirm))
        .route("/api/v1/confirmations/{token}/deny", post(confirmation::deny))

        // Notifications
        .route("/api/v1/notifications/{role}", get(notification::list_unread))
        .route("/api/v1/notifications/{role}/count", get(notification::count_unread))
        .route("/api/v1/notifications/{role}/ack", post(notification::acknowledge))

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
        .with_state(state)
}
