//! HTTP surface: the signed payment webhook plus health and run management.

use super::signature::{self, SIGNATURE_HEADER};
use crate::application::scheduler::{DisbursementScheduler, ScheduleOutcome};
use crate::domain::event::InboundEvent;
use crate::domain::notification::Notification;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{delete, get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Shared state handed to every handler.
pub struct AppState {
    /// Shared webhook secret. `None` or empty makes the webhook answer 500.
    pub webhook_secret: Option<String>,
    /// Bearer token for `/api/runs`. `None` disables those routes.
    pub admin_token: Option<String>,
    pub scheduler: DisbursementScheduler,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct RunsResponse {
    pub pending: Vec<String>,
}

#[derive(Serialize)]
pub struct CancelResponse {
    pub event_id: String,
    pub cancelled: bool,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

/// Always answers before any money moves: acceptance is decoupled from the
/// outcome of the scheduled run.
async fn handle_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let Some(secret) = state.webhook_secret.as_deref().filter(|s| !s.is_empty()) else {
        warn!("Webhook received but no shared secret is configured");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Secret missing");
    };

    let provided = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());
    if !signature::verify(&body, provided, Some(secret)) {
        warn!("Webhook rejected: invalid signature");
        return (StatusCode::BAD_REQUEST, "Invalid Signature");
    }

    let event = match InboundEvent::parse(&body, provided.unwrap_or_default()) {
        Ok(InboundEvent::ChargeSuccess(event)) => event,
        Ok(InboundEvent::Ignored(kind)) => {
            debug!(event = %kind, "Ignoring webhook event");
            return (StatusCode::OK, "OK");
        }
        Err(e) => {
            warn!(error = %e, "Webhook rejected: malformed payload");
            return (StatusCode::BAD_REQUEST, "Malformed payload");
        }
    };

    info!(
        event_id = %event.event_id,
        payer = %event.payer,
        amount = %event.gross_amount,
        "Credit alert"
    );

    let orchestrator = state.scheduler.orchestrator();
    let alert = Notification::credit_alert(&event, state.scheduler.delay(), orchestrator.currency());
    let notifier = orchestrator.notifier().clone();

    // Redeliveries are acknowledged without a second alert.
    if state.scheduler.schedule(event).await.0 == ScheduleOutcome::Scheduled {
        tokio::spawn(async move { notifier.notify(alert).await });
    }
    (StatusCode::OK, "OK")
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(token) = state.admin_token.as_deref() else {
        return Err(api_error(StatusCode::FORBIDDEN, "run management is disabled"));
    };
    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if presented.is_some_and(|presented| signature::tokens_match(presented, token)) {
        Ok(())
    } else {
        Err(api_error(StatusCode::UNAUTHORIZED, "invalid admin token"))
    }
}

async fn handle_list_runs(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<RunsResponse>, ApiError> {
    authorize(&state, &headers)?;
    Ok(Json(RunsResponse {
        pending: state.scheduler.pending().await,
    }))
}

async fn handle_cancel_run(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<CancelResponse>, ApiError> {
    authorize(&state, &headers)?;
    if state.scheduler.cancel(&event_id).await {
        Ok(Json(CancelResponse {
            event_id,
            cancelled: true,
        }))
    } else {
        Err(api_error(StatusCode::NOT_FOUND, "no pending run for this event"))
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/webhook", post(handle_webhook))
        .route("/api/runs", get(handle_list_runs))
        .route("/api/runs/{event_id}", delete(handle_cancel_run))
        .with_state(state)
}

pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    let app = build_router(state);
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "HTTP server started");
    }
    axum::serve(listener, app).await
}
