//! HTTP API for the camsign status server.
//!
//! - `GET /status` returns every device's last report.
//! - `PATCH /status/{device_id}` records a report and, if the device's
//!   state changed, drives the outlet before answering.
//! - `DELETE /status` forgets every device.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Router,
};
use camsign_sync::{Reconciler, SyncError};
use camsign_types::{DeviceId, StatusReport};
use tracing::{debug, error};

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    reconciler: Arc<Reconciler>,
}

impl AppState {
    pub fn new(reconciler: Arc<Reconciler>) -> Self {
        Self { reconciler }
    }
}

/// A failed request. Every failure is reported to the client as a 500 with
/// a plain-text body; the cause is only logged.
#[derive(Debug)]
pub struct ApiError(pub SyncError);

impl<E: Into<SyncError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Request failed ({:?}): {}", self.0.kind(), self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}

async fn get_status(State(state): State<AppState>) -> Result<Response, ApiError> {
    let table = state.reconciler.snapshot().await;
    let body = serde_json::to_vec(&table)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

async fn patch_status(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let device_id = DeviceId::parse(&device_id)?;
    let report = StatusReport::from_json(&body)?;
    debug!("Report from {}: camera_on={}", device_id, report.camera_on);

    state.reconciler.report(device_id, report.camera_on).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_status(State(state): State<AppState>) -> StatusCode {
    state.reconciler.clear().await;
    StatusCode::NO_CONTENT
}

/// Build the HTTP API router over the given reconciler.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(get_status).delete(delete_status))
        .route("/status/{device_id}", patch(patch_status))
        .with_state(state)
}
