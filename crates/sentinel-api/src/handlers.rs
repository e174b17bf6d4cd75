//! REST endpoint handlers for the control API.
//!
//! Every handler delegates to the [`RobotController`] held in
//! [`AppState`]. Handlers only translate between JSON and core types.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Service name, environment, version |
//! | `GET` | `/health` | Liveness probe |
//! | `GET` | `/robot/state` | Current robot state |
//! | `POST` | `/robot/task` | Assign a task |
//! | `POST` | `/simulate/step` | Run one tick |
//! | `GET` | `/logs/decisions` | Decision log |
//! | `GET` | `/logs/events` | Event log |
//! | `POST` | `/debug/reset` | Reset the robot (development only) |
//!
//! [`RobotController`]: sentinel_core::controller::RobotController

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use sentinel_types::TaskParameters;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /robot/task`.
#[derive(Debug, serde::Deserialize)]
pub struct TaskCreate {
    /// Identifier of the task to run.
    pub task_type: String,
    /// Optional task-specific parameters.
    #[serde(default)]
    pub parameters: Option<TaskParameters>,
}

/// Standard envelope for command endpoints.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ApiResponse {
    /// Outcome keyword (`accepted`, `success`).
    pub status: String,
    /// Human-readable message.
    pub message: Option<String>,
    /// Optional payload.
    pub data: Option<serde_json::Value>,
    /// When the response was produced.
    pub timestamp: DateTime<Utc>,
}

impl ApiResponse {
    /// An envelope with a message and no payload.
    pub fn message(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: Some(message.into()),
            data: None,
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

/// Report the service identity and environment.
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "service": state.service_name,
        "environment": state.environment_name,
        "version": state.version,
    }))
}

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ---------------------------------------------------------------------------
// Robot
// ---------------------------------------------------------------------------

/// Return the current robot state.
pub async fn get_robot_state(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.controller.state().await)
}

/// Assign a task: the robot becomes `ACTIVE` and a `TASK_ASSIGNED` event is
/// logged.
pub async fn assign_task(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TaskCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let message = format!("Task '{}' assigned", payload.task_type);
    state
        .controller
        .assign_task(payload.task_type, payload.parameters)
        .await?;

    Ok(Json(ApiResponse::message("accepted", message)))
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Run one simulation tick.
///
/// Returns `{state, event, decision, processed_at}`. Any failure inside the
/// tick is reported as a 500 with a generic error body.
pub async fn simulate_step(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state.controller.step().await?;
    Ok(Json(outcome))
}

// ---------------------------------------------------------------------------
// Logs
// ---------------------------------------------------------------------------

/// Every decision in the order it was taken.
pub async fn list_decisions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.controller.decisions())
}

/// Every event in the order it was logged.
pub async fn list_events(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.controller.events())
}

// ---------------------------------------------------------------------------
// Debug
// ---------------------------------------------------------------------------

/// Reset the robot to its initial state. Rejected with 403 outside
/// development.
pub async fn debug_reset(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    state.controller.reset().await?;
    Ok(Json(ApiResponse::message("success", "Simulation reset")))
}
