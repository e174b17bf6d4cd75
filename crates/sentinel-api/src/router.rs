//! Axum router construction for the control API.
//!
//! Assembles all routes into a single [`Router`] with CORS restricted to
//! the dashboard origins of the active environment.

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use sentinel_core::config::CorsConfig;
use tower_http::cors::{AllowHeaders, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// Routes:
/// - `GET /` -- service identity
/// - `GET /health` -- liveness probe
/// - `GET /robot/state` -- current robot state
/// - `POST /robot/task` -- assign a task
/// - `POST /simulate/step` -- run one tick
/// - `GET /logs/decisions` -- decision log
/// - `GET /logs/events` -- event log
/// - `POST /debug/reset` -- development-only reset
pub fn build_router(state: Arc<AppState>, cors: &CorsConfig) -> Router {
    let cors = cors_layer(cors.origins_for(state.environment()));

    Router::new()
        // System
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Robot
        .route("/robot/state", get(handlers::get_robot_state))
        .route("/robot/task", post(handlers::assign_task))
        // Simulation
        .route("/simulate/step", post(handlers::simulate_step))
        // Logs
        .route("/logs/decisions", get(handlers::list_decisions))
        .route("/logs/events", get(handlers::list_events))
        // Debug
        .route("/debug/reset", post(handlers::debug_reset))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the given origins: GET/POST/OPTIONS, any request header,
/// credentials allowed. Origins that are not valid header values are
/// skipped with a warning.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|e| tracing::warn!(origin, error = %e, "Ignoring invalid CORS origin"))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
