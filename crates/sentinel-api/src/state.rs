//! Shared application state for the control API.

use std::sync::Arc;

use sentinel_core::config::{Environment, SentinelConfig};
use sentinel_core::controller::RobotController;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The robot controller every handler delegates to.
    pub controller: Arc<RobotController>,
    /// Service name reported by `GET /`.
    pub service_name: String,
    /// Service version reported by `GET /`.
    pub version: String,
    /// Environment name reported by `GET /`, as configured.
    pub environment_name: String,
}

impl AppState {
    /// Build the controller and application state from configuration.
    pub fn from_config(config: &SentinelConfig) -> Self {
        Self {
            controller: Arc::new(RobotController::from_config(config)),
            service_name: config.service.name.clone(),
            version: config.service.version.clone(),
            environment_name: config.service.environment.clone(),
        }
    }

    /// The environment the controller enforces.
    pub fn environment(&self) -> Environment {
        self.controller.environment()
    }
}
