//! SentinelOps server binary.
//!
//! Wires configuration, structured logging, the robot controller, and the
//! control API together.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `sentinel-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Build the robot controller and application state
//! 4. Serve the control API

mod error;

use std::path::Path;
use std::sync::Arc;

use sentinel_api::AppState;
use sentinel_core::config::SentinelConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Path of the configuration file, relative to the working directory.
const CONFIG_PATH: &str = "sentinel-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the server
/// fails to bind or serve.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Load configuration. Logging is not up yet, so remember whether
    //    defaults were used and report it afterwards.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the config.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("sentinel-server starting");
    if !from_file {
        info!(path = CONFIG_PATH, "Config file not found, using defaults");
    }
    info!(
        service = %config.service.name,
        version = %config.service.version,
        environment = %config.service.environment,
        seed = ?config.simulation.seed,
        obstacle_probability = config.simulation.obstacle_probability,
        "Configuration loaded"
    );

    // 3. Build controller and application state.
    let state = Arc::new(AppState::from_config(&config));
    let robot = state.controller.state().await;
    info!(
        robot_id = %robot.id,
        status = ?robot.status,
        "Robot controller initialized"
    );

    // 4. Serve.
    sentinel_api::start_server(&config.server, state).await?;
    Ok(())
}

/// Load configuration from [`CONFIG_PATH`], falling back to defaults (with
/// environment overrides) when the file does not exist.
fn load_config() -> Result<(SentinelConfig, bool), AppError> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        Ok((SentinelConfig::from_file(path)?, true))
    } else {
        let mut config = SentinelConfig::default();
        config.apply_env_overrides();
        Ok((config, false))
    }
}
