//! HTTP control API for the SentinelOps robot simulation.
//!
//! This crate is thin transport plumbing around
//! [`RobotController`](sentinel_core::controller::RobotController):
//!
//! - **Robot endpoints** to read state and assign tasks
//! - **Simulation endpoint** to run one tick
//! - **Log endpoints** for the event and decision history
//! - **Debug endpoint** to reset the robot (development only)
//!
//! CORS origins depend on the configured environment. Errors are rendered
//! as `{"error", "status"}` JSON bodies.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
