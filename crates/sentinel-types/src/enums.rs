//! Enumeration types for the robot simulation.
//!
//! All variants serialize in `SCREAMING_SNAKE_CASE` (`"OBSTACLE_DETECTED"`,
//! `"STOP"`, ...) which is the format the dashboard consumes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Robot status
// ---------------------------------------------------------------------------

/// Operational status of the robot.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum RobotStatus {
    /// Powered and waiting for a task.
    #[default]
    Idle,
    /// Executing an assigned task.
    Active,
    /// Halted by a STOP decision. Terminal until the next task or reset.
    Stopped,
    /// Faulted.
    Error,
}

impl RobotStatus {
    /// Whether the status forces every decision to STOP.
    pub const fn is_halted(self) -> bool {
        matches!(self, Self::Stopped | Self::Error)
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// The category of an event appended to the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
#[non_exhaustive]
pub enum EventType {
    /// A task was assigned to the robot.
    TaskAssigned,
    /// The simulator detected an obstruction in front of the robot.
    ObstacleDetected,
}

// ---------------------------------------------------------------------------
// Decisions
// ---------------------------------------------------------------------------

/// The next action chosen by the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum Action {
    /// Halt immediately.
    Stop,
    /// Keep moving along the current task.
    Move,
    /// Do nothing.
    Idle,
}
