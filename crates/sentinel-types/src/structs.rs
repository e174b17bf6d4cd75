//! Core records: robot state, state patches, events, and decisions.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Action, EventType, RobotStatus};
use crate::ids::{EventId, RobotId};

/// Free-form task parameters supplied with a task assignment.
pub type TaskParameters = BTreeMap<String, serde_json::Value>;

/// Battery level of a freshly initialized robot.
pub const FULL_BATTERY: f64 = 100.0;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A point on the 2D simulation plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Create a position from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// RobotState
// ---------------------------------------------------------------------------

/// Complete mutable state of the simulated robot.
///
/// Exactly one instance exists at a time, owned by the state store.
/// `current_task` is present iff an assignment is active and is cleared
/// whenever the robot transitions to [`RobotStatus::Stopped`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RobotState {
    /// Opaque identifier, immutable after creation.
    pub id: RobotId,
    /// Current operational status.
    pub status: RobotStatus,
    /// Position on the plane.
    pub position: Position,
    /// Identifier of the active task, if any.
    pub current_task: Option<String>,
    /// Parameters of the active task, if any were supplied.
    pub task_parameters: Option<TaskParameters>,
    /// Battery charge. Informational only.
    pub battery_level: f64,
    /// Refreshed on every mutation.
    pub last_updated: DateTime<Utc>,
}

impl RobotState {
    /// The fixed initial state, stamped with the current time.
    pub fn initial() -> Self {
        Self {
            id: RobotId::default(),
            status: RobotStatus::Idle,
            position: Position::default(),
            current_task: None,
            task_parameters: None,
            battery_level: FULL_BATTERY,
            last_updated: Utc::now(),
        }
    }

    /// Apply a shallow merge: fields named by the patch are overwritten,
    /// everything else is left untouched. Does not touch `last_updated`.
    pub fn apply(&mut self, patch: RobotStatePatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(current_task) = patch.current_task {
            self.current_task = current_task;
        }
        if let Some(task_parameters) = patch.task_parameters {
            self.task_parameters = task_parameters;
        }
        if let Some(battery_level) = patch.battery_level {
            self.battery_level = battery_level;
        }
    }
}

/// A partial update to [`RobotState`].
///
/// `None` leaves the field untouched. For the nullable fields the inner
/// option is the new value, so `Some(None)` clears the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RobotStatePatch {
    /// New status.
    pub status: Option<RobotStatus>,
    /// New position.
    pub position: Option<Position>,
    /// New task (or `Some(None)` to clear it).
    pub current_task: Option<Option<String>>,
    /// New task parameters (or `Some(None)` to clear them).
    pub task_parameters: Option<Option<TaskParameters>>,
    /// New battery level.
    pub battery_level: Option<f64>,
}

impl RobotStatePatch {
    /// Set the status.
    #[must_use]
    pub fn status(mut self, status: RobotStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the position.
    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Set or clear the current task.
    #[must_use]
    pub fn current_task(mut self, task: Option<String>) -> Self {
        self.current_task = Some(task);
        self
    }

    /// Set or clear the task parameters.
    #[must_use]
    pub fn task_parameters(mut self, parameters: Option<TaskParameters>) -> Self {
        self.task_parameters = Some(parameters);
        self
    }

    /// Set the battery level.
    #[must_use]
    pub fn battery_level(mut self, level: f64) -> Self {
        self.battery_level = Some(level);
        self
    }

    /// The patch committed after a STOP decision.
    pub fn stopped() -> Self {
        Self::default()
            .status(RobotStatus::Stopped)
            .current_task(None)
    }
}

impl From<RobotState> for RobotStatePatch {
    /// Every mutable field of the state. `id` and `last_updated` are not
    /// patchable and are dropped.
    fn from(state: RobotState) -> Self {
        Self {
            status: Some(state.status),
            position: Some(state.position),
            current_task: Some(state.current_task),
            task_parameters: Some(state.task_parameters),
            battery_level: Some(state.battery_level),
        }
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// Message attached to every obstacle event.
pub const OBSTACLE_MESSAGE: &str = "obstacle detected";

/// An immutable record appended to the event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Event {
    /// Unique event identifier.
    pub id: EventId,
    /// The category of event.
    pub event_type: EventType,
    /// When the event was created.
    pub timestamp: DateTime<Utc>,
    /// Type-specific payload.
    pub details: serde_json::Value,
}

impl Event {
    /// Create an event of the given type stamped with the current time.
    pub fn new(event_type: EventType, details: serde_json::Value) -> Self {
        Self {
            id: EventId::new(),
            event_type,
            timestamp: Utc::now(),
            details,
        }
    }

    /// A `TASK_ASSIGNED` event carrying the task and its parameters.
    pub fn task_assigned(task_type: &str, parameters: Option<&TaskParameters>) -> Self {
        Self::new(
            EventType::TaskAssigned,
            serde_json::json!({
                "task_type": task_type,
                "parameters": parameters,
            }),
        )
    }

    /// An `OBSTACLE_DETECTED` event with the fixed message.
    pub fn obstacle_detected() -> Self {
        Self::new(
            EventType::ObstacleDetected,
            serde_json::json!({ "message": OBSTACLE_MESSAGE }),
        )
    }

    /// Whether this is an obstacle event.
    pub fn is_obstacle(&self) -> bool {
        self.event_type == EventType::ObstacleDetected
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// The decision engine's chosen next action.
///
/// `confidence` is a fixed per-rule constant in `[0, 1]`, not a
/// statistical score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Decision {
    /// The chosen action.
    pub action: Action,
    /// Human-readable justification.
    pub reason: String,
    /// Engineered certainty attached to the rule that fired.
    pub confidence: f64,
}

impl Decision {
    /// Create a decision.
    pub fn new(action: Action, reason: impl Into<String>, confidence: f64) -> Self {
        Self {
            action,
            reason: reason.into(),
            confidence,
        }
    }

    /// Whether the decision halts the robot.
    pub fn is_stop(&self) -> bool {
        self.action == Action::Stop
    }
}
