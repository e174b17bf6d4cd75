//! Rule-based decision engine.
//!
//! [`decide_next_action`] maps the robot state and an optional event to a
//! [`Decision`]. Rules are evaluated in strict priority order and the first
//! match wins:
//!
//! | # | Condition | Action | Reason | Confidence |
//! |---|-----------|--------|--------|------------|
//! | 1 | status is `ERROR` or `STOPPED` | `STOP` | robot in error or stopped state | 1.0 |
//! | 2 | event is `OBSTACLE_DETECTED` | `STOP` | obstacle detected | 0.95 |
//! | 3 | a task is set | `MOVE` | task in progress | 0.7 |
//! | 4 | otherwise | `IDLE` | no active task | 0.6 |
//!
//! Safety rules dominate task progress, which dominates the idle fallback.
//! Confidence values are fixed per rule.
//!
//! The orchestrator talks to the engine through the [`DecisionSource`]
//! trait; [`RuleEngine`] is the production source.

use sentinel_types::{Action, Decision, Event, RobotState};

/// Reason attached to rule 1.
pub const REASON_HALTED: &str = "robot in error or stopped state";
/// Reason attached to rule 2.
pub const REASON_OBSTACLE: &str = "obstacle detected";
/// Reason attached to rule 3.
pub const REASON_TASK: &str = "task in progress";
/// Reason attached to rule 4.
pub const REASON_IDLE: &str = "no active task";

/// Confidence of rule 1.
pub const CONFIDENCE_HALTED: f64 = 1.0;
/// Confidence of rule 2.
pub const CONFIDENCE_OBSTACLE: f64 = 0.95;
/// Confidence of rule 3.
pub const CONFIDENCE_TASK: f64 = 0.7;
/// Confidence of rule 4.
pub const CONFIDENCE_IDLE: f64 = 0.6;

/// Errors a decision source can report.
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    /// An internal error in the decision source.
    #[error("decision source error: {message}")]
    Internal {
        /// Description of the error.
        message: String,
    },
}

/// A source of decisions for the orchestrator.
pub trait DecisionSource: Send {
    /// Decide the next action for the given state and optional event.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionError`] if no decision could be produced.
    fn decide(&self, state: &RobotState, event: Option<&Event>) -> Result<Decision, DecisionError>;
}

/// The fixed priority-ordered rule table. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl RuleEngine {
    /// Create a new rule engine.
    pub const fn new() -> Self {
        Self
    }
}

impl DecisionSource for RuleEngine {
    fn decide(&self, state: &RobotState, event: Option<&Event>) -> Result<Decision, DecisionError> {
        Ok(decide_next_action(state, event))
    }
}

/// Apply the rule table. Pure: same inputs, same output.
pub fn decide_next_action(state: &RobotState, event: Option<&Event>) -> Decision {
    if state.status.is_halted() {
        return Decision::new(Action::Stop, REASON_HALTED, CONFIDENCE_HALTED);
    }

    if event.is_some_and(Event::is_obstacle) {
        return Decision::new(Action::Stop, REASON_OBSTACLE, CONFIDENCE_OBSTACLE);
    }

    if state.current_task.is_some() {
        return Decision::new(Action::Move, REASON_TASK, CONFIDENCE_TASK);
    }

    Decision::new(Action::Idle, REASON_IDLE, CONFIDENCE_IDLE)
}
