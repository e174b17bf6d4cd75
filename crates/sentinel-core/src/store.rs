//! The robot state store.
//!
//! [`StateStore`] owns the single [`RobotState`] instance. Reads hand out
//! independent copies; writes are shallow merges that refresh
//! `last_updated`. The store performs no validation: callers are trusted.
//!
//! The store itself is not synchronized. The controller serializes access
//! to it so that a whole tick runs without interleaving.

use chrono::Utc;
use sentinel_types::{RobotState, RobotStatePatch};
use tracing::debug;

/// Holder of the single robot state.
#[derive(Debug, Clone)]
pub struct StateStore {
    state: RobotState,
}

impl StateStore {
    /// Create a store holding the fixed initial state.
    pub fn new() -> Self {
        Self {
            state: RobotState::initial(),
        }
    }

    /// Return an independent copy of the current state.
    pub fn get(&self) -> RobotState {
        self.state.clone()
    }

    /// Merge the named fields into the state and refresh `last_updated`.
    pub fn update(&mut self, patch: RobotStatePatch) {
        self.state.apply(patch);
        self.state.last_updated = Utc::now();
        debug!(
            status = ?self.state.status,
            task = ?self.state.current_task,
            x = self.state.position.x,
            y = self.state.position.y,
            "Robot state updated"
        );
    }

    /// Replace the state with the fixed initial state.
    pub fn reset(&mut self) {
        self.state = RobotState::initial();
        debug!(robot_id = %self.state.id, "Robot state reset");
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
