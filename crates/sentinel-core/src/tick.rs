//! One discrete simulation tick.
//!
//! [`run_tick`] executes the read-simulate-commit-decide-commit sequence:
//!
//! 1. **Read** -- snapshot the current robot state.
//! 2. **Simulate** -- compute the next state and an optional event.
//! 3. **Commit** -- merge the next state into the store; forward the event
//!    to the audit log if one was emitted.
//! 4. **Decide** -- ask the [`DecisionSource`] for a decision on the
//!    committed state and the event; forward it to the audit log.
//! 5. **Halt** -- on `STOP`, commit `status = STOPPED` and clear the task.
//!
//! Failures abort the tick where they happen. Nothing is rolled back:
//! whatever was committed before the failure stays committed.
//!
//! [`DecisionSource`]: crate::decision::DecisionSource

use chrono::{DateTime, Utc};
use sentinel_types::{Decision, Event, RobotState, RobotStatePatch};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::audit::{AuditError, AuditLog};
use crate::decision::{DecisionError, DecisionSource};
use crate::simulator::Simulator;
use crate::store::StateStore;

/// Errors that can abort a tick.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// The decision source failed.
    #[error("decision error: {source}")]
    Decision {
        /// The underlying decision error.
        #[from]
        source: DecisionError,
    },

    /// Forwarding to the audit log failed.
    #[error("audit error: {source}")]
    Audit {
        /// The underlying audit error.
        #[from]
        source: AuditError,
    },
}

/// Result of a completed tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickOutcome {
    /// Robot state after the tick, including any halt.
    pub state: RobotState,
    /// Event emitted by the simulator, if any.
    pub event: Option<Event>,
    /// Decision taken this tick.
    pub decision: Decision,
    /// When the tick finished.
    pub processed_at: DateTime<Utc>,
}

/// The mutable pieces a tick operates on.
pub struct SimulationState {
    /// The robot state store.
    pub store: StateStore,
    /// The per-tick simulator.
    pub simulator: Simulator,
    /// Source of decisions.
    pub decision_source: Box<dyn DecisionSource>,
    /// Number of ticks started since creation.
    pub ticks: u64,
}

impl SimulationState {
    /// Bundle a fresh store with the given simulator and decision source.
    pub fn new(simulator: Simulator, decision_source: Box<dyn DecisionSource>) -> Self {
        Self {
            store: StateStore::new(),
            simulator,
            decision_source,
            ticks: 0,
        }
    }
}

impl core::fmt::Debug for SimulationState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SimulationState")
            .field("store", &self.store)
            .field("simulator", &self.simulator)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

/// Execute one tick against `state`, forwarding entries to `audit`.
///
/// # Errors
///
/// Returns [`TickError`] if the decision source or the audit log fails.
/// State committed before the failure is left in place.
pub fn run_tick(state: &mut SimulationState, audit: &dyn AuditLog) -> Result<TickOutcome, TickError> {
    state.ticks = state.ticks.saturating_add(1);
    let tick = state.ticks;

    // --- Read ---
    let current = state.store.get();

    // --- Simulate ---
    let (next, event) = state.simulator.simulate_step(&current);

    // --- Commit ---
    state.store.update(RobotStatePatch::from(next));
    let committed = state.store.get();
    if let Some(event) = &event {
        audit.append_event(event.clone()).inspect_err(|e| {
            warn!(tick, error = %e, "Failed to forward event");
        })?;
    }

    // --- Decide ---
    let decision = state
        .decision_source
        .decide(&committed, event.as_ref())
        .inspect_err(|e| warn!(tick, error = %e, "Decision source failed"))?;
    audit.append_decision(decision.clone()).inspect_err(|e| {
        warn!(tick, error = %e, "Failed to forward decision");
    })?;

    // --- Halt ---
    if decision.is_stop() {
        debug!(tick, reason = %decision.reason, "Halting robot");
        state.store.update(RobotStatePatch::stopped());
    }

    let final_state = state.store.get();
    info!(
        tick,
        status = ?final_state.status,
        x = final_state.position.x,
        obstacle = event.is_some(),
        action = ?decision.action,
        "Tick completed"
    );

    Ok(TickOutcome {
        state: final_state,
        event,
        decision,
        processed_at: Utc::now(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sentinel_types::{Action, Position, RobotStatus};

    use super::*;
    use crate::audit::InMemoryAuditLog;
    use crate::decision::RuleEngine;

    fn sim_state(obstacle_probability: f64) -> SimulationState {
        SimulationState::new(
            Simulator::seeded(5, obstacle_probability),
            Box::new(RuleEngine::new()),
        )
    }

    fn activate(state: &mut SimulationState, task: &str) {
        state.store.update(
            RobotStatePatch::default()
                .status(RobotStatus::Active)
                .current_task(Some(task.to_owned())),
        );
    }

    #[test]
    fn idle_tick_without_obstacle() {
        let mut state = sim_state(0.0);
        let audit = InMemoryAuditLog::new();

        let outcome = run_tick(&mut state, &audit).unwrap();

        assert!(outcome.event.is_none());
        assert_eq!(outcome.decision.action, Action::Idle);
        assert_eq!(outcome.state.status, RobotStatus::Idle);
        assert_eq!(outcome.state.position, Position::new(0.0, 0.0));
        assert!(audit.list_events().is_empty());
        assert_eq!(audit.list_decisions().len(), 1);
    }

    #[test]
    fn active_tick_moves_and_keeps_task() {
        let mut state = sim_state(0.0);
        let audit = InMemoryAuditLog::new();
        activate(&mut state, "patrol");

        let outcome = run_tick(&mut state, &audit).unwrap();

        assert_eq!(outcome.decision.action, Action::Move);
        assert_eq!(outcome.state.status, RobotStatus::Active);
        assert_eq!(outcome.state.current_task.as_deref(), Some("patrol"));
        assert!((outcome.state.position.x - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn obstacle_halts_and_clears_task() {
        let mut state = sim_state(1.0);
        let audit = InMemoryAuditLog::new();
        activate(&mut state, "patrol");

        let outcome = run_tick(&mut state, &audit).unwrap();

        assert!(outcome.event.is_some());
        assert_eq!(outcome.decision.reason, "obstacle detected");
        assert_eq!(outcome.state.status, RobotStatus::Stopped);
        assert!(outcome.state.current_task.is_none());
        // The robot moved before it saw the obstacle.
        assert!((outcome.state.position.x - 1.0).abs() < f64::EPSILON);
        assert_eq!(audit.list_events().len(), 1);
        assert_eq!(state.store.get(), outcome.state);
    }

    #[test]
    fn stopped_robot_keeps_stopping() {
        let mut state = sim_state(0.0);
        let audit = InMemoryAuditLog::new();
        state
            .store
            .update(RobotStatePatch::default().status(RobotStatus::Stopped));

        let outcome = run_tick(&mut state, &audit).unwrap();

        assert_eq!(outcome.decision.reason, "robot in error or stopped state");
        assert_eq!(outcome.state.status, RobotStatus::Stopped);
    }

    #[test]
    fn tick_counter_advances() {
        let mut state = sim_state(0.0);
        let audit = InMemoryAuditLog::new();
        for _ in 0..3 {
            run_tick(&mut state, &audit).unwrap();
        }
        assert_eq!(state.ticks, 3);
    }
}
