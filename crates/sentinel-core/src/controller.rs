//! The robot controller: the single entry point for every trigger.
//!
//! [`RobotController`] owns the [`SimulationState`] behind one async mutex,
//! so at most one tick, task assignment, or reset is in flight at a time and
//! each tick's read-simulate-commit-decide-commit sequence is atomic. The
//! audit log is appended while the lock is held, so log order follows
//! completion order.

use std::sync::Arc;

use sentinel_types::{Decision, Event, RobotState, RobotStatePatch, RobotStatus, TaskParameters};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::audit::{AuditError, AuditLog, InMemoryAuditLog};
use crate::config::{Environment, SentinelConfig};
use crate::decision::RuleEngine;
use crate::simulator::Simulator;
use crate::tick::{self, SimulationState, TickError, TickOutcome};

/// Errors from the non-tick triggers.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The operation is not allowed in the current environment.
    #[error("{operation} is disabled in {environment}")]
    Forbidden {
        /// The rejected operation.
        operation: &'static str,
        /// The environment that forbids it.
        environment: Environment,
    },

    /// Forwarding to the audit log failed.
    #[error("audit error: {source}")]
    Audit {
        /// The underlying audit error.
        #[from]
        source: AuditError,
    },
}

/// Serialized access to the robot simulation.
pub struct RobotController {
    state: Mutex<SimulationState>,
    audit: Arc<dyn AuditLog>,
    environment: Environment,
}

impl RobotController {
    /// Assemble a controller from its parts.
    pub fn new(
        state: SimulationState,
        audit: Arc<dyn AuditLog>,
        environment: Environment,
    ) -> Self {
        Self {
            state: Mutex::new(state),
            audit,
            environment,
        }
    }

    /// Build the production controller: rule engine, configured simulator,
    /// in-memory audit log.
    pub fn from_config(config: &SentinelConfig) -> Self {
        let state = SimulationState::new(
            Simulator::from_config(&config.simulation),
            Box::new(RuleEngine::new()),
        );
        Self::new(
            state,
            Arc::new(InMemoryAuditLog::new()),
            config.service.environment(),
        )
    }

    /// The environment this controller enforces policy for.
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// A copy of the current robot state.
    pub async fn state(&self) -> RobotState {
        self.state.lock().await.store.get()
    }

    /// Activate the robot with a task and log a `TASK_ASSIGNED` event.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Audit`] if the event cannot be logged. The
    /// state update is kept even then.
    pub async fn assign_task(
        &self,
        task_type: String,
        parameters: Option<TaskParameters>,
    ) -> Result<Event, ControllerError> {
        let mut guard = self.state.lock().await;

        let event = Event::task_assigned(&task_type, parameters.as_ref());
        guard.store.update(
            RobotStatePatch::default()
                .status(RobotStatus::Active)
                .current_task(Some(task_type.clone()))
                .task_parameters(parameters),
        );
        self.audit.append_event(event.clone())?;

        info!(task_type, "Task assigned");
        Ok(event)
    }

    /// Run one simulation tick.
    ///
    /// # Errors
    ///
    /// Returns [`TickError`] if the tick fails. The store keeps whatever was
    /// committed before the failure.
    pub async fn step(&self) -> Result<TickOutcome, TickError> {
        let mut guard = self.state.lock().await;
        tick::run_tick(&mut guard, self.audit.as_ref())
    }

    /// Reinitialize the robot state. Only allowed in development.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Forbidden`] outside development; the state
    /// is left untouched.
    pub async fn reset(&self) -> Result<(), ControllerError> {
        if !self.environment.is_development() {
            warn!(environment = %self.environment, "Reset rejected");
            return Err(ControllerError::Forbidden {
                operation: "reset",
                environment: self.environment,
            });
        }

        self.state.lock().await.store.reset();
        info!("Simulation reset");
        Ok(())
    }

    /// All logged events in order.
    pub fn events(&self) -> Vec<Event> {
        self.audit.list_events()
    }

    /// All logged decisions in order.
    pub fn decisions(&self) -> Vec<Decision> {
        self.audit.list_decisions()
    }
}

impl core::fmt::Debug for RobotController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RobotController")
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}
