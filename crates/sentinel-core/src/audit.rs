//! Append-only audit log of events and decisions.
//!
//! The orchestrator forwards every emitted event and every decision to an
//! [`AuditLog`]. Entries are never mutated; order is append order.
//! [`InMemoryAuditLog`] keeps everything for the process lifetime with no
//! eviction.

use std::sync::{PoisonError, RwLock};

use sentinel_types::{Decision, Event};
use tracing::info;

/// Errors an audit log can report on append.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// The sink rejected or failed to store the entry.
    #[error("audit sink unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },
}

/// An append-only sink for events and decisions.
pub trait AuditLog: Send + Sync {
    /// Append an event.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] if the sink cannot store the entry.
    fn append_event(&self, event: Event) -> Result<(), AuditError>;

    /// Append a decision.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] if the sink cannot store the entry.
    fn append_decision(&self, decision: Decision) -> Result<(), AuditError>;

    /// All events in append order.
    fn list_events(&self) -> Vec<Event>;

    /// All decisions in append order.
    fn list_decisions(&self) -> Vec<Decision>;

    /// Drop every entry from both logs.
    fn clear(&self);
}

/// Unbounded in-memory audit log.
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    events: RwLock<Vec<Event>>,
    decisions: RwLock<Vec<Decision>>,
}

impl InMemoryAuditLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }
}

// Poisoned guards are recovered: a Vec push cannot be left half-done.
impl AuditLog for InMemoryAuditLog {
    fn append_event(&self, event: Event) -> Result<(), AuditError> {
        info!(
            event_id = %event.id,
            event_type = ?event.event_type,
            details = %event.details,
            "Event logged"
        );
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
        Ok(())
    }

    fn append_decision(&self, decision: Decision) -> Result<(), AuditError> {
        info!(
            action = ?decision.action,
            reason = %decision.reason,
            confidence = decision.confidence,
            "Decision logged"
        );
        self.decisions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(decision);
        Ok(())
    }

    fn list_events(&self) -> Vec<Event> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn list_decisions(&self) -> Vec<Decision> {
        self.decisions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear(&self) {
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.decisions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        info!("Audit log cleared");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sentinel_types::{Action, EventType};

    use super::*;

    #[test]
    fn entries_are_listed_in_append_order() {
        let log = InMemoryAuditLog::new();
        log.append_event(Event::task_assigned("patrol", None)).unwrap();
        log.append_event(Event::obstacle_detected()).unwrap();

        let types: Vec<EventType> = log.list_events().iter().map(|e| e.event_type).collect();
        assert_eq!(types, [EventType::TaskAssigned, EventType::ObstacleDetected]);
    }

    #[test]
    fn decisions_are_kept_separately() {
        let log = InMemoryAuditLog::new();
        log.append_decision(Decision::new(Action::Idle, "no active task", 0.6))
            .unwrap();
        log.append_decision(Decision::new(Action::Stop, "obstacle detected", 0.95))
            .unwrap();

        assert!(log.list_events().is_empty());
        let actions: Vec<Action> = log.list_decisions().iter().map(|d| d.action).collect();
        assert_eq!(actions, [Action::Idle, Action::Stop]);
    }

    #[test]
    fn listing_returns_snapshot() {
        let log = InMemoryAuditLog::new();
        log.append_event(Event::obstacle_detected()).unwrap();
        let mut listed = log.list_events();
        listed.clear();
        assert_eq!(log.list_events().len(), 1);
    }

    #[test]
    fn clear_empties_both_logs() {
        let log = InMemoryAuditLog::new();
        log.append_event(Event::obstacle_detected()).unwrap();
        log.append_decision(Decision::new(Action::Idle, "no active task", 0.6))
            .unwrap();

        log.clear();

        assert!(log.list_events().is_empty());
        assert!(log.list_decisions().is_empty());
    }
}
