//! State store, simulator, decision engine, and tick orchestration for the
//! SentinelOps robot simulation.
//!
//! A tick reads the robot state, simulates one step, commits the result,
//! asks the decision engine what to do next, and halts the robot when the
//! decision is `STOP`. Events and decisions are forwarded to an append-only
//! audit log.
//!
//! # Modules
//!
//! - [`audit`] -- [`AuditLog`] trait and the in-memory sink.
//! - [`config`] -- Configuration loading from `sentinel-config.yaml`.
//! - [`controller`] -- [`RobotController`], the serialized entry point for
//!   ticks, task assignment, and reset.
//! - [`decision`] -- The priority-ordered rule table and the
//!   [`DecisionSource`] seam.
//! - [`simulator`] -- Per-tick motion and obstacle emission.
//! - [`store`] -- The single robot state.
//! - [`tick`] -- One read-simulate-commit-decide-commit cycle.
//!
//! [`AuditLog`]: audit::AuditLog
//! [`RobotController`]: controller::RobotController
//! [`DecisionSource`]: decision::DecisionSource

pub mod audit;
pub mod config;
pub mod controller;
pub mod decision;
pub mod simulator;
pub mod store;
pub mod tick;
