//! Shared type definitions for the SentinelOps robot simulation.
//!
//! Every crate in the workspace speaks in these types. They flow
//! downstream to `TypeScript` via `ts-rs` for the dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Robot and event identifiers
//! - [`enums`] -- Robot status, event types, and actions
//! - [`structs`] -- Robot state, state patches, events, and decisions

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Action, EventType, RobotStatus};
pub use ids::{DEFAULT_ROBOT_ID, EventId, RobotId};
pub use structs::{
    Decision, Event, FULL_BATTERY, OBSTACLE_MESSAGE, Position, RobotState, RobotStatePatch,
    TaskParameters,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs writes bindings for types marked #[ts(export)] into the
        // `bindings/` directory relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::RobotId::export_all();
        let _ = crate::ids::EventId::export_all();

        let _ = crate::enums::RobotStatus::export_all();
        let _ = crate::enums::EventType::export_all();
        let _ = crate::enums::Action::export_all();

        let _ = crate::structs::Position::export_all();
        let _ = crate::structs::RobotState::export_all();
        let _ = crate::structs::Event::export_all();
        let _ = crate::structs::Decision::export_all();
    }
}
