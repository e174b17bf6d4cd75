//! Per-tick robot simulator.
//!
//! Each call to [`Simulator::simulate_step`] produces the next state from
//! the current one and may emit an obstacle event:
//!
//! - An `ACTIVE` robot advances `STEP_DISTANCE` along the x axis. Motion is
//!   one-dimensional; `y` never changes.
//! - Independently of status, one sample is drawn from the random source
//!   and an `OBSTACLE_DETECTED` event is emitted with the configured
//!   probability. Idle and stopped robots can still see obstacles.
//!
//! The random source is owned by the simulator and injected at
//! construction, so tests can seed it or force the draw.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sentinel_types::{Event, RobotState, RobotStatus};
use tracing::debug;

use crate::config::SimulationConfig;

/// Distance covered by an active robot in one tick.
pub const STEP_DISTANCE: f64 = 1.0;

/// Default probability of an obstacle event per tick.
pub const DEFAULT_OBSTACLE_PROBABILITY: f64 = 0.1;

/// Robot simulator driven by a pseudo-random source.
#[derive(Debug, Clone)]
pub struct Simulator<R = StdRng> {
    rng: R,
    obstacle_probability: f64,
}

impl<R: Rng> Simulator<R> {
    /// Create a simulator with an explicit random source.
    ///
    /// The probability is clamped to `[0, 1]`; `NaN` is treated as `0`.
    pub fn new(rng: R, obstacle_probability: f64) -> Self {
        let obstacle_probability = if obstacle_probability.is_nan() {
            0.0
        } else {
            obstacle_probability.clamp(0.0, 1.0)
        };
        Self {
            rng,
            obstacle_probability,
        }
    }

    /// Probability of an obstacle event per tick.
    pub const fn obstacle_probability(&self) -> f64 {
        self.obstacle_probability
    }

    /// Produce the next state and an optional obstacle event.
    ///
    /// The input is never modified; the returned state is a fresh copy.
    pub fn simulate_step(&mut self, state: &RobotState) -> (RobotState, Option<Event>) {
        let mut next = state.clone();

        if next.status == RobotStatus::Active {
            next.position.x += STEP_DISTANCE;
        }

        let sample: f64 = self.rng.random();
        let event = (sample < self.obstacle_probability).then(Event::obstacle_detected);

        debug!(
            status = ?next.status,
            x = next.position.x,
            obstacle = event.is_some(),
            "Simulated step"
        );

        (next, event)
    }
}

impl Simulator<StdRng> {
    /// Create a simulator with a deterministic seed.
    pub fn seeded(seed: u64, obstacle_probability: f64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), obstacle_probability)
    }

    /// Create a simulator from configuration. Without a configured seed the
    /// random source is seeded from OS entropy.
    pub fn from_config(config: &SimulationConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self::new(rng, config.obstacle_probability)
    }
}

impl Default for Simulator<StdRng> {
    fn default() -> Self {
        Self::new(StdRng::from_os_rng(), DEFAULT_OBSTACLE_PROBABILITY)
    }
}

#[cfg(test)]
mod tests {
    use sentinel_types::{EventType, Position};

    use super::*;

    fn state_with(status: RobotStatus, x: f64, y: f64) -> RobotState {
        let mut state = RobotState::initial();
        state.status = status;
        state.position = Position::new(x, y);
        state
    }

    #[test]
    fn non_active_states_do_not_move() {
        let mut sim = Simulator::seeded(7, DEFAULT_OBSTACLE_PROBABILITY);
        for status in [RobotStatus::Idle, RobotStatus::Stopped, RobotStatus::Error] {
            for _ in 0..50 {
                let state = state_with(status, 4.0, -3.0);
                let (next, _) = sim.simulate_step(&state);
                assert_eq!(next.position, state.position, "moved while {status:?}");
            }
        }
    }

    #[test]
    fn active_state_advances_x_by_one() {
        let mut sim = Simulator::seeded(7, DEFAULT_OBSTACLE_PROBABILITY);
        let mut state = state_with(RobotStatus::Active, 0.0, 2.5);
        for step in 1..=20_u32 {
            let (next, _) = sim.simulate_step(&state);
            assert!((next.position.x - f64::from(step)).abs() < f64::EPSILON);
            assert!((next.position.y - 2.5).abs() < f64::EPSILON);
            state = next;
        }
    }

    #[test]
    fn input_state_is_not_modified() {
        let mut sim = Simulator::seeded(1, 1.0);
        let state = state_with(RobotStatus::Active, 10.0, 0.0);
        let snapshot = state.clone();
        let (next, _) = sim.simulate_step(&state);
        assert_eq!(state, snapshot);
        assert!((next.position.x - 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn obstacle_rate_converges_to_configured_probability() {
        const TRIALS: u32 = 10_000;
        let mut sim = Simulator::seeded(42, DEFAULT_OBSTACLE_PROBABILITY);
        let state = RobotState::initial();

        let mut obstacles: u32 = 0;
        for _ in 0..TRIALS {
            if sim.simulate_step(&state).1.is_some() {
                obstacles += 1;
            }
        }

        let rate = f64::from(obstacles) / f64::from(TRIALS);
        assert!((rate - 0.1).abs() < 0.02, "obstacle rate {rate}");
    }

    #[test]
    fn forced_obstacle_emits_every_tick_even_when_idle() {
        let mut sim = Simulator::seeded(3, 1.0);
        let state = RobotState::initial();
        for _ in 0..100 {
            let (next, event) = sim.simulate_step(&state);
            assert_eq!(next.position, state.position);
            let event = event.map(|e| e.event_type);
            assert_eq!(event, Some(EventType::ObstacleDetected));
        }
    }

    #[test]
    fn zero_probability_never_emits() {
        let mut sim = Simulator::seeded(3, 0.0);
        let state = state_with(RobotStatus::Active, 0.0, 0.0);
        for _ in 0..1_000 {
            assert!(sim.simulate_step(&state).1.is_none());
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Simulator::seeded(99, 0.5);
        let mut b = Simulator::seeded(99, 0.5);
        let state = RobotState::initial();
        for _ in 0..200 {
            assert_eq!(
                a.simulate_step(&state).1.is_some(),
                b.simulate_step(&state).1.is_some()
            );
        }
    }

    #[test]
    fn probability_is_clamped() {
        assert!((Simulator::seeded(0, 4.0).obstacle_probability() - 1.0).abs() < f64::EPSILON);
        assert!(Simulator::seeded(0, -1.0).obstacle_probability().abs() < f64::EPSILON);
        assert!(Simulator::seeded(0, f64::NAN).obstacle_probability().abs() < f64::EPSILON);
    }

    #[test]
    fn from_config_uses_seed() {
        let config = SimulationConfig {
            seed: Some(11),
            obstacle_probability: 0.5,
        };
        let mut a = Simulator::from_config(&config);
        let mut b = Simulator::seeded(11, 0.5);
        let state = RobotState::initial();
        for _ in 0..50 {
            assert_eq!(
                a.simulate_step(&state).1.is_some(),
                b.simulate_step(&state).1.is_some()
            );
        }
    }
}
