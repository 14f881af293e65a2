//! Waypoint patrol driven by the schedulers
//!
//! The patrol loops forever: head for a waypoint, wait there, pick the
//! next one. Moving is done by two tweens, one per horizontal axis, of which
//! only the y tween is waited on since both share the same duration.
//! Waiting is a wake-up on the timer. The state machine is polled from the
//! owner's `update`, after the schedulers ran for the tick, so it always
//! sees completions from the same frame.

use rand::Rng;

use crate::config::{PatrolConfig, PatrolOrder, PatrolSpec};
use crate::foundation::collections::ObjectId;
use crate::foundation::math::{utils, Axis, Vec2, Vec3};
use crate::foundation::time::secs_to_duration;
use crate::scheduling::{TimerDescriptor, TweenHandle};
use crate::world::{Services, TweenTarget};

/// Where the patrol is in its loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatrolState {
    /// Not started yet
    Idle,
    /// Moving towards a waypoint
    EnRoute {
        /// Destination index
        waypoint: usize,
        /// Fire-and-forget x tween
        x: TweenHandle,
        /// Awaited y tween
        y: TweenHandle,
    },
    /// Pausing at a waypoint
    Waiting {
        /// Waypoint index
        waypoint: usize,
        /// Wake-up ending the pause
        delay: TimerDescriptor,
    },
}

/// Patrol route and progress
#[derive(Debug, Clone)]
pub struct Patrol {
    waypoints: Vec<Vec2>,
    order: PatrolOrder,
    speed: f32,
    wait: f32,
    state: PatrolState,
}

impl Patrol {
    /// Patrol over absolute waypoints.
    ///
    /// `waypoints` must not be empty and `speed` must be positive.
    pub fn new(waypoints: Vec<Vec2>, order: PatrolOrder, speed: f32, wait: f32) -> Self {
        debug_assert!(!waypoints.is_empty(), "patrol needs at least one waypoint");
        debug_assert!(speed > 0.0, "patrol speed must be positive");
        Self {
            waypoints,
            order,
            speed,
            wait,
            state: PatrolState::Idle,
        }
    }

    /// Patrol from a blueprint, with waypoints relative to `origin`
    pub fn from_spec(spec: &PatrolSpec, origin: Vec3, defaults: &PatrolConfig) -> Self {
        let origin = utils::horizontal(&origin);
        let mut waypoints: Vec<Vec2> = spec.waypoints.iter().map(|offset| origin + offset).collect();
        if waypoints.is_empty() {
            waypoints.push(origin);
        }
        Self::new(
            waypoints,
            spec.order,
            spec.speed.unwrap_or(defaults.speed),
            spec.wait.unwrap_or(defaults.wait),
        )
    }

    /// Patrol that stays at `origin`
    pub fn stationary(origin: Vec3, defaults: &PatrolConfig) -> Self {
        Self::new(
            vec![utils::horizontal(&origin)],
            PatrolOrder::Sequential,
            defaults.speed,
            defaults.wait,
        )
    }

    /// Current state
    pub fn state(&self) -> PatrolState {
        self.state
    }

    /// Absolute waypoints
    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Advance the loop for the object `id` currently at `position`
    pub fn step(&mut self, id: ObjectId, position: Vec3, services: &mut Services) {
        match self.state {
            PatrolState::Idle => self.start_leg(0, id, position, services),

            PatrolState::EnRoute { waypoint, y, .. } => {
                if services.tweens.take_completed(y) {
                    let deadline = services.now() + secs_to_duration(self.wait);
                    let delay = services.timer.schedule_wake(deadline);
                    self.state = PatrolState::Waiting { waypoint, delay };
                } else if !services.tweens.is_active(y) {
                    // Someone else cancelled the leg
                    self.start_leg(waypoint, id, position, services);
                }
            }

            PatrolState::Waiting { waypoint, delay } => {
                if services.timer.take_fired(delay) || !services.timer.is_scheduled(delay) {
                    let next = self.next_waypoint(waypoint, services);
                    self.start_leg(next, id, position, services);
                }
            }
        }
    }

    fn next_waypoint(&self, current: usize, services: &mut Services) -> usize {
        let count = self.waypoints.len();
        match self.order {
            PatrolOrder::Sequential => (current + 1) % count,
            PatrolOrder::Random => services.rng.gen_range(0..count),
        }
    }

    fn start_leg(&mut self, waypoint: usize, id: ObjectId, position: Vec3, services: &mut Services) {
        let target = self.waypoints[waypoint];
        let distance = (target - utils::horizontal(&position)).norm();
        let duration = distance / self.speed;

        let x = services.tweens.interpolate_linear(
            duration,
            TweenTarget { object: id, axis: Axis::X },
            position.x,
            target.x,
        );
        let y = services.tweens.interpolate_linear_wait(
            duration,
            TweenTarget { object: id, axis: Axis::Y },
            position.y,
            target.y,
        );

        log::trace!("patrol {id:?}: heading to waypoint {waypoint} ({duration:.2}s)");
        self.state = PatrolState::EnRoute { waypoint, x, y };
    }

    /// Withdraw every tween and timer entry of the patrol
    pub fn release(&mut self, services: &mut Services) {
        match self.state {
            PatrolState::Idle => {}
            PatrolState::EnRoute { x, y, .. } => {
                services.tweens.cancel(x);
                services.tweens.cancel(y);
            }
            PatrolState::Waiting { delay, .. } => {
                services.timer.cancel(delay);
            }
        }
        self.state = PatrolState::Idle;
    }
}
