//! Shared services handed to entity hooks
//!
//! Entities hold no pointer back to the world. Each hook receives a context
//! that borrows exactly what it may touch: the schedulers, the RNG, the
//! clock, read-only terrain and configuration, and queues for removals and
//! spawns that the world applies later in the frame.

use std::fmt;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SimulationConfig;
use crate::entities::EntityTag;
use crate::foundation::collections::ObjectId;
use crate::foundation::math::{Axis, Vec3};
use crate::foundation::time::{secs_to_duration, Clock, ClockTime, ManualClock};
use crate::input::InputState;
use crate::scheduling::{InterpolationManager, Timer};
use crate::terrain::Map;
use crate::world::Object;

/// One coordinate of one object, written by tweens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenTarget {
    /// Animated object
    pub object: ObjectId,
    /// Animated coordinate of its position
    pub axis: Axis,
}

/// Everything entities share besides the object arena
pub struct Services {
    /// Deadline queue
    pub timer: Timer,
    /// Running position tweens
    pub tweens: InterpolationManager<TweenTarget>,
    /// Deterministic random source
    pub rng: StdRng,
    clock: Box<dyn Clock>,
    removals: Vec<ObjectId>,
    spawns: Vec<Object>,
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("timer", &self.timer)
            .field("tweens", &self.tweens.len())
            .field("removals", &self.removals)
            .field("spawns", &self.spawns.len())
            .finish_non_exhaustive()
    }
}

impl Services {
    /// Services driven by a manual clock seeded from `seed`
    pub fn new(seed: u64) -> Self {
        Self::with_clock(seed, Box::new(ManualClock::new()))
    }

    /// Services reading time from `clock`
    pub fn with_clock(seed: u64, clock: Box<dyn Clock>) -> Self {
        Self {
            timer: Timer::new(),
            tweens: InterpolationManager::new(),
            rng: StdRng::seed_from_u64(seed),
            clock,
            removals: Vec::new(),
            spawns: Vec::new(),
        }
    }

    /// Current time
    pub fn now(&self) -> ClockTime {
        self.clock.now()
    }

    pub(crate) fn set_clock(&mut self, clock: Box<dyn Clock>) {
        self.clock = clock;
    }

    pub(crate) fn advance_clock(&mut self, delta: Duration) {
        self.clock.advance(delta);
    }

    /// Queue `id` for destruction at the end of the frame.
    ///
    /// Returns `false` if it was already queued.
    pub fn request_removal(&mut self, id: ObjectId) -> bool {
        if self.removals.contains(&id) {
            return false;
        }
        self.removals.push(id);
        true
    }

    /// Whether `id` is queued for destruction
    pub fn is_removal_pending(&self, id: ObjectId) -> bool {
        self.removals.contains(&id)
    }

    /// Objects queued for destruction
    pub fn pending_removals(&self) -> &[ObjectId] {
        &self.removals
    }

    pub(crate) fn take_removals(&mut self) -> Vec<ObjectId> {
        std::mem::take(&mut self.removals)
    }

    /// Queue an object to be added after the update pass
    pub fn spawn(&mut self, object: Object) {
        self.spawns.push(object);
    }

    pub(crate) fn take_spawns(&mut self) -> Vec<Object> {
        std::mem::take(&mut self.spawns)
    }
}

/// Context of `update` and `on_collision` hooks
pub struct EntityContext<'a> {
    /// Object the hook runs for
    pub id: ObjectId,
    /// Shared services
    pub services: &'a mut Services,
    /// Keyboard state of this tick
    pub input: &'a dyn InputState,
    /// Terrain
    pub map: &'a Map,
    /// Simulation tuning
    pub config: &'a SimulationConfig,
}

impl EntityContext<'_> {
    /// Current time
    pub fn now(&self) -> ClockTime {
        self.services.now()
    }

    /// Deadline `secs` seconds from now
    pub fn deadline_in(&self, secs: f32) -> ClockTime {
        self.now() + secs_to_duration(secs)
    }

    /// Destroy this object at the end of the frame
    pub fn remove_self(&mut self) -> bool {
        self.services.request_removal(self.id)
    }

    /// Add an object after the update pass
    pub fn spawn(&mut self, object: Object) {
        self.services.spawn(object);
    }
}

/// Context of `render` hooks
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Object being rendered
    pub id: ObjectId,
    /// Terrain
    pub map: &'a Map,
    /// Whether collider wireframes should be submitted
    pub debug_colliders: bool,
}

/// What an object learns about a collision it took part in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Identifier of the receiving object's collider
    pub my_collider: u32,
    /// Identifier of the other object's collider
    pub other_collider: u32,
    /// The other object
    pub other: ObjectId,
    /// Kind of the other object
    pub other_tag: EntityTag,
    /// Translation that moves the receiver out of the other object
    pub mtv: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::SlotMap;

    #[test]
    fn test_removal_requests_are_deduplicated() {
        let mut ids: SlotMap<ObjectId, ()> = SlotMap::with_key();
        let id = ids.insert(());
        let mut services = Services::new(1);

        assert!(services.request_removal(id));
        assert!(!services.request_removal(id));
        assert_eq!(services.pending_removals(), &[id]);
        assert_eq!(services.take_removals(), vec![id]);
        assert!(!services.is_removal_pending(id));
    }

    #[test]
    fn test_clock_advances_with_services() {
        let mut services = Services::new(1);
        let start = services.now();

        services.advance_clock(Duration::from_millis(500));
        assert_eq!(services.now() - start, Duration::from_millis(500));
    }
}
