//! The world: object ownership and the per-frame pipeline
//!
//! Objects live in a slot map and are referred to by [`ObjectId`]. Two
//! index lists give the physics passes their views: every object with a
//! body is in the static view, and dynamic objects are additionally in the
//! dynamic view. Removal is deferred: hooks and callers only queue an id,
//! and [`World::frame_finished`] destroys the queued objects at the end of
//! the tick.
//!
//! A tick runs, in order: clock advance, integration, terrain collision,
//! object collision, timers and tweens, entity updates, rendering and
//! finally the deferred removals.

mod collision;
pub mod context;
pub mod object;

#[cfg(test)]
mod tests;

pub use context::{Contact, EntityContext, RenderContext, Services, TweenTarget};
pub use object::{Body, DynamicBody, Object, StaticBody};

use thiserror::Error;

use crate::config::{BlueprintKind, BlueprintSet, Config, ConfigError, SimulationConfig};
use crate::entities::{self, EntityTag};
use crate::foundation::collections::{ObjectArena, ObjectId, SlotMap};
use crate::foundation::math::Vec3;
use crate::foundation::time::{secs_to_duration, Clock, ClockTime};
use crate::input::InputState;
use crate::physics::integrate;
use crate::render::{Camera, Renderer};
use crate::scheduling::Timer;
use crate::terrain::{Map, TerrainError, NO_FLOOR};

/// World errors
#[derive(Debug, Error)]
pub enum WorldError {
    /// No blueprint with that name
    #[error("Unknown blueprint: {0}")]
    UnknownBlueprint(String),

    /// Terrain could not be built
    #[error("Terrain error: {0}")]
    Terrain(#[from] TerrainError),

    /// Configuration rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// What happened during one [`World::tick`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Dynamic objects resting on the terrain
    pub grounded: usize,
    /// Collider pairs that were separated
    pub contacts: usize,
    /// Timer events fired
    pub timers_fired: usize,
    /// Tweens that reached their end
    pub tweens_completed: usize,
    /// Objects added by hooks
    pub spawned: usize,
    /// Objects destroyed at the end of the frame
    pub destroyed: usize,
}

/// Owner of every object and of the shared services
pub struct World {
    objects: ObjectArena<Object>,
    static_objects: Vec<ObjectId>,
    dynamic_objects: Vec<ObjectId>,
    map: Map,
    camera: Camera,
    config: SimulationConfig,
    blueprints: BlueprintSet,
    services: Services,
    contacts: Vec<(ObjectId, Contact)>,
    frame: u64,
}

impl World {
    /// Create an empty world over `map`
    pub fn new(config: SimulationConfig, map: Map) -> Self {
        log::info!(
            "Creating world: terrain {}x{}, gravity {:?}, seed {}",
            map.rows(),
            map.cols(),
            config.gravity,
            config.seed
        );
        Self {
            objects: SlotMap::with_key(),
            static_objects: Vec::new(),
            dynamic_objects: Vec::new(),
            camera: Camera::new(config.camera.position),
            services: Services::new(config.seed),
            contacts: Vec::new(),
            blueprints: BlueprintSet::builtin(),
            map,
            config,
            frame: 0,
        }
    }

    /// Validate `config` and build a world over flat terrain
    pub fn from_config(config: SimulationConfig, blueprints: BlueprintSet) -> Result<Self, WorldError> {
        config.validate()?;
        blueprints.validate()?;
        let terrain = &config.terrain;
        let map = Map::flat(terrain.rows, terrain.cols, terrain.height)?;
        Ok(Self::new(config, map).with_blueprints(blueprints))
    }

    /// Replace the blueprint set
    #[must_use]
    pub fn with_blueprints(mut self, blueprints: BlueprintSet) -> Self {
        self.blueprints = blueprints;
        self
    }

    /// Read time from `clock` instead of the internal manual clock
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.services.set_clock(Box::new(clock));
        self
    }

    /// Take ownership of `object` and return its handle
    pub fn add_object(&mut self, object: Object) -> ObjectId {
        let id = self.objects.insert_with_key(|id| {
            let mut object = object;
            object.bind(id);
            object
        });

        let object = &self.objects[id];
        match object.body {
            Body::None => {}
            Body::Static(_) => self.static_objects.push(id),
            Body::Dynamic(_) => {
                self.static_objects.push(id);
                self.dynamic_objects.push(id);
            }
        }

        log::info!("Added {} '{}' ({:?})", object.tag(), object.name, id);
        id
    }

    /// Add `object` with its lowest collider resting on the terrain
    pub fn add_static_object_at_ground(&mut self, mut object: Object) -> ObjectId {
        if let Some(body) = object.body.as_static_mut() {
            let height = self.map.height_at(body.position.x, body.position.y);
            if height == NO_FLOOR {
                log::warn!(
                    "'{}' placed at ({}, {}) is outside the terrain, keeping z = {}",
                    object.name,
                    body.position.x,
                    body.position.y,
                    body.position.z
                );
            } else {
                body.position.z = height - body.bottom_offset().unwrap_or(0.0);
            }
        }
        self.add_object(object)
    }

    /// Build the blueprint `name` at `position`.
    ///
    /// Scenery is placed on the ground; the z of `position` only matters
    /// for other kinds.
    pub fn spawn_blueprint(&mut self, name: &str, position: Vec3) -> Result<ObjectId, WorldError> {
        let blueprint = self
            .blueprints
            .get(name)
            .ok_or_else(|| WorldError::UnknownBlueprint(name.to_owned()))?;
        let object = entities::instantiate(name, blueprint, position, &self.config);

        Ok(match blueprint.kind {
            BlueprintKind::Scenery => self.add_static_object_at_ground(object),
            BlueprintKind::Player | BlueprintKind::Enemy => self.add_object(object),
        })
    }

    /// Queue `id` for destruction at the end of the frame.
    ///
    /// Returns `false` if it was already queued or is unknown.
    pub fn remove_object_next_frame(&mut self, id: ObjectId) -> bool {
        if !self.objects.contains_key(id) {
            log::warn!("Ignoring removal of unknown object {id:?}");
            return false;
        }
        self.services.request_removal(id)
    }

    /// Destroy every queued object. Returns how many were destroyed.
    pub fn frame_finished(&mut self) -> usize {
        let pending = self.services.take_removals();
        let mut destroyed = 0;

        for id in pending {
            let Some(mut object) = self.objects.remove(id) else {
                continue;
            };
            object.kind.behavior_mut().on_removed(&mut self.services);
            self.services.tweens.cancel_where(|target| target.object == id);
            log::debug!("Destroyed {} '{}' ({:?})", object.tag(), object.name, id);
            destroyed += 1;
        }

        if destroyed > 0 {
            let objects = &self.objects;
            self.static_objects.retain(|id| objects.contains_key(*id));
            self.dynamic_objects.retain(|id| objects.contains_key(*id));
        }
        destroyed
    }

    /// Integrate every dynamic object
    pub fn physics(&mut self, dt: f32) {
        let gravity = self.config.gravity;
        for &id in &self.dynamic_objects {
            if let Some(body) = self.objects.get_mut(id).and_then(|object| object.body.as_dynamic_mut()) {
                let (position, velocity, _) = body.split_mut();
                integrate(position, velocity, gravity, dt);
            }
        }
    }

    /// Fire due timer events and advance tweens.
    ///
    /// Returns `(timer events fired, tweens completed)`.
    pub fn process_scheduling(&mut self, dt: f32) -> (usize, usize) {
        let now = self.services.now();
        let fired = self.services.timer.trigger_events(now);

        let objects = &mut self.objects;
        let completed = self.services.tweens.process_interpolation(dt, |target, value| {
            if let Some(position) = objects.get_mut(target.object).and_then(|object| object.body.position_mut()) {
                position[target.axis.index()] = value;
            }
        });

        (fired, completed)
    }

    /// Run every object's `update` hook, then add what they spawned.
    ///
    /// Returns the number of spawned objects.
    pub fn update(&mut self, input: &dyn InputState, dt: f32) -> usize {
        let ids: Vec<ObjectId> = self.objects.keys().collect();
        for id in ids {
            let Some(object) = self.objects.get_mut(id) else {
                continue;
            };
            let mut ctx = EntityContext {
                id,
                services: &mut self.services,
                input,
                map: &self.map,
                config: &self.config,
            };
            object.kind.behavior_mut().update(&mut object.body, &mut ctx, dt);
        }
        self.apply_spawns()
    }

    fn apply_spawns(&mut self) -> usize {
        let spawns = self.services.take_spawns();
        let count = spawns.len();
        for object in spawns {
            self.add_object(object);
        }
        count
    }

    /// Move the camera after its target, then run every `render` hook
    pub fn render(&mut self, renderer: &mut dyn Renderer, dt: f32) {
        let objects = &self.objects;
        self.camera
            .update(|id| objects.get(id).and_then(Object::position));

        renderer.begin_frame(&self.camera);
        for (id, object) in &self.objects {
            let ctx = RenderContext {
                id,
                map: &self.map,
                debug_colliders: self.config.debug_render_colliders,
            };
            object.kind.behavior().render(&object.body, renderer, &ctx, dt);
        }
    }

    /// Advance the whole simulation by `dt` seconds
    pub fn tick(&mut self, input: &dyn InputState, renderer: &mut dyn Renderer, dt: f32) -> TickReport {
        self.services.advance_clock(secs_to_duration(dt));

        self.physics(dt);
        let grounded = self.process_map_collision();
        let contacts = self.process_object_collision();
        let (timers_fired, tweens_completed) = self.process_scheduling(dt);
        let spawned = self.update(input, dt);
        self.render(renderer, dt);
        let destroyed = self.frame_finished();

        self.frame += 1;
        TickReport {
            grounded,
            contacts,
            timers_fired,
            tweens_completed,
            spawned,
            destroyed,
        }
    }

    /// Object by handle
    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id)
    }

    /// Mutable object by handle
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id)
    }

    /// First object called `name`
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    /// All objects
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.objects.iter()
    }

    /// Number of objects of kind `tag`
    pub fn count(&self, tag: EntityTag) -> usize {
        self.objects.values().filter(|object| object.tag() == tag).count()
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the world has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects with a body, dynamic ones included
    pub fn static_objects(&self) -> &[ObjectId] {
        &self.static_objects
    }

    /// Integrated objects
    pub fn dynamic_objects(&self) -> &[ObjectId] {
        &self.dynamic_objects
    }

    /// Collision callbacks delivered by the last object collision pass, as
    /// `(receiver, contact)` in dispatch order
    pub fn contacts(&self) -> &[(ObjectId, Contact)] {
        &self.contacts
    }

    /// Objects queued for destruction
    pub fn pending_removals(&self) -> &[ObjectId] {
        self.services.pending_removals()
    }

    /// Terrain
    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Simulation tuning
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Known blueprints
    pub fn blueprints(&self) -> &BlueprintSet {
        &self.blueprints
    }

    /// Camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Shared services
    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Mutable shared services
    pub fn services_mut(&mut self) -> &mut Services {
        &mut self.services
    }

    /// Deadline queue
    pub fn timer_mut(&mut self) -> &mut Timer {
        &mut self.services.timer
    }

    /// Current simulation time
    pub fn now(&self) -> ClockTime {
        self.services.now()
    }

    /// Completed ticks
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
