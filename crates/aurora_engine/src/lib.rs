//! # Aurora Engine
//!
//! Entity simulation core of the Aurora game: dynamic objects fall under
//! gravity, collide with height-field terrain and with each other as
//! axis-aligned boxes, and run scripted behaviors on top of a deadline
//! queue and linear tweens.
//!
//! ## Features
//!
//! - **Physics**: constant-gravity integration and single-axis MTV
//!   separation of overlapping boxes
//! - **Terrain**: triangulated height-field with exact altitude queries
//! - **Scheduling**: one-shot timer events and linear interpolation with
//!   pollable completion
//! - **Entities**: map, scenery, player, patrolling enemies and projectiles
//! - **Headless rendering**: draw calls go through a [`Renderer`](render::Renderer)
//!   trait; collider wireframes are behind the `debug-colliders` feature
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aurora_engine::prelude::*;
//!
//! fn main() -> Result<(), WorldError> {
//!     let mut world = World::from_config(SimulationConfig::default(), BlueprintSet::builtin())?;
//!     world.add_object(Terrain::object());
//!     world.spawn_blueprint("tree", Vec3::new(5.0, 5.0, 0.0))?;
//!     world.spawn_blueprint("player", Vec3::new(2.0, 2.0, 3.0))?;
//!
//!     let mut renderer = DebugDrawList::new();
//!     let input = KeyboardState::new();
//!     for _ in 0..60 {
//!         world.tick(&input, &mut renderer, 1.0 / 60.0);
//!     }
//!     Ok(())
//! }
//! ```

#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod debug;
pub mod entities;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;
pub mod scheduling;
pub mod terrain;
pub mod world;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{BlueprintSet, Config, ConfigError, SimulationConfig},
        debug::DebugDrawList,
        entities::{EntityTag, Terrain},
        foundation::{
            collections::ObjectId,
            math::{Vec2, Vec3},
            time::{Clock, ManualClock, Stopwatch, SystemClock},
        },
        input::{InputState, Key, KeyboardState, NoInput},
        physics::Collider,
        render::{Camera, Renderer},
        scheduling::{InterpolationManager, Timer},
        terrain::Map,
        world::{Body, DynamicBody, Object, StaticBody, TickReport, World, WorldError},
    };
}
