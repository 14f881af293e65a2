//! Physics module for motion, collision detection and response
//!
//! Everything in here is a pure function over positions, velocities and
//! colliders. The [`World`](crate::world::World) decides which bodies are
//! paired up and in which order the passes run.

pub mod collider;
pub mod ground;
pub mod integration;
pub mod resolution;

pub use collider::{check_collision, Collider, CollisionCheck, PlacedCollider};
pub use ground::resolve_terrain;
pub use integration::integrate;
pub use resolution::{resolve_against_static, resolve_dynamic_pair, Resolution};
