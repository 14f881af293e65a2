//! Debug module for visualization and debugging tools

pub mod collision_debug;
pub mod draw;

pub use collision_debug::{render_colliders, ColliderColors};
pub use draw::{DebugDrawList, DrawCommand};
