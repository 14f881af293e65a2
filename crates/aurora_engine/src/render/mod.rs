//! # Rendering boundary
//!
//! The simulation does not generate vertices. Render hooks describe what to
//! draw through the [`Renderer`] trait and a backend turns that into
//! pixels. [`DebugDrawList`](crate::debug::DebugDrawList) is the headless
//! implementation used by the game driver and tests.

pub mod camera;

pub use camera::Camera;

use crate::foundation::math::{Vec2, Vec3};
#[cfg(feature = "debug-colliders")]
use crate::foundation::math::Color;
use crate::terrain::Map;

/// Sink for the draw calls issued by render hooks
pub trait Renderer {
    /// Called once per frame before any object renders
    fn begin_frame(&mut self, _camera: &Camera) {}

    /// Draw the terrain surface
    fn draw_terrain(&mut self, map: &Map);

    /// Draw a camera-facing sprite centered at `position`
    fn draw_billboard(&mut self, sprite: &str, position: Vec3, half_size: Vec2);

    /// Draw a wireframe box
    #[cfg(feature = "debug-colliders")]
    fn draw_wire_cube(&mut self, center: Vec3, size: Vec3, color: Color);
}
