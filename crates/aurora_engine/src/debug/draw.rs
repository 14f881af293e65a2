//! Recorded draw calls
//!
//! [`DebugDrawList`] implements [`Renderer`] by storing every call it
//! receives. The headless driver uses it to report what a frame contained,
//! and tests use it to check which shapes the render hooks submitted.

use crate::foundation::math::{Color, Vec2, Vec3};
use crate::render::{Camera, Renderer};
use crate::terrain::Map;

/// One recorded draw call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Terrain surface
    Terrain {
        /// Number of triangles in the height-field
        triangles: usize,
    },

    /// Camera-facing sprite
    Billboard {
        /// Sprite name
        sprite: String,
        /// Center in world space
        position: Vec3,
        /// Half width and half height
        half_size: Vec2,
    },

    /// Wireframe box at center with full size
    WireCube {
        /// Center in world space
        center: Vec3,
        /// Full size
        size: Vec3,
        /// Line color
        color: Color,
    },
}

/// Renderer that records one frame of draw calls
#[derive(Debug, Default)]
pub struct DebugDrawList {
    commands: Vec<DrawCommand>,
    camera: Option<Camera>,
    frames: u64,

    /// Master enable/disable flag
    pub enabled: bool,
}

impl DebugDrawList {
    /// Create an empty, enabled list
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    fn push(&mut self, command: DrawCommand) {
        if self.enabled {
            self.commands.push(command);
        }
    }

    /// Everything recorded since the last [`Renderer::begin_frame`]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Camera of the current frame
    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    /// Frames started so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Recorded sprites as `(sprite, position)`
    pub fn billboards(&self) -> impl Iterator<Item = (&str, Vec3)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Billboard { sprite, position, .. } => Some((sprite.as_str(), *position)),
            _ => None,
        })
    }

    /// Recorded wire boxes as `(center, size, color)`
    pub fn wire_cubes(&self) -> impl Iterator<Item = (Vec3, Vec3, Color)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::WireCube { center, size, color } => Some((*center, *size, *color)),
            _ => None,
        })
    }

    /// Get the number of recorded commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop all recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Renderer for DebugDrawList {
    fn begin_frame(&mut self, camera: &Camera) {
        self.commands.clear();
        self.camera = Some(camera.clone());
        self.frames += 1;
    }

    fn draw_terrain(&mut self, map: &Map) {
        let triangles = 2 * (map.rows() - 1) * (map.cols() - 1);
        self.push(DrawCommand::Terrain { triangles });
    }

    fn draw_billboard(&mut self, sprite: &str, position: Vec3, half_size: Vec2) {
        self.push(DrawCommand::Billboard {
            sprite: sprite.to_owned(),
            position,
            half_size,
        });
    }

    #[cfg(feature = "debug-colliders")]
    fn draw_wire_cube(&mut self, center: Vec3, size: Vec3, color: Color) {
        self.push(DrawCommand::WireCube { center, size, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_frame_clears_previous_frame() {
        let mut list = DebugDrawList::new();
        let camera = Camera::default();

        list.begin_frame(&camera);
        list.draw_billboard("tree", Vec3::zeros(), Vec2::new(0.5, 1.0));
        assert_eq!(list.len(), 1);

        list.begin_frame(&camera);
        assert!(list.is_empty());
        assert_eq!(list.frame_count(), 2);
    }

    #[test]
    fn test_terrain_triangle_count() {
        let mut list = DebugDrawList::new();
        let map = Map::flat(3, 5, 0.0).unwrap();

        list.draw_terrain(&map);
        assert_eq!(list.commands(), &[DrawCommand::Terrain { triangles: 16 }]);
    }

    #[test]
    fn test_disabled_list_records_nothing() {
        let mut list = DebugDrawList::new();
        list.enabled = false;

        list.draw_billboard("rock", Vec3::zeros(), Vec2::new(1.0, 1.0));
        assert!(list.is_empty());
    }
}
