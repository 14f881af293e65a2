//! Math utilities and types
//!
//! Provides the vector types used by the simulation core. The world is
//! right-handed with `z` as altitude: `x` points east and `y` points north
//! on the terrain plane.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Vector2, Vector3, Vector4};

/// 2D vector type (horizontal plane)
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// RGBA color with components in `0.0..=1.0`
pub type Color = Vec4;

/// One of the three world axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// East-west axis
    X,
    /// North-south axis
    Y,
    /// Altitude
    Z,
}

impl Axis {
    /// All axes in tie-breaking order
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Component index of this axis in a [`Vec3`]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Unit vector along this axis
    pub fn unit(self) -> Vec3 {
        let mut v = Vec3::zeros();
        v[self.index()] = 1.0;
        v
    }
}

/// Common colors used by debug drawing
pub mod colors {
    use super::Color;

    /// Opaque red
    pub fn red() -> Color {
        Color::new(1.0, 0.0, 0.0, 1.0)
    }

    /// Opaque green
    pub fn green() -> Color {
        Color::new(0.0, 1.0, 0.0, 1.0)
    }

    /// Opaque blue
    pub fn blue() -> Color {
        Color::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Opaque yellow
    pub fn yellow() -> Color {
        Color::new(1.0, 1.0, 0.0, 1.0)
    }

    /// Opaque white
    pub fn white() -> Color {
        Color::new(1.0, 1.0, 1.0, 1.0)
    }
}

/// Math utility functions
pub mod utils {
    use super::Vec2;

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Returns `true` if every component is strictly positive
    pub fn all_positive(v: &super::Vec3) -> bool {
        v.iter().all(|c| *c > 0.0)
    }

    /// Horizontal (x, y) part of a 3D vector
    pub fn horizontal(v: &super::Vec3) -> Vec2 {
        Vec2::new(v.x, v.y)
    }
}
