//! Height-field terrain
//!
//! Vertex `(i, j)` sits at world `(i, j, height[i][j])`: rows run along x
//! and columns along y with unit spacing. Each grid cell is split into two
//! triangles along the diagonal `u + v = 1` in cell-local coordinates.

use thiserror::Error;

use crate::foundation::math::{Vec2, Vec3};

/// Height reported for queries outside the grid
pub const NO_FLOOR: f32 = f32::MIN;

/// Errors raised while building a height-field
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TerrainError {
    /// At least two rows and two columns are needed to form a cell
    #[error("terrain needs at least 2x2 vertices, got {rows}x{cols}")]
    TooSmall {
        /// Requested rows
        rows: usize,
        /// Requested columns
        cols: usize,
    },

    /// Height list length does not match the grid
    #[error("expected {expected} heights for the grid, got {actual}")]
    HeightCountMismatch {
        /// `rows * cols`
        expected: usize,
        /// Number of heights supplied
        actual: usize,
    },
}

/// A triangle of the terrain surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Unnormalized normal following the right-hand rule
    pub fn normal(&self) -> Vec3 {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1.cross(&edge2)
    }

    /// Altitude of the triangle's plane above `(x, y)`.
    ///
    /// Returns `None` for vertical triangles, which a height-field never
    /// produces.
    pub fn height_at(&self, x: f32, y: f32) -> Option<f32> {
        let n = self.normal();
        if n.z == 0.0 {
            return None;
        }
        let p = self.v0;
        Some(p.z - (n.x * (x - p.x) + n.y * (y - p.y)) / n.z)
    }
}

/// Terrain height-field
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    rows: usize,
    cols: usize,
    /// Row-major: `heights[i * cols + j]`
    heights: Vec<f32>,
}

impl Map {
    /// Flat terrain at altitude `height`
    pub fn flat(rows: usize, cols: usize, height: f32) -> Result<Self, TerrainError> {
        Self::from_heights(rows, cols, vec![height; rows.saturating_mul(cols)])
    }

    /// Terrain from row-major vertex heights
    pub fn from_heights(rows: usize, cols: usize, heights: Vec<f32>) -> Result<Self, TerrainError> {
        if rows < 2 || cols < 2 {
            return Err(TerrainError::TooSmall { rows, cols });
        }
        let expected = rows * cols;
        if heights.len() != expected {
            return Err(TerrainError::HeightCountMismatch {
                expected,
                actual: heights.len(),
            });
        }
        Ok(Self { rows, cols, heights })
    }

    /// Terrain whose vertex `(i, j)` has height `f(i, j)`
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> f32,
    ) -> Result<Self, TerrainError> {
        let mut heights = Vec::with_capacity(rows.saturating_mul(cols));
        for i in 0..rows {
            for j in 0..cols {
                heights.push(f(i, j));
            }
        }
        Self::from_heights(rows, cols, heights)
    }

    /// Number of vertex rows (x extent is `rows - 1`)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of vertex columns (y extent is `cols - 1`)
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// World position of vertex `(i, j)`
    pub fn vertex(&self, i: usize, j: usize) -> Vec3 {
        Vec3::new(i as f32, j as f32, self.heights[i * self.cols + j])
    }

    /// Horizontal size of the terrain
    pub fn extent(&self) -> Vec2 {
        Vec2::new((self.rows - 1) as f32, (self.cols - 1) as f32)
    }

    /// Whether `(x, y)` lies on the terrain, edges included
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let extent = self.extent();
        x >= 0.0 && y >= 0.0 && x <= extent.x && y <= extent.y
    }

    /// Triangle of the surface above `(x, y)`, if it is on the terrain
    pub fn triangle_at(&self, x: f32, y: f32) -> Option<Triangle> {
        if !self.contains(x, y) {
            return None;
        }

        // Points on the far edges belong to the last cell
        let i = (x.floor() as usize).min(self.rows - 2);
        let j = (y.floor() as usize).min(self.cols - 2);
        let u = x - i as f32;
        let v = y - j as f32;

        let triangle = if u + v <= 1.0 {
            Triangle::new(self.vertex(i, j), self.vertex(i + 1, j), self.vertex(i, j + 1))
        } else {
            Triangle::new(
                self.vertex(i + 1, j),
                self.vertex(i + 1, j + 1),
                self.vertex(i, j + 1),
            )
        };
        Some(triangle)
    }

    /// Terrain altitude at `(x, y)`, or [`NO_FLOOR`] outside the grid
    pub fn height_at(&self, x: f32, y: f32) -> f32 {
        self.triangle_at(x, y)
            .and_then(|triangle| triangle.height_at(x, y))
            .unwrap_or(NO_FLOOR)
    }

    /// Iterate over every surface triangle, two per cell
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.rows - 1).flat_map(move |i| {
            (0..self.cols - 1).flat_map(move |j| {
                [
                    Triangle::new(self.vertex(i, j), self.vertex(i + 1, j), self.vertex(i, j + 1)),
                    Triangle::new(
                        self.vertex(i + 1, j),
                        self.vertex(i + 1, j + 1),
                        self.vertex(i, j + 1),
                    ),
                ]
            })
        })
    }
}
