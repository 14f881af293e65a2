//! Separation of overlapping bodies along a single axis
//!
//! Only one axis of the MTV is ever applied: the one with the smallest
//! magnitude, which is the cheapest way out of the overlap. Static contacts
//! move the dynamic body the whole way and kill its velocity on that axis.
//! Two dynamic bodies share the correction equally and keep their velocity.

use crate::foundation::math::{Axis, Vec3};

/// Single-axis correction chosen from an MTV
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Axis the correction is applied on
    pub axis: Axis,
    /// Signed MTV component on that axis
    pub displacement: f32,
}

impl Resolution {
    /// Pick the axis with the smallest absolute MTV component.
    ///
    /// Ties go to the earlier axis: x, then y, then z.
    pub fn from_mtv(mtv: Vec3) -> Self {
        let mut axis = Axis::ALL[0];
        for candidate in Axis::ALL {
            if mtv[candidate.index()].abs() < mtv[axis.index()].abs() {
                axis = candidate;
            }
        }
        Self {
            axis,
            displacement: mtv[axis.index()],
        }
    }

    /// Correction as a vector along the chosen axis
    pub fn vector(&self) -> Vec3 {
        self.axis.unit() * self.displacement
    }
}

/// Push a dynamic body out of a static one.
///
/// `mtv` must be the displacement that moves the dynamic body out of the
/// static body, as returned by `check_collision(static, dynamic)`.
pub fn resolve_against_static(position: &mut Vec3, velocity: &mut Vec3, mtv: Vec3) -> Resolution {
    let resolution = Resolution::from_mtv(mtv);
    let i = resolution.axis.index();
    velocity[i] = 0.0;
    position[i] += resolution.displacement;
    resolution
}

/// Split the correction between two dynamic bodies.
///
/// `mtv` is the displacement that moves `b` out of `a`. Each body moves
/// half of it in opposite directions; velocities are left untouched.
pub fn resolve_dynamic_pair(a: &mut Vec3, b: &mut Vec3, mtv: Vec3) -> Resolution {
    let resolution = Resolution::from_mtv(mtv);
    let i = resolution.axis.index();
    let half = resolution.displacement / 2.0;
    a[i] -= half;
    b[i] += half;
    resolution
}
