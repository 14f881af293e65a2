//! Axis-aligned box colliders and the overlap test between them
//!
//! A collider never stores a world-space position. It keeps an offset from
//! its owner's position and is placed with [`Collider::at`] whenever a query
//! needs world coordinates, so moving an object moves all of its colliders.

use crate::foundation::collections::ObjectId;
use crate::foundation::math::{utils, Vec3};

/// Axis-aligned box attached to an object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    /// Object owning this collider, set when the object joins a world
    owner: Option<ObjectId>,

    /// Displacement from the owner's position
    ds: Vec3,

    /// Half of the box size on each axis
    half_size: Vec3,

    /// Identifier chosen by the owner, unique within its collider list
    id: u32,
}

impl Collider {
    /// Create a collider from its full size.
    ///
    /// Every size component must be strictly positive.
    pub fn new(ds: Vec3, size: Vec3, id: u32) -> Self {
        Self::from_half_size(ds, size / 2.0, id)
    }

    /// Create a collider from its half size
    pub fn from_half_size(ds: Vec3, half_size: Vec3, id: u32) -> Self {
        debug_assert!(
            utils::all_positive(&half_size),
            "collider half size must be positive on every axis, got {half_size:?}"
        );
        Self {
            owner: None,
            ds,
            half_size,
            id,
        }
    }

    /// Cube collider centered on the owner
    pub fn cube(size: f32, id: u32) -> Self {
        Self::new(Vec3::zeros(), Vec3::repeat(size), id)
    }

    /// Owning object, `None` until the owner is added to a world
    pub fn owner(&self) -> Option<ObjectId> {
        self.owner
    }

    pub(crate) fn bind(&mut self, owner: ObjectId) {
        debug_assert!(
            self.owner.map_or(true, |current| current == owner),
            "collider {} is already bound to another object",
            self.id
        );
        self.owner = Some(owner);
    }

    /// Offset from the owner's position
    pub fn ds(&self) -> Vec3 {
        self.ds
    }

    /// Half size on each axis
    pub fn half_size(&self) -> Vec3 {
        self.half_size
    }

    /// Full size on each axis
    pub fn size(&self) -> Vec3 {
        self.half_size * 2.0
    }

    /// Identifier within the owner's collider list
    pub fn id(&self) -> u32 {
        self.id
    }

    /// World-space center when the owner sits at `origin`
    pub fn center(&self, origin: Vec3) -> Vec3 {
        origin + self.ds
    }

    /// Lowest z reached by the box, relative to the owner's position
    pub fn bottom_offset(&self) -> f32 {
        self.ds.z - self.half_size.z
    }

    /// Place this collider at its owner's position for a query
    pub fn at(&self, origin: Vec3) -> PlacedCollider<'_> {
        PlacedCollider {
            collider: self,
            origin,
        }
    }
}

/// A collider together with its owner's current position
#[derive(Debug, Clone, Copy)]
pub struct PlacedCollider<'a> {
    /// The collider being placed
    pub collider: &'a Collider,
    /// Owner position used to resolve the collider offset
    pub origin: Vec3,
}

impl PlacedCollider<'_> {
    /// World-space center of the box
    pub fn center(&self) -> Vec3 {
        self.collider.center(self.origin)
    }

    /// World-space z of the box floor
    pub fn bottom(&self) -> f32 {
        self.origin.z + self.collider.bottom_offset()
    }
}

/// Outcome of [`check_collision`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionCheck {
    /// All three axes overlap
    pub colliding: bool,

    /// Displacement that moves `b` out of `a`. Only meaningful when
    /// `colliding` is set.
    pub mtv: Vec3,
}

impl CollisionCheck {
    /// The minimum translation vector if the boxes overlap
    pub fn contact(&self) -> Option<Vec3> {
        self.colliding.then_some(self.mtv)
    }
}

/// Test two placed colliders for overlap.
///
/// Each axis is handled independently: the axis overlaps when the center
/// distance is strictly smaller than the summed half sizes, and the
/// translation on that axis is the remaining gap signed by the direction
/// from `a` to `b`. Touching faces do not count as a collision.
pub fn check_collision(a: PlacedCollider<'_>, b: PlacedCollider<'_>) -> CollisionCheck {
    let distance = b.center() - a.center();
    let target = a.collider.half_size + b.collider.half_size;

    let mut colliding = true;
    let mut mtv = Vec3::zeros();

    for axis in 0..3 {
        let d = distance[axis];
        colliding &= d.abs() < target[axis];
        mtv[axis] = (target[axis] - d.abs()).copysign(d);
    }

    CollisionCheck { colliding, mtv }
}
