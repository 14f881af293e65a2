//! Objects owned by the world and their physical bodies

use std::ops::{Deref, DerefMut};

use crate::entities::{EntityKind, EntityTag};
use crate::foundation::collections::ObjectId;
use crate::foundation::math::Vec3;
use crate::physics::Collider;

/// Position and colliders of an object that can be collided with
#[derive(Debug, Clone, PartialEq)]
pub struct StaticBody {
    /// Reference position, collider offsets are relative to it
    pub position: Vec3,
    /// Colliders in the order they are tested
    pub colliders: Vec<Collider>,
}

impl StaticBody {
    /// Create a body at `position`
    pub fn new(position: Vec3, colliders: Vec<Collider>) -> Self {
        Self { position, colliders }
    }

    /// Lowest collider bottom relative to `position`, `None` without
    /// colliders
    pub fn bottom_offset(&self) -> Option<f32> {
        self.colliders
            .iter()
            .map(Collider::bottom_offset)
            .reduce(f32::min)
    }
}

/// A static body that also moves
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicBody {
    base: StaticBody,
    /// Current velocity
    pub velocity: Vec3,
}

impl DynamicBody {
    /// Create a body at rest
    pub fn new(position: Vec3, colliders: Vec<Collider>) -> Self {
        Self::with_velocity(position, colliders, Vec3::zeros())
    }

    /// Create a body with an initial velocity
    pub fn with_velocity(position: Vec3, colliders: Vec<Collider>, velocity: Vec3) -> Self {
        Self {
            base: StaticBody::new(position, colliders),
            velocity,
        }
    }

    /// The body viewed as a static body
    pub fn as_static(&self) -> &StaticBody {
        &self.base
    }

    /// Position, velocity and colliders borrowed separately
    pub fn split_mut(&mut self) -> (&mut Vec3, &mut Vec3, &[Collider]) {
        (&mut self.base.position, &mut self.velocity, &self.base.colliders)
    }
}

impl Deref for DynamicBody {
    type Target = StaticBody;

    fn deref(&self) -> &StaticBody {
        &self.base
    }
}

impl DerefMut for DynamicBody {
    fn deref_mut(&mut self) -> &mut StaticBody {
        &mut self.base
    }
}

/// Physical presence of an object
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Not part of the physics passes
    None,
    /// Collides but never moves on its own
    Static(StaticBody),
    /// Integrated every tick and pushed out of other bodies
    Dynamic(DynamicBody),
}

impl Body {
    /// Static view; dynamic bodies expose their static part
    pub fn as_static(&self) -> Option<&StaticBody> {
        match self {
            Self::None => None,
            Self::Static(body) => Some(body),
            Self::Dynamic(body) => Some(body.as_static()),
        }
    }

    /// Mutable static view
    pub fn as_static_mut(&mut self) -> Option<&mut StaticBody> {
        match self {
            Self::None => None,
            Self::Static(body) => Some(body),
            Self::Dynamic(body) => Some(&mut body.base),
        }
    }

    /// Dynamic view
    pub fn as_dynamic(&self) -> Option<&DynamicBody> {
        match self {
            Self::Dynamic(body) => Some(body),
            _ => None,
        }
    }

    /// Mutable dynamic view
    pub fn as_dynamic_mut(&mut self) -> Option<&mut DynamicBody> {
        match self {
            Self::Dynamic(body) => Some(body),
            _ => None,
        }
    }

    /// Whether the body is integrated
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }

    /// Current position
    pub fn position(&self) -> Option<Vec3> {
        self.as_static().map(|body| body.position)
    }

    /// Mutable position
    pub fn position_mut(&mut self) -> Option<&mut Vec3> {
        self.as_static_mut().map(|body| &mut body.position)
    }

    /// Current velocity, zero for static bodies
    pub fn velocity(&self) -> Vec3 {
        self.as_dynamic().map_or_else(Vec3::zeros, |body| body.velocity)
    }

    /// Colliders, empty for bodiless objects
    pub fn colliders(&self) -> &[Collider] {
        match self.as_static() {
            Some(body) => &body.colliders,
            None => &[],
        }
    }

    /// Mutable colliders
    pub fn colliders_mut(&mut self) -> &mut [Collider] {
        match self.as_static_mut() {
            Some(body) => body.colliders.as_mut_slice(),
            None => &mut [],
        }
    }
}

/// Something living in the world
#[derive(Debug)]
pub struct Object {
    id: Option<ObjectId>,

    /// Display name
    pub name: String,

    /// Physical presence
    pub body: Body,

    /// Entity variant with its behavior state
    pub kind: EntityKind,
}

impl Object {
    /// Create an object that is not yet in a world
    pub fn new(name: impl Into<String>, body: Body, kind: EntityKind) -> Self {
        Self {
            id: None,
            name: name.into(),
            body,
            kind,
        }
    }

    /// Handle assigned by the world, `None` before it is added
    pub fn id(&self) -> Option<ObjectId> {
        self.id
    }

    pub(crate) fn bind(&mut self, id: ObjectId) {
        self.id = Some(id);
        for collider in self.body.colliders_mut() {
            collider.bind(id);
        }
    }

    /// Entity variant without its state
    pub fn tag(&self) -> EntityTag {
        self.kind.tag()
    }

    /// Current position, if the object has a body
    pub fn position(&self) -> Option<Vec3> {
        self.body.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_body_exposes_static_view() {
        let mut body = Body::Dynamic(DynamicBody::new(
            Vec3::new(1.0, 2.0, 3.0),
            vec![Collider::cube(1.0, 0)],
        ));

        assert_eq!(body.position(), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(body.colliders().len(), 1);

        if let Some(position) = body.position_mut() {
            position.z = 0.0;
        }
        assert_eq!(body.as_dynamic().map(|b| b.position.z), Some(0.0));
    }

    #[test]
    fn test_bodiless_object() {
        let body = Body::None;
        assert!(body.colliders().is_empty());
        assert_eq!(body.position(), None);
        assert_eq!(body.velocity(), Vec3::zeros());
    }

    #[test]
    fn test_bottom_offset_uses_lowest_collider() {
        let body = StaticBody::new(
            Vec3::zeros(),
            vec![
                Collider::new(Vec3::new(0.0, 0.0, 1.0), Vec3::repeat(1.0), 0),
                Collider::new(Vec3::new(0.0, 0.0, 0.25), Vec3::repeat(1.0), 1),
            ],
        );
        assert_eq!(body.bottom_offset(), Some(-0.25));
        assert_eq!(StaticBody::new(Vec3::zeros(), Vec::new()).bottom_offset(), None);
    }
}
