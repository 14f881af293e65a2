//! Orthographic world camera
//!
//! The camera looks down the fixed diagonal `(1, 1, -1)` with `z` up, so
//! moving it only translates the view. It can follow an object by keeping a
//! constant offset from that object's position.

use crate::foundation::collections::ObjectId;
use crate::foundation::math::Vec3;

/// World camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Viewing direction, not normalized
    pub direction: Vec3,

    /// Up vector for camera orientation
    pub up: Vec3,

    /// Width of the orthographic view volume in world units
    pub view_width: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,

    follow: Option<(ObjectId, Vec3)>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(-3.0, -3.0, 5.0))
    }
}

impl Camera {
    /// Create a camera at `position` looking along the standard diagonal
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            direction: Vec3::new(1.0, 1.0, -1.0),
            up: Vec3::new(0.0, 0.0, 1.0),
            view_width: 10.0,
            near: 0.1,
            far: 100.0,
            follow: None,
        }
    }

    /// Point the camera is looking at
    pub fn target(&self) -> Vec3 {
        self.position + self.direction
    }

    /// Keep the camera at `offset` from `object`
    pub fn follow(&mut self, object: ObjectId, offset: Vec3) {
        self.follow = Some((object, offset));
    }

    /// Stop following
    pub fn unfollow(&mut self) {
        self.follow = None;
    }

    /// Object being followed, if any
    pub fn followed(&self) -> Option<ObjectId> {
        self.follow.map(|(object, _)| object)
    }

    /// Move to the followed object's position plus the offset.
    ///
    /// `position_of` returns `None` once the object is gone, in which case
    /// the camera stays where it is and stops following.
    pub fn update(&mut self, position_of: impl FnOnce(ObjectId) -> Option<Vec3>) {
        let Some((object, offset)) = self.follow else {
            return;
        };
        match position_of(object) {
            Some(position) => self.position = position + offset,
            None => self.follow = None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::SlotMap;

    #[test]
    fn test_default_position() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::new(-3.0, -3.0, 5.0));
        assert_eq!(camera.target(), Vec3::new(-2.0, -2.0, 4.0));
    }

    #[test]
    fn test_follow_and_lose_target() {
        let mut ids: SlotMap<ObjectId, ()> = SlotMap::with_key();
        let id = ids.insert(());
        let mut camera = Camera::default();

        camera.follow(id, Vec3::new(-3.0, -3.0, 5.0));
        camera.update(|_| Some(Vec3::new(1.0, 2.0, 0.0)));
        assert_eq!(camera.position, Vec3::new(-2.0, -1.0, 5.0));

        camera.update(|_| None);
        assert_eq!(camera.followed(), None);
        assert_eq!(camera.position, Vec3::new(-2.0, -1.0, 5.0));
    }

    #[test]
    fn test_unfollow_keeps_position() {
        let mut ids: SlotMap<ObjectId, ()> = SlotMap::with_key();
        let id = ids.insert(());
        let mut camera = Camera::default();

        camera.follow(id, Vec3::zeros());
        camera.unfollow();
        camera.update(|_| Some(Vec3::new(9.0, 9.0, 9.0)));

        assert_eq!(camera.followed(), None);
        assert_eq!(camera.position, Vec3::new(-3.0, -3.0, 5.0));
    }
}
