//! Trees, rocks and other things in the way

use crate::debug::{render_colliders, ColliderColors};
use crate::entities::{EntityBehavior, EntityTag};
use crate::foundation::math::{Vec2, Vec3};
use crate::render::Renderer;
use crate::world::{Body, RenderContext};

/// Static decoration
#[derive(Debug, Clone)]
pub struct Scenery {
    sprite: String,
}

impl Scenery {
    /// Decoration drawn with `sprite`
    pub fn new(sprite: &str) -> Self {
        Self {
            sprite: sprite.to_owned(),
        }
    }

    /// Sprite name
    pub fn sprite(&self) -> &str {
        &self.sprite
    }
}

impl EntityBehavior for Scenery {
    fn render(&self, body: &Body, renderer: &mut dyn Renderer, ctx: &RenderContext<'_>, _dt: f32) {
        render_colliders(renderer, body, ctx, ColliderColors::default().for_tag(EntityTag::Scenery));

        let Some(position) = body.position() else {
            return;
        };
        // Sprite spans the tallest collider, standing on the position
        let height = body
            .colliders()
            .iter()
            .map(|collider| collider.ds().z + collider.half_size().z)
            .fold(1.0_f32, f32::max);
        let half_size = Vec2::new(height * 0.4, height / 2.0);
        renderer.draw_billboard(&self.sprite, position + Vec3::new(0.0, 0.0, half_size.y), half_size);
    }
}
