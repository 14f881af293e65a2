//! The terrain as an entity
//!
//! The height-field itself belongs to the world so the physics passes can
//! query it. This entity only puts it on screen.

use crate::entities::{EntityBehavior, EntityKind};
use crate::render::Renderer;
use crate::world::{Body, Object, RenderContext};

/// Terrain renderer entity
#[derive(Debug, Default, Clone, Copy)]
pub struct Terrain;

impl Terrain {
    /// Bodiless object drawing the world's terrain
    pub fn object() -> Object {
        Object::new("map", Body::None, EntityKind::Map(Self))
    }
}

impl EntityBehavior for Terrain {
    fn render(&self, _body: &Body, renderer: &mut dyn Renderer, ctx: &RenderContext<'_>, _dt: f32) {
        renderer.draw_terrain(ctx.map);
    }
}
