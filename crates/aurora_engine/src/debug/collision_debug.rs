//! Collider wireframes
//!
//! Every render hook forwards its body here. With the `debug-colliders`
//! feature each collider becomes a wire cube in its kind's color; without
//! it this compiles to nothing.

use crate::entities::EntityTag;
use crate::foundation::math::{colors, Color};
use crate::render::Renderer;
use crate::world::{Body, RenderContext};

/// Wireframe color per entity kind
#[derive(Clone, Debug, PartialEq)]
pub struct ColliderColors {
    /// Static decoration
    pub scenery: Color,
    /// Player
    pub player: Color,
    /// Enemies
    pub enemy: Color,
    /// Projectiles
    pub projectile: Color,
}

impl Default for ColliderColors {
    fn default() -> Self {
        Self {
            scenery: colors::green(),
            player: colors::red(),
            enemy: colors::yellow(),
            projectile: colors::blue(),
        }
    }
}

impl ColliderColors {
    /// Color used for `tag`
    pub fn for_tag(&self, tag: EntityTag) -> Color {
        match tag {
            EntityTag::Scenery => self.scenery,
            EntityTag::Player => self.player,
            EntityTag::Enemy => self.enemy,
            EntityTag::Projectile => self.projectile,
            EntityTag::Map => colors::white(),
        }
    }
}

/// Submit one wire cube per collider of `body`
#[cfg(feature = "debug-colliders")]
pub fn render_colliders(renderer: &mut dyn Renderer, body: &Body, ctx: &RenderContext<'_>, color: Color) {
    if !ctx.debug_colliders {
        return;
    }
    let Some(position) = body.position() else {
        return;
    };
    for collider in body.colliders() {
        renderer.draw_wire_cube(collider.center(position), collider.size(), color);
    }
}

/// Collider wireframes are compiled out
#[cfg(not(feature = "debug-colliders"))]
pub fn render_colliders(_renderer: &mut dyn Renderer, _body: &Body, _ctx: &RenderContext<'_>, _color: Color) {}
