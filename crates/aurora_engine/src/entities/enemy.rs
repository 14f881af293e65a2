//! Patrolling enemies

use crate::debug::{render_colliders, ColliderColors};
use crate::entities::{EntityBehavior, EntityTag, Patrol};
use crate::foundation::math::Vec2;
use crate::render::Renderer;
use crate::world::{Body, Contact, EntityContext, RenderContext, Services};

/// Enemy state
#[derive(Debug, Clone)]
pub struct Enemy {
    sprite: String,
    patrol: Patrol,
}

impl Enemy {
    /// Enemy following `patrol`
    pub fn new(patrol: Patrol, sprite: &str) -> Self {
        Self {
            sprite: sprite.to_owned(),
            patrol,
        }
    }

    /// Patrol progress
    pub fn patrol(&self) -> &Patrol {
        &self.patrol
    }
}

impl EntityBehavior for Enemy {
    fn update(&mut self, body: &mut Body, ctx: &mut EntityContext<'_>, _dt: f32) {
        if let Some(position) = body.position() {
            self.patrol.step(ctx.id, position, ctx.services);
        }
    }

    fn render(&self, body: &Body, renderer: &mut dyn Renderer, ctx: &RenderContext<'_>, _dt: f32) {
        render_colliders(renderer, body, ctx, ColliderColors::default().for_tag(EntityTag::Enemy));
        if let Some(position) = body.position() {
            renderer.draw_billboard(&self.sprite, position, Vec2::new(0.5, 0.5));
        }
    }

    fn on_collision(&mut self, _body: &mut Body, contact: &Contact, ctx: &mut EntityContext<'_>) {
        if contact.other_tag == EntityTag::Projectile && ctx.remove_self() {
            log::info!("enemy {:?} destroyed by {:?}", ctx.id, contact.other);
        }
    }

    fn on_removed(&mut self, services: &mut Services) {
        self.patrol.release(services);
    }
}
