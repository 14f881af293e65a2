//! Spells cast by the player

use crate::config::ProjectileConfig;
use crate::debug::{render_colliders, ColliderColors};
use crate::entities::{EntityBehavior, EntityKind, EntityTag};
use crate::foundation::collections::ObjectId;
use crate::foundation::math::{Vec2, Vec3};
use crate::physics::Collider;
use crate::render::Renderer;
use crate::scheduling::TimerDescriptor;
use crate::world::{Body, Contact, DynamicBody, EntityContext, Object, RenderContext, Services};

/// Projectile state
#[derive(Debug, Clone)]
pub struct Projectile {
    caster: Option<ObjectId>,
    lifetime: f32,
    expiry: Option<TimerDescriptor>,
}

impl Projectile {
    /// Projectile living `lifetime` seconds that ignores `caster`
    pub fn new(caster: Option<ObjectId>, lifetime: f32) -> Self {
        Self {
            caster,
            lifetime,
            expiry: None,
        }
    }

    /// Ready-to-spawn projectile object
    pub fn object(caster: ObjectId, position: Vec3, velocity: Vec3, config: &ProjectileConfig) -> Object {
        Object::new(
            "spell",
            Body::Dynamic(DynamicBody::with_velocity(
                position,
                vec![Collider::new(Vec3::zeros(), config.size, 0)],
                velocity,
            )),
            EntityKind::Projectile(Self::new(Some(caster), config.lifetime)),
        )
    }

    /// Object that cast the projectile
    pub fn caster(&self) -> Option<ObjectId> {
        self.caster
    }
}

impl EntityBehavior for Projectile {
    fn update(&mut self, _body: &mut Body, ctx: &mut EntityContext<'_>, _dt: f32) {
        let Some(expiry) = self.expiry else {
            // Lifetime starts on the first tick in the world
            let deadline = ctx.deadline_in(self.lifetime);
            self.expiry = Some(ctx.services.timer.schedule_wake(deadline));
            return;
        };

        if ctx.services.timer.take_fired(expiry) {
            log::debug!("projectile {:?} expired", ctx.id);
            self.expiry = None;
            ctx.remove_self();
        }
    }

    fn render(&self, body: &Body, renderer: &mut dyn Renderer, ctx: &RenderContext<'_>, _dt: f32) {
        render_colliders(renderer, body, ctx, ColliderColors::default().for_tag(EntityTag::Projectile));
        if let Some(position) = body.position() {
            renderer.draw_billboard("spell", position, Vec2::new(0.25, 0.25));
        }
    }

    fn on_collision(&mut self, _body: &mut Body, contact: &Contact, ctx: &mut EntityContext<'_>) {
        if Some(contact.other) == self.caster {
            return;
        }
        if ctx.remove_self() {
            log::debug!("projectile {:?} hit {} {:?}", ctx.id, contact.other_tag, contact.other);
        }
    }

    fn on_removed(&mut self, services: &mut Services) {
        if let Some(expiry) = self.expiry.take() {
            services.timer.cancel(expiry);
        }
    }
}
