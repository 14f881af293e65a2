//! Keyboard-driven player

use std::f32::consts::SQRT_2;

use crate::config::PlayerConfig;
use crate::debug::{render_colliders, ColliderColors};
use crate::entities::{EntityBehavior, EntityTag, Projectile};
use crate::foundation::math::{Vec2, Vec3};
use crate::input::Key;
use crate::render::Renderer;
use crate::scheduling::{Timer, TimerDescriptor};
use crate::world::{Body, Contact, EntityContext, RenderContext, Services};

/// Player state
#[derive(Debug, Clone)]
pub struct Player {
    sprite: String,
    speed: f32,
    health: u32,
    cast_cooldown: f32,
    invulnerability: f32,
    facing: Vec2,
    cooldown: Option<TimerDescriptor>,
    invulnerable: Option<TimerDescriptor>,
}

/// Clear `slot` once its wake-up fired or disappeared
fn expire(slot: &mut Option<TimerDescriptor>, timer: &mut Timer) {
    if let Some(descriptor) = *slot {
        if timer.take_fired(descriptor) || !timer.is_scheduled(descriptor) {
            *slot = None;
        }
    }
}

impl Player {
    /// New player facing east
    pub fn new(config: &PlayerConfig, sprite: &str) -> Self {
        Self {
            sprite: sprite.to_owned(),
            speed: config.speed,
            health: config.health,
            cast_cooldown: config.cast_cooldown,
            invulnerability: config.invulnerability,
            facing: Vec2::new(1.0, 0.0),
            cooldown: None,
            invulnerable: None,
        }
    }

    /// Remaining health
    pub fn health(&self) -> u32 {
        self.health
    }

    /// Unit direction of the last movement
    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    /// Whether a cast is blocked by the cooldown
    pub fn is_cooling_down(&self) -> bool {
        self.cooldown.is_some()
    }

    fn axis_speed(&self, positive: bool, negative: bool) -> f32 {
        if positive {
            self.speed
        } else if negative {
            -self.speed
        } else {
            0.0
        }
    }

    fn cast(&mut self, position: Vec3, body_size: Vec3, ctx: &mut EntityContext<'_>) {
        let projectile = &ctx.config.projectile;
        // Far enough along the facing that the boxes cannot overlap
        let reach = (body_size.x.max(body_size.y) + projectile.size.x.max(projectile.size.y)) / 2.0 * SQRT_2 + 0.05;
        let direction = Vec3::new(self.facing.x, self.facing.y, 0.0);

        let object = Projectile::object(
            ctx.id,
            position + direction * reach,
            direction * projectile.speed,
            projectile,
        );
        ctx.spawn(object);

        let deadline = ctx.deadline_in(self.cast_cooldown);
        self.cooldown = Some(ctx.services.timer.schedule_wake(deadline));
        log::debug!("player {:?} cast towards {:?}", ctx.id, self.facing);
    }
}

impl EntityBehavior for Player {
    fn update(&mut self, body: &mut Body, ctx: &mut EntityContext<'_>, _dt: f32) {
        let Some(dynamic) = body.as_dynamic_mut() else {
            return;
        };

        let input = ctx.input;
        dynamic.velocity.x = self.axis_speed(input.is_key_down(Key::Right), input.is_key_down(Key::Left));
        dynamic.velocity.y = self.axis_speed(input.is_key_down(Key::Up), input.is_key_down(Key::Down));

        let planar = Vec2::new(dynamic.velocity.x, dynamic.velocity.y);
        if let Some(direction) = planar.try_normalize(f32::EPSILON) {
            self.facing = direction;
        }

        expire(&mut self.cooldown, &mut ctx.services.timer);
        expire(&mut self.invulnerable, &mut ctx.services.timer);

        if input.is_key_down(Key::Cast) && self.cooldown.is_none() {
            let size = dynamic
                .colliders
                .first()
                .map_or(ctx.config.player.size, |collider| collider.size());
            self.cast(dynamic.position, size, ctx);
        }
    }

    fn render(&self, body: &Body, renderer: &mut dyn Renderer, ctx: &RenderContext<'_>, _dt: f32) {
        render_colliders(renderer, body, ctx, ColliderColors::default().for_tag(EntityTag::Player));
        if let Some(position) = body.position() {
            renderer.draw_billboard(&self.sprite, position, Vec2::new(0.8, 1.0));
        }
    }

    fn on_collision(&mut self, _body: &mut Body, contact: &Contact, ctx: &mut EntityContext<'_>) {
        if contact.other_tag != EntityTag::Enemy || self.invulnerable.is_some() || self.health == 0 {
            return;
        }

        self.health -= 1;
        log::info!("player {:?} hit by {:?}, health {}", ctx.id, contact.other, self.health);

        if self.health == 0 {
            ctx.remove_self();
        } else {
            let deadline = ctx.deadline_in(self.invulnerability);
            self.invulnerable = Some(ctx.services.timer.schedule_wake(deadline));
        }
    }

    fn on_removed(&mut self, services: &mut Services) {
        for descriptor in [self.cooldown.take(), self.invulnerable.take()].into_iter().flatten() {
            services.timer.cancel(descriptor);
        }
    }
}
