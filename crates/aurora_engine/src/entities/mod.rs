//! Concrete entities and their behaviors
//!
//! The set of entity kinds is closed. [`EntityKind`] carries each kind's
//! state and [`EntityKind::behavior`] hands out its hook table, so the
//! world dispatches `update`, `render` and `on_collision` without knowing
//! which kind it is talking to.

pub mod enemy;
pub mod map;
pub mod patrol;
pub mod player;
pub mod projectile;
pub mod scenery;

use std::fmt;

pub use enemy::Enemy;
pub use map::Terrain;
pub use patrol::{Patrol, PatrolState};
pub use player::Player;
pub use projectile::Projectile;
pub use scenery::Scenery;

use crate::config::{Blueprint, BlueprintKind, SimulationConfig};
use crate::foundation::math::Vec3;
use crate::physics::Collider;
use crate::render::Renderer;
use crate::world::{Body, Contact, DynamicBody, EntityContext, Object, RenderContext, Services, StaticBody};

/// Entity kind without its state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityTag {
    /// Terrain surface
    Map,
    /// Static decoration
    Scenery,
    /// Keyboard-driven player
    Player,
    /// Patrolling enemy
    Enemy,
    /// Spell cast by the player
    Projectile,
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Map => "map",
            Self::Scenery => "scenery",
            Self::Player => "player",
            Self::Enemy => "enemy",
            Self::Projectile => "projectile",
        };
        f.write_str(name)
    }
}

/// Per-entity hooks called by the world
pub trait EntityBehavior {
    /// Called once per tick after physics and scheduling
    fn update(&mut self, _body: &mut Body, _ctx: &mut EntityContext<'_>, _dt: f32) {}

    /// Submit draw calls
    fn render(&self, body: &Body, renderer: &mut dyn Renderer, ctx: &RenderContext<'_>, dt: f32);

    /// Called for every collider pair that overlapped, after the bodies
    /// were separated
    fn on_collision(&mut self, _body: &mut Body, _contact: &Contact, _ctx: &mut EntityContext<'_>) {}

    /// Called after the object left the world and before it is dropped.
    /// Everything registered with the schedulers must be withdrawn here.
    fn on_removed(&mut self, _services: &mut Services) {}
}

/// Entity variant with its state
#[derive(Debug)]
pub enum EntityKind {
    /// Terrain surface
    Map(Terrain),
    /// Static decoration
    Scenery(Scenery),
    /// Keyboard-driven player
    Player(Player),
    /// Patrolling enemy
    Enemy(Enemy),
    /// Spell cast by the player
    Projectile(Projectile),
}

impl EntityKind {
    /// Variant tag
    pub fn tag(&self) -> EntityTag {
        match self {
            Self::Map(_) => EntityTag::Map,
            Self::Scenery(_) => EntityTag::Scenery,
            Self::Player(_) => EntityTag::Player,
            Self::Enemy(_) => EntityTag::Enemy,
            Self::Projectile(_) => EntityTag::Projectile,
        }
    }

    /// Hook table of this entity
    pub fn behavior(&self) -> &dyn EntityBehavior {
        match self {
            Self::Map(entity) => entity,
            Self::Scenery(entity) => entity,
            Self::Player(entity) => entity,
            Self::Enemy(entity) => entity,
            Self::Projectile(entity) => entity,
        }
    }

    /// Mutable hook table of this entity
    pub fn behavior_mut(&mut self) -> &mut dyn EntityBehavior {
        match self {
            Self::Map(entity) => entity,
            Self::Scenery(entity) => entity,
            Self::Player(entity) => entity,
            Self::Enemy(entity) => entity,
            Self::Projectile(entity) => entity,
        }
    }
}

/// Build an object from a blueprint, placed at `position`
pub fn instantiate(name: &str, blueprint: &Blueprint, position: Vec3, config: &SimulationConfig) -> Object {
    let mut colliders: Vec<Collider> = blueprint
        .colliders
        .iter()
        .zip(0_u32..)
        .map(|(spec, id)| Collider::new(spec.offset, spec.size, id))
        .collect();

    match blueprint.kind {
        BlueprintKind::Scenery => Object::new(
            name,
            Body::Static(StaticBody::new(position, colliders)),
            EntityKind::Scenery(Scenery::new(&blueprint.sprite)),
        ),
        BlueprintKind::Player => {
            if colliders.is_empty() {
                colliders.push(Collider::new(Vec3::zeros(), config.player.size, 0));
            }
            Object::new(
                name,
                Body::Dynamic(DynamicBody::new(position, colliders)),
                EntityKind::Player(Player::new(&config.player, &blueprint.sprite)),
            )
        }
        BlueprintKind::Enemy => {
            let patrol = blueprint
                .patrol
                .as_ref()
                .map_or_else(|| Patrol::stationary(position, &config.patrol), |spec| {
                    Patrol::from_spec(spec, position, &config.patrol)
                });
            Object::new(
                name,
                Body::Dynamic(DynamicBody::new(position, colliders)),
                EntityKind::Enemy(Enemy::new(patrol, &blueprint.sprite)),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BlueprintSet;

    #[test]
    fn test_instantiate_builtin_kinds() {
        let config = SimulationConfig::default();
        let set = BlueprintSet::builtin();

        let tree = instantiate("tree", set.get("tree").unwrap(), Vec3::zeros(), &config);
        assert_eq!(tree.tag(), EntityTag::Scenery);
        assert!(!tree.body.is_dynamic());

        let player = instantiate("player", set.get("player").unwrap(), Vec3::zeros(), &config);
        assert_eq!(player.tag(), EntityTag::Player);
        assert_eq!(player.body.colliders()[0].size(), config.player.size);

        let enemy = instantiate("enemy", set.get("enemy").unwrap(), Vec3::zeros(), &config);
        assert_eq!(enemy.tag(), EntityTag::Enemy);
        assert!(enemy.body.is_dynamic());
    }

    #[test]
    fn test_collider_ids_follow_blueprint_order() {
        let config = SimulationConfig::default();
        let mut blueprint = BlueprintSet::builtin().get("tree").unwrap().clone();
        blueprint.colliders.push(crate::config::ColliderSpec::standing(Vec3::repeat(0.5)));

        let object = instantiate("tree", &blueprint, Vec3::zeros(), &config);
        let ids: Vec<u32> = object.body.colliders().iter().map(Collider::id).collect();
        assert_eq!(ids, vec![0, 1]);
    }
}
