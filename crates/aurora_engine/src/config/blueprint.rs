//! Named entity templates
//!
//! A blueprint describes what kind of entity to build, its colliders and,
//! for enemies, the patrol route. Positions inside a blueprint are relative
//! to the spawn point.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::math::{utils, Vec2, Vec3};

/// Entity kinds that can be built from a blueprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlueprintKind {
    /// Static decoration with colliders
    Scenery,
    /// Keyboard-driven player
    Player,
    /// Patrolling enemy
    Enemy,
}

/// Box collider description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderSpec {
    /// Offset from the entity position
    #[serde(default = "Vec3::zeros")]
    pub offset: Vec3,
    /// Full size of the box
    pub size: Vec3,
}

impl ColliderSpec {
    /// Box of `size` with its center raised so its floor sits at the
    /// entity position
    pub fn standing(size: Vec3) -> Self {
        Self {
            offset: Vec3::new(0.0, 0.0, size.z / 2.0),
            size,
        }
    }
}

/// Order in which waypoints are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatrolOrder {
    /// Cycle through the list
    #[default]
    Sequential,
    /// Draw the next waypoint from the world RNG
    Random,
}

/// Patrol route of an enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatrolSpec {
    /// Horizontal waypoints relative to the spawn point
    pub waypoints: Vec<Vec2>,
    /// Visiting order
    #[serde(default)]
    pub order: PatrolOrder,
    /// Travel speed, falls back to the simulation default
    #[serde(default)]
    pub speed: Option<f32>,
    /// Pause at each waypoint, falls back to the simulation default
    #[serde(default)]
    pub wait: Option<f32>,
}

/// Entity template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    /// What to build
    pub kind: BlueprintKind,
    /// Sprite handed to the renderer
    #[serde(default)]
    pub sprite: String,
    /// Colliders; players fall back to the configured player size
    #[serde(default)]
    pub colliders: Vec<ColliderSpec>,
    /// Required for enemies, ignored otherwise
    #[serde(default)]
    pub patrol: Option<PatrolSpec>,
}

/// All blueprints known to a world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlueprintSet {
    /// Blueprints by name
    pub blueprints: BTreeMap<String, Blueprint>,
}

impl Default for BlueprintSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BlueprintSet {
    /// The stock entities: `tree`, `rock`, `player` and `enemy`
    pub fn builtin() -> Self {
        let mut blueprints = BTreeMap::new();

        blueprints.insert(
            "tree".to_owned(),
            Blueprint {
                kind: BlueprintKind::Scenery,
                sprite: "tree".to_owned(),
                colliders: vec![ColliderSpec::standing(Vec3::new(0.6, 0.6, 2.0))],
                patrol: None,
            },
        );
        blueprints.insert(
            "rock".to_owned(),
            Blueprint {
                kind: BlueprintKind::Scenery,
                sprite: "rock".to_owned(),
                colliders: vec![ColliderSpec::standing(Vec3::new(1.0, 1.0, 0.8))],
                patrol: None,
            },
        );
        blueprints.insert(
            "player".to_owned(),
            Blueprint {
                kind: BlueprintKind::Player,
                sprite: "player".to_owned(),
                colliders: Vec::new(),
                patrol: None,
            },
        );
        blueprints.insert(
            "enemy".to_owned(),
            Blueprint {
                kind: BlueprintKind::Enemy,
                sprite: "enemy".to_owned(),
                colliders: vec![ColliderSpec {
                    offset: Vec3::zeros(),
                    size: Vec3::new(1.0, 1.0, 1.0),
                }],
                patrol: Some(PatrolSpec {
                    waypoints: vec![
                        Vec2::new(0.0, 0.0),
                        Vec2::new(4.0, 0.0),
                        Vec2::new(4.0, 4.0),
                        Vec2::new(0.0, 4.0),
                    ],
                    order: PatrolOrder::Sequential,
                    speed: None,
                    wait: None,
                }),
            },
        );

        Self { blueprints }
    }

    /// Look up a blueprint by name
    pub fn get(&self, name: &str) -> Option<&Blueprint> {
        self.blueprints.get(name)
    }

    /// Add or replace a blueprint
    pub fn insert(&mut self, name: impl Into<String>, blueprint: Blueprint) {
        self.blueprints.insert(name.into(), blueprint);
    }

    /// Blueprint names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.blueprints.keys().map(String::as_str)
    }
}

impl Config for BlueprintSet {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, blueprint) in &self.blueprints {
            for (i, collider) in blueprint.colliders.iter().enumerate() {
                if !utils::all_positive(&collider.size) {
                    return Err(ConfigError::invalid(
                        format!("blueprints.{name}.colliders[{i}].size"),
                        "every component must be positive",
                    ));
                }
            }

            match (blueprint.kind, &blueprint.patrol) {
                (BlueprintKind::Enemy, None) => {
                    return Err(ConfigError::invalid(
                        format!("blueprints.{name}.patrol"),
                        "enemies need a patrol route",
                    ));
                }
                (BlueprintKind::Enemy, Some(patrol)) if patrol.waypoints.is_empty() => {
                    return Err(ConfigError::invalid(
                        format!("blueprints.{name}.patrol.waypoints"),
                        "at least one waypoint is required",
                    ));
                }
                (BlueprintKind::Scenery, _) if blueprint.colliders.is_empty() => {
                    log::warn!("Scenery blueprint '{name}' has no colliders");
                }
                _ => {}
            }

            if let Some(patrol) = &blueprint.patrol {
                if patrol.speed.is_some_and(|speed| speed <= 0.0) {
                    return Err(ConfigError::invalid(
                        format!("blueprints.{name}.patrol.speed"),
                        "must be positive",
                    ));
                }
                if patrol.wait.is_some_and(|wait| wait < 0.0) {
                    return Err(ConfigError::invalid(
                        format!("blueprints.{name}.patrol.wait"),
                        "must not be negative",
                    ));
                }
            }
        }
        Ok(())
    }
}
