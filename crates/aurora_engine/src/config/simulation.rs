//! Simulation tuning loaded at startup

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::math::{utils, Vec3};

/// Height-field dimensions for generated terrain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Vertex rows along x
    pub rows: usize,
    /// Vertex columns along y
    pub cols: usize,
    /// Altitude of the flat terrain
    pub height: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            cols: 100,
            height: 0.0,
        }
    }
}

/// Player tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Planar speed while an arrow key is held
    pub speed: f32,
    /// Enemy contacts the player survives
    pub health: u32,
    /// Collider size
    pub size: Vec3,
    /// Seconds between two casts
    pub cast_cooldown: f32,
    /// Seconds of immunity after an enemy hit
    pub invulnerability: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            health: 3,
            size: Vec3::new(2.0, 2.0, 2.0),
            cast_cooldown: 0.5,
            invulnerability: 1.0,
        }
    }
}

/// Spell projectile tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Launch speed
    pub speed: f32,
    /// Seconds before the projectile expires
    pub lifetime: f32,
    /// Collider size
    pub size: Vec3,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 6.0,
            lifetime: 1.5,
            size: Vec3::new(0.4, 0.4, 0.4),
        }
    }
}

/// Defaults for patrolling enemies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolConfig {
    /// Travel speed between waypoints
    pub speed: f32,
    /// Seconds spent at each waypoint
    pub wait: f32,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self { speed: 1.0, wait: 1.0 }
    }
}

/// Camera placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial camera position
    pub position: Vec3,
    /// Camera offset from the followed object
    pub follow_offset: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(-3.0, -3.0, 5.0),
            follow_offset: Vec3::new(-3.0, -3.0, 5.0),
        }
    }
}

/// Top-level simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Constant acceleration applied to dynamic objects
    pub gravity: Vec3,
    /// Seconds per fixed tick
    pub fixed_timestep: f32,
    /// Seed of the world RNG
    pub seed: u64,
    /// Submit collider wireframes while rendering
    pub debug_render_colliders: bool,
    /// Terrain grid
    pub terrain: TerrainConfig,
    /// Player tuning
    pub player: PlayerConfig,
    /// Projectile tuning
    pub projectile: ProjectileConfig,
    /// Patrol defaults
    pub patrol: PatrolConfig,
    /// Camera placement
    pub camera: CameraConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, 0.0, -9.8),
            fixed_timestep: 1.0 / 60.0,
            seed: 0x00a7_0aa5,
            debug_render_colliders: true,
            terrain: TerrainConfig::default(),
            player: PlayerConfig::default(),
            projectile: ProjectileConfig::default(),
            patrol: PatrolConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

fn positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn positive_size(field: &str, size: &Vec3) -> Result<(), ConfigError> {
    if utils::all_positive(size) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("every component must be positive, got [{}, {}, {}]", size.x, size.y, size.z),
        ))
    }
}

impl Config for SimulationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("fixed_timestep", self.fixed_timestep)?;
        if self.terrain.rows < 2 || self.terrain.cols < 2 {
            return Err(ConfigError::invalid(
                "terrain",
                format!("needs at least 2x2 vertices, got {}x{}", self.terrain.rows, self.terrain.cols),
            ));
        }
        positive("player.speed", self.player.speed)?;
        positive_size("player.size", &self.player.size)?;
        positive("player.cast_cooldown", self.player.cast_cooldown)?;
        if self.player.invulnerability < 0.0 {
            return Err(ConfigError::invalid("player.invulnerability", "must not be negative"));
        }
        positive("projectile.speed", self.projectile.speed)?;
        positive("projectile.lifetime", self.projectile.lifetime)?;
        positive_size("projectile.size", &self.projectile.size)?;
        positive("patrol.speed", self.patrol.speed)?;
        if self.patrol.wait < 0.0 {
            return Err(ConfigError::invalid("patrol.wait", "must not be negative"));
        }
        Ok(())
    }
}
