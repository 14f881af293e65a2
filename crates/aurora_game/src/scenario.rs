//! Initial population of the world

use aurora_engine::prelude::*;

/// Scenery layout as fractions of the terrain extent
const SCENERY: [(&str, f32, f32); 6] = [
    ("tree", 0.30, 0.25),
    ("tree", 0.35, 0.70),
    ("tree", 0.70, 0.35),
    ("rock", 0.55, 0.55),
    ("rock", 0.20, 0.50),
    ("tree", 0.80, 0.80),
];

/// Enemy spawn points as fractions of the terrain extent
const ENEMIES: [(f32, f32); 3] = [(0.60, 0.20), (0.20, 0.65), (0.65, 0.65)];

/// Enemy placed east of the player, in the line of the first scripted casts
const AMBUSH_OFFSET: (f32, f32) = (6.0, 0.0);

/// Handles of the objects the driver cares about
#[derive(Debug)]
pub struct Scenario {
    player: ObjectId,
    enemies: Vec<ObjectId>,
}

impl Scenario {
    /// Add terrain, scenery, the player and the enemies to `world`
    pub fn populate(world: &mut World) -> Result<Self, WorldError> {
        world.add_object(Terrain::object());

        let extent = world.map().extent();
        let at = |fx: f32, fy: f32, z: f32| Vec3::new(extent.x * fx, extent.y * fy, z);

        for (name, fx, fy) in SCENERY {
            world.spawn_blueprint(name, at(fx, fy, 0.0))?;
        }

        let start = at(0.5, 0.5, 3.0);
        let player = world.spawn_blueprint("player", start)?;
        let offset = world.config().camera.follow_offset;
        world.camera_mut().follow(player, offset);

        let mut enemies = ENEMIES
            .iter()
            .map(|&(fx, fy)| world.spawn_blueprint("enemy", at(fx, fy, 1.0)))
            .collect::<Result<Vec<_>, _>>()?;
        let ambush = Vec3::new(start.x + AMBUSH_OFFSET.0, start.y + AMBUSH_OFFSET.1, 1.0);
        enemies.push(world.spawn_blueprint("enemy", ambush)?);

        log::info!(
            "Scenario ready: {} scenery, {} enemies",
            world.count(EntityTag::Scenery),
            enemies.len()
        );
        Ok(Self { player, enemies })
    }

    /// Log what is left of the scenario
    pub fn log_summary(&self, world: &World) {
        match world.get(self.player).and_then(Object::position) {
            Some(position) => log::info!("Player alive at {:?}", position),
            None => log::info!("Player was destroyed"),
        }

        let alive = self.enemies.iter().filter(|&&id| world.get(id).is_some()).count();
        log::info!("{alive}/{} enemies remaining", self.enemies.len());
    }
}
