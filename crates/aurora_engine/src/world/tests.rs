//! End-to-end scenarios run through the world pipeline

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use approx::{assert_abs_diff_eq, assert_relative_eq};

use super::*;
use crate::debug::DebugDrawList;
use crate::entities::{EntityKind, Enemy, Patrol, PatrolState, Projectile, Scenery, Terrain};
use crate::foundation::math::Axis;
use crate::foundation::time::{duration_to_secs, secs_to_duration, ManualClock, SystemClock};
use crate::input::{Key, KeyboardState, NoInput};
use crate::physics::Collider;

const DT: f32 = 1.0 / 60.0;

fn flat_world() -> World {
    let map = Map::flat(10, 10, 0.0).unwrap();
    World::new(SimulationConfig::default(), map)
}

fn crate_object(position: Vec3) -> Object {
    Object::new(
        "crate",
        Body::Dynamic(DynamicBody::new(position, vec![Collider::cube(1.0, 0)])),
        EntityKind::Scenery(Scenery::new("crate")),
    )
}

fn block_object(position: Vec3) -> Object {
    Object::new(
        "block",
        Body::Static(StaticBody::new(position, vec![Collider::cube(1.0, 0)])),
        EntityKind::Scenery(Scenery::new("block")),
    )
}

fn dynamic(world: &World, id: ObjectId) -> &DynamicBody {
    world
        .get(id)
        .and_then(|object| object.body.as_dynamic())
        .expect("object should be a live dynamic object")
}

fn position(world: &World, id: ObjectId) -> Vec3 {
    world.get(id).and_then(Object::position).expect("object should have a position")
}

fn run(world: &mut World, input: &dyn InputState, ticks: usize) {
    let mut renderer = DebugDrawList::new();
    for _ in 0..ticks {
        world.tick(input, &mut renderer, DT);
    }
}

fn player_health(world: &World, id: ObjectId) -> u32 {
    match world.get(id).map(|object| &object.kind) {
        Some(EntityKind::Player(player)) => player.health(),
        _ => panic!("not a player"),
    }
}

fn patrol_state(world: &World, id: ObjectId) -> PatrolState {
    match world.get(id).map(|object| &object.kind) {
        Some(EntityKind::Enemy(enemy)) => enemy.patrol().state(),
        _ => panic!("not an enemy"),
    }
}

#[test]
fn test_dropped_box_rests_on_terrain() {
    let mut world = flat_world();
    let id = world.add_object(crate_object(Vec3::new(0.0, 0.0, 5.0)));

    run(&mut world, &NoInput, 300);

    assert_relative_eq!(position(&world, id).z, 0.5, epsilon = 1e-4);
    assert_eq!(dynamic(&world, id).velocity.z, 0.0);
}

#[test]
fn test_one_tick_integration_from_rest() {
    let mut world = flat_world();
    let id = world.add_object(crate_object(Vec3::new(3.0, 3.0, 5.0)));
    let gravity = world.config().gravity;

    world.physics(DT);

    assert_relative_eq!(dynamic(&world, id).velocity, gravity * DT);
    assert_relative_eq!(position(&world, id), Vec3::new(3.0, 3.0, 5.0) + gravity * (0.5 * DT * DT));
}

#[test]
fn test_dynamic_pair_splits_evenly_and_keeps_velocity() {
    let mut world = flat_world();
    let mut left = crate_object(Vec3::new(2.0, 2.0, 1.0));
    let mut right = crate_object(Vec3::new(2.5, 2.0, 1.0));
    if let Some(body) = left.body.as_dynamic_mut() {
        body.velocity.x = 1.0;
    }
    if let Some(body) = right.body.as_dynamic_mut() {
        body.velocity.x = -1.0;
    }
    let a = world.add_object(left);
    let b = world.add_object(right);

    assert_eq!(world.process_object_collision(), 1);

    let (pa, pb) = (position(&world, a), position(&world, b));
    assert_relative_eq!(pb.x - pa.x, 1.0, epsilon = 1e-6);
    assert_relative_eq!((pa.x + pb.x) / 2.0, 2.25, epsilon = 1e-6);
    assert_eq!(pa.y, 2.0);
    assert_eq!(dynamic(&world, a).velocity.x, 1.0);
    assert_eq!(dynamic(&world, b).velocity.x, -1.0);

    // b is pushed out of a, a receives the opposite translation
    let mtv = Vec3::new(0.5, 1.0, 1.0);
    let delivered = world.contacts();
    assert_eq!(delivered.len(), 2);
    assert_eq!((delivered[0].0, delivered[0].1.other), (a, b));
    assert_relative_eq!(delivered[0].1.mtv, -mtv);
    assert_eq!((delivered[1].0, delivered[1].1.other), (b, a));
    assert_relative_eq!(delivered[1].1.mtv, mtv);
}

#[test]
fn test_static_contact_moves_dynamic_fully_and_stops_it() {
    let mut world = flat_world();
    let block = world.add_object(block_object(Vec3::new(2.0, 2.0, 0.5)));
    let mut falling = crate_object(Vec3::new(2.2, 2.0, 1.3));
    if let Some(body) = falling.body.as_dynamic_mut() {
        body.velocity = Vec3::new(0.3, 0.0, -2.0);
    }
    let id = world.add_object(falling);

    assert_eq!(world.process_object_collision(), 1);

    assert_relative_eq!(position(&world, id), Vec3::new(2.2, 2.0, 1.5), epsilon = 1e-6);
    assert_eq!(dynamic(&world, id).velocity, Vec3::new(0.3, 0.0, 0.0));
    assert_eq!(position(&world, block), Vec3::new(2.0, 2.0, 0.5));
}

#[test]
fn test_static_contact_notifies_both_sides_dynamic_first() {
    let mut world = flat_world();
    let caster = world.add_object(block_object(Vec3::new(1.0, 1.0, 0.5)));
    let statue = world.add_object(Object::new(
        "statue",
        Body::Static(StaticBody::new(Vec3::new(5.0, 5.0, 0.5), vec![Collider::cube(1.0, 3)])),
        EntityKind::Enemy(Enemy::new(
            Patrol::stationary(Vec3::new(5.0, 5.0, 0.5), &world.config().patrol),
            "statue",
        )),
    ));
    let spell = Projectile::object(caster, Vec3::new(5.3, 5.0, 0.5), Vec3::zeros(), &world.config().projectile);
    let spell = world.add_object(spell);

    assert_eq!(world.process_object_collision(), 1);

    assert_eq!(world.pending_removals(), &[spell, statue]);
    assert_relative_eq!(position(&world, spell).x, 5.7, epsilon = 1e-6);

    let delivered = world.contacts();
    assert_eq!(delivered.len(), 2);
    let (first, to_spell) = delivered[0];
    let (second, to_statue) = delivered[1];
    assert_eq!((first, second), (spell, statue));

    assert_eq!((to_spell.my_collider, to_spell.other_collider), (0, 3));
    assert_eq!((to_spell.other, to_spell.other_tag), (statue, EntityTag::Enemy));
    assert_relative_eq!(to_spell.mtv, Vec3::new(0.4, 0.7, 0.7), epsilon = 1e-6);

    assert_eq!((to_statue.my_collider, to_statue.other_collider), (3, 0));
    assert_eq!((to_statue.other, to_statue.other_tag), (spell, EntityTag::Projectile));
    assert_relative_eq!(to_statue.mtv, -to_spell.mtv);
}

#[test]
fn test_projectile_survives_resting_on_terrain() {
    let mut world = flat_world();
    let caster = world.add_object(block_object(Vec3::new(1.0, 1.0, 0.5)));
    let spell = Projectile::object(caster, Vec3::new(5.0, 5.0, 0.2), Vec3::zeros(), &world.config().projectile);
    let spell = world.add_object(spell);

    run(&mut world, &NoInput, 30);

    assert!(world.get(spell).is_some());
    assert!(world.contacts().is_empty());
    assert_relative_eq!(position(&world, spell).z, 0.2, epsilon = 1e-4);
}

#[test]
fn test_world_reads_injected_clock() {
    let start = Instant::now() + Duration::from_secs(3600);
    let mut world = flat_world().with_clock(ManualClock::starting_at(start));
    assert_eq!(world.now(), start);

    run(&mut world, &NoInput, 60);
    assert_abs_diff_eq!(duration_to_secs(world.now() - start), 1.0, epsilon = 1e-3);

    let before = Instant::now();
    let world = flat_world().with_clock(SystemClock);
    assert!(world.now() >= before);
}

#[test]
fn test_find_by_name() {
    let mut world = flat_world();
    let tree = world.spawn_blueprint("tree", Vec3::new(2.0, 2.0, 0.0)).unwrap();

    assert_eq!(world.find_by_name("tree"), Some(tree));
    assert_eq!(world.find_by_name("dragon"), None);
}

#[test]
fn test_dynamic_objects_are_in_both_views() {
    let mut world = flat_world();
    let map = world.add_object(Terrain::object());
    let block = world.add_object(block_object(Vec3::new(5.0, 5.0, 0.5)));
    let falling = world.add_object(crate_object(Vec3::new(1.0, 1.0, 3.0)));

    assert_eq!(world.static_objects(), &[block, falling]);
    assert_eq!(world.dynamic_objects(), &[falling]);
    assert!(!world.static_objects().contains(&map));
    assert_eq!(world.len(), 3);
}

#[test]
fn test_double_removal_destroys_once() {
    let mut world = flat_world();
    let id = world.add_object(crate_object(Vec3::new(1.0, 1.0, 1.0)));

    assert!(world.remove_object_next_frame(id));
    assert!(!world.remove_object_next_frame(id));
    assert!(world.get(id).is_some(), "removal must be deferred");

    assert_eq!(world.frame_finished(), 1);
    assert!(world.get(id).is_none());
    assert!(world.static_objects().is_empty());
    assert!(world.dynamic_objects().is_empty());

    assert_eq!(world.frame_finished(), 0);
    assert!(!world.remove_object_next_frame(id));
}

#[test]
fn test_cancelled_timer_never_fires() {
    let mut world = flat_world();
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    let deadline = world.now() + secs_to_duration(2.0);
    let descriptor = world.timer_mut().schedule(deadline, move |_| flag.set(true));

    run(&mut world, &NoInput, 30);
    assert!(world.timer_mut().cancel(descriptor));
    run(&mut world, &NoInput, 600);

    assert!(!fired.get());
}

#[test]
fn test_timer_fires_during_tick() {
    let mut world = flat_world();
    let fired = Rc::new(Cell::new(0));
    let counter = Rc::clone(&fired);
    let deadline = world.now() + secs_to_duration(0.5);
    world.timer_mut().schedule(deadline, move |_| counter.set(counter.get() + 1));

    run(&mut world, &NoInput, 29);
    assert_eq!(fired.get(), 0);
    run(&mut world, &NoInput, 3);
    assert_eq!(fired.get(), 1);
}

#[test]
fn test_tween_moves_object_in_steps() {
    let mut world = flat_world();
    let id = world.add_object(block_object(Vec3::zeros()));
    let handle = world.services_mut().tweens.interpolate_linear_wait(
        1.0,
        TweenTarget { object: id, axis: Axis::X },
        0.0,
        10.0,
    );

    let mut completions = Vec::new();
    for expected in [3.0, 6.0, 9.0, 10.0] {
        world.process_scheduling(0.3);
        assert_abs_diff_eq!(position(&world, id).x, expected, epsilon = 1e-4);
        completions.push(world.services_mut().tweens.take_completed(handle));
    }

    assert_eq!(completions, vec![false, false, false, true]);
}

#[test]
fn test_scenery_placed_on_sloped_ground() {
    let map = Map::from_fn(5, 5, |i, _| i as f32 * 0.5).unwrap();
    let mut world = World::new(SimulationConfig::default(), map);

    let tree = world.spawn_blueprint("tree", Vec3::new(2.0, 1.0, 100.0)).unwrap();
    assert_relative_eq!(position(&world, tree).z, 1.0);

    let centered = world.add_static_object_at_ground(block_object(Vec3::new(3.0, 2.5, 0.0)));
    assert_relative_eq!(position(&world, centered).z, 2.0);

    let outside = world.add_static_object_at_ground(block_object(Vec3::new(-1.0, 2.0, 7.0)));
    assert_eq!(position(&world, outside).z, 7.0);
}

#[test]
fn test_unknown_blueprint_is_an_error() {
    let mut world = flat_world();
    let err = world.spawn_blueprint("dragon", Vec3::zeros()).unwrap_err();
    assert!(matches!(err, WorldError::UnknownBlueprint(ref name) if name == "dragon"));
}

#[test]
fn test_from_config_rejects_invalid_terrain() {
    let mut config = SimulationConfig::default();
    config.terrain.rows = 1;
    assert!(matches!(
        World::from_config(config, BlueprintSet::builtin()),
        Err(WorldError::Config(_))
    ));
}

#[test]
fn test_player_follows_arrow_keys() {
    let mut world = flat_world();
    let player = world.spawn_blueprint("player", Vec3::new(5.0, 5.0, 1.0)).unwrap();

    let input: KeyboardState = [Key::Right, Key::Left, Key::Down].into_iter().collect();
    run(&mut world, &input, 1);
    let velocity = dynamic(&world, player).velocity;
    assert_eq!(velocity.x, 2.0);
    assert_eq!(velocity.y, -2.0);

    run(&mut world, &NoInput, 1);
    let velocity = dynamic(&world, player).velocity;
    assert_eq!((velocity.x, velocity.y), (0.0, 0.0));
}

#[test]
fn test_cast_respects_cooldown_and_projectile_expires() {
    let mut world = flat_world();
    world.spawn_blueprint("player", Vec3::new(2.0, 5.0, 1.0)).unwrap();

    let casting: KeyboardState = [Key::Cast].into_iter().collect();
    run(&mut world, &casting, 10);
    assert_eq!(world.count(EntityTag::Projectile), 1);

    // Default lifetime is 1.5 s
    run(&mut world, &NoInput, 100);
    assert_eq!(world.count(EntityTag::Projectile), 0);
    assert!(world.services().timer.is_empty());
}

#[test]
fn test_projectile_kills_enemy() {
    let mut world = flat_world();
    let player = world.spawn_blueprint("player", Vec3::new(1.0, 1.0, 1.0)).unwrap();
    let enemy = world.spawn_blueprint("enemy", Vec3::new(5.0, 5.0, 0.5)).unwrap();
    run(&mut world, &NoInput, 2);
    assert!(matches!(patrol_state(&world, enemy), PatrolState::Waiting { waypoint: 0, .. }));
    assert!(!world.services().timer.is_empty());

    let spell = Projectile::object(
        player,
        Vec3::new(5.3, 5.0, 0.5),
        Vec3::zeros(),
        &world.config().projectile,
    );
    let spell = world.add_object(spell);

    world.process_object_collision();
    assert!(world.pending_removals().contains(&enemy));
    assert!(world.pending_removals().contains(&spell));

    assert_eq!(world.frame_finished(), 2);
    assert_eq!(world.count(EntityTag::Enemy), 0);
    assert!(world.services().tweens.is_empty());
    assert!(world.services().timer.is_empty());
}

#[test]
fn test_projectile_ignores_caster() {
    let mut world = flat_world();
    let player = world.spawn_blueprint("player", Vec3::new(5.0, 5.0, 1.0)).unwrap();
    let spell = Projectile::object(player, Vec3::new(5.5, 5.0, 1.0), Vec3::zeros(), &world.config().projectile);
    let spell = world.add_object(spell);

    world.process_object_collision();
    assert!(!world.pending_removals().contains(&spell));
}

#[test]
fn test_enemy_contact_costs_one_health_per_window() {
    let mut world = flat_world();
    let player = world.spawn_blueprint("player", Vec3::new(5.0, 5.0, 1.0)).unwrap();
    let enemy = Object::new(
        "still",
        Body::Dynamic(DynamicBody::new(Vec3::new(5.0, 6.2, 0.5), vec![Collider::cube(1.0, 0)])),
        EntityKind::Enemy(Enemy::new(
            Patrol::stationary(Vec3::new(5.0, 6.2, 0.5), &world.config().patrol),
            "enemy",
        )),
    );
    world.add_object(enemy);

    world.process_object_collision();
    assert_eq!(player_health(&world, player), 2);

    if let Some(body) = world.get_mut(player).and_then(|object| object.body.as_dynamic_mut()) {
        body.position.y = 5.4;
    }
    world.process_object_collision();
    assert_eq!(player_health(&world, player), 2);
}

#[test]
fn test_enemy_patrols_between_waypoints() {
    let mut world = flat_world();
    let enemy = world.spawn_blueprint("enemy", Vec3::new(2.0, 2.0, 0.5)).unwrap();

    // One second pause on the first waypoint, then four seconds east
    run(&mut world, &NoInput, 180);
    let x = position(&world, enemy).x;
    assert!(x > 3.5 && x < 4.5, "enemy at x = {x}");

    run(&mut world, &NoInput, 150);
    assert_abs_diff_eq!(position(&world, enemy).x, 6.0, epsilon = 1e-3);
    assert!(matches!(patrol_state(&world, enemy), PatrolState::Waiting { waypoint: 1, .. }));
}

#[test]
fn test_camera_follows_player() {
    let mut world = flat_world();
    let player = world.spawn_blueprint("player", Vec3::new(5.0, 5.0, 1.0)).unwrap();
    let offset = world.config().camera.follow_offset;
    world.camera_mut().follow(player, offset);

    let mut renderer = DebugDrawList::new();
    world.render(&mut renderer, DT);

    assert_eq!(world.camera().position, position(&world, player) + offset);
    assert_eq!(renderer.camera().map(|camera| camera.position), Some(world.camera().position));
}

#[cfg(feature = "debug-colliders")]
#[test]
fn test_render_submits_terrain_sprites_and_colliders() {
    let mut world = flat_world();
    world.add_object(Terrain::object());
    world.spawn_blueprint("player", Vec3::new(5.0, 5.0, 1.0)).unwrap();

    let mut renderer = DebugDrawList::new();
    world.render(&mut renderer, DT);

    assert!(renderer
        .commands()
        .iter()
        .any(|command| matches!(command, crate::debug::DrawCommand::Terrain { .. })));
    assert_eq!(renderer.billboards().count(), 1);
    let cubes: Vec<_> = renderer.wire_cubes().collect();
    assert_eq!(cubes.len(), 1);
    assert_eq!(cubes[0].1, Vec3::new(2.0, 2.0, 2.0));
    assert_eq!(cubes[0].2, crate::foundation::math::colors::red());
}

#[test]
fn test_tick_report_counts_spawns_and_removals() {
    let mut world = flat_world();
    let id = world.add_object(crate_object(Vec3::new(1.0, 1.0, 0.5)));
    world.remove_object_next_frame(id);

    let mut renderer = DebugDrawList::new();
    let report = world.tick(&NoInput, &mut renderer, DT);

    assert_eq!(report.destroyed, 1);
    assert_eq!(report.grounded, 1);
    assert_eq!(world.frame(), 1);
}
