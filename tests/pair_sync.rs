//! Body/visual pairing round trip: spawn, propagate, retire.

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;

use armball::core::config::GameConfig;
use armball::device::OrientationCollector;
use armball::sync::pairing::{LastSpawned, PairedBody, PairedVisual, PairingTable};
use armball::sync::synchronizer::{spawn_ball_pair, SyncPlugin};

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(GameConfig::default())
        .init_resource::<OrientationCollector>()
        .add_plugins(SyncPlugin);
    app
}

/// Spawn a bare pair directly, without Rapier components. Propagation and
/// retirement only read transforms, so this stands in for a simulated body.
fn spawn_bare_pair(app: &mut App, pos: Vec2) -> (Entity, Entity) {
    let body = app
        .world_mut()
        .spawn((Transform::from_translation(pos.extend(0.0)), GlobalTransform::IDENTITY))
        .id();
    let visual = app
        .world_mut()
        .spawn((Transform::from_translation(pos.extend(0.1)), GlobalTransform::IDENTITY))
        .id();
    let id = app
        .world_mut()
        .resource_mut::<PairingTable>()
        .insert(body, visual);
    app.world_mut().entity_mut(body).insert(PairedBody(id));
    app.world_mut().entity_mut(visual).insert(PairedVisual(id));
    app.world_mut().resource_mut::<LastSpawned>().0 = Some(id);
    (body, visual)
}

#[test]
fn empty_table_frames_have_no_side_effects() {
    let mut app = test_app();
    for _ in 0..3 {
        app.update();
    }
    assert!(app.world().resource::<PairingTable>().is_empty());
    assert!(app.world().resource::<LastSpawned>().0.is_none());
}

#[test]
fn visual_follows_simulated_body() {
    let mut app = test_app();
    let (body, visual) = spawn_bare_pair(&mut app, Vec2::new(10.0, 20.0));

    let rot = Quat::from_rotation_z(0.5);
    {
        let mut tf = app.world_mut().entity_mut(body);
        let mut tf = tf.get_mut::<Transform>().unwrap();
        tf.translation = Vec3::new(42.0, -17.0, 0.0);
        tf.rotation = rot;
    }
    app.update();

    let vis_tf = app.world().entity(visual).get::<Transform>().unwrap();
    assert_eq!(vis_tf.translation.x, 42.0);
    assert_eq!(vis_tf.translation.y, -17.0);
    assert!(vis_tf.rotation.angle_between(rot) < 1e-5);
    // Visual keeps its own z layer.
    assert_eq!(vis_tf.translation.z, 0.1);
}

#[test]
fn unpaired_entities_are_never_touched() {
    let mut app = test_app();
    spawn_bare_pair(&mut app, Vec2::ZERO);
    let floor = app
        .world_mut()
        .spawn((Transform::from_xyz(0.0, -310.0, 0.0), GlobalTransform::IDENTITY))
        .id();

    for _ in 0..3 {
        app.update();
    }

    let tf = app.world().entity(floor).get::<Transform>().unwrap();
    assert_eq!(tf.translation, Vec3::new(0.0, -310.0, 0.0));
}

#[test]
fn pair_below_kill_line_is_retired() {
    let mut app = test_app();
    let kill_line = app.world().resource::<GameConfig>().kill_line();
    let (body, visual) = spawn_bare_pair(&mut app, Vec2::ZERO);

    // Drop the body just past the kill line; propagation carries the visual
    // down, then retirement collects the pair in the same frame.
    app.world_mut()
        .entity_mut(body)
        .get_mut::<Transform>()
        .unwrap()
        .translation
        .y = kill_line - 1.0;
    app.update();

    assert!(app.world().resource::<PairingTable>().is_empty());
    assert!(app.world().resource::<LastSpawned>().0.is_none());
    assert!(app.world().get_entity(body).is_err());
    assert!(app.world().get_entity(visual).is_err());
}

#[test]
fn pair_above_kill_line_survives() {
    let mut app = test_app();
    let kill_line = app.world().resource::<GameConfig>().kill_line();
    let (body, _) = spawn_bare_pair(&mut app, Vec2::new(0.0, kill_line + 5.0));

    for _ in 0..5 {
        app.update();
    }

    assert_eq!(app.world().resource::<PairingTable>().len(), 1);
    assert!(app.world().get_entity(body).is_ok());
}

#[test]
fn spawn_ball_pair_links_both_sides_and_tracks_last() {
    let mut app = test_app();
    let id = app
        .world_mut()
        .run_system_once(
            |mut commands: Commands,
             mut pairing: ResMut<PairingTable>,
             mut last: ResMut<LastSpawned>,
             cfg: Res<GameConfig>| {
                spawn_ball_pair(
                    &mut commands,
                    &mut pairing,
                    &mut last,
                    &cfg,
                    Vec2::new(5.0, 6.0),
                    2.0,
                )
            },
        )
        .unwrap();

    let pairing = app.world().resource::<PairingTable>();
    let rec = pairing.get(id).expect("record exists");
    assert_eq!(app.world().resource::<LastSpawned>().0, Some(id));
    assert_eq!(app.world().entity(rec.body).get::<PairedBody>().unwrap().0, id);
    assert_eq!(
        app.world().entity(rec.visual).get::<PairedVisual>().unwrap().0,
        id
    );
    // Seed scale doubles the radius.
    let radius = app
        .world()
        .entity(rec.body)
        .get::<armball::BallRadius>()
        .unwrap()
        .0;
    assert_eq!(radius, 64.0);
}
