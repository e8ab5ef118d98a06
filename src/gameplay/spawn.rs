use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::Floor;
use crate::core::config::GameConfig;
use crate::sync::pairing::{LastSpawned, PairingTable};
use crate::sync::synchronizer::spawn_ball_pair;

pub struct BallSpawnPlugin;

impl Plugin for BallSpawnPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_scene);
    }
}

/// Initial scene: the static floor near the bottom edge and one oversized
/// seed ball at view center.
fn spawn_scene(
    mut commands: Commands,
    mut pairing: ResMut<PairingTable>,
    mut last: ResMut<LastSpawned>,
    cfg: Res<GameConfig>,
) {
    spawn_floor(&mut commands, &cfg);
    spawn_ball_pair(
        &mut commands,
        &mut pairing,
        &mut last,
        &cfg,
        Vec2::ZERO,
        cfg.spawn.seed_scale,
    );
}

/// Floor body with its own sprite. Deliberately no pairing record: the
/// synchronizer must leave unpaired bodies alone.
fn spawn_floor(commands: &mut Commands, cfg: &GameConfig) {
    let size = Vec2::new(
        (cfg.window.width - cfg.spawn.floor_inset).max(1.0),
        cfg.spawn.floor_thickness,
    );
    let y = -(cfg.window.height * 0.5) + cfg.spawn.floor_raise;
    commands.spawn((
        Sprite::from_color(Color::srgb(0.35, 0.3, 0.25), size),
        Transform::from_xyz(0.0, y, 0.0),
        GlobalTransform::IDENTITY,
        RigidBody::Fixed,
        Collider::cuboid(size.x * 0.5, size.y * 0.5),
        Floor,
    ));
}
