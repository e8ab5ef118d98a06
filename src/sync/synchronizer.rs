//! Per-frame body/visual reconciliation.
//!
//! Runs after the physics step, once per rendered frame:
//! 1. copy each paired body's simulated translation/rotation to its visual;
//! 2. apply device steering (last-spawned pair, or every pair in
//!    global-substitution mode);
//! 3. retire pairs whose visual fell below the kill line.
//!
//! Bodies with no pairing record (the floor) are never touched, and
//! retirement is the only path that destroys a pair mid-frame. The arena
//! record is removed before either entity is despawned, and despawns go
//! through deferred `Commands`, so traversal never observes a half-torn
//! link.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

use crate::core::components::{Ball, BallRadius, BallVisual};
use crate::core::config::GameConfig;
use crate::core::system::system_order::PostPhysicsAdjustSet;
use crate::device::collector::OrientationCollector;
use crate::sync::pairing::{LastSpawned, PairId, PairedBody, PairedVisual, PairingTable};

pub struct SyncPlugin;

impl Plugin for SyncPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PairingTable>()
            .init_resource::<LastSpawned>()
            .add_systems(
                Update,
                (propagate_pair_transforms, steer_from_device, retire_fallen_pairs)
                    .chain()
                    .in_set(PostPhysicsAdjustSet),
            );
    }
}

/// Copy simulated pose from each paired body to its visual. A pair whose
/// body or visual is already gone synchronizes nothing; that is a valid
/// steady state, not an error.
pub fn propagate_pair_transforms(
    pairing: Res<PairingTable>,
    q_bodies: Query<&Transform, (With<PairedBody>, Without<PairedVisual>)>,
    mut q_visuals: Query<&mut Transform, With<PairedVisual>>,
) {
    for (_, rec) in pairing.iter() {
        let Ok(body_tf) = q_bodies.get(rec.body) else {
            continue;
        };
        let Ok(mut vis_tf) = q_visuals.get_mut(rec.visual) else {
            continue;
        };
        vis_tf.translation.x = body_tf.translation.x;
        vis_tf.translation.y = body_tf.translation.y;
        vis_tf.rotation = body_tf.rotation;
    }
}

/// Device steering override. Default: only the last-spawned pair tracks the
/// sample, and only while an arm is recognized. `steer_all` substitutes the
/// single latest sample onto every paired visual, unconditionally.
pub fn steer_from_device(
    cfg: Res<GameConfig>,
    collector: Res<OrientationCollector>,
    pairing: Res<PairingTable>,
    last: Res<LastSpawned>,
    mut q_visuals: Query<&mut Transform, With<PairedVisual>>,
) {
    if !cfg.device.steering {
        return;
    }
    let (pos, rot) = steered_pose(&collector, &cfg);
    if cfg.device.steer_all {
        for (_, rec) in pairing.iter() {
            if let Ok(mut tf) = q_visuals.get_mut(rec.visual) {
                tf.translation.x = pos.x;
                tf.translation.y = pos.y;
                tf.rotation = rot;
            }
        }
        return;
    }
    if !collector.on_arm {
        return;
    }
    let Some(rec) = last.0.and_then(|id| pairing.get(id)) else {
        return;
    };
    if let Ok(mut tf) = q_visuals.get_mut(rec.visual) {
        tf.translation.x = pos.x;
        tf.translation.y = pos.y;
        tf.rotation = rot;
    }
}

/// Placement derived from the scaled orientation sample.
pub fn steered_pose(collector: &OrientationCollector, cfg: &GameConfig) -> (Vec2, Quat) {
    let pos = Vec2::new(
        collector.yaw_w as f32 * cfg.device.pos_step,
        collector.pitch_w as f32 * cfg.device.pos_step,
    );
    let rot = Quat::from_rotation_z((collector.pitch_w as f32 * cfg.device.rot_step_deg).to_radians());
    (pos, rot)
}

/// Retire pairs whose visual fell below the kill line: sever the arena
/// record first, then despawn body and visual (decals despawn with the
/// visual). Ids are collected before any record is removed so the traversal
/// never runs over a mutating table.
pub fn retire_fallen_pairs(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut pairing: ResMut<PairingTable>,
    mut last: ResMut<LastSpawned>,
    q_visuals: Query<&Transform, With<PairedVisual>>,
) {
    let kill_line = cfg.kill_line();
    let fallen: Vec<PairId> = pairing
        .iter()
        .filter(|(_, rec)| {
            q_visuals
                .get(rec.visual)
                .is_ok_and(|tf| tf.translation.y < kill_line)
        })
        .map(|(id, _)| id)
        .collect();
    for id in fallen {
        if let Some(rec) = pairing.remove(id) {
            commands.entity(rec.body).despawn();
            commands.entity(rec.visual).despawn();
            if last.0 == Some(id) {
                last.0 = None;
            }
        }
    }
}

/// Create a ball pair: a dynamic circular body and a sprite visual at
/// `pos`, linked through the pairing arena. No cap on live pairs.
pub fn spawn_ball_pair(
    commands: &mut Commands,
    pairing: &mut PairingTable,
    last: &mut LastSpawned,
    cfg: &GameConfig,
    pos: Vec2,
    scale: f32,
) -> PairId {
    let radius = cfg.spawn.ball_radius * scale;
    let mut rng = rand::thread_rng();
    let tint = Color::srgb(
        rng.gen::<f32>() * 0.6 + 0.4,
        rng.gen::<f32>() * 0.6 + 0.4,
        rng.gen::<f32>() * 0.6 + 0.4,
    );

    let body = commands
        .spawn((
            Transform::from_translation(pos.extend(0.0)),
            GlobalTransform::IDENTITY,
            RigidBody::Dynamic,
            Collider::ball(radius),
            ColliderMassProperties::Density(cfg.physics.density),
            Friction::coefficient(cfg.physics.friction),
            Restitution::coefficient(cfg.physics.restitution),
            Velocity::zero(),
            ExternalImpulse::default(),
            ReadMassProperties::default(),
            Ball,
            BallRadius(radius),
        ))
        .id();
    let visual = commands
        .spawn((
            Sprite::from_color(tint, Vec2::splat(radius * 2.0)),
            Transform::from_translation(pos.extend(0.1)),
            GlobalTransform::IDENTITY,
            BallVisual,
        ))
        .id();

    let id = pairing.insert(body, visual);
    commands.entity(body).insert(PairedBody(id));
    commands.entity(visual).insert(PairedVisual(id));
    last.0 = Some(id);
    id
}

/// Tap impulse: `direction * mass * scale`, zero when the direction or mass
/// degenerates.
pub fn impulse_for(direction: Vec2, mass: f32, scale: f32) -> Vec2 {
    let len = direction.length();
    if len < 1e-4 || mass <= 0.0 {
        return Vec2::ZERO;
    }
    direction / len * mass * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_matches_mass_times_scale() {
        assert_eq!(impulse_for(Vec2::new(0.0, -1.0), 1.0, 500.0), Vec2::new(0.0, -500.0));
        assert_eq!(impulse_for(Vec2::new(0.0, -3.0), 2.0, 500.0), Vec2::new(0.0, -1000.0));
    }

    #[test]
    fn degenerate_inputs_yield_zero() {
        assert_eq!(impulse_for(Vec2::ZERO, 1.0, 500.0), Vec2::ZERO);
        assert_eq!(impulse_for(Vec2::X, 0.0, 500.0), Vec2::ZERO);
    }

    #[test]
    fn steered_pose_scales_the_sample() {
        let cfg = GameConfig::default();
        let mut collector = OrientationCollector::default();
        collector.yaw_w = 4;
        collector.pitch_w = 2;
        let (pos, rot) = steered_pose(&collector, &cfg);
        assert_eq!(pos, Vec2::new(200.0, 100.0));
        let expected = Quat::from_rotation_z(60.0_f32.to_radians());
        assert!(rot.angle_between(expected) < 1e-5);
    }
}
