use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::{Ball, BallRadius, BallVisual, Floor, ShotDecal};
use crate::core::config::GameConfig;
use crate::core::system::system_order::PrePhysicsSet;
use crate::sync::pairing::{LastSpawned, PairedVisual, PairingTable};
use crate::sync::synchronizer::{impulse_for, spawn_ball_pair};

pub struct InputInteractionPlugin;

impl Plugin for InputInteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, handle_pointer_taps.in_set(PrePhysicsSet));
    }
}

/// Queries the tap routing reads and writes. Bundled so [`tap_at`] stays
/// callable from tests without window or camera plumbing.
#[derive(bevy::ecs::system::SystemParam)]
pub struct TapTargets<'w, 's> {
    pub visuals: Query<'w, 's, (&'static Transform, &'static PairedVisual), With<BallVisual>>,
    pub bodies: Query<
        'w,
        's,
        (
            &'static BallRadius,
            &'static ReadMassProperties,
            &'static mut ExternalImpulse,
        ),
        With<Ball>,
    >,
    pub floors: Query<'w, 's, (&'static Transform, &'static Sprite), With<Floor>>,
}

fn cursor_world_pos(
    camera_q: &Query<(&Camera, &GlobalTransform)>,
    screen_pos: Vec2,
) -> Option<Vec2> {
    let (camera, cam_tf) = camera_q.iter().next()?;
    camera.viewport_to_world_2d(cam_tf, screen_pos).ok()
}

fn primary_pointer_world_pos(
    window: &Window,
    touches: &Touches,
    camera_q: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    if let Some(touch) = touches.iter().next() {
        return cursor_world_pos(camera_q, touch.position());
    }
    let cursor = window.cursor_position()?;
    cursor_world_pos(camera_q, cursor)
}

fn handle_pointer_taps(
    mut commands: Commands,
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mut pairing: ResMut<PairingTable>,
    mut last: ResMut<LastSpawned>,
    cfg: Res<GameConfig>,
    mut targets: TapTargets,
) {
    let pressed =
        buttons.just_pressed(MouseButton::Left) || touches.iter_just_pressed().next().is_some();
    if !pressed {
        return;
    }
    let Ok(window) = windows_q.single() else {
        return;
    };
    let Some(world_pos) = primary_pointer_world_pos(window, &touches, &camera_q) else {
        return;
    };
    tap_at(
        &mut commands,
        &mut pairing,
        &mut last,
        &cfg,
        world_pos,
        &mut targets,
    );
}

/// Tap/click routing at a world point. A tap on a ball's visual shoves the
/// body away from the tap point and pins a shot decal onto the visual; a tap
/// on the floor is swallowed; a tap on empty space spawns a new ball pair
/// there. Hit-testing reads the visual, not the body, so steered balls are
/// hit where they are drawn.
pub fn tap_at(
    commands: &mut Commands,
    pairing: &mut PairingTable,
    last: &mut LastSpawned,
    cfg: &GameConfig,
    world_pos: Vec2,
    targets: &mut TapTargets,
) {
    for (vis_tf, paired) in targets.visuals.iter() {
        let pos = vis_tf.translation.truncate();
        let Some(rec) = pairing.get(paired.0) else {
            continue;
        };
        let Ok((radius, mass_props, mut impulse)) = targets.bodies.get_mut(rec.body) else {
            continue;
        };
        if pos.distance_squared(world_pos) > radius.0 * radius.0 {
            continue;
        }
        // Shove away from the tap point.
        let dir = pos - world_pos;
        impulse.impulse += impulse_for(dir, mass_props.get().mass, cfg.interactions.impulse_scale);
        let local = (world_pos - pos).extend(0.05);
        commands.entity(rec.visual).with_children(|parent| {
            parent.spawn((
                Sprite::from_color(
                    Color::srgb(0.95, 0.9, 0.2),
                    Vec2::splat(cfg.spawn.shot_size),
                ),
                Transform::from_translation(local),
                ShotDecal,
            ));
        });
        return;
    }

    // The floor swallows taps; neither a shove nor a spawn.
    for (tf, sprite) in targets.floors.iter() {
        let Some(size) = sprite.custom_size else {
            continue;
        };
        let d = world_pos - tf.translation.truncate();
        if d.x.abs() <= size.x * 0.5 && d.y.abs() <= size.y * 0.5 {
            return;
        }
    }

    spawn_ball_pair(commands, pairing, last, cfg, world_pos, 1.0);
}
