use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

use crate::core::config::GameConfig;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera);
    }
}

/// Centered 2D camera. Scaling keeps the whole configured play field in
/// view when the window is resized, so the floor and kill line stay where
/// the physics expects them.
fn setup_camera(mut commands: Commands, cfg: Res<GameConfig>) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: cfg.window.width,
                min_height: cfg.window.height,
            },
            ..OrthographicProjection::default_2d()
        }),
    ));
}
