//! Debug module: feature gated wireframe toggle, device/stat overlay, logging.
//! Built only when compiled with `--features debug` (on by default).

#[cfg(feature = "debug")]
mod logging;
#[cfg(feature = "debug")]
mod overlay;

#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use bevy_rapier2d::render::{DebugRenderContext, RapierDebugRenderPlugin};

#[cfg(feature = "debug")]
use crate::core::system::system_order::PostPhysicsAdjustSet;

#[cfg(feature = "debug")]
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct DebugPreRenderSet;

/// Runtime debug toggles + logging cadence.
#[cfg(feature = "debug")]
#[derive(Resource)]
pub struct DebugState {
    pub wireframe: bool,
    pub overlay_visible: bool,
    pub log_interval: f32,
    pub time_accum: f32,
    pub frame_counter: u64,
}

#[cfg(feature = "debug")]
impl Default for DebugState {
    fn default() -> Self {
        Self {
            wireframe: false,
            overlay_visible: true,
            log_interval: 5.0,
            time_accum: 0.0,
            frame_counter: 0,
        }
    }
}

#[cfg(feature = "debug")]
pub struct DebugPlugin;

#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        use logging::debug_logging_system;
        #[cfg(not(test))]
        use overlay::debug_overlay_spawn;
        use overlay::{debug_overlay_update, debug_toggle_button_interact};

        fn debug_key_input_system(
            keys: Res<ButtonInput<KeyCode>>,
            mut state: ResMut<DebugState>,
        ) {
            if keys.just_pressed(KeyCode::F1) {
                state.wireframe = !state.wireframe;
            }
            if keys.just_pressed(KeyCode::F2) {
                state.overlay_visible = !state.overlay_visible;
            }
        }

        fn toggle_rapier_debug(state: Res<DebugState>, ctx: Option<ResMut<DebugRenderContext>>) {
            if let Some(mut c) = ctx {
                if c.enabled != state.wireframe {
                    c.enabled = state.wireframe;
                }
            }
        }

        fn advance_frame_counter(mut state: ResMut<DebugState>) {
            state.frame_counter = state.frame_counter.wrapping_add(1);
        }

        app.add_plugins(RapierDebugRenderPlugin {
            enabled: false,
            ..default()
        })
        .init_resource::<DebugState>()
        .configure_sets(Update, DebugPreRenderSet.after(PostPhysicsAdjustSet));
        // In tests, skip overlay spawn (AssetServer not present with MinimalPlugins)
        #[cfg(not(test))]
        app.add_systems(Startup, debug_overlay_spawn);
        app.add_systems(
            Update,
            (
                debug_key_input_system,
                debug_toggle_button_interact,
                toggle_rapier_debug,
                debug_overlay_update,
                debug_logging_system,
                advance_frame_counter,
            )
                .in_set(DebugPreRenderSet),
        );
    }
}

#[cfg(not(feature = "debug"))]
pub struct DebugPlugin;
#[cfg(not(feature = "debug"))]
impl bevy::prelude::Plugin for DebugPlugin {
    fn build(&self, _app: &mut bevy::prelude::App) {}
}
