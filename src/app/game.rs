use bevy::prelude::*;

use crate::core::system::system_order::{PostPhysicsAdjustSet, PrePhysicsSet};
use crate::debug::DebugPlugin;
use crate::device::DevicePlugin;
use crate::gameplay::spawn::BallSpawnPlugin;
use crate::interaction::input::input_interaction::InputInteractionPlugin;
use crate::physics::rapier_physics::PhysicsSetupPlugin;
use crate::rendering::camera::CameraPlugin;
use crate::sync::synchronizer::SyncPlugin;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (PrePhysicsSet, PostPhysicsAdjustSet.after(PrePhysicsSet)),
        )
        .add_plugins((
            CameraPlugin,
            PhysicsSetupPlugin,
            BallSpawnPlugin,
            SyncPlugin,
            InputInteractionPlugin,
            DevicePlugin,
            DebugPlugin,
        ));
    }
}
