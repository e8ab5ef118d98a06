use std::num::NonZeroUsize;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::config::GameConfig;

/// World scale; body coordinates are divided by this before simulation.
pub const PIXELS_PER_METER: f32 = 100.0;

pub struct PhysicsSetupPlugin; // our wrapper to configure Rapier & solver

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
            PIXELS_PER_METER,
        ))
        .add_systems(Startup, configure_physics);
    }
}

fn configure_physics(
    mut q_cfg: Query<&mut RapierConfiguration>,
    mut q_sim: Query<&mut RapierContextSimulation>,
    game_cfg: Res<GameConfig>,
) {
    // RapierConfiguration lives on the context entity, not as a resource.
    if let Ok(mut cfg) = q_cfg.single_mut() {
        cfg.gravity = Vect::new(0.0, game_cfg.physics.gravity_y);
    }
    // Carry the legacy 6/2 velocity/position iteration split onto the
    // modern solver knobs.
    if let Ok(mut sim) = q_sim.single_mut() {
        let params = &mut sim.integration_parameters;
        params.num_solver_iterations = NonZeroUsize::new(game_cfg.physics.solver_iterations)
            .unwrap_or(NonZeroUsize::MIN);
        params.num_internal_pgs_iterations = game_cfg.physics.internal_pgs_iterations.max(1);
    }
}
