#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
use super::DebugState;
#[cfg(feature = "debug")]
use crate::core::components::Ball;
#[cfg(feature = "debug")]
use crate::device::collector::OrientationCollector;
#[cfg(feature = "debug")]
use crate::sync::pairing::PairingTable;

#[cfg(feature = "debug")]
pub fn debug_logging_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    pairing: Res<PairingTable>,
    collector: Res<OrientationCollector>,
    q_balls: Query<(), With<Ball>>,
) {
    state.time_accum += time.delta_secs();
    if state.time_accum >= state.log_interval {
        state.time_accum = 0.0;
        info!(
            "SIM frame={} t={:.3}s balls={} pairs={} arm={} pose={} rpy=({},{},{})",
            state.frame_counter,
            time.elapsed_secs(),
            q_balls.iter().len(),
            pairing.len(),
            collector.on_arm,
            collector.pose.label(),
            collector.roll_w,
            collector.pitch_w,
            collector.yaw_w
        );
    }
}
