use std::time::Duration;

use bevy::prelude::*;

use crate::core::config::GameConfig;
use crate::core::system::system_order::PrePhysicsSet;

use super::collector::OrientationCollector;
use super::source::{DeviceSource, NullDeviceSource};

/// The active device source. Non-send: real SDK handles are rarely `Sync`,
/// and the poll runs on the main thread anyway.
pub struct DeviceHandle(pub Box<dyn DeviceSource>);

pub struct DevicePlugin;

impl Plugin for DevicePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrientationCollector>();
        if app
            .world()
            .get_non_send_resource::<DeviceHandle>()
            .is_none()
        {
            app.insert_non_send_resource(DeviceHandle(Box::new(NullDeviceSource)));
        }
        app.add_systems(Update, poll_device.in_set(PrePhysicsSet));
    }
}

/// Once per frame: drain the source under the configured budget, fold the
/// events into the collector, forward any haptic commands back.
fn poll_device(
    mut handle: NonSendMut<DeviceHandle>,
    mut collector: ResMut<OrientationCollector>,
    cfg: Res<GameConfig>,
) {
    let budget = Duration::from_millis(cfg.device.poll_budget_ms);
    let mut outgoing = Vec::new();
    if let Err(err) = handle
        .0
        .poll(budget, &mut |event| collector.handle(event, |cmd| outgoing.push(cmd)))
    {
        warn!("armband stream failed: {err}; continuing device-less");
    }
    for cmd in outgoing {
        handle.0.send(cmd);
    }
}
