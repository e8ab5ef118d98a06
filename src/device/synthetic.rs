//! Synthetic armband: a background thread sweeping the orientation so
//! steering can be demonstrated without hardware.

use std::time::Duration;

use bevy::prelude::*;

use super::events::{Arm, DeviceEvent};
use super::source::ChannelDeviceSource;

const SWEEP_INTERVAL: Duration = Duration::from_millis(20);

pub fn spawn_synthetic_arm() -> ChannelDeviceSource {
    let (source, endpoint) = ChannelDeviceSource::pair();
    std::thread::spawn(move || {
        if endpoint
            .events
            .send(DeviceEvent::ArmRecognized(Arm::Right))
            .is_err()
        {
            return;
        }
        let mut t: f32 = 0.0;
        loop {
            t += 0.03;
            let yaw = t.sin() * std::f32::consts::FRAC_PI_2;
            let pitch = (t * 0.7).cos() * std::f32::consts::FRAC_PI_4;
            let quat = Quat::from_euler(EulerRot::ZYX, yaw, pitch, 0.0);
            if endpoint.events.send(DeviceEvent::Orientation(quat)).is_err() {
                return; // app side went away
            }
            // Drain haptic commands so the channel never backs up.
            while endpoint.commands.try_recv().is_ok() {}
            std::thread::sleep(SWEEP_INTERVAL);
        }
    });
    source
}
