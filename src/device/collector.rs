//! Last-known device sample, normalized to small bounded integers.
//!
//! Orientation quaternions are converted to Euler angles and scaled onto a
//! 0..=18 integer range; the frame loop consumes only this most recent
//! sample. Pose events trigger haptic feedback commands back to the band.

use bevy::prelude::*;

use super::events::{Arm, DeviceCommand, DeviceEvent, Pose, Vibration};

/// Steps the full angle range is divided into.
pub const ORIENTATION_STEPS: i32 = 18;

#[derive(Resource, Debug, Default, Clone)]
pub struct OrientationCollector {
    pub on_arm: bool,
    pub arm: Option<Arm>,
    /// Roll scaled from [-pi, pi] onto 0..=18.
    pub roll_w: i32,
    /// Pitch scaled from [-pi/2, pi/2] onto 0..=18.
    pub pitch_w: i32,
    /// Yaw scaled from [-pi, pi] onto 0..=18.
    pub yaw_w: i32,
    pub pose: Pose,
}

impl OrientationCollector {
    pub fn handle(&mut self, event: DeviceEvent, mut send: impl FnMut(DeviceCommand)) {
        match event {
            DeviceEvent::Orientation(quat) => {
                let (roll, pitch, yaw) = euler_angles(quat);
                self.roll_w = scale_full_turn(roll);
                self.pitch_w = scale_half_turn(pitch);
                self.yaw_w = scale_full_turn(yaw);
            }
            DeviceEvent::Pose(pose) => {
                self.pose = pose;
                match pose {
                    Pose::Fist => {
                        send(DeviceCommand::Vibrate(Vibration::Short));
                        send(DeviceCommand::Vibrate(Vibration::Short));
                    }
                    Pose::WaveIn => {
                        self.reset_sample();
                        send(DeviceCommand::Vibrate(Vibration::Long));
                    }
                    _ => {}
                }
            }
            DeviceEvent::ArmRecognized(arm) => {
                self.on_arm = true;
                self.arm = Some(arm);
            }
            DeviceEvent::ArmLost => {
                self.on_arm = false;
            }
            DeviceEvent::Unpaired => {
                self.reset_sample();
                self.on_arm = false;
                self.arm = None;
            }
        }
    }

    fn reset_sample(&mut self) {
        self.roll_w = 0;
        self.pitch_w = 0;
        self.yaw_w = 0;
    }
}

/// Roll/pitch/yaw from a unit quaternion.
fn euler_angles(q: Quat) -> (f32, f32, f32) {
    let roll = (2.0 * (q.w * q.x + q.y * q.z)).atan2(1.0 - 2.0 * (q.x * q.x + q.y * q.y));
    let pitch = (2.0 * (q.w * q.y - q.z * q.x)).clamp(-1.0, 1.0).asin();
    let yaw = (2.0 * (q.w * q.z + q.x * q.y)).atan2(1.0 - 2.0 * (q.y * q.y + q.z * q.z));
    (roll, pitch, yaw)
}

fn scale_full_turn(angle: f32) -> i32 {
    ((angle + std::f32::consts::PI) / std::f32::consts::TAU * ORIENTATION_STEPS as f32) as i32
}

fn scale_half_turn(angle: f32) -> i32 {
    ((angle + std::f32::consts::FRAC_PI_2) / std::f32::consts::PI * ORIENTATION_STEPS as f32) as i32
}
