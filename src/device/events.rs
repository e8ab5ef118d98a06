use bevy::prelude::*;

/// Which arm the band was recognized on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arm {
    Left,
    Right,
}

/// Discrete hand poses the band classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pose {
    #[default]
    Rest,
    Fist,
    WaveIn,
    WaveOut,
    FingersSpread,
    Unknown,
}

impl Pose {
    pub fn label(&self) -> &'static str {
        match self {
            Pose::Rest => "rest",
            Pose::Fist => "fist",
            Pose::WaveIn => "waveIn",
            Pose::WaveOut => "waveOut",
            Pose::FingersSpread => "fingersSpread",
            Pose::Unknown => "unknown",
        }
    }
}

/// Events the band pushes to the host, dispatched synchronously during the
/// per-frame poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceEvent {
    /// Current orientation as a unit quaternion.
    Orientation(Quat),
    Pose(Pose),
    ArmRecognized(Arm),
    ArmLost,
    /// The band was unpaired by the user; leftover state must be cleared.
    Unpaired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vibration {
    Short,
    Medium,
    Long,
}

/// Commands the host sends back to the band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCommand {
    Vibrate(Vibration),
}
