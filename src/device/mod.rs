//! Armband device stream: events, last-sample collector, pluggable sources.

pub mod collector;
pub mod events;
pub mod plugin;
pub mod source;
pub mod synthetic;

pub use collector::OrientationCollector;
pub use events::{Arm, DeviceCommand, DeviceEvent, Pose, Vibration};
pub use plugin::{DeviceHandle, DevicePlugin};
pub use source::{discover_band, ChannelDeviceSource, DeviceError, DeviceSource, NullDeviceSource};
