pub mod app;
pub mod core;
pub mod debug;
pub mod device;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod rendering;
pub mod sync;

// Curated re-exports
pub use app::game::GamePlugin;
pub use core::components::{Ball, BallRadius, BallVisual, Floor};
pub use core::config::GameConfig;
pub use device::{DeviceHandle, DevicePlugin, OrientationCollector};
pub use sync::pairing::{LastSpawned, PairId, PairingTable};
