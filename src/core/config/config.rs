use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 640.0,
            title: "Armball".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity_y: f32,
    /// Main solver iteration count (the legacy velocity-iteration knob).
    pub solver_iterations: usize,
    /// Internal PGS iterations (the legacy position-iteration knob).
    pub internal_pgs_iterations: usize,
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}
impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity_y: -1000.0,
            solver_iterations: 6,
            internal_pgs_iterations: 2,
            restitution: 0.0,
            friction: 0.3,
            density: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    /// Base visual/collision radius of a spawned ball at scale 1.
    pub ball_radius: f32,
    /// Scale of the single ball seeded at view center on startup.
    pub seed_scale: f32,
    /// Total width removed from the floor relative to the view width.
    pub floor_inset: f32,
    pub floor_thickness: f32,
    /// Height of the floor center above the bottom view edge.
    pub floor_raise: f32,
    /// Edge length of the decoration sprite spawned by an impulse tap.
    pub shot_size: f32,
}
impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            ball_radius: 32.0,
            seed_scale: 2.0,
            floor_inset: 100.0,
            floor_thickness: 30.0,
            floor_raise: 10.0,
            shot_size: 12.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
    /// Tap impulse is `direction * body_mass * impulse_scale`.
    pub impulse_scale: f32,
}
impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            impulse_scale: 500.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DeviceConfig {
    /// How long startup discovery waits for a band before running
    /// device-less.
    pub connect_timeout_ms: u64,
    /// Per-frame event drain budget; 50 ms targets a 20 Hz refresh.
    pub poll_budget_ms: u64,
    /// Steer the last-spawned ball's visual from the device sample.
    pub steering: bool,
    /// Mirror the device sample onto every paired visual instead of only
    /// the last-spawned one.
    pub steer_all: bool,
    /// World units per orientation step for steered placement.
    pub pos_step: f32,
    /// Degrees per orientation step for steered rotation.
    pub rot_step_deg: f32,
}
impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 10_000,
            poll_budget_ms: 50,
            steering: true,
            steer_all: false,
            pos_step: 50.0,
            rot_step_deg: 30.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SyncConfig {
    /// A paired visual this far below the bottom view edge retires its pair.
    pub kill_margin: f32,
}
impl Default for SyncConfig {
    fn default() -> Self {
        Self { kill_margin: 50.0 }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub physics: PhysicsConfig,
    pub spawn: SpawnConfig,
    pub interactions: InteractionConfig,
    pub device: DeviceConfig,
    pub sync: SyncConfig,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.physics.gravity_y > 0.0 {
            w.push(format!(
                "physics.gravity_y is positive ({}); Y-up world, balls will float upward",
                self.physics.gravity_y
            ));
        }
        if self.physics.solver_iterations == 0 {
            w.push("physics.solver_iterations is 0; solver will be clamped to 1".into());
        }
        if self.physics.internal_pgs_iterations == 0 {
            w.push("physics.internal_pgs_iterations is 0; solver will be clamped to 1".into());
        }
        if !(0.0..=1.5).contains(&self.physics.restitution) {
            w.push(format!(
                "physics.restitution {} outside recommended 0..1.5",
                self.physics.restitution
            ));
        }
        if self.physics.friction < 0.0 {
            w.push("physics.friction negative".into());
        }
        if self.physics.density <= 0.0 {
            w.push("physics.density must be > 0 for dynamic bodies to have mass".into());
        }
        if self.spawn.ball_radius <= 0.0 {
            w.push("spawn.ball_radius must be > 0".into());
        }
        if self.spawn.seed_scale <= 0.0 {
            w.push("spawn.seed_scale must be > 0".into());
        }
        if self.spawn.floor_thickness <= 0.0 {
            w.push("spawn.floor_thickness must be > 0".into());
        }
        if self.spawn.floor_inset >= self.window.width {
            w.push(format!(
                "spawn.floor_inset {} leaves no floor inside a {} wide view",
                self.spawn.floor_inset, self.window.width
            ));
        }
        if self.interactions.impulse_scale <= 0.0 {
            w.push("interactions.impulse_scale must be > 0".into());
        }
        if self.device.poll_budget_ms == 0 {
            w.push("device.poll_budget_ms is 0; device events may starve".into());
        }
        if self.device.steering && self.device.pos_step <= 0.0 {
            w.push("device.pos_step must be > 0 while steering is enabled".into());
        }
        if self.sync.kill_margin < 0.0 {
            w.push(format!(
                "sync.kill_margin {} negative; pairs retire while still visible",
                self.sync.kill_margin
            ));
        }
        w
    }

    /// World-space y below which a paired visual retires its pair.
    pub fn kill_line(&self) -> f32 {
        -(self.window.height * 0.5) - self.sync.kill_margin
    }
}
