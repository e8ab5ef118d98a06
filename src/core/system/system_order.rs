//! Central system ordering labels to make update sequence explicit.
//! Stages (high-level):
//! 1. PrePhysics (device poll, pointer input, manual impulse edits before Rapier)
//! 2. Rapier (handled by plugin)
//! 3. PostPhysicsAdjust (body -> visual synchronization, retirement)
//! 4. Rendering (implicit)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PrePhysicsSet; // input + device events consumed before the simulation step

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PostPhysicsAdjustSet; // pair synchronization after physics
