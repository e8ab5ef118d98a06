use bevy::prelude::*;

/// Marker for a physics-driven ball body.
#[derive(Component)]
pub struct Ball;

/// Collision/hit-test radius of a ball (world units).
#[derive(Component, Debug, Clone, Copy)]
pub struct BallRadius(pub f32);

/// Marker for the visual half of a ball pair.
#[derive(Component)]
pub struct BallVisual;

/// Static floor body; carries its own sprite but no pairing record.
#[derive(Component)]
pub struct Floor;

/// Decoration sprite attached to a ball visual after an impulse tap.
/// Purely cosmetic: no physics body, no pairing.
#[derive(Component)]
pub struct ShotDecal;
