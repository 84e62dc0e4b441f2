//! Player ship kinematics
//!
//! Held directions accelerate the ship, speed is capped per axis, and friction
//! bleeds velocity off every tick. Friction is gentler while a direction is
//! held so continuous movement stays smooth.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp_to_span;
use crate::tuning::Tuning;

/// Movement directions currently held by the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Sum of unit pushes for every held direction (screen space, +y is down)
    pub fn push(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance velocity by one tick: accelerate, clamp, apply friction, snap tiny values to zero
pub fn step_velocity(vel: Vec2, held: HeldDirections, tuning: &Tuning) -> Vec2 {
    let limit = Vec2::splat(tuning.max_velocity);
    let accelerated = (vel + held.push() * tuning.acceleration).clamp(-limit, limit);

    let friction = if held.any() {
        tuning.moving_friction
    } else {
        tuning.stopping_friction
    };
    let mut next = accelerated * friction;

    if next.x.abs() < tuning.velocity_epsilon {
        next.x = 0.0;
    }
    if next.y.abs() < tuning.velocity_epsilon {
        next.y = 0.0;
    }
    next
}

/// Move the ship by its velocity, keeping its whole footprint on screen
pub fn integrate_position(pos: Vec2, vel: Vec2, screen: Vec2, tuning: &Tuning) -> Vec2 {
    let moved = pos + vel * tuning.player_speed;
    Vec2::new(
        clamp_to_span(moved.x, screen.x - tuning.ship_width),
        clamp_to_span(moved.y, screen.y - tuning.ship_height),
    )
}
