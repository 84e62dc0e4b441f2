//! Star Raid - A vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, spawning, collisions, game state)
//! - `game`: Fixed-tick session loop driving the simulation
//! - `input`: Held-direction / fire intent captured from the keyboard
//! - `audio`: Sound trigger routing to a pluggable sink
//! - `settings`: Runtime configuration loaded from JSON
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod input;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default playfield size (pixels)
    pub const DEFAULT_SCREEN_WIDTH: f32 = 800.0;
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const MAX_VELOCITY: f32 = 10.0;
    pub const ACCELERATION: f32 = 0.5;
    /// Friction while any direction is held (slow decay)
    pub const MOVING_FRICTION: f32 = 0.98;
    /// Friction once all directions are released (fast decay)
    pub const STOPPING_FRICTION: f32 = 0.85;
    /// Velocity components below this snap to zero
    pub const VELOCITY_EPSILON: f32 = 0.01;
    /// Ship footprint used for screen clamping
    pub const SHIP_WIDTH: f32 = 30.0;
    pub const SHIP_HEIGHT: f32 = 50.0;
    /// Square hit box checked against enemy bullets
    pub const PLAYER_HITBOX: f32 = 30.0;
    /// Start position offset from the bottom of the screen
    pub const PLAYER_START_OFFSET_Y: f32 = 100.0;
    pub const MAX_HEALTH: u8 = 100;
    pub const DAMAGE_PER_HIT: u8 = 10;

    /// Projectiles (pixels per tick)
    pub const PLAYER_BULLET_SPEED: f32 = 7.0;
    pub const ENEMY_BULLET_SPEED: f32 = 5.0;
    /// Player bullets leave the ship's nose
    pub const MUZZLE_OFFSET_X: f32 = 15.0;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 50.0;
    pub const ENEMY_MIN_SPEED: f32 = 1.0;
    pub const ENEMY_MAX_SPEED: f32 = 3.0;
    pub const ENEMY_SPAWN_CHANCE: f64 = 0.02;
    pub const ENEMY_FIRE_CHANCE: f64 = 0.005;
    /// Lateral weave: x += sin(y / period) * amplitude
    pub const WEAVE_AMPLITUDE: f32 = 2.0;
    pub const WEAVE_PERIOD: f32 = 30.0;
    pub const SCORE_PER_ENEMY: u64 = 10;

    /// Explosions
    pub const EXPLOSION_START_SIZE: f32 = 10.0;
    pub const EXPLOSION_MAX_SIZE: f32 = 100.0;
    pub const EXPLOSION_GROWTH: f32 = 5.0;
    pub const EXPLOSION_DRIFT: f32 = 1.0;
    /// Ticks an explosion stays on screen after reaching full size (~500ms)
    pub const EXPLOSION_LINGER_TICKS: u32 = 30;
}

/// Axis-aligned, edge-inclusive containment test used by every hit check
#[inline]
pub fn point_in_rect(point: Vec2, origin: Vec2, size: Vec2) -> bool {
    point.x >= origin.x
        && point.x <= origin.x + size.x
        && point.y >= origin.y
        && point.y <= origin.y + size.y
}

/// Clamp into `[0, max]`, collapsing to 0 when the range is empty
#[inline]
pub fn clamp_to_span(value: f32, max: f32) -> f32 {
    value.min(max).max(0.0)
}
