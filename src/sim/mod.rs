//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod kinematics;
pub mod movement;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{BulletHit, bullets_hitting_player, find_bullet_hits};
pub use kinematics::{HeldDirections, integrate_position, step_velocity};
pub use snapshot::Snapshot;
pub use state::{
    Bullet, BulletOwner, Enemy, EntityId, EntityStore, Explosion, GameEvent, GamePhase, GameState,
    Player,
};
pub use tick::{TickInput, restart, tick};
