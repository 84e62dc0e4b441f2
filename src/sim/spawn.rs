//! Spawn rules for enemies and bullets
//!
//! Enemy and enemy-bullet spawns are rolled against the state RNG every tick.
//! Player bullets come from explicit fire input.

use glam::Vec2;
use rand::Rng;

use super::state::{BulletOwner, EntityId, GameEvent, GameState};

/// Roll for a new enemy at the top of the screen
pub fn spawn_enemy(state: &mut GameState) -> Option<EntityId> {
    let tuning = &state.tuning;
    if !state.rng.random_bool(tuning.enemy_spawn_chance) {
        return None;
    }

    let max_x = state.enemy_max_x();
    let x = if max_x > 0.0 {
        state.rng.random_range(0.0..max_x)
    } else {
        0.0
    };
    let speed = state
        .rng
        .random_range(tuning.enemy_min_speed..=tuning.enemy_max_speed);
    let size = Vec2::splat(tuning.enemy_size);

    let id = state.entities.spawn_enemy(Vec2::new(x, 0.0), speed, size);
    log::debug!("Enemy {} spawned at x={:.1} speed={:.2}", id, x, speed);
    Some(id)
}

/// Each live enemy independently rolls to fire one bullet from its muzzle.
/// Returns the number of bullets emitted.
pub fn spawn_enemy_bullets(state: &mut GameState) -> usize {
    let chance = state.tuning.enemy_fire_chance;
    let cap = state.tuning.max_enemy_bullets.unwrap_or(usize::MAX);

    let mut muzzles = Vec::new();
    for enemy in &state.entities.enemies {
        if state.rng.random_bool(chance) {
            muzzles.push(enemy.muzzle());
        }
    }

    let mut emitted = 0;
    for muzzle in muzzles {
        if state.entities.enemy_bullets.len() >= cap {
            break;
        }
        // Enemies low on the screen would fire from below the bottom edge
        if !state.on_screen(muzzle) {
            continue;
        }
        state.entities.spawn_bullet(muzzle, BulletOwner::Enemy);
        emitted += 1;
    }
    emitted
}

/// Fire a player bullet from the ship's nose
pub fn fire_player_bullet(state: &mut GameState) -> Option<EntityId> {
    let origin = state.player.pos + Vec2::new(state.tuning.muzzle_offset_x, 0.0);
    if !state.on_screen(origin) {
        log::debug!("Shot at {} dropped, ship has no room to fire", origin);
        return None;
    }
    let bullet_id = state.entities.spawn_bullet(origin, BulletOwner::Player);
    state.events.push(GameEvent::Fired { bullet_id });
    Some(bullet_id)
}
