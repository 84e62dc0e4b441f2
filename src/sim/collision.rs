//! Collision detection and resolution
//!
//! Bullets are points, ships are axis-aligned boxes. Detection is split from
//! resolution so the pairing rules can be tested on plain slices.

use glam::Vec2;

use super::state::{Bullet, Enemy, EntityId, GameEvent, GamePhase, GameState};
use crate::point_in_rect;

/// A player bullet that struck an enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletHit {
    pub enemy_id: EntityId,
    pub bullet_id: EntityId,
    /// Center of the enemy at the moment of impact
    pub center: Vec2,
}

/// Pair enemies with the bullets that destroy them.
///
/// Enemies are visited in slice order, and each takes the first bullet (in
/// slice order) that overlaps it and has not already been spent. A bullet
/// destroys at most one enemy, an enemy is destroyed by at most one bullet.
pub fn find_bullet_hits(enemies: &[Enemy], bullets: &[Bullet]) -> Vec<BulletHit> {
    let mut spent = vec![false; bullets.len()];
    let mut hits = Vec::new();

    for enemy in enemies {
        let found = bullets
            .iter()
            .enumerate()
            .find(|(i, b)| !spent[*i] && point_in_rect(b.pos, enemy.pos, enemy.size));

        if let Some((i, bullet)) = found {
            spent[i] = true;
            hits.push(BulletHit {
                enemy_id: enemy.id,
                bullet_id: bullet.id,
                center: enemy.center(),
            });
        }
    }
    hits
}

/// Ids of enemy bullets inside the player's hit box
pub fn bullets_hitting_player(player_pos: Vec2, hitbox: f32, bullets: &[Bullet]) -> Vec<EntityId> {
    let size = Vec2::splat(hitbox);
    bullets
        .iter()
        .filter(|b| point_in_rect(b.pos, player_pos, size))
        .map(|b| b.id)
        .collect()
}

/// Destroy struck enemies, spend their bullets, score them and leave explosions.
/// Returns the number of enemies destroyed.
pub fn resolve_bullet_hits(state: &mut GameState) -> usize {
    let hits = find_bullet_hits(&state.entities.enemies, &state.entities.player_bullets);
    if hits.is_empty() {
        return 0;
    }

    let store = &mut state.entities;
    store
        .enemies
        .retain(|e| !hits.iter().any(|h| h.enemy_id == e.id));
    store
        .player_bullets
        .retain(|b| !hits.iter().any(|h| h.bullet_id == b.id));

    for hit in &hits {
        store.spawn_explosion(hit.center, state.tuning.explosion_start_size);
        state.events.push(GameEvent::EnemyDestroyed {
            enemy_id: hit.enemy_id,
            bullet_id: hit.bullet_id,
            position: hit.center,
        });
        log::debug!("Enemy {} destroyed by bullet {}", hit.enemy_id, hit.bullet_id);
    }

    state.score += state.tuning.score_per_enemy * hits.len() as u64;
    hits.len()
}

/// Apply at most one hit's worth of damage if any enemy bullet overlaps the ship.
/// Moves to GameOver when health runs out. Returns true if the player was hit.
pub fn resolve_player_hit(state: &mut GameState) -> bool {
    let overlapping = bullets_hitting_player(
        state.player.pos,
        state.tuning.player_hitbox,
        &state.entities.enemy_bullets,
    );
    if overlapping.is_empty() {
        return false;
    }

    if state.tuning.consume_hit_bullets {
        state
            .entities
            .enemy_bullets
            .retain(|b| !overlapping.contains(&b.id));
    }

    let health = state.player.health.saturating_sub(state.tuning.damage_per_hit);
    state.player.health = health;
    state.events.push(GameEvent::PlayerHit { health });

    if health == 0 && state.phase == GamePhase::Playing {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!(
            "Game over after {} ticks, final score {}",
            state.time_ticks,
            state.score
        );
    }
    true
}
