//! Per-tick movement and retirement of non-player entities

use super::state::GameState;

/// Descend enemies and weave them sideways. Enemies past the bottom edge retire.
pub fn move_enemies(state: &mut GameState) {
    let tuning = &state.tuning;
    let max_x = state.enemy_max_x();
    let bottom = state.screen.y;

    for enemy in &mut state.entities.enemies {
        // Weave is keyed off the height before this tick's descent
        let weave = (enemy.pos.y / tuning.weave_period).sin() * tuning.weave_amplitude;
        enemy.pos.y += enemy.speed;
        enemy.pos.x = (enemy.pos.x + weave).clamp(0.0, max_x);
    }
    state.entities.enemies.retain(|e| e.pos.y < bottom);
}

/// Player bullets fly up, enemy bullets fall. Both retire off screen.
pub fn move_bullets(state: &mut GameState) {
    let up = state.tuning.player_bullet_speed;
    let down = state.tuning.enemy_bullet_speed;
    let screen = state.screen;

    for bullet in &mut state.entities.player_bullets {
        bullet.pos.y -= up;
    }
    state
        .entities
        .player_bullets
        .retain(|b| b.pos.y > 0.0 && b.pos.y < screen.y && b.pos.x <= screen.x);

    for bullet in &mut state.entities.enemy_bullets {
        bullet.pos.y += down;
    }
    state
        .entities
        .enemy_bullets
        .retain(|b| b.pos.y < screen.y && b.pos.x <= screen.x);
}

/// Grow, drift and age explosions; drop the ones that finished or left the screen
pub fn advance_explosions(state: &mut GameState) {
    let tuning = &state.tuning;
    let lifetime = tuning.explosion_lifetime_ticks();
    let screen = state.screen;

    for explosion in &mut state.entities.explosions {
        explosion.age_ticks += 1;
        explosion.size = (explosion.size + tuning.explosion_growth).min(tuning.explosion_max_size);
        explosion.pos.y += tuning.explosion_drift;
    }
    state
        .entities
        .explosions
        .retain(|e| e.age_ticks < lifetime && e.pos.y < screen.y && e.pos.x <= screen.x);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BulletOwner;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn state() -> GameState {
        GameState::new(5, Vec2::new(800.0, 600.0), Tuning::default())
    }

    #[test]
    fn test_enemy_descends_and_weaves() {
        let mut state = state();
        state
            .entities
            .spawn_enemy(Vec2::new(100.0, 30.0), 2.0, Vec2::splat(50.0));
        move_enemies(&mut state);
        let enemy = &state.entities.enemies[0];
        assert_eq!(enemy.pos.y, 32.0);
        assert!((enemy.pos.x - (100.0 + 1.0f32.sin() * 2.0)).abs() < 1e-5);
    }

    #[test]
    fn test_enemy_weave_clamped_to_screen() {
        let mut state = state();
        state
            .entities
            .spawn_enemy(Vec2::new(749.5, 45.0), 1.0, Vec2::splat(50.0));
        move_enemies(&mut state);
        assert_eq!(state.entities.enemies[0].pos.x, 750.0);
    }

    #[test]
    fn test_enemy_retires_at_bottom() {
        let mut state = state();
        state
            .entities
            .spawn_enemy(Vec2::new(100.0, 597.0), 3.0, Vec2::splat(50.0));
        state
            .entities
            .spawn_enemy(Vec2::new(300.0, 590.0), 3.0, Vec2::splat(50.0));
        move_enemies(&mut state);
        assert_eq!(state.entities.enemies.len(), 1);
        assert_eq!(state.entities.enemies[0].id, 1);
    }

    #[test]
    fn test_bullets_move_and_retire() {
        let mut state = state();
        state
            .entities
            .spawn_bullet(Vec2::new(50.0, 7.0), BulletOwner::Player);
        state
            .entities
            .spawn_bullet(Vec2::new(50.0, 100.0), BulletOwner::Player);
        state
            .entities
            .spawn_bullet(Vec2::new(50.0, 595.0), BulletOwner::Enemy);
        state
            .entities
            .spawn_bullet(Vec2::new(50.0, 300.0), BulletOwner::Enemy);
        move_bullets(&mut state);

        let player: Vec<_> = state.entities.player_bullets.iter().map(|b| b.pos.y).collect();
        let enemy: Vec<_> = state.entities.enemy_bullets.iter().map(|b| b.pos.y).collect();
        assert_eq!(player, vec![93.0]);
        assert_eq!(enemy, vec![305.0]);
    }

    #[test]
    fn test_bullets_past_shrunk_screen_retire() {
        let mut state = state();
        state
            .entities
            .spawn_bullet(Vec2::new(700.0, 300.0), BulletOwner::Enemy);
        state.screen = Vec2::new(400.0, 600.0);
        move_bullets(&mut state);
        assert!(state.entities.enemy_bullets.is_empty());
    }

    #[test]
    fn test_player_bullet_below_shrunk_screen_retires() {
        let mut state = state();
        state
            .entities
            .spawn_bullet(Vec2::new(415.0, 500.0), BulletOwner::Player);
        state
            .entities
            .spawn_bullet(Vec2::new(415.0, 200.0), BulletOwner::Player);
        state.screen = Vec2::new(800.0, 300.0);
        move_bullets(&mut state);

        let ys: Vec<_> = state.entities.player_bullets.iter().map(|b| b.pos.y).collect();
        assert_eq!(ys, vec![193.0]);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_explosion_lifecycle() {
        let mut state = state();
        state.entities.spawn_explosion(Vec2::new(100.0, 100.0), 10.0);

        advance_explosions(&mut state);
        let explosion = &state.entities.explosions[0];
        assert_eq!(explosion.size, 15.0);
        assert_eq!(explosion.pos.y, 101.0);

        for _ in 1..47 {
            advance_explosions(&mut state);
        }
        assert_eq!(state.entities.explosions[0].size, 100.0);
        advance_explosions(&mut state);
        assert!(state.entities.explosions.is_empty());
    }

    #[test]
    fn test_explosion_retires_at_bottom() {
        let mut state = state();
        state.entities.spawn_explosion(Vec2::new(100.0, 599.5), 10.0);
        advance_explosions(&mut state);
        assert!(state.entities.explosions.is_empty());
    }
}
