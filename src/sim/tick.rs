//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::{resolve_bullet_hits, resolve_player_hit};
use super::kinematics::{HeldDirections, integrate_position, step_velocity};
use super::movement::{advance_explosions, move_bullets, move_enemies};
use super::spawn::{fire_player_bullet, spawn_enemy, spawn_enemy_bullets};
use super::state::{GamePhase, GameState, Player};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement directions held this tick
    pub held: HeldDirections,
    /// Fire one player bullet (edge-triggered, consumed by this tick)
    pub fire: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Nothing moves once the game is over
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    // 1-2. Player kinematics
    state.player.vel = step_velocity(state.player.vel, input.held, &state.tuning);
    state.player.pos = integrate_position(
        state.player.pos,
        state.player.vel,
        state.screen,
        &state.tuning,
    );

    // 3. Everything else moves
    move_bullets(state);
    move_enemies(state);

    // 4. Spawning
    if input.fire {
        fire_player_bullet(state);
    }
    spawn_enemy(state);
    spawn_enemy_bullets(state);

    // 5. Player bullets vs enemies
    resolve_bullet_hits(state);

    // 6. Enemy bullets vs player
    resolve_player_hit(state);

    // 7. Explosions
    advance_explosions(state);

    #[cfg(debug_assertions)]
    if let Err(violation) = state.check_invariants() {
        panic!("invariant violated after tick {}: {}", state.time_ticks, violation);
    }
}

/// Start a fresh run after game over. Returns false (and does nothing) while playing.
pub fn restart(state: &mut GameState) -> bool {
    if state.phase != GamePhase::GameOver {
        log::debug!("Restart ignored while playing");
        return false;
    }

    state.player = Player::new(state.screen, state.tuning.max_health);
    state.entities.clear();
    state.events.clear();
    state.score = 0;
    state.time_ticks = 0;
    state.phase = GamePhase::Playing;

    log::info!("Restarted (seed {})", state.seed);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BulletOwner, GameEvent};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn screen() -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    /// No random spawns, so scenarios are fully hand-placed
    fn quiet() -> Tuning {
        Tuning {
            enemy_spawn_chance: 0.0,
            enemy_fire_chance: 0.0,
            ..Default::default()
        }
    }

    fn hold_right() -> TickInput {
        TickInput {
            held: HeldDirections {
                right: true,
                ..Default::default()
            },
            fire: false,
        }
    }

    #[test]
    fn test_tick_moves_player() {
        let mut state = GameState::new(1, screen(), quiet());
        let start = state.player.pos;
        tick(&mut state, &hold_right());
        assert!(state.player.pos.x > start.x);
        assert_eq!(state.player.pos.y, start.y);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_fire_spawns_bullet_at_moved_ship() {
        let mut state = GameState::new(1, screen(), quiet());
        let input = TickInput {
            fire: true,
            ..hold_right()
        };
        tick(&mut state, &input);
        let bullet = &state.entities.player_bullets[0];
        assert_eq!(bullet.pos.x, state.player.pos.x + 15.0);
        assert_eq!(bullet.pos.y, state.player.pos.y);
        assert_eq!(state.events, vec![GameEvent::Fired { bullet_id: 0 }]);

        // Next tick it flies up and no new bullet appears
        tick(&mut state, &TickInput::default());
        assert_eq!(state.entities.player_bullets.len(), 1);
        assert_eq!(state.entities.player_bullets[0].pos.y, state.player.pos.y - 7.0);
    }

    #[test]
    fn test_shot_destroys_enemy_in_path() {
        let mut state = GameState::new(1, screen(), quiet());
        state.player.pos = Vec2::new(400.0, 400.0);
        // Enemy drifting down toward the bullet lane
        state
            .entities
            .spawn_enemy(Vec2::new(390.0, 300.0), 1.0, Vec2::splat(50.0));

        tick(
            &mut state,
            &TickInput {
                fire: true,
                ..Default::default()
            },
        );
        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
            if state.score > 0 {
                break;
            }
        }
        assert_eq!(state.score, 10);
        assert!(state.entities.enemies.is_empty());
        assert!(state.entities.player_bullets.is_empty());
        assert_eq!(state.entities.explosions.len(), 1);
    }

    #[test]
    fn test_standing_bullet_keeps_hurting() {
        let mut state = GameState::new(1, screen(), quiet());
        state.player.pos = Vec2::new(100.0, 300.0);
        // Falls 5px per tick through the 30px box: overlaps for several ticks
        state
            .entities
            .spawn_bullet(Vec2::new(110.0, 290.0), BulletOwner::Enemy);
        for _ in 0..8 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.player.health, 100 - 10 * 7);
        assert_eq!(state.entities.enemy_bullets.len(), 1);
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut state = GameState::new(1, screen(), Tuning::default());
        state.player.pos = Vec2::new(100.0, 300.0);
        state.player.health = 10;
        state
            .entities
            .spawn_bullet(Vec2::new(110.0, 300.0), BulletOwner::Enemy);
        state
            .entities
            .spawn_enemy(Vec2::new(500.0, 50.0), 2.0, Vec2::splat(50.0));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver { score: 0 }));

        let frozen_ticks = state.time_ticks;
        let frozen_enemy = state.entities.enemies[0].pos;
        let frozen_bullets = state.entities.enemy_bullets.len();
        for _ in 0..100 {
            tick(
                &mut state,
                &TickInput {
                    fire: true,
                    ..hold_right()
                },
            );
            assert_eq!(state.phase, GamePhase::GameOver);
            assert!(state.events.is_empty());
        }
        assert_eq!(state.time_ticks, frozen_ticks);
        assert_eq!(state.score, 0);
        assert_eq!(state.entities.enemies[0].pos, frozen_enemy);
        assert_eq!(state.entities.enemy_bullets.len(), frozen_bullets);
        assert!(state.entities.player_bullets.is_empty());
    }

    #[test]
    fn test_restart_resets_fully() {
        let mut state = GameState::new(1, screen(), Tuning::default());
        state.player.vel = Vec2::new(3.0, 3.0);
        state.player.health = 0;
        state.score = 120;
        state.phase = GamePhase::GameOver;
        state
            .entities
            .spawn_enemy(Vec2::new(10.0, 10.0), 1.0, Vec2::splat(50.0));
        state
            .entities
            .spawn_bullet(Vec2::new(10.0, 10.0), BulletOwner::Player);
        state
            .entities
            .spawn_bullet(Vec2::new(10.0, 10.0), BulletOwner::Enemy);
        state.entities.spawn_explosion(Vec2::new(10.0, 10.0), 10.0);

        assert!(restart(&mut state));
        assert!(state.entities.is_empty());
        assert_eq!(state.player.health, 100);
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.player.pos, Vec2::new(400.0, 500.0));
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_restart_while_playing_is_noop() {
        let mut state = GameState::new(1, screen(), quiet());
        tick(&mut state, &hold_right());
        let pos = state.player.pos;
        assert!(!restart(&mut state));
        assert_eq!(state.player.pos, pos);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_resize_reclamps_without_reset() {
        let mut state = GameState::new(1, screen(), quiet());
        state.player.pos = Vec2::new(700.0, 500.0);
        state.screen = Vec2::new(400.0, 300.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.pos, Vec2::new(370.0, 250.0));
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, screen(), Tuning::default());
        let mut state2 = GameState::new(99999, screen(), Tuning::default());

        for i in 0..600u32 {
            let input = TickInput {
                held: HeldDirections {
                    left: i % 120 < 60,
                    right: i % 120 >= 60,
                    ..Default::default()
                },
                fire: i % 15 == 0,
            };
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.player.health, state2.player.health);
        assert_eq!(state1.player.pos, state2.player.pos);
        let ids = |s: &GameState| {
            s.entities
                .enemies
                .iter()
                .map(|e| (e.id, e.pos))
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&state1), ids(&state2));
    }

    proptest! {
        #[test]
        fn prop_tick_keeps_player_on_screen(
            seed in any::<u64>(),
            inputs in prop::collection::vec(
                (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()),
                1..200,
            ),
        ) {
            let mut state = GameState::new(seed, screen(), Tuning::default());
            for (up, down, left, right, fire) in inputs {
                let input = TickInput {
                    held: HeldDirections { up, down, left, right },
                    fire,
                };
                tick(&mut state, &input);
                let pos = state.player.pos;
                prop_assert!(pos.x >= 0.0 && pos.x <= 770.0);
                prop_assert!(pos.y >= 0.0 && pos.y <= 550.0);
                prop_assert!(state.check_invariants().is_ok());
            }
        }

        #[test]
        fn prop_resize_keeps_invariants(
            seed in any::<u64>(),
            steps in prop::collection::vec(
                (
                    prop::option::weighted(0.1, (1.0f32..1600.0, 1.0f32..1200.0)),
                    any::<bool>(),
                    any::<bool>(),
                    any::<bool>(),
                ),
                1..300,
            ),
        ) {
            let tuning = Tuning {
                enemy_spawn_chance: 0.2,
                enemy_fire_chance: 0.05,
                ..Default::default()
            };
            let mut state = GameState::new(seed, screen(), tuning);
            for (resize, left, down, fire) in steps {
                if let Some((width, height)) = resize {
                    state.screen = Vec2::new(width, height);
                }
                let input = TickInput {
                    held: HeldDirections {
                        left,
                        right: !left,
                        down,
                        up: !down,
                    },
                    fire,
                };
                tick(&mut state, &input);
                prop_assert!(state.check_invariants().is_ok());
                if !state.is_playing() {
                    restart(&mut state);
                }
            }
        }
    }
}
