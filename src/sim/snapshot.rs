//! Read-only view of the world handed to renderers and UI
//!
//! Captured after a tick completes, so observers never see a half-updated frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{EntityId, GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub health: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub id: EntityId,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosionView {
    pub id: EntityId,
    /// Center of the blast
    pub pos: Vec2,
    pub size: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub screen: Vec2,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub player_bullets: Vec<BulletView>,
    pub enemy_bullets: Vec<BulletView>,
    pub explosions: Vec<ExplosionView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let store = &state.entities;
        Self {
            tick: state.time_ticks,
            phase: state.phase,
            score: state.score,
            screen: state.screen,
            player: PlayerView {
                pos: state.player.pos,
                health: state.player.health,
            },
            enemies: store
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.pos,
                    size: e.size,
                })
                .collect(),
            player_bullets: store
                .player_bullets
                .iter()
                .map(|b| BulletView { id: b.id, pos: b.pos })
                .collect(),
            enemy_bullets: store
                .enemy_bullets
                .iter()
                .map(|b| BulletView { id: b.id, pos: b.pos })
                .collect(),
            explosions: store
                .explosions
                .iter()
                .map(|e| ExplosionView {
                    id: e.id,
                    pos: e.pos,
                    size: e.size,
                })
                .collect(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
