//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `GameState`.

use std::collections::HashSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::clamp_to_span;
use crate::tuning::Tuning;

/// Identifier of a live entity, unique within its own stream
pub type EntityId = u32;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay, ticks advance the world
    Playing,
    /// Player destroyed; only a restart is accepted
    GameOver,
}

/// Something that happened during a tick, for audio and UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player bullet left the ship
    Fired { bullet_id: EntityId },
    /// Enemy destroyed by a player bullet
    EnemyDestroyed {
        enemy_id: EntityId,
        bullet_id: EntityId,
        position: Vec2,
    },
    /// Enemy fire reached the ship
    PlayerHit { health: u8 },
    /// Health ran out
    GameOver { score: u64 },
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the ship
    pub pos: Vec2,
    pub vel: Vec2,
    pub health: u8,
}

impl Player {
    pub fn new(screen: Vec2, health: u8) -> Self {
        Self {
            pos: Self::start_position(screen),
            vel: Vec2::ZERO,
            health,
        }
    }

    /// Centered horizontally, 100px above the bottom edge
    pub fn start_position(screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x / 2.0,
            screen.y - crate::consts::PLAYER_START_OFFSET_Y,
        )
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// A hostile ship descending from the top of the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per tick, always positive
    pub speed: f32,
    pub size: Vec2,
}

impl Enemy {
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Where enemy bullets leave the ship
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y)
    }
}

/// Which side fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// A point projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: EntityId,
    pub pos: Vec2,
    pub owner: BulletOwner,
}

/// Blast left behind by a destroyed enemy. Grows, lingers, then completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub id: EntityId,
    /// Center of the blast
    pub pos: Vec2,
    /// Ticks since creation
    pub age_ticks: u32,
    /// Current diameter
    pub size: f32,
}

/// Per-stream id counters. Ids only ever increase, even across restarts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdAllocator {
    next_enemy: EntityId,
    next_player_bullet: EntityId,
    next_enemy_bullet: EntityId,
    next_explosion: EntityId,
}

impl IdAllocator {
    fn bump(counter: &mut EntityId) -> EntityId {
        let id = *counter;
        *counter += 1;
        id
    }

    pub fn enemy(&mut self) -> EntityId {
        Self::bump(&mut self.next_enemy)
    }

    pub fn player_bullet(&mut self) -> EntityId {
        Self::bump(&mut self.next_player_bullet)
    }

    pub fn enemy_bullet(&mut self) -> EntityId {
        Self::bump(&mut self.next_enemy_bullet)
    }

    pub fn explosion(&mut self) -> EntityId {
        Self::bump(&mut self.next_explosion)
    }
}

/// All live entities, each collection kept in ascending id order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub explosions: Vec<Explosion>,
    pub ids: IdAllocator,
}

impl EntityStore {
    /// Drop every live entity. Id counters keep counting.
    pub fn clear(&mut self) {
        self.enemies.clear();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.explosions.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
            && self.player_bullets.is_empty()
            && self.enemy_bullets.is_empty()
            && self.explosions.is_empty()
    }

    pub fn spawn_enemy(&mut self, pos: Vec2, speed: f32, size: Vec2) -> EntityId {
        let id = self.ids.enemy();
        self.enemies.push(Enemy { id, pos, speed, size });
        id
    }

    pub fn spawn_bullet(&mut self, pos: Vec2, owner: BulletOwner) -> EntityId {
        let (id, list) = match owner {
            BulletOwner::Player => (self.ids.player_bullet(), &mut self.player_bullets),
            BulletOwner::Enemy => (self.ids.enemy_bullet(), &mut self.enemy_bullets),
        };
        list.push(Bullet { id, pos, owner });
        id
    }

    pub fn spawn_explosion(&mut self, pos: Vec2, size: f32) -> EntityId {
        let id = self.ids.explosion();
        self.explosions.push(Explosion {
            id,
            pos,
            age_ticks: 0,
            size,
        });
        id
    }

    /// Remove an explosion whose animation finished. Returns false if it was already gone.
    pub fn complete_explosion(&mut self, id: EntityId) -> bool {
        let before = self.explosions.len();
        self.explosions.retain(|e| e.id != id);
        self.explosions.len() != before
    }
}

/// Complete game state (deterministic given seed and inputs)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation RNG, the only source of randomness
    pub rng: Pcg32,
    /// Playfield size in pixels
    pub screen: Vec2,
    /// Balance values for this run
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    /// Ticks processed while playing
    pub time_ticks: u64,
    pub player: Player,
    pub entities: EntityStore,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, screen: Vec2, tuning: Tuning) -> Self {
        let player = Player::new(screen, tuning.max_health);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            screen,
            tuning,
            phase: GamePhase::Playing,
            score: 0,
            time_ticks: 0,
            player,
            entities: EntityStore::default(),
            events: Vec::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Largest top-left corner that keeps the ship fully on screen
    pub fn player_max_pos(&self) -> Vec2 {
        Vec2::new(
            self.screen.x - self.tuning.ship_width,
            self.screen.y - self.tuning.ship_height,
        )
    }

    /// Largest x for an enemy's left edge
    pub fn enemy_max_x(&self) -> f32 {
        (self.screen.x - self.tuning.enemy_size).max(0.0)
    }

    /// Whether a point lies on the playfield (edges included)
    pub fn on_screen(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.screen.x && pos.y >= 0.0 && pos.y <= self.screen.y
    }

    /// Verify the post-tick invariants. Any failure is a simulation bug.
    pub fn check_invariants(&self) -> Result<(), String> {
        fn unique<'a>(name: &str, ids: impl Iterator<Item = &'a EntityId>) -> Result<(), String> {
            let mut seen = HashSet::new();
            for id in ids {
                if !seen.insert(*id) {
                    return Err(format!("duplicate {name} id {id}"));
                }
            }
            Ok(())
        }

        let store = &self.entities;
        unique("enemy", store.enemies.iter().map(|e| &e.id))?;
        unique("player bullet", store.player_bullets.iter().map(|b| &b.id))?;
        unique("enemy bullet", store.enemy_bullets.iter().map(|b| &b.id))?;
        unique("explosion", store.explosions.iter().map(|e| &e.id))?;

        if self.player.health > self.tuning.max_health {
            return Err(format!("health {} above max", self.player.health));
        }
        if self.phase == GamePhase::Playing && !self.player.is_alive() {
            return Err("playing with zero health".to_string());
        }

        let max = self.player_max_pos();
        let pos = self.player.pos;
        if pos.x != clamp_to_span(pos.x, max.x) || pos.y != clamp_to_span(pos.y, max.y) {
            return Err(format!("player at {pos} outside playfield"));
        }

        let enemy_x = 0.0..=self.enemy_max_x();
        let enemy_y = 0.0..self.screen.y;
        for enemy in &store.enemies {
            if !enemy_x.contains(&enemy.pos.x) || !enemy_y.contains(&enemy.pos.y) {
                return Err(format!("enemy {} at {} outside playfield", enemy.id, enemy.pos));
            }
        }
        for bullet in store.player_bullets.iter().chain(&store.enemy_bullets) {
            if !self.on_screen(bullet.pos) {
                return Err(format!(
                    "{:?} bullet {} at {} outside playfield",
                    bullet.owner, bullet.id, bullet.pos
                ));
            }
        }
        for explosion in &store.explosions {
            if !self.on_screen(explosion.pos) {
                return Err(format!(
                    "explosion {} at {} outside playfield",
                    explosion.id, explosion.pos
                ));
            }
        }

        Ok(())
    }
}
