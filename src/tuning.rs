//! Gameplay balance
//!
//! Every number the simulation reads comes from here so a run can be retuned
//! from a settings file. Defaults mirror `crate::consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player kinematics ===
    pub acceleration: f32,
    pub max_velocity: f32,
    pub moving_friction: f32,
    pub stopping_friction: f32,
    pub velocity_epsilon: f32,
    /// Position units per unit of velocity per tick
    pub player_speed: f32,
    pub ship_width: f32,
    pub ship_height: f32,
    pub player_hitbox: f32,
    pub max_health: u8,
    pub damage_per_hit: u8,

    // === Projectiles ===
    pub player_bullet_speed: f32,
    pub enemy_bullet_speed: f32,
    pub muzzle_offset_x: f32,

    // === Enemies ===
    pub enemy_size: f32,
    pub enemy_min_speed: f32,
    pub enemy_max_speed: f32,
    /// Chance per tick of a new enemy
    pub enemy_spawn_chance: f64,
    /// Chance per live enemy per tick of an enemy bullet
    pub enemy_fire_chance: f64,
    pub weave_amplitude: f32,
    pub weave_period: f32,
    pub score_per_enemy: u64,

    // === Explosions ===
    pub explosion_start_size: f32,
    pub explosion_max_size: f32,
    pub explosion_growth: f32,
    pub explosion_drift: f32,
    pub explosion_linger_ticks: u32,

    // === Policy ===
    /// Remove enemy bullets that damaged the player. Off keeps the classic
    /// behavior where a bullet keeps hurting until it leaves the screen.
    pub consume_hit_bullets: bool,
    /// Upper bound on live enemy bullets (None = unlimited)
    pub max_enemy_bullets: Option<usize>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            acceleration: ACCELERATION,
            max_velocity: MAX_VELOCITY,
            moving_friction: MOVING_FRICTION,
            stopping_friction: STOPPING_FRICTION,
            velocity_epsilon: VELOCITY_EPSILON,
            player_speed: PLAYER_SPEED,
            ship_width: SHIP_WIDTH,
            ship_height: SHIP_HEIGHT,
            player_hitbox: PLAYER_HITBOX,
            max_health: MAX_HEALTH,
            damage_per_hit: DAMAGE_PER_HIT,

            player_bullet_speed: PLAYER_BULLET_SPEED,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            muzzle_offset_x: MUZZLE_OFFSET_X,

            enemy_size: ENEMY_SIZE,
            enemy_min_speed: ENEMY_MIN_SPEED,
            enemy_max_speed: ENEMY_MAX_SPEED,
            enemy_spawn_chance: ENEMY_SPAWN_CHANCE,
            enemy_fire_chance: ENEMY_FIRE_CHANCE,
            weave_amplitude: WEAVE_AMPLITUDE,
            weave_period: WEAVE_PERIOD,
            score_per_enemy: SCORE_PER_ENEMY,

            explosion_start_size: EXPLOSION_START_SIZE,
            explosion_max_size: EXPLOSION_MAX_SIZE,
            explosion_growth: EXPLOSION_GROWTH,
            explosion_drift: EXPLOSION_DRIFT,
            explosion_linger_ticks: EXPLOSION_LINGER_TICKS,

            consume_hit_bullets: false,
            max_enemy_bullets: None,
        }
    }
}

impl Tuning {
    /// Ticks an explosion needs to grow from start to max size
    pub fn explosion_growth_ticks(&self) -> u32 {
        if self.explosion_growth <= 0.0 {
            return 0;
        }
        let span = (self.explosion_max_size - self.explosion_start_size).max(0.0);
        (span / self.explosion_growth).ceil() as u32
    }

    /// Total explosion lifetime in ticks (grow, then linger)
    pub fn explosion_lifetime_ticks(&self) -> u32 {
        self.explosion_growth_ticks()
            .saturating_add(self.explosion_linger_ticks)
    }

    /// Fix values that would break the simulation. Returns a description
    /// of every correction made.
    pub fn sanitize(&mut self) -> Vec<String> {
        let mut fixes = Vec::new();
        let defaults = Tuning::default();

        // NaN or infinity anywhere poisons positions and RNG ranges
        for (name, value, default) in [
            ("acceleration", &mut self.acceleration, defaults.acceleration),
            ("max_velocity", &mut self.max_velocity, defaults.max_velocity),
            ("moving_friction", &mut self.moving_friction, defaults.moving_friction),
            ("stopping_friction", &mut self.stopping_friction, defaults.stopping_friction),
            ("velocity_epsilon", &mut self.velocity_epsilon, defaults.velocity_epsilon),
            ("player_speed", &mut self.player_speed, defaults.player_speed),
            ("ship_width", &mut self.ship_width, defaults.ship_width),
            ("ship_height", &mut self.ship_height, defaults.ship_height),
            ("player_hitbox", &mut self.player_hitbox, defaults.player_hitbox),
            ("player_bullet_speed", &mut self.player_bullet_speed, defaults.player_bullet_speed),
            ("enemy_bullet_speed", &mut self.enemy_bullet_speed, defaults.enemy_bullet_speed),
            ("muzzle_offset_x", &mut self.muzzle_offset_x, defaults.muzzle_offset_x),
            ("enemy_size", &mut self.enemy_size, defaults.enemy_size),
            ("enemy_min_speed", &mut self.enemy_min_speed, defaults.enemy_min_speed),
            ("enemy_max_speed", &mut self.enemy_max_speed, defaults.enemy_max_speed),
            ("weave_amplitude", &mut self.weave_amplitude, defaults.weave_amplitude),
            ("weave_period", &mut self.weave_period, defaults.weave_period),
            (
                "explosion_start_size",
                &mut self.explosion_start_size,
                defaults.explosion_start_size,
            ),
            ("explosion_max_size", &mut self.explosion_max_size, defaults.explosion_max_size),
            ("explosion_growth", &mut self.explosion_growth, defaults.explosion_growth),
            ("explosion_drift", &mut self.explosion_drift, defaults.explosion_drift),
        ] {
            if !value.is_finite() {
                fixes.push(format!("{name} {value} reset to {default}"));
                *value = default;
            }
        }

        for (name, size, default) in [
            ("ship_width", &mut self.ship_width, defaults.ship_width),
            ("ship_height", &mut self.ship_height, defaults.ship_height),
            ("player_hitbox", &mut self.player_hitbox, defaults.player_hitbox),
            ("enemy_size", &mut self.enemy_size, defaults.enemy_size),
        ] {
            if *size < 0.0 {
                fixes.push(format!("{name} {size} reset to {default}"));
                *size = default;
            }
        }

        for (name, chance) in [
            ("enemy_spawn_chance", &mut self.enemy_spawn_chance),
            ("enemy_fire_chance", &mut self.enemy_fire_chance),
        ] {
            if !(0.0..=1.0).contains(&*chance) {
                let clamped = if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
                fixes.push(format!("{name} {chance} clamped to {clamped}"));
                *chance = clamped;
            }
        }

        for (name, friction) in [
            ("moving_friction", &mut self.moving_friction),
            ("stopping_friction", &mut self.stopping_friction),
        ] {
            if !(0.0..=1.0).contains(&*friction) {
                let clamped = friction.clamp(0.0, 1.0);
                fixes.push(format!("{name} {friction} clamped to {clamped}"));
                *friction = clamped;
            }
        }

        if self.max_velocity <= 0.0 {
            fixes.push(format!("max_velocity {} reset to {MAX_VELOCITY}", self.max_velocity));
            self.max_velocity = MAX_VELOCITY;
        }

        if self.enemy_min_speed <= 0.0 {
            fixes.push(format!(
                "enemy_min_speed {} reset to {ENEMY_MIN_SPEED}",
                self.enemy_min_speed
            ));
            self.enemy_min_speed = ENEMY_MIN_SPEED;
        }
        if self.enemy_max_speed < self.enemy_min_speed {
            fixes.push(format!(
                "enemy_max_speed {} raised to {}",
                self.enemy_max_speed, self.enemy_min_speed
            ));
            self.enemy_max_speed = self.enemy_min_speed;
        }

        // The weave divides by the period
        if self.weave_period <= 0.0 {
            fixes.push(format!("weave_period {} reset to {WEAVE_PERIOD}", self.weave_period));
            self.weave_period = WEAVE_PERIOD;
        }

        if self.explosion_growth <= 0.0 {
            fixes.push(format!(
                "explosion_growth {} reset to {EXPLOSION_GROWTH}",
                self.explosion_growth
            ));
            self.explosion_growth = EXPLOSION_GROWTH;
        }

        if self.max_health == 0 || self.max_health > MAX_HEALTH {
            fixes.push(format!("max_health {} reset to {MAX_HEALTH}", self.max_health));
            self.max_health = MAX_HEALTH;
        }

        fixes
    }
}
