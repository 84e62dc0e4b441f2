//! Star Raid entry point
//!
//! Native headless runner: an autopilot plays through the session API for a
//! fixed amount of simulated time, sounds are logged, and the final frame is
//! printed as JSON.
//!
//! Usage: `star-raid [settings.json] [seconds]`

use std::path::PathBuf;

use star_raid::Game;
use star_raid::Settings;
use star_raid::audio::LogSink;
use star_raid::consts::SIM_DT;
use star_raid::input::Key;
use star_raid::sim::Snapshot;

const DEFAULT_SECONDS: f32 = 30.0;

/// Ticks between autopilot shots
const FIRE_INTERVAL: u64 = 12;

/// How close (pixels above the ship) an enemy bullet must be to trigger a dodge
const DODGE_RANGE: f32 = 90.0;

/// Scripted player driving the game from snapshots only
#[derive(Default)]
struct Autopilot {
    holding_fire: bool,
}

impl Autopilot {
    /// Decide key presses for the next frame
    fn drive(&mut self, game: &mut Game<LogSink>) {
        let snap = game.snapshot().clone();
        let ship = snap.player.pos;
        let muzzle_x = ship.x + 15.0;

        // Dodge the closest incoming bullet, otherwise line up under the lowest enemy
        let threat = snap
            .enemy_bullets
            .iter()
            .filter(|b| b.pos.y < ship.y + 30.0 && ship.y - b.pos.y < DODGE_RANGE)
            .find(|b| (b.pos.x - muzzle_x).abs() < 30.0);

        let target_x = if let Some(bullet) = threat {
            if bullet.pos.x > muzzle_x {
                muzzle_x - 60.0
            } else {
                muzzle_x + 60.0
            }
        } else {
            lowest_enemy_x(&snap).unwrap_or(snap.screen.x / 2.0)
        };

        Self::steer(game, target_x - muzzle_x);

        // Tap fire: press one tick, release the next
        if self.holding_fire {
            game.key_up(Key::Fire);
            self.holding_fire = false;
        } else if snap.tick % FIRE_INTERVAL == 0 && !snap.enemies.is_empty() {
            game.key_down(Key::Fire);
            self.holding_fire = true;
        }
    }

    fn steer(game: &mut Game<LogSink>, offset: f32) {
        if offset < -5.0 {
            game.key_down(Key::Left);
            game.key_up(Key::Right);
        } else if offset > 5.0 {
            game.key_down(Key::Right);
            game.key_up(Key::Left);
        } else {
            game.key_up(Key::Left);
            game.key_up(Key::Right);
        }
    }
}

fn lowest_enemy_x(snap: &Snapshot) -> Option<f32> {
    snap.enemies
        .iter()
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.pos.x + e.size.x / 2.0)
}

fn main() {
    env_logger::init();
    log::info!("Star Raid (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().map(PathBuf::from);
    let seconds = match args.next().map(|s| s.parse::<f32>()) {
        Some(Ok(s)) if s > 0.0 => s,
        Some(_) => {
            log::warn!("Invalid duration, running for {} seconds", DEFAULT_SECONDS);
            DEFAULT_SECONDS
        }
        None => DEFAULT_SECONDS,
    };

    let settings = Settings::load_or_default(settings_path.as_deref());
    let mut game = Game::new(&settings, LogSink);
    let mut autopilot = Autopilot::default();

    let frames = (seconds / SIM_DT).round() as u64;
    let mut runs = 1;
    let mut best_score = 0;

    for _ in 0..frames {
        autopilot.drive(&mut game);
        game.update(SIM_DT);

        if !game.is_running() {
            let score = game.snapshot().score;
            best_score = best_score.max(score);
            log::info!("Run {} ended with score {}", runs, score);
            game.restart();
            runs += 1;
        }
    }

    let snapshot = game.snapshot();
    best_score = best_score.max(snapshot.score);
    log::info!("{} run(s), best score {}", runs, best_score);

    match serde_json::to_string_pretty(snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode snapshot: {}", e),
    }
}
