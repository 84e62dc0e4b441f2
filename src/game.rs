//! Game session
//!
//! Owns the simulation state and drives it at a fixed 60 Hz from whatever
//! frame deltas the platform supplies. Input arrives between frames, the
//! renderer reads the post-tick `Snapshot`, and sound triggers go to the
//! audio sink.

use glam::Vec2;

use crate::audio::{AudioManager, AudioSink, SoundEffect};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::input::{InputState, Key};
use crate::settings::Settings;
use crate::sim::{EntityId, GamePhase, GameState, Snapshot, restart, tick};

/// Fixed-step clock. Present only while the game is running; dropping it
/// guarantees no further ticks fire.
#[derive(Debug, Default)]
pub struct TickClock {
    accumulator: f32,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame delta, returning how many ticks are due.
    /// Long frames are capped so a stall never triggers a burst of catch-up ticks.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut due = 0;
        while self.accumulator >= SIM_DT && due < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            due += 1;
        }
        if due == MAX_SUBSTEPS {
            // Drop the backlog rather than carry it into the next frame
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        due
    }
}

/// Game instance holding all state
pub struct Game<S: AudioSink> {
    state: GameState,
    input: InputState,
    clock: Option<TickClock>,
    audio: AudioManager<S>,
    snapshot: Snapshot,
}

impl<S: AudioSink> Game<S> {
    pub fn new(settings: &Settings, sink: S) -> Self {
        let seed = settings.resolve_seed();
        let state = GameState::new(seed, settings.screen(), settings.tuning.clone());

        let mut audio = AudioManager::new(sink);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);

        log::info!(
            "New game: seed {}, screen {}x{}",
            seed,
            settings.screen_width,
            settings.screen_height
        );

        let snapshot = Snapshot::capture(&state);
        Self {
            state,
            input: InputState::new(),
            clock: Some(TickClock::new()),
            audio,
            snapshot,
        }
    }

    // === Input ===

    pub fn key_down(&mut self, key: Key) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    /// Forward a named key event; unknown keys are ignored
    pub fn key_event(&mut self, name: &str, pressed: bool) {
        if let Some(key) = Key::from_name(name) {
            if pressed {
                self.key_down(key);
            } else {
                self.key_up(key);
            }
        }
    }

    // === Loop ===

    /// Whether the tick clock is running
    pub fn is_running(&self) -> bool {
        self.clock.is_some()
    }

    /// Advance by a wall-clock frame delta (seconds). Returns ticks processed.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        let Some(clock) = self.clock.as_mut() else {
            return 0;
        };
        let due = clock.advance(frame_dt);

        let mut ran = 0;
        for _ in 0..due {
            if !self.step() {
                break;
            }
            ran += 1;
        }
        ran
    }

    /// Run exactly one tick. Returns false if the clock is stopped.
    pub fn step(&mut self) -> bool {
        if self.clock.is_none() {
            return false;
        }

        let input = self.input.take_tick_input();
        tick(&mut self.state, &input);
        self.audio.handle_events(&self.state.events);

        if self.state.phase == GamePhase::GameOver {
            log::info!("Tick clock stopped");
            self.clock = None;
        }

        self.snapshot = Snapshot::capture(&self.state);
        true
    }

    // === Commands ===

    /// Start over after game over. No-op (returns false) while playing.
    pub fn restart(&mut self) -> bool {
        if !restart(&mut self.state) {
            return false;
        }
        self.audio.stop(SoundEffect::GameOver);
        self.input.cancel_fire();
        self.clock = Some(TickClock::new());
        self.snapshot = Snapshot::capture(&self.state);
        true
    }

    /// New playfield size. The ship is re-clamped on the next tick, not reset.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return;
        }
        self.state.screen = Vec2::new(width, height);
        self.snapshot.screen = self.state.screen;
        log::debug!("Resized to {}x{}", width, height);
    }

    /// Renderer reports an explosion animation finished
    pub fn complete_explosion(&mut self, id: EntityId) -> bool {
        let removed = self.state.entities.complete_explosion(id);
        if removed {
            self.snapshot = Snapshot::capture(&self.state);
        }
        removed
    }

    // === Observers ===

    /// Latest complete frame
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn audio(&self) -> &AudioManager<S> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager<S> {
        &mut self.audio
    }
}
