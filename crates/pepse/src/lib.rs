//! # PEPSE
//!
//! Headless host for one side-scrolling world.
//!
//! ```text
//! Tick N:
//! ┌───────────────────────────────────────────────────────────┐
//! │ 1. MOVE AVATAR                                            │
//! │    └─ New x from input; feet snapped to ground height     │
//! │                                                           │
//! │ 2. WINDOW TICK                                            │
//! │    ├─ Stable: displacement under half a viewport          │
//! │    └─ Slid: vacated columns removed, exposed ones built   │
//! │                                                           │
//! │ 3. READ                                                   │
//! │    └─ Camera / renderer read the store                    │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs on the calling thread and completes inside `step`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

use std::time::Duration;

use pepse_procedural::{
    spawn_point, EntityStore, TickOutcome, WorldConfig, WorldResult, WorldWindowController,
};
use tracing::{debug, info};

pub use pepse_procedural as procedural;

/// Where the avatar is, in world units. `y` is the top of the avatar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Avatar {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position; y grows downward.
    pub y: f32,
}

/// Running totals over a simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimulationStats {
    /// Ticks run.
    pub ticks: u64,
    /// Ticks that slid the window.
    pub slides: u64,
    /// Blocks generated by slides.
    pub generated: u64,
    /// Blocks removed by slides.
    pub removed: u64,
    /// Times the avatar was respawned.
    pub respawns: u64,
}

/// One world and its tracked avatar.
#[derive(Debug)]
pub struct Simulation {
    config: WorldConfig,
    store: EntityStore,
    window: WorldWindowController,
    avatar: Avatar,
    spawn: Avatar,
    stats: SimulationStats,
}

impl Simulation {
    /// Validates `config`, spawns the avatar and builds the initial window.
    ///
    /// # Errors
    ///
    /// Returns the validation error if `config` is unusable.
    pub fn new(config: WorldConfig) -> WorldResult<Self> {
        config.validate()?;

        let (x, y) = spawn_point(&config);
        let spawn = Avatar { x, y };
        let window = WorldWindowController::new(&config, spawn.x);
        let mut store = EntityStore::new();
        window.populate(&mut store);

        info!(
            seed = config.seed,
            viewport_width = config.viewport.width,
            viewport_height = config.viewport.height,
            spawn_x = spawn.x,
            spawn_y = spawn.y,
            blocks = store.len(),
            "simulation created"
        );

        Ok(Self {
            config,
            store,
            window,
            avatar: spawn,
            spawn,
            stats: SimulationStats::default(),
        })
    }

    /// Configuration this world was built from.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Materialized blocks.
    #[must_use]
    pub const fn store(&self) -> &EntityStore {
        &self.store
    }

    /// The window controller.
    #[must_use]
    pub const fn window(&self) -> &WorldWindowController {
        &self.window
    }

    /// Current avatar position.
    #[must_use]
    pub const fn avatar(&self) -> Avatar {
        self.avatar
    }

    /// Where the avatar (re)spawns.
    #[must_use]
    pub const fn spawn(&self) -> Avatar {
        self.spawn
    }

    /// Totals so far.
    #[must_use]
    pub const fn stats(&self) -> SimulationStats {
        self.stats
    }

    /// Time budget of one tick at the configured framerate.
    #[must_use]
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs(1) / self.config.simulation.target_framerate.max(1)
    }

    /// Moves the avatar to `avatar_x`, standing on the ground there, and
    /// runs one window tick.
    pub fn step(&mut self, avatar_x: f32) -> TickOutcome {
        let ground = self.window.ground().ground_height_at(avatar_x);
        self.avatar = Avatar {
            x: avatar_x,
            y: ground - self.config.avatar.height,
        };

        let outcome = self.window.tick(avatar_x, &mut self.store);
        self.stats.ticks += 1;
        if let TickOutcome::Slid(report) = outcome {
            self.record_slide(report.generated, report.removed);
        }
        outcome
    }

    /// Moves the avatar by `dx` and runs one window tick.
    pub fn walk(&mut self, dx: f32) -> TickOutcome {
        self.step(self.avatar.x + dx)
    }

    /// Puts the avatar back at the spawn point and moves the window's
    /// tracked position with it, so the ground is there on arrival.
    pub fn respawn(&mut self) -> TickOutcome {
        debug!(from_x = self.avatar.x, to_x = self.spawn.x, "avatar respawned");
        self.avatar = self.spawn;
        let outcome = self.window.recenter(self.spawn.x, &mut self.store);
        if let TickOutcome::Slid(report) = outcome {
            self.record_slide(report.generated, report.removed);
        }
        self.stats.respawns += 1;
        outcome
    }

    fn record_slide(&mut self, generated: usize, removed: usize) {
        self.stats.slides += 1;
        self.stats.generated += generated as u64;
        self.stats.removed += removed as u64;
    }
}
