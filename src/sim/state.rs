//! Game state and core simulation types
//!
//! A single `GameState` owns every entity for a session. The loop driver holds
//! it and lends it to `tick` and the renderer each frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::generator::spawn_platform;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen: ground platform and a resting player, no physics
    Preview,
    /// Active run
    Playing,
    /// Run ended, frozen until restart
    GameOver,
}

/// The two platform palette entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformColor {
    Primary,
    Alt,
}

/// Outbound signals for audio and presentation collaborators
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A run began (fresh start or restart)
    RunStarted,
    /// The player left a platform
    Jumped,
    /// A new platform was reached
    Scored { score: u64 },
    /// The player fell out of view
    GameOver { score: u64, new_best: bool },
}

/// The player character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels per tick, positive is down)
    pub vel_y: f32,
    pub on_ground: bool,
    /// Platform currently stood on, by id
    pub standing_on: Option<u32>,
    /// Highest platform id that has already scored this run
    pub last_scored: u32,
    /// Consecutive ticks spent grounded
    pub grounded_ticks: u32,
}

impl Player {
    /// Resting position above the ground platform
    pub fn spawn(ground_id: u32) -> Self {
        Self {
            pos: Vec2::new(
                CANVAS_WIDTH / 2.0 - PLAYER_SIZE / 2.0,
                CANVAS_HEIGHT - PLAYER_SPAWN_OFFSET,
            ),
            size: Vec2::splat(PLAYER_SIZE),
            vel_y: 0.0,
            on_ground: true,
            standing_on: Some(ground_id),
            last_scored: ground_id,
            grounded_ticks: 0,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.bottom())
    }
}

/// A horizontally patrolling platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Monotonic per run; higher ids were created later (and sit higher)
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Speed magnitude (pixels per tick)
    pub speed: f32,
    /// +1.0 moves right, -1.0 moves left
    pub direction: f32,
    pub color: PlatformColor,
}

impl Platform {
    /// The stationary platform under the player at run start
    pub fn ground(id: u32) -> Self {
        Self {
            id,
            pos: Vec2::new(
                CANVAS_WIDTH / 2.0 - PLATFORM_WIDTH / 2.0,
                CANVAS_HEIGHT - GROUND_OFFSET,
            ),
            size: Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT),
            speed: 0.0,
            direction: 1.0,
            color: PlatformColor::Primary,
        }
    }

    /// Horizontal displacement per tick
    pub fn velocity_x(&self) -> f32 {
        self.speed * self.direction
    }

    /// Move one tick and wrap around the screen edge it exits through
    pub fn patrol(&mut self, canvas_width: f32) {
        self.pos.x += self.velocity_x();

        if self.direction > 0.0 && self.pos.x > canvas_width {
            self.pos.x = -self.size.x;
        } else if self.direction < 0.0 && self.pos.x + self.size.x < 0.0 {
            self.pos.x = canvas_width;
        }
    }
}

/// A short-lived visual particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining ticks
    pub life: u32,
    pub max_life: u32,
    /// Opacity, fades linearly with life
    pub alpha: f32,
    pub color: [f32; 4],
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Random source for platform and particle draws
    pub(crate) rng: Pcg32,
    /// Balance values
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Whether any run has started this session
    pub game_started: bool,
    /// Platforms reached this run
    pub score: u64,
    /// Best score across runs (mirrors the persisted value)
    pub high_score: u64,
    /// Whether the last finished run beat the previous best
    pub new_best: bool,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    pub player: Player,
    pub camera: Camera,
    /// Platforms in creation order
    pub platforms: Vec<Platform>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Pending signals for the driver, drained once per frame
    pub events: Vec<GameEvent>,
    /// Next platform id
    next_id: u32,
}

impl GameState {
    /// Create a session in the Preview phase
    pub fn new(seed: u64, high_score: u64) -> Self {
        Self::with_tuning(seed, high_score, Tuning::default())
    }

    pub fn with_tuning(seed: u64, high_score: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Preview,
            game_started: false,
            score: 0,
            high_score,
            new_best: false,
            time_ticks: 0,
            player: Player::spawn(0),
            camera: Camera::default(),
            platforms: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            next_id: 0,
        };

        state.reset_entities();
        state
    }

    /// Allocate a new platform id
    pub fn next_platform_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Put player, camera and the ground platform back to their start values
    fn reset_entities(&mut self) {
        self.next_id = 0;
        self.platforms.clear();
        self.particles.clear();
        self.camera = Camera::default();
        self.time_ticks = 0;

        let ground_id = self.next_platform_id();
        self.platforms.push(Platform::ground(ground_id));
        self.player = Player::spawn(ground_id);
    }

    /// Begin a run from Preview or GameOver
    ///
    /// Always a full reset, so calling it repeatedly yields the same start state.
    pub fn start(&mut self) {
        self.reset_entities();
        spawn_platform(self);

        self.phase = GamePhase::Playing;
        self.game_started = true;
        self.score = 0;
        self.new_best = false;
        self.events.push(GameEvent::RunStarted);

        log::info!("Run started (high score {})", self.high_score);
    }

    /// Leave the current platform. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if self.phase != GamePhase::Playing || !self.player.on_ground {
            return false;
        }

        self.player.vel_y = self.tuning.jump_power;
        self.player.on_ground = false;
        self.player.standing_on = None;
        self.player.grounded_ticks = 0;
        self.events.push(GameEvent::Jumped);
        true
    }

    /// Freeze the run and settle the high score
    pub(crate) fn finish_run(&mut self) {
        self.phase = GamePhase::GameOver;
        self.new_best = self.score > self.high_score;
        if self.new_best {
            self.high_score = self.score;
            log::info!("Game over: new best {}", self.score);
        } else {
            log::info!("Game over: score {} (best {})", self.score, self.high_score);
        }

        self.events.push(GameEvent::GameOver {
            score: self.score,
            new_best: self.new_best,
        });
    }

    /// The highest platform (smallest y)
    pub fn highest_platform(&self) -> Option<&Platform> {
        self.platforms
            .iter()
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    }

    /// Look a live platform up by id
    pub fn platform(&self, id: u32) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
