//! Stack Jump - an endless platform jumper
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, platform generation, particles)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Key-value storage for browser and native hosts
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical canvas size in pixels (world units)
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player is a square
    pub const PLAYER_SIZE: f32 = 20.0;

    /// Platform dimensions
    pub const PLATFORM_WIDTH: f32 = 80.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;

    /// Ground platform top sits this far above the canvas bottom
    pub const GROUND_OFFSET: f32 = 50.0;
    /// Player spawn y is this far above the canvas bottom
    pub const PLAYER_SPAWN_OFFSET: f32 = 100.0;

    /// Particles per scoring burst
    pub const BURST_COUNT: usize = 8;
    /// Particle lifetime in ticks
    pub const PARTICLE_LIFE: u32 = 30;
    /// Rendered particle edge length
    pub const PARTICLE_SIZE: f32 = 4.0;

    /// Nominal display rate used by the native driver
    pub const FRAME_RATE: u32 = 60;
}
