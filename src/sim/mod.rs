//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - One tick per display frame
//! - Seeded RNG only
//! - Platforms referenced by id, never by position in the list

pub mod autoplay;
pub mod camera;
pub mod collision;
pub mod generator;
pub mod particles;
pub mod state;
pub mod tick;

pub use autoplay::wants_jump;
pub use camera::Camera;
pub use collision::{lands_on, resolve_platform_collisions};
pub use generator::{generate_platform, spawn_platform};
pub use particles::{BURST_COLOR, spawn_burst, update_particles};
pub use state::{GameEvent, GamePhase, GameState, Particle, Platform, PlatformColor, Player};
pub use tick::{TickInput, tick};
