//! Data-driven game balance
//!
//! Every number the simulation reads lives here so a run can be retuned from
//! JSON without a rebuild. `Default` is the shipped balance.

use serde::{Deserialize, Serialize};

/// Balance values consumed by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Added to the player's vertical velocity every tick
    pub gravity: f32,
    /// Vertical velocity applied by a jump (negative is up)
    pub jump_power: f32,

    /// Base horizontal platform speed (pixels per tick)
    pub platform_speed: f32,
    /// Random addend on top of the base speed, drawn from [0, jitter)
    pub platform_speed_jitter: f32,
    /// Fixed vertical gap between consecutive platforms
    pub platform_gap: f32,
    /// Random addend on top of the gap, drawn from [0, jitter)
    pub platform_gap_jitter: f32,

    /// Spawn a platform while the highest one is below `camera.y - spawn_margin`
    pub spawn_margin: f32,
    /// Platforms and the player are lost this far below the visible window
    pub cull_margin: f32,
    /// Extra band below a platform's underside that still counts as a landing
    pub landing_tolerance: f32,

    /// Camera target sits this fraction of the viewport above the player
    pub camera_lead: f32,
    /// Exponential smoothing factor per tick
    pub camera_damping: f32,

    /// Gravity applied to particles per tick
    pub particle_gravity: f32,
    /// Horizontal spread of a burst around its origin
    pub particle_spread: f32,
    /// Horizontal velocity range, centred on zero
    pub particle_speed_x: f32,
    /// Random upward velocity range
    pub particle_speed_y: f32,
    /// Minimum upward velocity
    pub particle_lift: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_power: -12.0,

            platform_speed: 2.0,
            platform_speed_jitter: 2.0,
            platform_gap: 100.0,
            platform_gap_jitter: 50.0,

            spawn_margin: 200.0,
            cull_margin: 100.0,
            landing_tolerance: 10.0,

            camera_lead: 0.7,
            camera_damping: 0.1,

            particle_gravity: 0.2,
            particle_spread: 20.0,
            particle_speed_x: 4.0,
            particle_speed_y: 3.0,
            particle_lift: 1.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
