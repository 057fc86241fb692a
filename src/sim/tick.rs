//! Per-frame simulation tick
//!
//! One call advances the run by exactly one display frame.

use super::autoplay::wants_jump;
use super::collision::resolve_platform_collisions;
use super::generator::spawn_platform;
use super::particles::update_particles;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start or restart requested (ignored mid-run)
    pub start: bool,
    /// Jump requested (click/tap/space)
    pub jump: bool,
    /// Autoplay: start runs and time jumps automatically
    pub idle_mode: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    let mut input = input.clone();
    if input.idle_mode {
        if state.phase != GamePhase::Playing {
            input.start = true;
        } else if wants_jump(state) {
            input.jump = true;
        }
    }

    if input.start && state.phase != GamePhase::Playing {
        state.start();
    }
    if input.jump {
        state.jump();
    }

    // Preview and GameOver are frozen
    if state.phase != GamePhase::Playing {
        return;
    }

    let tuning = state.tuning;
    state.time_ticks += 1;

    // Player physics
    state.player.vel_y += tuning.gravity;
    state.player.pos.y += state.player.vel_y;

    state.camera.follow(state.player.pos.y, &tuning);

    for platform in &mut state.platforms {
        platform.patrol(CANVAS_WIDTH);
    }

    resolve_platform_collisions(state);

    state.player.grounded_ticks = if state.player.on_ground {
        state.player.grounded_ticks.saturating_add(1)
    } else {
        0
    };

    // Ride along with the platform underfoot
    if state.player.on_ground {
        if let Some(carry) = state
            .player
            .standing_on
            .and_then(|id| state.platform(id))
            .map(|p| p.velocity_x())
        {
            state.player.pos.x += carry;
        }
    }

    // Keep the next platform ready before it scrolls into view
    let needs_platform = state
        .highest_platform()
        .is_some_and(|p| p.pos.y > state.camera.y - tuning.spawn_margin);
    if needs_platform {
        spawn_platform(state);
    }

    update_particles(&mut state.particles, tuning.particle_gravity);

    let cull_line = state.camera.bottom() + tuning.cull_margin;
    if state.player.pos.y > cull_line {
        state.finish_run();
    }

    state.platforms.retain(|p| p.pos.y < cull_line);
}
