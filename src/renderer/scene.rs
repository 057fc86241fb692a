//! Scene assembly
//!
//! Turns a `GameState` into a flat triangle list in screen pixels (origin top
//! left, y down). No GPU access, so the output can be inspected directly.

use super::shapes::{highlighted_rect, square};
use super::vertex::{Vertex, colors};
use crate::consts::PARTICLE_SIZE;
use crate::sim::{GameState, PlatformColor};

/// What to draw besides the gameplay entities
#[derive(Debug, Clone, Copy)]
pub struct SceneOptions {
    pub particles: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self { particles: true }
    }
}

pub fn platform_color(color: PlatformColor) -> [f32; 4] {
    match color {
        PlatformColor::Primary => colors::PLATFORM,
        PlatformColor::Alt => colors::PLATFORM_ALT,
    }
}

/// Build the frame: platforms, then the player, then particles on top
pub fn build_scene(state: &GameState, options: SceneOptions) -> Vec<Vertex> {
    let camera = &state.camera;
    let mut vertices =
        Vec::with_capacity((state.platforms.len() * 2 + 2 + state.particles.len()) * 6);

    for platform in &state.platforms {
        highlighted_rect(
            &mut vertices,
            camera.world_to_screen(platform.pos),
            platform.size,
            platform_color(platform.color),
            colors::PLATFORM_SHINE,
            0.3,
        );
    }

    let player = &state.player;
    highlighted_rect(
        &mut vertices,
        camera.world_to_screen(player.pos),
        player.size,
        colors::PLAYER,
        colors::PLAYER_SHINE,
        0.4,
    );

    if options.particles {
        for particle in &state.particles {
            vertices.extend_from_slice(&square(
                camera.world_to_screen(particle.pos),
                PARTICLE_SIZE,
                particle.color,
                particle.alpha,
            ));
        }
    }

    vertices
}
