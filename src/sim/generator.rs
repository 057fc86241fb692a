//! Procedural platform generation
//!
//! Each new platform sits a randomized gap above the current highest one and
//! enters from a random side of the screen.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Platform, PlatformColor};
use crate::consts::*;
use crate::tuning::Tuning;

/// Build the platform that goes above `highest`
pub fn generate_platform(
    highest: &Platform,
    id: u32,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> Platform {
    let y = highest.pos.y - tuning.platform_gap - rng.random::<f32>() * tuning.platform_gap_jitter;
    let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let speed = tuning.platform_speed + rng.random::<f32>() * tuning.platform_speed_jitter;
    let x = if direction > 0.0 {
        -PLATFORM_WIDTH
    } else {
        CANVAS_WIDTH
    };
    let color = if rng.random_bool(0.5) {
        PlatformColor::Primary
    } else {
        PlatformColor::Alt
    };

    Platform {
        id,
        pos: Vec2::new(x, y),
        size: Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT),
        speed,
        direction,
        color,
    }
}

/// Append one platform above the highest live one
pub fn spawn_platform(state: &mut GameState) {
    let Some(highest) = state.highest_platform().copied() else {
        log::warn!("No platform to spawn above");
        return;
    };

    let id = state.next_platform_id();
    let tuning = state.tuning;
    let platform = generate_platform(&highest, id, &tuning, &mut state.rng);
    log::trace!(
        "Spawned platform {} at y={:.1} speed={:.2} dir={}",
        platform.id,
        platform.pos.y,
        platform.speed,
        platform.direction
    );
    state.platforms.push(platform);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    proptest! {
        #[test]
        fn generated_platform_respects_bounds(seed in any::<u64>(), base_y in -50_000.0f32..600.0) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut highest = Platform::ground(0);
            highest.pos.y = base_y;

            let p = generate_platform(&highest, 1, &tuning, &mut rng);

            let gap = base_y - p.pos.y;
            prop_assert!(gap >= 100.0 - 0.01 && gap <= 150.0 + 0.01);
            prop_assert!(p.speed >= 2.0 && p.speed <= 4.0);
            prop_assert!(p.direction == 1.0 || p.direction == -1.0);
            if p.direction > 0.0 {
                prop_assert_eq!(p.pos.x, -PLATFORM_WIDTH);
            } else {
                prop_assert_eq!(p.pos.x, CANVAS_WIDTH);
            }
            prop_assert_eq!(p.id, 1);
        }
    }

    #[test]
    fn test_both_directions_and_colors_occur() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let ground = Platform::ground(0);
        let platforms: Vec<_> = (0..64)
            .map(|i| generate_platform(&ground, i, &tuning, &mut rng))
            .collect();

        assert!(platforms.iter().any(|p| p.direction > 0.0));
        assert!(platforms.iter().any(|p| p.direction < 0.0));
        assert!(platforms.iter().any(|p| p.color == PlatformColor::Primary));
        assert!(platforms.iter().any(|p| p.color == PlatformColor::Alt));
    }

    #[test]
    fn test_spawn_stacks_above_highest() {
        let mut state = GameState::new(3, 0);
        state.start();
        for _ in 0..5 {
            spawn_platform(&mut state);
        }

        let ys: Vec<f32> = state.platforms.iter().map(|p| p.pos.y).collect();
        assert!(ys.windows(2).all(|w| w[1] < w[0]));
        let ids: Vec<u32> = state.platforms.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5, 6]);
    }
}
