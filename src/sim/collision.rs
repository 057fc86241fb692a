//! Landing detection and response
//!
//! Only one kind of contact exists: the player's feet meeting a platform's top
//! surface while falling. Every platform is tested every tick and a later match
//! overrides an earlier one.

use super::particles::spawn_burst;
use super::state::{GameEvent, GameState, Platform, Player};

/// Whether the player is landing on `platform` this tick
///
/// Horizontal extents must overlap, the player's bottom edge must be inside the
/// band from the platform top down to `tolerance` past its underside, and the
/// player must not be rising.
pub fn lands_on(player: &Player, platform: &Platform, tolerance: f32) -> bool {
    let bottom = player.bottom();

    player.pos.x + player.size.x > platform.pos.x
        && player.pos.x < platform.pos.x + platform.size.x
        && bottom > platform.pos.y
        && bottom < platform.pos.y + platform.size.y + tolerance
        && player.vel_y >= 0.0
}

/// Resolve landings against every platform, scoring first touches
///
/// Returns whether any landing happened this tick.
pub fn resolve_platform_collisions(state: &mut GameState) -> bool {
    let tuning = state.tuning;
    let mut landed = false;
    state.player.on_ground = false;

    for i in 0..state.platforms.len() {
        let platform = state.platforms[i];
        if !lands_on(&state.player, &platform, tuning.landing_tolerance) {
            continue;
        }

        let player = &mut state.player;
        player.pos.y = platform.pos.y - player.size.y;
        player.vel_y = 0.0;
        player.on_ground = true;
        player.standing_on = Some(platform.id);
        landed = true;

        if platform.id > player.last_scored {
            player.last_scored = platform.id;
            let origin = player.bottom_center();
            state.score += 1;
            spawn_burst(&mut state.particles, origin, &tuning, &mut state.rng);
            state.events.push(GameEvent::Scored { score: state.score });
            log::debug!("Reached platform {} (score {})", platform.id, state.score);
        }
    }

    landed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn_platform;
    use glam::Vec2;

    fn falling_player_at(x: f32, bottom: f32) -> Player {
        let mut player = Player::spawn(0);
        player.pos = Vec2::new(x, bottom - player.size.y);
        player.vel_y = 3.0;
        player.on_ground = false;
        player.standing_on = None;
        player
    }

    #[test]
    fn test_lands_inside_tolerance_band() {
        let platform = Platform::ground(0); // top at 550, x 160..240
        assert!(lands_on(&falling_player_at(170.0, 551.0), &platform, 10.0));
        assert!(lands_on(&falling_player_at(170.0, 579.0), &platform, 10.0));
        assert!(!lands_on(&falling_player_at(170.0, 550.0), &platform, 10.0));
        assert!(!lands_on(&falling_player_at(170.0, 580.0), &platform, 10.0));
    }

    #[test]
    fn test_requires_horizontal_overlap() {
        let platform = Platform::ground(0);
        assert!(lands_on(&falling_player_at(141.0, 555.0), &platform, 10.0));
        assert!(!lands_on(&falling_player_at(140.0, 555.0), &platform, 10.0));
        assert!(lands_on(&falling_player_at(239.0, 555.0), &platform, 10.0));
        assert!(!lands_on(&falling_player_at(240.0, 555.0), &platform, 10.0));
    }

    #[test]
    fn test_rising_player_passes_through() {
        let platform = Platform::ground(0);
        let mut player = falling_player_at(170.0, 555.0);
        player.vel_y = -0.5;
        assert!(!lands_on(&player, &platform, 10.0));
        player.vel_y = 0.0;
        assert!(lands_on(&player, &platform, 10.0));
    }

    #[test]
    fn test_first_touch_scores_once() {
        let mut state = GameState::new(1, 0);
        state.start();
        state.drain_events();

        let target = state.platforms[1];
        state.player = falling_player_at(target.pos.x + 10.0, target.pos.y + 2.0);

        assert!(resolve_platform_collisions(&mut state));
        assert_eq!(state.score, 1);
        assert_eq!(state.player.last_scored, target.id);
        assert_eq!(state.player.pos.y, target.pos.y - 20.0);
        assert_eq!(state.player.vel_y, 0.0);
        assert_eq!(state.particles.len(), 8);

        // Standing still on the same platform does not score again
        state.player.pos.y += 1.0;
        assert!(resolve_platform_collisions(&mut state));
        assert_eq!(state.score, 1);
        assert_eq!(state.particles.len(), 8);

        let events = state.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GameEvent::Scored { score: 1, .. }));
    }

    #[test]
    fn test_older_platform_does_not_score() {
        let mut state = GameState::new(1, 0);
        state.start();
        state.player = Player {
            last_scored: 1,
            ..falling_player_at(170.0, 552.0)
        };

        assert!(resolve_platform_collisions(&mut state));
        assert_eq!(state.score, 0);
        assert_eq!(state.player.standing_on, Some(0));
    }

    #[test]
    fn test_scoring_survives_retired_platforms() {
        let mut state = GameState::new(1, 0);
        state.start();
        for _ in 0..3 {
            spawn_platform(&mut state);
        }

        // Cull everything below the midpoint between platforms 1 and 2
        let y1 = state.platform(1).unwrap().pos.y;
        let y2 = state.platform(2).unwrap().pos.y;
        let cull_line = (y1 + y2) / 2.0;
        state.platforms.retain(|p| p.pos.y < cull_line);
        assert!(state.platform(0).is_none() && state.platform(1).is_none());
        assert_eq!(state.platforms[0].id, 2);

        let target = *state.platform(3).unwrap();
        state.player = falling_player_at(target.pos.x + 10.0, target.pos.y + 2.0);
        assert!(resolve_platform_collisions(&mut state));
        assert_eq!(state.score, 1);
        assert_eq!(state.player.last_scored, 3);

        // Dropping back onto a lower survivor does not score
        let lower = *state.platform(2).unwrap();
        state.player = Player {
            last_scored: state.player.last_scored,
            ..falling_player_at(lower.pos.x + 10.0, lower.pos.y + 2.0)
        };
        assert!(resolve_platform_collisions(&mut state));
        assert_eq!(state.player.standing_on, Some(2));
        assert_eq!(state.score, 1);
        assert_eq!(state.player.last_scored, 3);
    }

    #[test]
    fn test_last_matching_platform_wins() {
        let mut state = GameState::new(1, 0);
        state.start();

        // Two platforms overlapping the landing band; the later one decides
        let mut upper = Platform::ground(10);
        upper.pos.y = 545.0;
        state.platforms.push(upper);
        state.player = falling_player_at(170.0, 556.0);

        assert!(resolve_platform_collisions(&mut state));
        assert_eq!(state.player.standing_on, Some(10));
        assert_eq!(state.player.pos.y, 545.0 - 20.0);
    }

    #[test]
    fn test_miss_clears_grounded_flag() {
        let mut state = GameState::new(1, 0);
        state.start();
        state.player = falling_player_at(0.0, 100.0);
        state.player.on_ground = true;

        assert!(!resolve_platform_collisions(&mut state));
        assert!(!state.player.on_ground);
    }
}
