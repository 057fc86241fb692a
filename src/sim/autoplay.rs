//! Idle-mode jump policy
//!
//! Used by the headless driver and the in-browser idle toggle. The policy
//! replays the jump arc against the next platform's patrol and only jumps
//! when the two would meet.

use super::state::{GameState, Platform};
use crate::consts::CANVAS_WIDTH;

/// Longest airtime worth predicting, in ticks
const MAX_LOOKAHEAD: u32 = 120;

/// Grounded ticks after which idle mode jumps even without a landing in sight
pub const STALL_TICKS: u32 = 180;

/// The nearest platform whose top is above the player's feet
pub fn next_platform(state: &GameState) -> Option<&Platform> {
    let feet = state.player.bottom();
    state
        .platforms
        .iter()
        .filter(|p| p.pos.y < feet)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
}

/// Ticks until a jump starting now would land on `target`'s height
///
/// Mirrors the collision band: the player's bottom must come down inside
/// `(top, top + height + landing_tolerance)`. `None` when the arc falls short.
pub fn ticks_to_land(state: &GameState, target: &Platform) -> Option<u32> {
    let tuning = &state.tuning;
    let top = target.pos.y;
    let band_end = top + target.size.y + tuning.landing_tolerance;
    let mut bottom = state.player.bottom();
    let mut vel = tuning.jump_power;

    for t in 1..=MAX_LOOKAHEAD {
        vel += tuning.gravity;
        bottom += vel;
        if vel >= 0.0 {
            if bottom > top && bottom < band_end {
                return Some(t);
            }
            if bottom >= band_end {
                return None;
            }
        }
    }
    None
}

/// Whether jumping this tick would land on the next platform
///
/// After `STALL_TICKS` on the same footing the answer is yes regardless, so
/// a run never idles forever under a target it cannot line up with.
pub fn wants_jump(state: &GameState) -> bool {
    let player = &state.player;
    if !player.on_ground {
        return false;
    }
    if player.grounded_ticks >= STALL_TICKS {
        return true;
    }
    let Some(target) = next_platform(state) else {
        return false;
    };
    let Some(airtime) = ticks_to_land(state, target) else {
        return false;
    };

    let mut predicted = *target;
    for _ in 0..airtime {
        predicted.patrol(CANVAS_WIDTH);
    }

    // Demand a little overlap so a grazing corner doesn't count
    let margin = player.size.x / 2.0;
    player.pos.x + player.size.x - margin > predicted.pos.x
        && player.pos.x + margin < predicted.pos.x + predicted.size.x
}
