//! Player domain: a scripted player for headless runs and soak tests.

use crate::boss::{BossController, PatternKind, Phase};
use crate::player::{PlayerInput, PlayerSnapshot};

/// Keep at least this far from a shielded boss.
const SAFE_DISTANCE: f32 = 250.0;
/// Close back in when further than this.
const FAR_DISTANCE: f32 = 400.0;
/// Dash away from a charge that is this close.
const CHARGE_DODGE_DISTANCE: f32 = 220.0;

/// Pick an input for this frame: rush in and swing while the boss is open,
/// otherwise hold a safe distance and shoot.
pub fn autopilot(player: &PlayerSnapshot, boss: &BossController, melee_range: f32) -> PlayerInput {
    let state = &boss.state;
    let offset = state.body.center().x - player.center().x;
    let toward = offset.signum();
    let distance = offset.abs();
    let facing_boss = player.facing.sign() == toward;

    let mut input = PlayerInput::default();

    if let Some(pattern) = &state.active_pattern {
        let dodging = match pattern.kind {
            // Be in the air when the boss lands
            PatternKind::Jump => pattern.phase == Phase::Execute && state.body.velocity.y > 0.0,
            PatternKind::Charge => {
                pattern.phase == Phase::Execute && distance < CHARGE_DODGE_DISTANCE
            }
            _ => false,
        };
        if dodging {
            input.jump = player.grounded;
            input.dash = pattern.kind == PatternKind::Charge;
        }
    }

    if boss.can_be_damaged() {
        let reach = state.body.size.x / 2.0 + player.size.x / 2.0 + melee_range * 0.5;
        if distance > reach {
            input.axis = toward;
        } else if !facing_boss {
            input.axis = toward;
        } else {
            input.melee = true;
        }
        input.ranged = facing_boss;
        return input;
    }

    if distance < SAFE_DISTANCE {
        input.axis = -toward;
    } else if distance > FAR_DISTANCE || !facing_boss {
        input.axis = toward;
    } else {
        input.ranged = true;
    }
    input
}
