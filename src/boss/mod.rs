//! Boss domain: attack patterns, weighted selection, and the boss controller.
//!
//! The controller owns all boss state and is stepped once per frame by the
//! combat loop. Player hits come back in through [`BossController::take_damage`].

mod controller;
mod patterns;
mod selection;

pub use controller::{BossController, BossState, BossTick, StunCause};
pub use patterns::{ActionEvent, PatternContext, PatternKind, PatternState, PatternStep, Phase};
pub use selection::{CLOSE_RANGE, MID_RANGE, WeightTable};
