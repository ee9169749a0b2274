//! Combat domain: projectiles, hazards, hit resolution, and the encounter frame loop.

mod arena;
mod feedback;
mod projectile;
mod resolution;
#[cfg(test)]
mod tests;

pub use arena::{CombatArena, FrameReport, Outcome};
pub use feedback::{AttackSource, DamageSource, Feedback, Palette, ScreenShake};
pub use projectile::{FireHazard, Projectile, ProjectileKind, ProjectileSink};
pub use resolution::{
    HitOutcome, resolve_boss_action, resolve_boss_projectile, resolve_contact,
    resolve_player_melee, resolve_player_projectile,
};
