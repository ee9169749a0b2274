//! Combat domain: turning boss actions and player attacks into damage and feedback.

use bevy::prelude::*;

use crate::boss::{ActionEvent, BossController, BossState};
use crate::combat::{
    AttackSource, DamageSource, Feedback, Palette, Projectile, ProjectileKind, ProjectileSink,
};
use crate::content::CombatTuning;
use crate::physics::{Rect, attack_box};
use crate::player::PlayerTarget;

const SHOCKWAVE_BURSTS: u32 = 3;
const SHOCKWAVE_PARTICLES: u32 = 20;
const TELEPORT_PARTICLES: u32 = 30;
const MELEE_HIT_PARTICLES: u32 = 15;
const MELEE_DEFLECT_PARTICLES: u32 = 10;
const RANGED_HIT_PARTICLES: u32 = 10;
const RANGED_DEFLECT_PARTICLES: u32 = 5;

/// Result of a player attack against the boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Missed,
    Hit { defeated: bool },
    Blocked,
}

fn damage_player(
    player: &mut impl PlayerTarget,
    amount: u32,
    source: DamageSource,
    feedback: &mut Vec<Feedback>,
) -> bool {
    if player.snapshot().is_invincible() || !player.apply_damage(amount) {
        return false;
    }
    feedback.push(Feedback::PlayerDamaged { source });
    true
}

/// Origin for a boss projectile: its top-left sits on the boss center.
fn boss_muzzle(boss: &BossState) -> Vec2 {
    boss.body.center()
}

/// Resolve one boss action against the player.
pub fn resolve_boss_action(
    action: &ActionEvent,
    boss: &BossState,
    player: &mut impl PlayerTarget,
    sink: &mut impl ProjectileSink,
    combat: &CombatTuning,
    feedback: &mut Vec<Feedback>,
) {
    match *action {
        ActionEvent::Shockwave { x, y } => {
            let snapshot = player.snapshot();
            if snapshot.grounded && (snapshot.position.x - x).abs() < combat.shockwave_radius {
                damage_player(
                    player,
                    combat.boss_attack_damage,
                    DamageSource::Shockwave,
                    feedback,
                );
            }
            for _ in 0..SHOCKWAVE_BURSTS {
                feedback.push(Feedback::ParticleBurst {
                    at: Vec2::new(x, y),
                    count: SHOCKWAVE_PARTICLES,
                    palette: Palette::Shockwave,
                });
            }
            feedback.push(Feedback::ScreenShake {
                frames: combat.shockwave_shake_frames,
                intensity: combat.shake_intensity,
            });
        }
        ActionEvent::Flame {
            direction,
            angle_offset,
        } => {
            sink.spawn(Projectile::launch(
                ProjectileKind::Fireball,
                boss_muzzle(boss),
                direction,
                angle_offset,
                combat,
            ));
        }
        ActionEvent::Slash { index, direction } => {
            let hitbox = attack_box(boss.rect(), direction, combat.slash_range);
            if hitbox.overlaps(&player.snapshot().rect()) {
                damage_player(
                    player,
                    combat.boss_attack_damage,
                    DamageSource::Slash,
                    feedback,
                );
            }
            if index == combat.sword_beam_strike {
                sink.spawn(Projectile::launch(
                    ProjectileKind::SwordBeam,
                    boss_muzzle(boss),
                    direction,
                    0.0,
                    combat,
                ));
            }
        }
        ActionEvent::Teleport => {
            feedback.push(Feedback::ParticleBurst {
                at: boss.body.center(),
                count: TELEPORT_PARTICLES,
                palette: Palette::Teleport,
            });
        }
    }
}

/// Touching the boss hurts. Returns true when damage was dealt.
pub fn resolve_contact(
    boss: &BossState,
    player: &mut impl PlayerTarget,
    combat: &CombatTuning,
    feedback: &mut Vec<Feedback>,
) -> bool {
    if !boss.rect().overlaps(&player.snapshot().rect()) {
        return false;
    }
    damage_player(
        player,
        combat.contact_damage,
        DamageSource::Contact,
        feedback,
    )
}

/// A sword swing against the boss.
pub fn resolve_player_melee(
    boss: &mut BossController,
    hitbox: Rect,
    combat: &CombatTuning,
    feedback: &mut Vec<Feedback>,
) -> HitOutcome {
    if !hitbox.overlaps(&boss.state.rect()) {
        return HitOutcome::Missed;
    }
    let at = boss.state.body.center();

    if boss.take_damage(combat.melee_damage) {
        feedback.push(Feedback::ParticleBurst {
            at,
            count: MELEE_HIT_PARTICLES,
            palette: Palette::BossHit,
        });
        feedback.push(Feedback::ScreenShake {
            frames: combat.hit_shake_frames,
            intensity: combat.shake_intensity,
        });
        feedback.push(Feedback::BossHit {
            source: AttackSource::Melee,
            damage: combat.melee_damage,
            health: boss.state.health,
        });
        HitOutcome::Hit {
            defeated: boss.state.is_defeated(),
        }
    } else {
        feedback.push(Feedback::ParticleBurst {
            at,
            count: MELEE_DEFLECT_PARTICLES,
            palette: Palette::Deflect,
        });
        feedback.push(Feedback::AttackBlocked {
            source: AttackSource::Melee,
        });
        HitOutcome::Blocked
    }
}

/// A player projectile against the boss. The projectile is spent on a hit or
/// a block.
pub fn resolve_player_projectile(
    boss: &mut BossController,
    projectile: &mut Projectile,
    combat: &CombatTuning,
    feedback: &mut Vec<Feedback>,
) -> HitOutcome {
    if !projectile.active || !projectile.rect().overlaps(&boss.state.rect()) {
        return HitOutcome::Missed;
    }
    projectile.active = false;

    if boss.take_damage(combat.ranged_damage) {
        feedback.push(Feedback::ParticleBurst {
            at: boss.state.body.center(),
            count: RANGED_HIT_PARTICLES,
            palette: Palette::BossHit,
        });
        feedback.push(Feedback::BossHit {
            source: AttackSource::Ranged,
            damage: combat.ranged_damage,
            health: boss.state.health,
        });
        HitOutcome::Hit {
            defeated: boss.state.is_defeated(),
        }
    } else {
        feedback.push(Feedback::ParticleBurst {
            at: projectile.position,
            count: RANGED_DEFLECT_PARTICLES,
            palette: Palette::Deflect,
        });
        feedback.push(Feedback::AttackBlocked {
            source: AttackSource::Ranged,
        });
        HitOutcome::Blocked
    }
}

/// A boss projectile against the player. Spent only when it lands.
pub fn resolve_boss_projectile(
    projectile: &mut Projectile,
    player: &mut impl PlayerTarget,
    combat: &CombatTuning,
    feedback: &mut Vec<Feedback>,
) -> bool {
    let snapshot = player.snapshot();
    if !projectile.active
        || snapshot.is_invincible()
        || !projectile.rect().overlaps(&snapshot.rect())
    {
        return false;
    }
    projectile.active = false;
    damage_player(
        player,
        combat.boss_attack_damage,
        DamageSource::Projectile(projectile.kind),
        feedback,
    )
}
