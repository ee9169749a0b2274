//! Combat domain: unit tests for action resolution, hazards, and the arena loop.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{
    AttackSource, CombatArena, DamageSource, Feedback, FireHazard, HitOutcome, Outcome, Palette,
    Projectile, ProjectileKind, ScreenShake, resolve_boss_action, resolve_contact,
    resolve_player_melee, resolve_player_projectile,
};
use crate::boss::{ActionEvent, BossController};
use crate::content::{CombatTuning, EncounterTuning};
use crate::physics::{Facing, Rect};
use crate::player::{PlayerInput, PlayerSnapshot, PlayerTarget, autopilot};

/// Player stand-in that records the damage it takes.
struct Dummy {
    snapshot: PlayerSnapshot,
    damage_taken: u32,
}

impl Dummy {
    fn at(x: f32, y: f32) -> Self {
        Self {
            snapshot: PlayerSnapshot {
                position: Vec2::new(x, y),
                size: Vec2::new(30.0, 40.0),
                facing: Facing::Right,
                grounded: true,
                invincible_frames: 0,
            },
            damage_taken: 0,
        }
    }
}

impl PlayerTarget for Dummy {
    fn snapshot(&self) -> PlayerSnapshot {
        self.snapshot
    }

    fn apply_damage(&mut self, amount: u32) -> bool {
        if self.snapshot.invincible_frames > 0 {
            return false;
        }
        self.damage_taken += amount;
        self.snapshot.invincible_frames = 60;
        true
    }
}

/// Boss at its spawn point: top-left (452, 480), 96x96, center (500, 528).
fn boss() -> BossController {
    BossController::new(&EncounterTuning::default())
}

fn resolve(action: ActionEvent, player: &mut Dummy) -> (Vec<Projectile>, Vec<Feedback>) {
    let boss = boss();
    let mut spawned = Vec::new();
    let mut feedback = Vec::new();
    resolve_boss_action(
        &action,
        &boss.state,
        player,
        &mut spawned,
        &CombatTuning::default(),
        &mut feedback,
    );
    (spawned, feedback)
}

fn took_damage_from(feedback: &[Feedback], source: DamageSource) -> bool {
    feedback
        .iter()
        .any(|f| *f == Feedback::PlayerDamaged { source })
}

// ============================================================================
// Boss actions
// ============================================================================

#[test]
fn test_shockwave_hits_grounded_player_in_radius() {
    let shockwave = ActionEvent::Shockwave { x: 500.0, y: 576.0 };

    let mut near = Dummy::at(400.0, 610.0);
    let (_, feedback) = resolve(shockwave, &mut near);
    assert_eq!(near.damage_taken, 1);
    assert!(took_damage_from(&feedback, DamageSource::Shockwave));

    let bursts = feedback
        .iter()
        .filter(|f| matches!(f, Feedback::ParticleBurst { count: 20, palette: Palette::Shockwave, .. }))
        .count();
    assert_eq!(bursts, 3);
    assert!(feedback.contains(&Feedback::ScreenShake {
        frames: 10,
        intensity: 5.0
    }));

    let mut far = Dummy::at(750.0, 610.0);
    resolve(shockwave, &mut far);
    assert_eq!(far.damage_taken, 0);
}

#[test]
fn test_shockwave_misses_airborne_or_invincible_player() {
    let shockwave = ActionEvent::Shockwave { x: 500.0, y: 576.0 };

    let mut airborne = Dummy::at(450.0, 500.0);
    airborne.snapshot.grounded = false;
    let (_, feedback) = resolve(shockwave, &mut airborne);
    assert_eq!(airborne.damage_taken, 0);
    // Still shakes the screen
    assert!(feedback.iter().any(|f| matches!(f, Feedback::ScreenShake { .. })));

    let mut invincible = Dummy::at(450.0, 610.0);
    invincible.snapshot.invincible_frames = 10;
    resolve(shockwave, &mut invincible);
    assert_eq!(invincible.damage_taken, 0);
}

#[test]
fn test_flame_spawns_angled_fireball_from_boss_center() {
    let mut player = Dummy::at(100.0, 610.0);
    let (spawned, feedback) = resolve(
        ActionEvent::Flame {
            direction: Facing::Left,
            angle_offset: 0.3,
        },
        &mut player,
    );

    assert!(feedback.is_empty());
    assert_eq!(spawned.len(), 1);
    let fireball = &spawned[0];
    assert_eq!(fireball.kind, ProjectileKind::Fireball);
    assert_eq!(fireball.position, Vec2::new(500.0, 528.0));
    assert!((fireball.velocity.x + 6.0 * 0.3f32.cos()).abs() < 1e-5);
    assert!((fireball.velocity.y - 6.0 * 0.3f32.sin()).abs() < 1e-5);
    assert_eq!(fireball.lifetime, 180);
}

#[test]
fn test_slash_hits_only_on_the_facing_side() {
    let right = ActionEvent::Slash {
        index: 0,
        direction: Facing::Right,
    };

    let mut in_front = Dummy::at(560.0, 500.0);
    let (spawned, feedback) = resolve(right, &mut in_front);
    assert_eq!(in_front.damage_taken, 1);
    assert!(took_damage_from(&feedback, DamageSource::Slash));
    assert!(spawned.is_empty());

    let mut behind = Dummy::at(400.0, 500.0);
    resolve(right, &mut behind);
    assert_eq!(behind.damage_taken, 0);
}

#[test]
fn test_third_slash_releases_sword_beam() {
    let mut player = Dummy::at(100.0, 610.0);
    let (spawned, _) = resolve(
        ActionEvent::Slash {
            index: 2,
            direction: Facing::Left,
        },
        &mut player,
    );

    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].kind, ProjectileKind::SwordBeam);
    assert_eq!(spawned[0].velocity, Vec2::new(-6.0, 0.0));
}

#[test]
fn test_teleport_is_cosmetic() {
    let mut player = Dummy::at(510.0, 540.0);
    let (spawned, feedback) = resolve(ActionEvent::Teleport, &mut player);

    assert_eq!(player.damage_taken, 0);
    assert!(spawned.is_empty());
    assert_eq!(
        feedback,
        vec![Feedback::ParticleBurst {
            at: Vec2::new(500.0, 528.0),
            count: 30,
            palette: Palette::Teleport,
        }]
    );
}

#[test]
fn test_contact_damage_respects_invincibility() {
    let boss = boss();
    let combat = CombatTuning::default();
    let mut feedback = Vec::new();

    let mut touching = Dummy::at(480.0, 520.0);
    assert!(resolve_contact(&boss.state, &mut touching, &combat, &mut feedback));
    assert!(!resolve_contact(&boss.state, &mut touching, &combat, &mut feedback));
    assert_eq!(touching.damage_taken, 1);

    let mut apart = Dummy::at(100.0, 520.0);
    assert!(!resolve_contact(&boss.state, &mut apart, &combat, &mut feedback));
}

// ============================================================================
// Player attacks
// ============================================================================

#[test]
fn test_blocked_melee_gives_deflect_feedback_only() {
    let mut boss = boss();
    let mut feedback = Vec::new();
    let hitbox = Rect::new(430.0, 500.0, 50.0, 40.0);

    let outcome = resolve_player_melee(&mut boss, hitbox, &CombatTuning::default(), &mut feedback);

    assert_eq!(outcome, HitOutcome::Blocked);
    assert_eq!(boss.state.health, 100);
    assert!(feedback.contains(&Feedback::AttackBlocked {
        source: AttackSource::Melee
    }));
    assert!(!feedback.iter().any(|f| matches!(f, Feedback::BossHit { .. })));
    assert!(!feedback.iter().any(|f| matches!(f, Feedback::ScreenShake { .. })));
}

#[test]
fn test_melee_hit_on_open_boss() {
    let mut boss = boss();
    boss.state.vulnerable = true;
    boss.state.vulnerable_timer = 60;
    let mut feedback = Vec::new();
    let hitbox = Rect::new(430.0, 500.0, 50.0, 40.0);

    let outcome = resolve_player_melee(&mut boss, hitbox, &CombatTuning::default(), &mut feedback);

    assert_eq!(outcome, HitOutcome::Hit { defeated: false });
    assert_eq!(boss.state.health, 99);
    assert!(feedback.contains(&Feedback::ScreenShake {
        frames: 5,
        intensity: 5.0
    }));
    assert!(!feedback.iter().any(|f| matches!(f, Feedback::AttackBlocked { .. })));
}

#[test]
fn test_melee_out_of_reach_misses() {
    let mut boss = boss();
    let mut feedback = Vec::new();
    let hitbox = Rect::new(100.0, 500.0, 50.0, 40.0);
    let outcome = resolve_player_melee(&mut boss, hitbox, &CombatTuning::default(), &mut feedback);
    assert_eq!(outcome, HitOutcome::Missed);
    assert!(feedback.is_empty());
}

#[test]
fn test_blocked_projectile_is_still_spent() {
    let mut boss = boss();
    let combat = CombatTuning::default();
    let mut shot = Projectile::launch(
        ProjectileKind::PlayerEnergy,
        Vec2::new(490.0, 520.0),
        Facing::Right,
        0.0,
        &combat,
    );
    let mut feedback = Vec::new();

    let outcome = resolve_player_projectile(&mut boss, &mut shot, &combat, &mut feedback);
    assert_eq!(outcome, HitOutcome::Blocked);
    assert!(!shot.active);
    assert_eq!(boss.state.health, 100);
}

#[test]
fn test_ranged_hit_deals_ranged_damage() {
    let mut boss = boss();
    boss.state.vulnerable = true;
    let combat = CombatTuning::default();
    let mut shot = Projectile::launch(
        ProjectileKind::PlayerEnergy,
        Vec2::new(490.0, 520.0),
        Facing::Right,
        0.0,
        &combat,
    );
    let mut feedback = Vec::new();

    let outcome = resolve_player_projectile(&mut boss, &mut shot, &combat, &mut feedback);
    assert_eq!(outcome, HitOutcome::Hit { defeated: false });
    assert_eq!(boss.state.health, 95);
}

// ============================================================================
// Projectiles and hazards
// ============================================================================

#[test]
fn test_projectile_expires_off_screen_and_by_lifetime() {
    let combat = CombatTuning::default();
    let arena = Vec2::new(1000.0, 700.0);

    let mut outbound = Projectile::launch(
        ProjectileKind::SwordBeam,
        Vec2::new(990.0, 300.0),
        Facing::Right,
        0.0,
        &combat,
    );
    for _ in 0..15 {
        outbound.update(arena, 50.0);
    }
    assert!(!outbound.active);

    let mut slow = outbound.clone();
    slow.active = true;
    slow.position = Vec2::new(500.0, 300.0);
    slow.velocity = Vec2::ZERO;
    slow.lifetime = 3;
    for _ in 0..3 {
        slow.update(arena, 50.0);
    }
    assert!(!slow.active);
}

#[test]
fn test_fire_hazard_damage_interval() {
    let combat = CombatTuning::default();
    let mut fire = FireHazard::new(100.0, 650.0, 1000.0, &combat);
    assert_eq!(fire.width, 100.0);
    assert_eq!(fire.rect(), Rect::new(100.0, 620.0, 100.0, 30.0));

    for _ in 0..29 {
        fire.update();
        assert!(!fire.can_damage());
    }
    fire.update();
    assert!(fire.can_damage());
    // Resets after firing
    assert!(!fire.can_damage());
}

#[test]
fn test_fire_hazard_burns_out() {
    let combat = CombatTuning::default();
    let mut fire = FireHazard::new(0.0, 650.0, 60.0, &combat);
    assert_eq!(fire.width, 60.0);
    for _ in 0..300 {
        assert!(fire.is_active());
        fire.update();
    }
    assert!(!fire.is_active());
}

#[test]
fn test_falling_fireball_ignites_platform() {
    let mut arena = CombatArena::new(&EncounterTuning::default());
    let combat = CombatTuning::default();
    let mut fireball = Projectile::launch(
        ProjectileKind::Fireball,
        Vec2::new(300.0, 530.0),
        Facing::Right,
        0.0,
        &combat,
    );
    fireball.velocity = Vec2::new(0.0, 5.0);
    arena.projectiles.push(fireball);

    let report = arena.step(&PlayerInput::default());

    assert!(arena.projectiles.is_empty());
    assert_eq!(arena.fires.len(), 1);
    assert_eq!(arena.fires[0].x, 300.0);
    assert_eq!(arena.fires[0].y, 550.0);
    assert_eq!(arena.fires[0].width, 100.0);
    assert!(report.feedback.contains(&Feedback::FireIgnited {
        at: Vec2::new(300.0, 550.0)
    }));
    assert!(arena.shake.is_active());
}

#[test]
fn test_level_fireball_does_not_ignite() {
    let combat = CombatTuning::default();
    let shot = Projectile::launch(
        ProjectileKind::Fireball,
        Vec2::new(300.0, 560.0),
        Facing::Right,
        0.0,
        &combat,
    );
    let arena = CombatArena::new(&EncounterTuning::default());
    assert!(shot.landing_platform(&arena.platforms).is_none());
}

#[test]
fn test_screen_shake_overwrites_and_decays() {
    let mut shake = ScreenShake::default();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    assert_eq!(shake.offset(&mut rng), Vec2::ZERO);

    shake.start(30, 5.0);
    shake.start(5, 2.0);
    assert_eq!(shake.frames, 5);

    let offset = shake.offset(&mut rng);
    assert!(offset.x.abs() <= 2.0 && offset.y.abs() <= 2.0);

    for _ in 0..5 {
        shake.tick();
    }
    assert!(!shake.is_active());
}

// ============================================================================
// Arena loop
// ============================================================================

/// Let both bodies settle onto the floor before the boss picks a pattern.
fn settled_arena() -> CombatArena {
    let mut arena = CombatArena::new(&EncounterTuning::default());
    for _ in 0..30 {
        arena.step(&PlayerInput::default());
    }
    assert!(arena.boss.state.body.grounded);
    assert!(arena.player.body.grounded);
    assert!(arena.boss.state.active_pattern.is_none());
    arena
}

#[test]
fn test_collapse_triggers_once() {
    let mut arena = settled_arena();
    arena.boss.state.health = 30;

    let report = arena.step(&PlayerInput::default());
    assert_eq!(report.collapsed.len(), 2);
    for &index in &report.collapsed {
        assert!(arena.platforms[index].collapsible);
        assert!(arena.platforms[index].is_collapsing());
    }
    assert_eq!(arena.shake.frames, 29);
    let offset = arena.shake_offset();
    assert!(offset.x.abs() <= 5.0 && offset.y.abs() <= 5.0);

    let again = arena.step(&PlayerInput::default());
    assert!(again.collapsed.is_empty());

    for _ in 0..100 {
        arena.step(&PlayerInput::default());
        if arena.outcome.is_some() {
            break;
        }
    }
    for &index in &report.collapsed {
        assert!(!arena.platforms[index].visible);
    }
}

#[test]
fn test_killing_blow_ends_encounter() {
    let mut arena = settled_arena();
    arena.boss.state.health = 1;
    arena.boss.state.vulnerable = true;
    arena.boss.state.vulnerable_timer = 60;
    arena.player.body.position.x = arena.boss.state.body.position.x - 40.0;
    arena.player.facing = Facing::Right;

    let input = PlayerInput {
        melee: true,
        ..default()
    };
    let report = arena.step(&input);

    assert_eq!(report.melee, Some(HitOutcome::Hit { defeated: true }));
    assert_eq!(report.outcome, Some(Outcome::Victory));

    // Frozen afterwards
    let frame = arena.frame;
    let after = arena.step(&PlayerInput::default());
    assert_eq!(after.outcome, Some(Outcome::Victory));
    assert_eq!(arena.frame, frame);
    assert!(after.feedback.is_empty());
}

/// Boss one hit from death, shield down, about to pick a pattern.
fn dying_boss_arena() -> CombatArena {
    let mut arena = settled_arena();
    arena.boss.state.health = 1;
    arena.boss.state.vulnerable = true;
    arena.boss.state.vulnerable_timer = 60;
    arena.boss.state.attack_cooldown = 1;
    arena
}

fn assert_boss_stayed_idle(report: &super::FrameReport) {
    assert_eq!(report.outcome, Some(Outcome::Victory));
    assert!(!report.boss.berserk_entered);
    assert_eq!(report.boss.selected, None);
    assert!(report.boss.actions.is_empty());
    assert!(report.collapsed.is_empty());
    assert!(
        !report
            .feedback
            .iter()
            .any(|f| matches!(f, Feedback::PlayerDamaged { .. }))
    );
}

#[test]
fn test_boss_killed_by_melee_does_not_act() {
    let mut arena = dying_boss_arena();
    // Standing inside the boss, so contact damage would land this frame
    arena.player.body.position.x = arena.boss.state.body.position.x + 20.0;
    arena.player.facing = Facing::Right;

    let report = arena.step(&PlayerInput {
        melee: true,
        ..default()
    });

    assert_eq!(report.melee, Some(HitOutcome::Hit { defeated: true }));
    assert_boss_stayed_idle(&report);
    assert!(!arena.boss.state.berserk);
    assert_eq!(arena.player.health, arena.player.max_health);
}

#[test]
fn test_boss_killed_by_projectile_does_not_act() {
    let mut arena = dying_boss_arena();
    let boss_at = arena.boss.state.body.position;
    arena.projectiles.push(Projectile::launch(
        ProjectileKind::PlayerEnergy,
        Vec2::new(boss_at.x - 20.0, boss_at.y + 40.0),
        Facing::Right,
        0.0,
        &CombatTuning::default(),
    ));

    let report = arena.step(&PlayerInput::default());

    assert_eq!(report.ranged, vec![HitOutcome::Hit { defeated: true }]);
    assert_boss_stayed_idle(&report);
    assert!(!arena.boss.state.berserk);
}

#[test]
fn test_falling_out_of_arena_is_defeat() {
    let mut arena = settled_arena();
    arena.player.body.position.y = 720.0;
    let report = arena.step(&PlayerInput::default());
    assert_eq!(report.outcome, Some(Outcome::Defeat));
}

#[test]
fn test_player_shot_travels_and_is_blocked() {
    let mut arena = settled_arena();
    arena.player.facing = Facing::Right;

    let fire = PlayerInput {
        ranged: true,
        ..default()
    };
    arena.step(&fire);
    assert_eq!(arena.projectiles.len(), 1);

    let mut blocked = false;
    for _ in 0..60 {
        let report = arena.step(&PlayerInput::default());
        blocked |= report.ranged.contains(&HitOutcome::Blocked);
        blocked |= report.ranged.contains(&HitOutcome::Hit { defeated: false });
    }
    assert!(blocked);
    assert!(arena.projectiles.iter().all(|p| !p.kind.from_player()));
}

// ============================================================================
// Soak
// ============================================================================

#[test]
fn test_autopilot_soak_holds_invariants() {
    let mut tuning = EncounterTuning::default();
    let mut arena = CombatArena::new(&tuning);
    let mut selections = 0;
    let mut stuns = 0;
    let mut encounters = 1;
    let mut was_berserk = false;
    let mut last_phase = None;

    for _ in 0..20_000 {
        let input = autopilot(&arena.player.snapshot(), &arena.boss, arena.melee_range());
        let report = arena.step(&input);
        let state = &arena.boss.state;

        assert!(state.health <= state.max_health);
        // A teleport may land past the wall; the next frame clamps and stuns
        if !report.boss.actions.contains(&ActionEvent::Teleport) {
            assert!(state.body.position.x >= 0.0);
            assert!(state.body.position.x + state.body.size.x <= 1000.0 + 1e-3);
        }
        assert!(!was_berserk || state.berserk, "berserk reverted");
        was_berserk = state.berserk;

        if state.stunned {
            assert!(state.active_pattern.is_none());
            assert!(state.vulnerable);
        }
        if let Some(cause) = report.boss.stun {
            assert!(state.stunned, "stun {:?} did not stick", cause);
        }

        // Phases never move backwards within one pattern
        let phase = state.active_pattern.as_ref().map(|p| (p.kind, p.phase));
        if let (Some((kind, previous)), Some((now_kind, now))) = (last_phase, phase) {
            if report.boss.selected.is_none() && kind == now_kind {
                assert!(now >= previous);
            }
        }
        last_phase = phase;

        if report.boss.selected.is_some() {
            selections += 1;
        }
        if report.boss.stun.is_some() {
            stuns += 1;
        }

        if arena.outcome.is_some() {
            tuning.seed += 1;
            arena = CombatArena::new(&tuning);
            encounters += 1;
            was_berserk = false;
            last_phase = None;
        }
    }

    assert!(selections > 20, "only {} patterns selected", selections);
    assert!(stuns > 0, "no stun in {} encounters", encounters);
}
