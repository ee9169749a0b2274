//! Combat domain: the per-frame encounter loop.
//!
//! [`CombatArena`] owns the boss, the player, the platforms, and every
//! projectile and fire, and steps them in a fixed order:
//!
//! 1. player movement, then the player's ranged and melee attacks
//! 2. platform collapse animation
//! 3. projectiles (hits, expiry, fireballs igniting ground fire)
//! 4. ground fires
//! 5. the boss controller and its actions
//! 6. contact damage, the collapse trigger, victory and defeat checks

use bevy::prelude::*;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::boss::{BossController, BossTick};
use crate::combat::{
    DamageSource, Feedback, FireHazard, HitOutcome, Projectile, ProjectileKind, ScreenShake,
    resolve_boss_action, resolve_boss_projectile, resolve_contact, resolve_player_melee,
    resolve_player_projectile,
};
use crate::content::{ArenaTuning, CombatTuning, EncounterTuning};
use crate::physics::Platform;
use crate::player::{PlayerBody, PlayerInput, PlayerTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Everything that happened during one arena frame.
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub frame: u64,
    pub boss: BossTick,
    pub melee: Option<HitOutcome>,
    pub ranged: Vec<HitOutcome>,
    pub feedback: Vec<Feedback>,
    pub collapsed: Vec<usize>,
    pub outcome: Option<Outcome>,
}

pub struct CombatArena {
    pub boss: BossController,
    pub player: PlayerBody,
    pub platforms: Vec<Platform>,
    pub projectiles: Vec<Projectile>,
    pub fires: Vec<FireHazard>,
    pub shake: ScreenShake,
    pub frame: u64,
    pub outcome: Option<Outcome>,
    collapse_triggered: bool,
    arena: ArenaTuning,
    combat: CombatTuning,
    rng: ChaCha8Rng,
}

impl CombatArena {
    pub fn new(tuning: &EncounterTuning) -> Self {
        let (px, py) = tuning.arena.player_spawn;
        Self {
            boss: BossController::new(tuning),
            player: PlayerBody::new(&tuning.player, Vec2::new(px, py)),
            platforms: tuning.arena.platforms.iter().map(Platform::from).collect(),
            projectiles: Vec::new(),
            fires: Vec::new(),
            shake: ScreenShake::default(),
            frame: 0,
            outcome: None,
            collapse_triggered: false,
            arena: tuning.arena.clone(),
            combat: tuning.combat.clone(),
            rng: ChaCha8Rng::seed_from_u64(tuning.seed.wrapping_add(1)),
        }
    }

    pub fn arena_size(&self) -> Vec2 {
        Vec2::new(self.arena.width, self.arena.height)
    }

    pub fn melee_range(&self) -> f32 {
        self.player.attack_box().w
    }

    /// Random camera offset for the current shake.
    pub fn shake_offset(&mut self) -> Vec2 {
        self.shake.offset(&mut self.rng)
    }

    /// Run one frame. Once an outcome is decided the arena stops changing.
    pub fn step(&mut self, input: &PlayerInput) -> FrameReport {
        let mut report = FrameReport {
            frame: self.frame,
            outcome: self.outcome,
            ..default()
        };
        if self.outcome.is_some() {
            return report;
        }
        self.frame += 1;

        self.run_phases(input, &mut report);

        for cue in &report.feedback {
            if let Feedback::ScreenShake { frames, intensity } = cue {
                self.shake.start(*frames, *intensity);
            }
        }
        self.shake.tick();

        self.check_outcome();
        report.outcome = self.outcome;
        report
    }

    /// The per-frame phases. A boss killed by the player stops the frame
    /// before it can act again.
    fn run_phases(&mut self, input: &PlayerInput, report: &mut FrameReport) {
        self.player_phase(input, report);
        if self.boss.state.is_defeated() {
            return;
        }

        self.update_collapsing_platforms();
        self.update_projectiles(report);
        if self.boss.state.is_defeated() {
            return;
        }

        self.update_fires(report);
        self.boss_phase(report);

        resolve_contact(
            &self.boss.state,
            &mut self.player,
            &self.combat,
            &mut report.feedback,
        );

        if !self.collapse_triggered && self.boss.state.health <= self.arena.collapse_hp_threshold {
            self.collapse_triggered = true;
            report.collapsed = self.collapse_platforms(&mut report.feedback);
        }
    }

    fn player_phase(&mut self, input: &PlayerInput, report: &mut FrameReport) {
        let width = self.arena.width;
        self.player.update(input, &self.platforms, width);

        if input.ranged && self.player.start_ranged_attack() {
            self.projectiles.push(Projectile::launch(
                ProjectileKind::PlayerEnergy,
                self.player.muzzle(),
                self.player.facing,
                0.0,
                &self.combat,
            ));
        }

        if input.melee && self.player.start_attack() {
            let outcome = resolve_player_melee(
                &mut self.boss,
                self.player.attack_box(),
                &self.combat,
                &mut report.feedback,
            );
            report.melee = Some(outcome);
        }
    }

    fn update_collapsing_platforms(&mut self) {
        let warning = self.arena.collapse_warning_frames;
        let crumble = self.arena.collapse_crumble_frames;
        for (index, platform) in self.platforms.iter_mut().enumerate() {
            if platform.update_collapse(warning, crumble) {
                debug!("Platform {} crumbled away", index);
            }
        }
    }

    fn update_projectiles(&mut self, report: &mut FrameReport) {
        let arena = self.arena_size();
        let mut ignited = Vec::new();

        for projectile in self.projectiles.iter_mut() {
            projectile.update(arena, self.combat.offscreen_margin);
            if !projectile.active {
                continue;
            }

            if projectile.kind.from_player() {
                let outcome = resolve_player_projectile(
                    &mut self.boss,
                    projectile,
                    &self.combat,
                    &mut report.feedback,
                );
                if outcome != HitOutcome::Missed {
                    report.ranged.push(outcome);
                }
            } else {
                resolve_boss_projectile(
                    projectile,
                    &mut self.player,
                    &self.combat,
                    &mut report.feedback,
                );
            }

            if projectile.active && projectile.kind == ProjectileKind::Fireball {
                if let Some(platform) = projectile.landing_platform(&self.platforms) {
                    projectile.active = false;
                    ignited.push(FireHazard::new(
                        projectile.position.x,
                        platform.rect.y,
                        platform.rect.w,
                        &self.combat,
                    ));
                }
            }
        }
        self.projectiles.retain(|p| p.active);

        for fire in ignited {
            report.feedback.push(Feedback::FireIgnited {
                at: Vec2::new(fire.x, fire.y),
            });
            report.feedback.push(Feedback::ScreenShake {
                frames: self.combat.fire_shake_frames,
                intensity: self.combat.shake_intensity,
            });
            self.fires.push(fire);
        }
    }

    fn update_fires(&mut self, report: &mut FrameReport) {
        for fire in self.fires.iter_mut() {
            fire.update();
        }
        self.fires.retain(FireHazard::is_active);

        for fire in self.fires.iter_mut() {
            let snapshot = self.player.snapshot();
            if snapshot.is_invincible() || !fire.rect().overlaps(&snapshot.rect()) {
                continue;
            }
            if fire.can_damage() && self.player.apply_damage(self.combat.boss_attack_damage) {
                report.feedback.push(Feedback::PlayerDamaged {
                    source: DamageSource::Fire,
                });
            }
        }
    }

    fn boss_phase(&mut self, report: &mut FrameReport) {
        let snapshot = self.player.snapshot();
        let tick = self.boss.update(&snapshot, &self.platforms);

        for action in &tick.actions {
            resolve_boss_action(
                action,
                &self.boss.state,
                &mut self.player,
                &mut self.projectiles,
                &self.combat,
                &mut report.feedback,
            );
        }
        report.boss = tick;
    }

    /// Start collapsing a random set of ledges. Returns their indices; empty
    /// when there are not enough ledges left.
    fn collapse_platforms(&mut self, feedback: &mut Vec<Feedback>) -> Vec<usize> {
        let mut candidates: Vec<usize> = self
            .platforms
            .iter()
            .enumerate()
            .filter(|(_, p)| p.collapsible && p.visible && !p.is_collapsing())
            .map(|(i, _)| i)
            .collect();

        let count = self.arena.collapse_count;
        if count == 0 || candidates.len() < count {
            return Vec::new();
        }
        candidates.shuffle(&mut self.rng);
        candidates.truncate(count);
        candidates.sort_unstable();

        for &index in &candidates {
            self.platforms[index].start_collapse();
            feedback.push(Feedback::PlatformCollapse { index });
        }
        feedback.push(Feedback::ScreenShake {
            frames: self.combat.collapse_shake_frames,
            intensity: self.combat.shake_intensity,
        });
        info!("Arena collapse started on platforms {:?}", candidates);
        candidates
    }

    fn check_outcome(&mut self) {
        if self.boss.state.is_defeated() {
            info!("Boss defeated on frame {}", self.frame);
            self.outcome = Some(Outcome::Victory);
        } else if !self.player.is_alive() || self.player.body.position.y > self.arena.height {
            info!("Player defeated on frame {}", self.frame);
            self.outcome = Some(Outcome::Defeat);
        }
    }
}
