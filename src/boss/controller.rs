//! Boss domain: the per-frame boss controller.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::boss::{ActionEvent, PatternContext, PatternKind, PatternState, Phase, WeightTable};
use crate::content::{BossTuning, EncounterTuning, PatternTimings};
use crate::physics::{Body, Facing, Platform, Rect, StepParams, clamp_to_arena};
use crate::player::PlayerSnapshot;

/// Why the boss was stunned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StunCause {
    /// Pushed against the left or right arena wall
    ArenaWall,
    /// A charge slammed into the side of a platform
    ChargeImpact,
}

/// Everything about the boss that changes frame to frame.
#[derive(Debug, Clone)]
pub struct BossState {
    pub body: Body,
    pub facing: Facing,
    pub health: u32,
    pub max_health: u32,
    pub vulnerable: bool,
    pub vulnerable_timer: u32,
    pub stunned: bool,
    pub stun_timer: u32,
    /// One-way: set once health reaches the vulnerable threshold
    pub berserk: bool,
    pub attack_cooldown: u32,
    pub hit_flash: u32,
    /// Countdown for the "attack incoming" indicator
    pub telegraph_timer: u32,
    pub active_pattern: Option<PatternState>,
    pub last_pattern: Option<PatternKind>,
}

impl BossState {
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn active_kind(&self) -> Option<PatternKind> {
        self.active_pattern.as_ref().map(|p| p.kind)
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    fn is_charging(&self) -> bool {
        self.active_pattern
            .as_ref()
            .is_some_and(|p| p.kind == PatternKind::Charge && p.phase == Phase::Execute)
    }
}

/// What one controller update produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BossTick {
    /// Pattern still active at the end of the frame
    pub pattern: Option<PatternKind>,
    pub actions: Vec<ActionEvent>,
    pub selected: Option<PatternKind>,
    pub completed: Option<PatternKind>,
    /// Pattern thrown away by a stun this frame
    pub abandoned: Option<PatternKind>,
    pub stun: Option<StunCause>,
    pub berserk_entered: bool,
}

pub struct BossController {
    pub state: BossState,
    tuning: BossTuning,
    timings: PatternTimings,
    arena_width: f32,
    rng: ChaCha8Rng,
}

impl BossController {
    /// Spawn the boss described by the tuning, seeded from the encounter seed.
    pub fn new(tuning: &EncounterTuning) -> Self {
        let (x, y) = tuning.arena.boss_spawn;
        Self::with_rng(
            tuning.boss.clone(),
            tuning.patterns.clone(),
            tuning.arena.width,
            Vec2::new(x, y),
            ChaCha8Rng::seed_from_u64(tuning.seed),
        )
    }

    pub fn with_rng(
        tuning: BossTuning,
        timings: PatternTimings,
        arena_width: f32,
        spawn: Vec2,
        rng: ChaCha8Rng,
    ) -> Self {
        let state = BossState {
            body: Body::new(spawn, Vec2::new(tuning.width, tuning.height)),
            facing: Facing::Left,
            health: tuning.max_health,
            max_health: tuning.max_health,
            vulnerable: false,
            vulnerable_timer: 0,
            stunned: false,
            stun_timer: 0,
            berserk: false,
            attack_cooldown: tuning.cooldown_frames,
            hit_flash: 0,
            telegraph_timer: 0,
            active_pattern: None,
            last_pattern: None,
        };

        Self {
            state,
            tuning,
            timings,
            arena_width,
            rng,
        }
    }

    /// Whether a hit would land right now.
    pub fn can_be_damaged(&self) -> bool {
        self.state.health <= self.tuning.vulnerable_threshold || self.state.vulnerable
    }

    /// The table the next selection would draw from against `player`.
    pub fn weight_table(&self, player: &PlayerSnapshot) -> WeightTable {
        let state = &self.state;
        WeightTable::for_encounter(
            (player.position.x - state.body.position.x).abs(),
            state.berserk,
            state.health * 2 < state.max_health,
            state.last_pattern,
        )
    }

    /// Run one frame of boss logic.
    pub fn update(&mut self, player: &PlayerSnapshot, platforms: &[Platform]) -> BossTick {
        let mut tick = BossTick::default();

        self.tick_timers();

        if self.state.stunned {
            self.state.stun_timer = self.state.stun_timer.saturating_sub(1);
            if self.state.stun_timer == 0 {
                self.state.stunned = false;
                debug!("Boss recovered from stun");
            }
            return tick;
        }

        // Movement
        let params = StepParams {
            gravity: self.tuning.gravity,
            max_fall_speed: self.tuning.max_fall_speed,
            friction: if self.state.is_charging() {
                1.0
            } else {
                self.tuning.ground_friction
            },
            pass_through_ledges: true,
        };
        let contacts = self.state.body.step(&params, platforms);

        if clamp_to_arena(&mut self.state.body, self.arena_width) {
            tick.abandoned = self.enter_stun(StunCause::ArenaWall);
            tick.stun = Some(StunCause::ArenaWall);
        }

        let charging = self.state.active_kind() == Some(PatternKind::Charge);
        let hard_impact = contacts
            .wall_impact
            .is_some_and(|speed| speed > self.tuning.charge_stun_speed);
        if !self.state.stunned && charging && hard_impact {
            self.state.body.velocity.x = 0.0;
            tick.abandoned = self.enter_stun(StunCause::ChargeImpact);
            tick.stun = Some(StunCause::ChargeImpact);
        }

        if self.state.health <= self.tuning.vulnerable_threshold && !self.state.berserk {
            self.enter_berserk();
            tick.berserk_entered = true;
        }

        if self.state.stunned {
            return tick;
        }

        // Pattern selection
        if self.state.active_pattern.is_none() && self.state.attack_cooldown == 0 {
            let kind = self.select_pattern(player);
            tick.selected = Some(kind);
        }

        // Pattern execution
        let state = &mut self.state;
        if let Some(pattern) = state.active_pattern.as_mut() {
            let ctx = PatternContext {
                boss: &self.tuning,
                timings: &self.timings,
            };
            let step = pattern.advance(
                &mut state.body,
                &mut state.facing,
                player,
                &ctx,
                &mut self.rng,
            );

            if let Some(frames) = step.vulnerable_for {
                // Below the threshold the boss is always open; no window needed
                if state.health > self.tuning.vulnerable_threshold {
                    state.vulnerable = true;
                    state.vulnerable_timer = frames;
                }
            }
            if let Some(event) = step.event {
                tick.actions.push(event);
            }

            if pattern.is_complete() {
                tick.completed = Some(pattern.kind);
                state.active_pattern = None;
                state.attack_cooldown = rest_frames(&self.tuning, state.berserk);
            }
        }

        if state.active_kind() != Some(PatternKind::Charge) {
            state.facing = Facing::toward(state.body.position.x, player.position.x);
        }

        tick.pattern = state.active_kind();
        tick
    }

    /// Apply a player hit. Returns false when the shield blocks it.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if !self.can_be_damaged() {
            debug!("Boss blocked {} damage", amount);
            return false;
        }
        if amount == 0 {
            return true;
        }

        let state = &mut self.state;
        state.health = state.health.saturating_sub(amount);
        state.hit_flash = self.tuning.hit_flash_frames;
        state.body.velocity.x = -state.facing.sign() * self.tuning.knockback;
        true
    }

    fn tick_timers(&mut self) {
        let state = &mut self.state;
        state.attack_cooldown = state.attack_cooldown.saturating_sub(1);
        state.vulnerable_timer = state.vulnerable_timer.saturating_sub(1);
        // An expired or empty window closes outside berserk
        if state.vulnerable_timer == 0 {
            state.vulnerable = state.berserk;
        }
        state.hit_flash = state.hit_flash.saturating_sub(1);
        state.telegraph_timer = state.telegraph_timer.saturating_sub(1);
    }

    fn select_pattern(&mut self, player: &PlayerSnapshot) -> PatternKind {
        let table = self.weight_table(player);
        let kind = table.draw(&mut self.rng);
        debug!("Boss picked {:?} from {:?}", kind, table.entries());

        let state = &mut self.state;
        state.active_pattern = Some(PatternState::start(kind));
        state.last_pattern = Some(kind);
        state.facing = Facing::toward(state.body.position.x, player.position.x);
        state.telegraph_timer = self.tuning.telegraph_frames;
        kind
    }

    /// The only way into a stun. Returns the pattern it cut short, if any.
    fn enter_stun(&mut self, cause: StunCause) -> Option<PatternKind> {
        let state = &mut self.state;
        state.stunned = true;
        state.stun_timer = self.tuning.stun_frames;
        state.vulnerable = true;
        state.vulnerable_timer = self.tuning.stun_frames;
        state.body.velocity.x = 0.0;
        state.attack_cooldown = rest_frames(&self.tuning, state.berserk);

        let abandoned = state.active_pattern.take().map(|p| p.kind);
        info!(
            "Boss stunned by {:?} for {} frames (abandoned {:?})",
            cause, self.tuning.stun_frames, abandoned
        );
        abandoned
    }

    fn enter_berserk(&mut self) {
        let state = &mut self.state;
        state.berserk = true;
        state.vulnerable = true;
        state.attack_cooldown = 0;
        info!("Boss entered berserk at {} health", state.health);
    }
}

/// Cooldown before the next pattern; shorter once berserk.
fn rest_frames(tuning: &BossTuning, berserk: bool) -> u32 {
    if berserk {
        tuning.berserk_cooldown_frames
    } else {
        tuning.cooldown_frames
    }
}
