//! Boss domain: attack pattern state machines.
//!
//! Every pattern is the same [`PatternState`] record driven by a per-kind
//! timeline in [`PatternState::advance`]. A pattern moves the boss body it is
//! handed and reports what happened through a [`PatternStep`]; it never touches
//! health or shield state directly.

use bevy::math::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::content::{BossTuning, PatternTimings};
use crate::physics::{Body, Facing};
use crate::player::PlayerSnapshot;

/// Homing stops once the boss is this close to its target column.
const HOMING_DEADZONE: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PatternKind {
    Jump,
    Flame,
    Charge,
    Slash,
    Teleport,
}

impl PatternKind {
    pub const ALL: [PatternKind; 5] = [
        PatternKind::Jump,
        PatternKind::Flame,
        PatternKind::Charge,
        PatternKind::Slash,
        PatternKind::Teleport,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PatternKind::Jump => "jump",
            PatternKind::Flame => "flame",
            PatternKind::Charge => "charge",
            PatternKind::Slash => "slash",
            PatternKind::Teleport => "teleport",
        }
    }
}

/// Pattern phases. Ordered so a pattern can only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Telegraph,
    Execute,
    Recovery,
}

/// Something the combat loop has to resolve this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionEvent {
    /// Ground pound centered on the boss's feet
    Shockwave { x: f32, y: f32 },
    Flame { direction: Facing, angle_offset: f32 },
    Slash { index: u32, direction: Facing },
    Teleport,
}

/// Result of one pattern frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PatternStep {
    pub event: Option<ActionEvent>,
    /// Ask the controller to open a vulnerability window of this many frames
    pub vulnerable_for: Option<u32>,
}

impl PatternStep {
    fn event(event: ActionEvent) -> Self {
        Self {
            event: Some(event),
            vulnerable_for: None,
        }
    }
}

/// Constants a pattern reads while advancing.
#[derive(Debug, Clone, Copy)]
pub struct PatternContext<'a> {
    pub boss: &'a BossTuning,
    pub timings: &'a PatternTimings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternState {
    pub kind: PatternKind,
    pub phase: Phase,
    /// Frames since the current phase was entered
    pub timer: u32,
    pub sub_count: u32,
    pub complete: bool,
}

impl PatternState {
    pub fn start(kind: PatternKind) -> Self {
        Self {
            kind,
            phase: Phase::Telegraph,
            timer: 0,
            sub_count: 0,
            complete: false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    fn enter(&mut self, phase: Phase) {
        debug_assert!(phase > self.phase, "pattern phases only move forward");
        self.phase = phase;
        self.timer = 0;
    }

    /// Open the vulnerability window and move to recovery.
    fn punish_window(&mut self, frames: u32) -> PatternStep {
        self.enter(Phase::Recovery);
        PatternStep {
            event: None,
            vulnerable_for: Some(frames),
        }
    }

    fn recover(&mut self, frames: u32) -> PatternStep {
        if self.timer >= frames {
            self.complete = true;
        }
        PatternStep::default()
    }

    /// Advance one frame. The timer ticks first, then the kind's timeline runs.
    /// A complete pattern does nothing.
    pub fn advance(
        &mut self,
        body: &mut Body,
        facing: &mut Facing,
        player: &PlayerSnapshot,
        ctx: &PatternContext,
        rng: &mut ChaCha8Rng,
    ) -> PatternStep {
        if self.complete {
            return PatternStep::default();
        }
        self.timer += 1;

        match self.kind {
            PatternKind::Jump => self.advance_jump(body, player, ctx),
            PatternKind::Flame => self.advance_flame(*facing, ctx),
            PatternKind::Charge => self.advance_charge(body, facing, player, ctx),
            PatternKind::Slash => self.advance_slash(*facing, ctx),
            PatternKind::Teleport => self.advance_teleport(body, facing, player, ctx, rng),
        }
    }

    fn advance_jump(
        &mut self,
        body: &mut Body,
        player: &PlayerSnapshot,
        ctx: &PatternContext,
    ) -> PatternStep {
        let timing = &ctx.timings.jump;
        match self.phase {
            Phase::Telegraph => {
                if self.timer >= timing.telegraph {
                    body.velocity.y = -ctx.boss.jump_impulse;
                    self.enter(Phase::Execute);
                }
                PatternStep::default()
            }
            Phase::Execute => {
                if body.velocity.y > 0.0 {
                    let target_x = player.position.x + player.size.x / 2.0 - body.size.x / 2.0;
                    let offset = target_x - body.position.x;
                    body.velocity.x = if offset.abs() > HOMING_DEADZONE {
                        ctx.boss.homing_speed.copysign(offset)
                    } else {
                        0.0
                    };
                }

                if body.grounded && self.timer >= timing.min_airtime {
                    body.velocity.x = 0.0;
                    let mut step = self.punish_window(timing.vulnerable);
                    step.event = Some(ActionEvent::Shockwave {
                        x: body.position.x + body.size.x / 2.0,
                        y: body.position.y + body.size.y,
                    });
                    return step;
                }
                PatternStep::default()
            }
            Phase::Recovery => self.recover(timing.recovery),
        }
    }

    fn advance_flame(&mut self, facing: Facing, ctx: &PatternContext) -> PatternStep {
        let timing = &ctx.timings.flame;
        match self.phase {
            Phase::Telegraph => {
                if self.timer >= timing.charge {
                    self.enter(Phase::Execute);
                }
                PatternStep::default()
            }
            Phase::Execute => {
                let shot = timing
                    .angles
                    .iter()
                    .enumerate()
                    .find(|(i, _)| self.timer == timing.interval * (*i as u32 + 1))
                    .map(|(_, angle)| ActionEvent::Flame {
                        direction: facing,
                        angle_offset: *angle,
                    });

                if self.timer >= timing.window {
                    let mut step = self.punish_window(timing.vulnerable);
                    step.event = shot;
                    return step;
                }
                PatternStep {
                    event: shot,
                    vulnerable_for: None,
                }
            }
            Phase::Recovery => self.recover(timing.recovery),
        }
    }

    fn advance_charge(
        &mut self,
        body: &mut Body,
        facing: &mut Facing,
        player: &PlayerSnapshot,
        ctx: &PatternContext,
    ) -> PatternStep {
        let timing = &ctx.timings.charge;
        match self.phase {
            Phase::Telegraph => {
                if self.timer >= timing.telegraph {
                    let direction = Facing::toward(body.position.x, player.position.x);
                    *facing = direction;
                    body.velocity.x = direction.sign() * ctx.boss.charge_speed;
                    self.enter(Phase::Execute);
                }
                PatternStep::default()
            }
            Phase::Execute => {
                body.velocity.x *= ctx.boss.charge_drag;
                if body.velocity.x.abs() < ctx.boss.charge_end_speed {
                    return self.punish_window(timing.vulnerable);
                }
                PatternStep::default()
            }
            Phase::Recovery => self.recover(timing.recovery),
        }
    }

    fn advance_slash(&mut self, facing: Facing, ctx: &PatternContext) -> PatternStep {
        let timing = &ctx.timings.slash;
        match self.phase {
            Phase::Telegraph => {
                if self.timer >= timing.windup {
                    self.enter(Phase::Execute);
                }
                PatternStep::default()
            }
            Phase::Execute => {
                if self.sub_count < timing.strikes && self.timer % timing.interval == 0 {
                    // Each strike restarts the spacing count
                    self.sub_count += 1;
                    self.timer = 0;
                    return PatternStep::event(ActionEvent::Slash {
                        index: self.sub_count - 1,
                        direction: facing,
                    });
                }
                if self.sub_count >= timing.strikes && self.timer >= timing.interval {
                    return self.punish_window(timing.vulnerable);
                }
                PatternStep::default()
            }
            Phase::Recovery => self.recover(timing.recovery),
        }
    }

    fn advance_teleport(
        &mut self,
        body: &mut Body,
        facing: &mut Facing,
        player: &PlayerSnapshot,
        ctx: &PatternContext,
        rng: &mut ChaCha8Rng,
    ) -> PatternStep {
        let timing = &ctx.timings.teleport;
        match self.phase {
            Phase::Telegraph => {
                if self.timer < timing.windup {
                    return PatternStep::default();
                }
                let (dx, dy) = ctx.boss.teleport_offset;
                let side = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                body.position.x = player.position.x + side * dx;
                body.position.y = player.position.y - dy;
                body.velocity = Vec2::ZERO;
                *facing = Facing::toward(body.position.x, player.position.x);
                self.enter(Phase::Execute);
                PatternStep::event(ActionEvent::Teleport)
            }
            Phase::Execute => {
                if self.timer >= timing.end_frame {
                    self.complete = true;
                    return PatternStep::default();
                }
                if self.timer == timing.strike_frame {
                    return PatternStep::event(ActionEvent::Slash {
                        index: 0,
                        direction: *facing,
                    });
                }
                PatternStep::default()
            }
            // Teleport has no recovery of its own
            Phase::Recovery => self.recover(0),
        }
    }
}
