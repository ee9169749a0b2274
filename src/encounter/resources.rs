//! Encounter domain: resources shared by the encounter systems.

use bevy::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::boss::{PatternKind, StunCause};
use crate::combat::{CombatArena, Feedback, FrameReport, Outcome};
use crate::player::PlayerInput;

/// The fight in progress.
#[derive(Resource)]
pub struct ActiveEncounter {
    pub arena: CombatArena,
}

/// Input applied on the next arena step. Filled by the keyboard or the autopilot.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct EncounterInput(pub PlayerInput);

#[derive(Resource, Debug, Clone, Default)]
pub struct EncounterControl {
    /// Let the scripted player drive instead of the keyboard
    pub autopilot: bool,
    /// Stop stepping after this many frames
    pub max_frames: Option<u64>,
}

impl EncounterControl {
    pub fn frame_limit_reached(&self, frames: u64) -> bool {
        self.max_frames.is_some_and(|max| frames >= max)
    }
}

/// Running totals for the end-of-run summary.
#[derive(Resource, Debug, Clone, Default, Serialize)]
pub struct EncounterStats {
    pub frames: u64,
    pub patterns: BTreeMap<PatternKind, u32>,
    pub stuns: BTreeMap<StunCause, u32>,
    pub abandoned_patterns: u32,
    pub boss_hits: u32,
    pub boss_damage_taken: u32,
    pub blocked_hits: u32,
    pub player_hits_taken: u32,
    pub berserk_frame: Option<u64>,
    pub collapsed_platforms: Vec<usize>,
    pub outcome: Option<Outcome>,
}

impl EncounterStats {
    /// Fold one arena frame into the totals.
    pub fn record(&mut self, report: &FrameReport) {
        self.frames += 1;

        let tick = &report.boss;
        if let Some(kind) = tick.selected {
            *self.patterns.entry(kind).or_default() += 1;
        }
        if let Some(cause) = tick.stun {
            *self.stuns.entry(cause).or_default() += 1;
        }
        if tick.abandoned.is_some() {
            self.abandoned_patterns += 1;
        }
        if tick.berserk_entered {
            self.berserk_frame = Some(self.frames);
        }

        for cue in &report.feedback {
            match cue {
                Feedback::BossHit { damage, .. } => {
                    self.boss_hits += 1;
                    self.boss_damage_taken += damage;
                }
                Feedback::AttackBlocked { .. } => self.blocked_hits += 1,
                Feedback::PlayerDamaged { .. } => self.player_hits_taken += 1,
                _ => {}
            }
        }

        self.collapsed_platforms.extend(&report.collapsed);
        self.outcome = report.outcome;
    }
}
