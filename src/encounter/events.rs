//! Encounter domain: messages written while the fight runs.

use bevy::ecs::message::Message;

use crate::boss::PatternKind;
use crate::combat::{Feedback, Outcome};

/// A presentation cue from the arena
#[derive(Debug, Clone)]
pub struct FeedbackMessage {
    pub frame: u64,
    pub feedback: Feedback,
}

impl Message for FeedbackMessage {}

/// Fired when the boss commits to a new pattern
#[derive(Debug, Clone)]
pub struct BossPatternMessage {
    pub frame: u64,
    pub kind: PatternKind,
}

impl Message for BossPatternMessage {}

/// Fired once, on the frame the encounter is decided
#[derive(Debug, Clone)]
pub struct EncounterEndedMessage {
    pub frame: u64,
    pub outcome: Outcome,
}

impl Message for EncounterEndedMessage {}
