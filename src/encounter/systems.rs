//! Encounter domain: systems bridging the arena to the app.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{CombatArena, Feedback};
use crate::content::EncounterTuning;
use crate::encounter::events::{BossPatternMessage, EncounterEndedMessage, FeedbackMessage};
use crate::encounter::resources::{
    ActiveEncounter, EncounterControl, EncounterInput, EncounterStats,
};
use crate::player::{PlayerInput, PlayerTarget, autopilot};

/// Build the arena from the loaded tuning.
pub(crate) fn spawn_encounter(mut commands: Commands, tuning: Option<Res<EncounterTuning>>) {
    let arena = match tuning.as_deref() {
        Some(tuning) => CombatArena::new(tuning),
        None => {
            warn!("No encounter tuning loaded, spawning with defaults");
            CombatArena::new(&EncounterTuning::default())
        }
    };

    info!(
        "Encounter ready: {} platforms, boss at {:?}, player at {:?}",
        arena.platforms.len(),
        arena.boss.state.body.position,
        arena.player.body.position
    );
    commands.insert_resource(ActiveEncounter { arena });
}

/// Map held keys onto player input. Does nothing in headless apps.
pub(crate) fn read_keyboard_input(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    control: Res<EncounterControl>,
    mut input: ResMut<EncounterInput>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };
    if control.autopilot {
        return;
    }

    let left = keyboard.any_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]);
    let right = keyboard.any_pressed([KeyCode::ArrowRight, KeyCode::KeyD]);
    input.0 = PlayerInput {
        axis: match (left, right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        },
        jump: keyboard.any_pressed([KeyCode::Space, KeyCode::ArrowUp, KeyCode::KeyW]),
        dash: keyboard.pressed(KeyCode::ShiftLeft),
        melee: keyboard.pressed(KeyCode::KeyJ),
        ranged: keyboard.pressed(KeyCode::KeyK),
    };
}

pub(crate) fn drive_autopilot(
    control: Res<EncounterControl>,
    encounter: Option<Res<ActiveEncounter>>,
    mut input: ResMut<EncounterInput>,
) {
    if !control.autopilot {
        return;
    }
    let Some(encounter) = encounter else {
        return;
    };

    let arena = &encounter.arena;
    input.0 = autopilot(&arena.player.snapshot(), &arena.boss, arena.melee_range());
}

/// Step the arena once and publish what happened.
pub(crate) fn step_encounter(
    encounter: Option<ResMut<ActiveEncounter>>,
    input: Res<EncounterInput>,
    control: Res<EncounterControl>,
    mut stats: ResMut<EncounterStats>,
    mut feedback_messages: MessageWriter<FeedbackMessage>,
    mut pattern_messages: MessageWriter<BossPatternMessage>,
    mut ended_messages: MessageWriter<EncounterEndedMessage>,
) {
    let Some(mut encounter) = encounter else {
        return;
    };
    if encounter.arena.outcome.is_some() || control.frame_limit_reached(stats.frames) {
        return;
    }

    let report = encounter.arena.step(&input.0);
    stats.record(&report);

    if let Some(kind) = report.boss.selected {
        pattern_messages.write(BossPatternMessage {
            frame: report.frame,
            kind,
        });
    }
    for feedback in &report.feedback {
        feedback_messages.write(FeedbackMessage {
            frame: report.frame,
            feedback: feedback.clone(),
        });
    }
    if let Some(outcome) = report.outcome {
        ended_messages.write(EncounterEndedMessage {
            frame: report.frame,
            outcome,
        });
    }
}

pub(crate) fn log_feedback(
    mut feedback_messages: MessageReader<FeedbackMessage>,
    mut pattern_messages: MessageReader<BossPatternMessage>,
    mut ended_messages: MessageReader<EncounterEndedMessage>,
) {
    for message in pattern_messages.read() {
        debug!("[{}] Boss begins {}", message.frame, message.kind.name());
    }

    for message in feedback_messages.read() {
        match &message.feedback {
            Feedback::BossHit {
                source,
                damage,
                health,
            } => {
                debug!(
                    "[{}] {:?} hit the boss for {} ({} left)",
                    message.frame, source, damage, health
                );
            }
            Feedback::AttackBlocked { source } => {
                debug!("[{}] {:?} attack blocked", message.frame, source);
            }
            Feedback::PlayerDamaged { source } => {
                debug!("[{}] Player hurt by {:?}", message.frame, source);
            }
            _ => {}
        }
    }

    for message in ended_messages.read() {
        info!(
            "Encounter ended in {:?} on frame {}",
            message.outcome, message.frame
        );
    }
}

/// F2 hands the player over to the autopilot and back.
#[cfg(feature = "dev-tools")]
pub(crate) fn toggle_autopilot(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mut control: ResMut<EncounterControl>,
    mut input: ResMut<EncounterInput>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };
    if keyboard.just_pressed(KeyCode::F2) {
        control.autopilot = !control.autopilot;
        input.0 = PlayerInput::default();
        info!("Autopilot {}", if control.autopilot { "on" } else { "off" });
    }
}
