//! Encounter domain: runs the boss fight inside a Bevy app.
//!
//! The arena itself is plain data stepped once per `Update`. These systems only
//! feed it input and turn its frame reports into messages and statistics.

mod events;
mod resources;
mod systems;

pub use events::{BossPatternMessage, EncounterEndedMessage, FeedbackMessage};
pub use resources::{ActiveEncounter, EncounterControl, EncounterInput, EncounterStats};

use bevy::prelude::*;

use crate::content::load_content;
use crate::encounter::systems::{
    drive_autopilot, log_feedback, read_keyboard_input, spawn_encounter, step_encounter,
};

pub struct EncounterPlugin;

impl Plugin for EncounterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EncounterInput>()
            .init_resource::<EncounterControl>()
            .init_resource::<EncounterStats>()
            .add_message::<FeedbackMessage>()
            .add_message::<BossPatternMessage>()
            .add_message::<EncounterEndedMessage>()
            .add_systems(Startup, spawn_encounter.after(load_content))
            .add_systems(
                Update,
                (
                    read_keyboard_input,
                    drive_autopilot,
                    step_encounter,
                    log_feedback,
                )
                    .chain(),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(
            Update,
            systems::toggle_autopilot.before(read_keyboard_input),
        );
    }
}
