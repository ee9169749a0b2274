//! Content domain: encounter tuning data, RON loading, and validation.

mod data;
mod loader;
#[cfg(test)]
mod tests;
mod validation;

pub use data::{
    ArenaTuning, BossTuning, ChargeTiming, CombatTuning, EncounterTuning, FlameTiming,
    JumpTiming, PatternTimings, PlatformDef, PlayerTuning, SlashTiming, TeleportTiming,
};
pub use loader::{ContentLoadError, load_encounter_tuning, parse_tuning};
pub use validation::{ValidationError, validate_tuning};

use bevy::prelude::*;
use std::path::PathBuf;

/// Where the tuning file is read from.
#[derive(Resource, Debug, Clone)]
pub struct ContentPath(pub PathBuf);

impl Default for ContentPath {
    fn default() -> Self {
        Self(PathBuf::from("assets/data/encounter_tuning.ron"))
    }
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContentPath>()
            .add_systems(Startup, load_content);
    }
}

/// Load tuning into a resource, falling back to built-in defaults on any error.
pub fn load_content(mut commands: Commands, path: Res<ContentPath>) {
    match load_encounter_tuning(&path.0) {
        Ok(tuning) => {
            info!(
                "Loaded encounter tuning from {} (schema {}, seed {})",
                path.0.display(),
                tuning.schema_version,
                tuning.seed
            );
            commands.insert_resource(tuning);
        }
        Err(errors) => {
            for error in &errors {
                error!("{}", error);
            }
            warn!("Using default encounter tuning");
            commands.insert_resource(EncounterTuning::default());
        }
    }
}
