use bevy::log::LogPlugin;
use bevy::prelude::*;
use std::path::PathBuf;

use hero_tower::content::{ContentPath, ContentPlugin};
use hero_tower::encounter::{EncounterControl, EncounterPlugin, EncounterStats};

/// Five minutes at 60 Hz.
const MAX_FRAMES: u64 = 60 * 60 * 5;

fn main() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(EncounterControl {
            autopilot: true,
            max_frames: Some(MAX_FRAMES),
        });

    if let Some(path) = std::env::args().nth(1) {
        app.insert_resource(ContentPath(PathBuf::from(path)));
    }

    app.add_plugins((ContentPlugin, EncounterPlugin));
    app.finish();
    app.cleanup();

    loop {
        app.update();
        let stats = app.world().resource::<EncounterStats>();
        if stats.outcome.is_some() || stats.frames >= MAX_FRAMES {
            break;
        }
    }

    let stats = app.world().resource::<EncounterStats>();
    match serde_json::to_string_pretty(stats) {
        Ok(summary) => info!("Encounter summary:\n{}", summary),
        Err(err) => error!("Could not serialize encounter summary: {}", err),
    }
}
