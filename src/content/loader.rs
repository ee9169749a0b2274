//! Loader for the RON tuning file at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::EncounterTuning;
use super::validation::validate_tuning;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse tuning from a RON string. `source` only labels errors.
pub fn parse_tuning(source: &str, contents: &str) -> Result<EncounterTuning, ContentLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: source.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Load and validate the encounter tuning file.
/// Returns every problem found; validation only runs once the file parses.
pub fn load_encounter_tuning(path: &Path) -> Result<EncounterTuning, Vec<ContentLoadError>> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| {
        vec![ContentLoadError {
            file: file_name.clone(),
            message: format!("IO error: {}", e),
        }]
    })?;

    let tuning = parse_tuning(&file_name, &contents).map_err(|e| vec![e])?;

    let errors: Vec<ContentLoadError> = validate_tuning(&tuning)
        .into_iter()
        .map(|e| ContentLoadError {
            file: file_name.clone(),
            message: e.to_string(),
        })
        .collect();

    if errors.is_empty() {
        Ok(tuning)
    } else {
        Err(errors)
    }
}
