//! Content domain: unit tests for tuning parsing and validation.

use std::path::{Path, PathBuf};

use super::{EncounterTuning, load_encounter_tuning, parse_tuning, validate_tuning};

fn fields(tuning: &EncounterTuning) -> Vec<&'static str> {
    validate_tuning(tuning).iter().map(|e| e.field).collect()
}

#[test]
fn test_default_tuning_is_valid() {
    let errors = validate_tuning(&EncounterTuning::default());
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
}

#[test]
fn test_shipped_tuning_file_loads() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/data/encounter_tuning.ron");
    let tuning = load_encounter_tuning(&path).expect("shipped tuning should load");

    let defaults = EncounterTuning::default();
    assert_eq!(tuning.boss.max_health, defaults.boss.max_health);
    assert_eq!(tuning.arena.platforms.len(), defaults.arena.platforms.len());
    assert_eq!(tuning.patterns.flame.angles, defaults.patterns.flame.angles);
}

#[test]
fn test_partial_file_fills_defaults() {
    let source = r#"(
        seed: 7,
        boss: (max_health: 200, stun_frames: 45),
        patterns: (slash: (strikes: 4)),
    )"#;
    let tuning = parse_tuning("inline", source).expect("partial tuning should parse");

    assert_eq!(tuning.seed, 7);
    assert_eq!(tuning.boss.max_health, 200);
    assert_eq!(tuning.boss.stun_frames, 45);
    assert_eq!(tuning.patterns.slash.strikes, 4);
    // Untouched values keep their defaults
    assert_eq!(tuning.boss.vulnerable_threshold, 10);
    assert_eq!(tuning.patterns.slash.windup, 15);
    assert_eq!(tuning.combat.shockwave_radius, 200.0);
}

#[test]
fn test_parse_error_names_source() {
    let err = parse_tuning("broken.ron", "(boss: (max_health: \"lots\"))").unwrap_err();
    assert_eq!(err.file, "broken.ron");
    assert!(err.to_string().contains("Parse error"));
}

#[test]
fn test_missing_file_reports_io_error() {
    let errors = load_encounter_tuning(Path::new("does/not/exist.ron")).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("IO error"));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_threshold_must_be_below_max_health() {
    let mut tuning = EncounterTuning::default();
    tuning.boss.vulnerable_threshold = tuning.boss.max_health;
    assert_eq!(fields(&tuning), vec!["vulnerable_threshold"]);
}

#[test]
fn test_flame_shots_must_fit_window() {
    let mut tuning = EncounterTuning::default();
    tuning.patterns.flame.angles = vec![0.0, 0.1, 0.2, 0.3, 0.4];
    assert_eq!(fields(&tuning), vec!["flame.window"]);

    tuning.patterns.flame.angles.clear();
    assert_eq!(fields(&tuning), vec!["flame.angles"]);
}

#[test]
fn test_zero_length_phase_rejected() {
    let mut tuning = EncounterTuning::default();
    tuning.patterns.charge.telegraph = 0;
    assert_eq!(fields(&tuning), vec!["charge.telegraph"]);
}

#[test]
fn test_zero_length_punish_windows_rejected() {
    let mut tuning = EncounterTuning::default();
    tuning.boss.stun_frames = 0;
    tuning.patterns.jump.vulnerable = 0;
    tuning.patterns.flame.vulnerable = 0;
    tuning.patterns.charge.vulnerable = 0;
    tuning.patterns.slash.vulnerable = 0;
    assert_eq!(
        fields(&tuning),
        vec![
            "stun_frames",
            "jump.vulnerable",
            "flame.vulnerable",
            "charge.vulnerable",
            "slash.vulnerable"
        ]
    );
}

#[test]
fn test_sword_beam_strike_must_be_reachable() {
    let mut tuning = EncounterTuning::default();
    tuning.patterns.slash.strikes = 2;
    assert_eq!(fields(&tuning), vec!["sword_beam_strike"]);
}

#[test]
fn test_collapse_count_limited_by_ledges() {
    let mut tuning = EncounterTuning::default();
    tuning.arena.collapse_count = 20;
    assert_eq!(fields(&tuning), vec!["collapse_count"]);
}

#[test]
fn test_arena_needs_a_floor_and_valid_spawns() {
    let mut tuning = EncounterTuning::default();
    for platform in &mut tuning.arena.platforms {
        platform.collapsible = true;
    }
    tuning.arena.player_spawn = (-5.0, 100.0);

    let found = fields(&tuning);
    assert!(found.contains(&"platforms"));
    assert!(found.contains(&"player_spawn"));
}

#[test]
fn test_load_reports_every_validation_error() {
    let dir = std::env::temp_dir().join("hero_tower_content_tests");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("invalid.ron");
    std::fs::write(&path, "(boss: (max_health: 0), player: (max_health: 0))").unwrap();

    let errors = load_encounter_tuning(&path).unwrap_err();
    let messages: Vec<String> = errors.iter().map(|e| e.message.clone()).collect();
    assert!(messages.iter().any(|m| m.starts_with("boss.max_health")));
    assert!(messages.iter().any(|m| m.starts_with("player.max_health")));
}
