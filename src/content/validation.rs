//! Validation for tuning values the simulation cannot run with.

use super::data::EncounterTuning;

/// A validation error naming the offending field.
#[derive(Debug)]
pub struct ValidationError {
    pub section: &'static str,
    pub field: &'static str,
    pub reason: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}: {}", self.section, self.field, self.reason)
    }
}

/// Helper macro for pushing an error when a condition fails
macro_rules! check {
    ($errors:expr, $cond:expr, $section:expr, $field:expr, $($reason:tt)+) => {
        if !$cond {
            $errors.push(ValidationError {
                section: $section,
                field: $field,
                reason: format!($($reason)+),
            });
        }
    };
}

/// Validate the whole tuning file.
/// Returns a list of validation errors, empty if the tuning is usable.
pub fn validate_tuning(tuning: &EncounterTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Boss
    let boss = &tuning.boss;
    check!(errors, boss.max_health > 0, "boss", "max_health", "must be positive");
    check!(
        errors,
        boss.vulnerable_threshold < boss.max_health,
        "boss",
        "vulnerable_threshold",
        "{} must be below max_health {}",
        boss.vulnerable_threshold,
        boss.max_health
    );
    check!(
        errors,
        boss.width > 0.0 && boss.height > 0.0,
        "boss",
        "width/height",
        "must be positive"
    );
    check!(
        errors,
        boss.charge_end_speed < boss.charge_speed,
        "boss",
        "charge_end_speed",
        "must be below charge_speed"
    );
    check!(errors, boss.stun_frames > 0, "boss", "stun_frames", "must be non-zero");

    // Patterns
    let p = &tuning.patterns;
    for (field, frames) in [
        ("jump.telegraph", p.jump.telegraph),
        ("jump.vulnerable", p.jump.vulnerable),
        ("jump.recovery", p.jump.recovery),
        ("flame.charge", p.flame.charge),
        ("flame.interval", p.flame.interval),
        ("flame.vulnerable", p.flame.vulnerable),
        ("flame.recovery", p.flame.recovery),
        ("charge.telegraph", p.charge.telegraph),
        ("charge.vulnerable", p.charge.vulnerable),
        ("charge.recovery", p.charge.recovery),
        ("slash.windup", p.slash.windup),
        ("slash.interval", p.slash.interval),
        ("slash.vulnerable", p.slash.vulnerable),
        ("slash.recovery", p.slash.recovery),
        ("teleport.windup", p.teleport.windup),
        ("teleport.end_frame", p.teleport.end_frame),
    ] {
        check!(errors, frames > 0, "patterns", field, "phase length must be non-zero");
    }
    check!(
        errors,
        !p.flame.angles.is_empty(),
        "patterns",
        "flame.angles",
        "needs at least one shot"
    );
    check!(
        errors,
        p.flame.interval * p.flame.angles.len() as u32 <= p.flame.window,
        "patterns",
        "flame.window",
        "{} shots every {} frames do not fit in {} frames",
        p.flame.angles.len(),
        p.flame.interval,
        p.flame.window
    );
    check!(errors, p.slash.strikes > 0, "patterns", "slash.strikes", "must be positive");
    check!(
        errors,
        p.teleport.strike_frame < p.teleport.end_frame,
        "patterns",
        "teleport.strike_frame",
        "must land before end_frame"
    );
    check!(
        errors,
        tuning.combat.sword_beam_strike < p.slash.strikes,
        "combat",
        "sword_beam_strike",
        "index {} is never reached with {} strikes",
        tuning.combat.sword_beam_strike,
        p.slash.strikes
    );

    // Arena
    let arena = &tuning.arena;
    check!(
        errors,
        arena.width > 0.0 && arena.height > 0.0,
        "arena",
        "width/height",
        "must be positive"
    );
    for (field, (x, y)) in [
        ("boss_spawn", arena.boss_spawn),
        ("player_spawn", arena.player_spawn),
    ] {
        check!(
            errors,
            (0.0..arena.width).contains(&x) && (0.0..arena.height).contains(&y),
            "arena",
            field,
            "({}, {}) lies outside the arena",
            x,
            y
        );
    }
    check!(
        errors,
        arena.platforms.iter().any(|p| !p.collapsible),
        "arena",
        "platforms",
        "needs at least one platform that cannot collapse"
    );
    let collapsible = arena.platforms.iter().filter(|p| p.collapsible).count();
    check!(
        errors,
        arena.collapse_count <= collapsible,
        "arena",
        "collapse_count",
        "{} exceeds the {} collapsible platforms",
        arena.collapse_count,
        collapsible
    );

    // Player
    check!(
        errors,
        tuning.player.max_health > 0,
        "player",
        "max_health",
        "must be positive"
    );

    errors
}
