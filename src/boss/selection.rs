//! Boss domain: weighted pattern selection.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::boss::PatternKind;

/// Horizontal distance below which the boss prefers close-range patterns.
pub const CLOSE_RANGE: f32 = 100.0;
/// Horizontal distance below which the boss prefers mid-range patterns.
pub const MID_RANGE: f32 = 300.0;

const CLOSE_WEIGHTS: &[(PatternKind, u32)] = &[(PatternKind::Slash, 60), (PatternKind::Jump, 40)];
const MID_WEIGHTS: &[(PatternKind, u32)] = &[
    (PatternKind::Charge, 40),
    (PatternKind::Slash, 30),
    (PatternKind::Flame, 30),
];
const FAR_WEIGHTS: &[(PatternKind, u32)] = &[
    (PatternKind::Flame, 50),
    (PatternKind::Jump, 30),
    (PatternKind::Charge, 20),
];
const BERSERK_WEIGHT: u32 = 20;
const LOW_HEALTH_CHARGE_BONUS: u32 = 20;
const REPEAT_PENALTY: u32 = 30;
const REPEAT_FLOOR: u32 = 5;

/// Candidate patterns and their weights, in draw order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    entries: Vec<(PatternKind, u32)>,
}

impl WeightTable {
    pub fn new(entries: Vec<(PatternKind, u32)>) -> Self {
        Self { entries }
    }

    /// Build the table for the current situation.
    ///
    /// Berserk flattens every pattern to the same weight. Otherwise the
    /// distance bucket picks the base table, low health favours Charge, and the
    /// last pattern loses weight (never below the floor) in either case.
    pub fn for_encounter(
        distance: f32,
        berserk: bool,
        low_health: bool,
        last: Option<PatternKind>,
    ) -> Self {
        let mut entries: Vec<(PatternKind, u32)> = if berserk {
            PatternKind::ALL
                .iter()
                .map(|kind| (*kind, BERSERK_WEIGHT))
                .collect()
        } else if distance < CLOSE_RANGE {
            CLOSE_WEIGHTS.to_vec()
        } else if distance < MID_RANGE {
            MID_WEIGHTS.to_vec()
        } else {
            FAR_WEIGHTS.to_vec()
        };

        if !berserk && low_health {
            for (kind, weight) in entries.iter_mut() {
                if *kind == PatternKind::Charge {
                    *weight += LOW_HEALTH_CHARGE_BONUS;
                }
            }
        }

        if let Some(last) = last {
            for (kind, weight) in entries.iter_mut() {
                if *kind == last {
                    *weight = weight.saturating_sub(REPEAT_PENALTY).max(REPEAT_FLOOR);
                }
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[(PatternKind, u32)] {
        &self.entries
    }

    pub fn weight_of(&self, kind: PatternKind) -> Option<u32> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == kind)
            .map(|(_, weight)| *weight)
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, weight)| weight).sum()
    }

    /// Map a roll in `0..total()` onto the cumulative weights.
    pub fn pick(&self, roll: u32) -> PatternKind {
        let Some(&(fallback, _)) = self.entries.last() else {
            panic!("pattern selection ran with an empty candidate set");
        };

        let mut remaining = roll;
        for &(kind, weight) in &self.entries {
            if remaining < weight {
                return kind;
            }
            remaining -= weight;
        }
        fallback
    }

    /// One uniform draw over the cumulative weights.
    pub fn draw(&self, rng: &mut ChaCha8Rng) -> PatternKind {
        let total = self.total();
        assert!(total > 0, "pattern selection ran with no weight to draw from");
        self.pick(rng.random_range(0..total))
    }
}
