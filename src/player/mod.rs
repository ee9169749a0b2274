//! Player domain: the read-only view the boss sees, the damage seam, and the
//! reference player used by the encounter runner.

mod autopilot;
mod body;

pub use autopilot::autopilot;
pub use body::PlayerBody;

use bevy::prelude::*;

use crate::physics::{Facing, Rect};

/// Player state as the boss and the combat loop see it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    pub position: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    pub grounded: bool,
    pub invincible_frames: u32,
}

impl PlayerSnapshot {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_frames > 0
    }
}

/// Anything the combat loop can hurt.
pub trait PlayerTarget {
    fn snapshot(&self) -> PlayerSnapshot;

    /// Apply damage. Returns false when invincibility swallowed it.
    fn apply_damage(&mut self, amount: u32) -> bool;
}

/// One frame of player intent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// -1.0 left, 1.0 right, 0.0 idle
    pub axis: f32,
    pub jump: bool,
    pub dash: bool,
    pub melee: bool,
    pub ranged: bool,
}
