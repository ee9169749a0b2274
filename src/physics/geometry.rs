//! Physics domain: axis-aligned boxes, facing, and attack hitboxes.

use bevy::prelude::*;

/// Axis-aligned box anchored at its top-left corner (screen space, +y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: boxes that only share an edge do not touch.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Facing toward `target_x` from `from_x`; ties face left.
    pub fn toward(from_x: f32, target_x: f32) -> Self {
        if target_x > from_x {
            Facing::Right
        } else {
            Facing::Left
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

/// Hitbox of a horizontal swing: as tall as the owner, `range` wide, flush
/// against the side the owner faces.
pub fn attack_box(owner: Rect, facing: Facing, range: f32) -> Rect {
    let x = match facing {
        Facing::Right => owner.right(),
        Facing::Left => owner.x - range,
    };
    Rect::new(x, owner.y, range, owner.h)
}
