//! Physics domain: gravity integration and platform resolution for dynamic bodies.

use bevy::prelude::*;

use crate::physics::{Platform, Rect};

/// Landing tolerance for pass-through ledges, in pixels.
const LEDGE_EPSILON: f32 = 0.01;

/// A dynamic box: top-left position, per-frame velocity, size.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    pub grounded: bool,
}

/// Per-body constants for one physics step.
#[derive(Debug, Clone, Copy)]
pub struct StepParams {
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Horizontal velocity multiplier applied while grounded. 1.0 disables it.
    pub friction: f32,
    /// Collapsible ledges only catch the body from above; they never block
    /// it sideways or from below.
    pub pass_through_ledges: bool,
}

/// What the body touched during a step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Contacts {
    pub landed: bool,
    pub ceiling: bool,
    /// Horizontal speed at the moment the body ran into a platform side
    pub wall_impact: Option<f32>,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
            grounded: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }

    /// Integrate one frame: vertical move and resolve, then horizontal move
    /// and resolve. Invisible platforms are skipped.
    pub fn step(&mut self, params: &StepParams, platforms: &[Platform]) -> Contacts {
        let mut contacts = Contacts::default();

        // Vertical
        self.velocity.y = (self.velocity.y + params.gravity).min(params.max_fall_speed);
        let previous_bottom = self.position.y + self.size.y;
        self.position.y += self.velocity.y;
        self.grounded = false;

        for platform in platforms.iter().filter(|p| p.visible) {
            let rect = self.rect();
            if !rect.overlaps(&platform.rect) {
                continue;
            }
            let ledge = params.pass_through_ledges && platform.collapsible;

            if self.velocity.y > 0.0 {
                if ledge && previous_bottom > platform.rect.y + LEDGE_EPSILON {
                    continue;
                }
                self.position.y = platform.rect.y - self.size.y;
                self.velocity.y = 0.0;
                self.grounded = true;
                contacts.landed = true;
            } else if self.velocity.y < 0.0 && !ledge {
                self.position.y = platform.rect.bottom();
                self.velocity.y = 0.0;
                contacts.ceiling = true;
            }
        }

        // Horizontal
        if self.grounded {
            self.velocity.x *= params.friction;
        }
        self.position.x += self.velocity.x;

        for platform in platforms.iter().filter(|p| p.visible) {
            if params.pass_through_ledges && platform.collapsible {
                continue;
            }
            let rect = self.rect();
            if !rect.overlaps(&platform.rect) {
                continue;
            }

            if self.velocity.x > 0.0 {
                self.position.x = platform.rect.x - self.size.x;
            } else if self.velocity.x < 0.0 {
                self.position.x = platform.rect.right();
            } else {
                continue;
            }
            contacts.wall_impact = Some(self.velocity.x.abs());
            self.velocity.x = 0.0;
        }

        contacts
    }
}

/// Keep the body inside `[0, width]`. Returns true when it had to be pushed back.
pub fn clamp_to_arena(body: &mut Body, width: f32) -> bool {
    if body.position.x < 0.0 {
        body.position.x = 0.0;
    } else if body.position.x + body.size.x > width {
        body.position.x = width - body.size.x;
    } else {
        return false;
    }
    body.velocity.x = 0.0;
    true
}
