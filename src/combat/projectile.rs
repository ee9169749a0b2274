//! Combat domain: projectiles and the ground fires fireballs leave behind.

use bevy::prelude::*;
use serde::Serialize;

use crate::content::CombatTuning;
use crate::physics::{Facing, Platform, Rect, overlapping};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProjectileKind {
    Fireball,
    SwordBeam,
    PlayerEnergy,
}

impl ProjectileKind {
    pub fn from_player(self) -> bool {
        matches!(self, ProjectileKind::PlayerEnergy)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    pub lifetime: u32,
    pub active: bool,
}

impl Projectile {
    /// Launch from `origin` (the projectile's top-left) along `direction`,
    /// tilted by `angle` radians (positive tilts downward).
    pub fn launch(
        kind: ProjectileKind,
        origin: Vec2,
        direction: Facing,
        angle: f32,
        combat: &CombatTuning,
    ) -> Self {
        let speed = if kind.from_player() {
            combat.player_projectile_speed
        } else {
            combat.boss_projectile_speed
        };
        let (w, h) = combat.projectile_size;

        Self {
            kind,
            position: origin,
            velocity: Vec2::new(speed * direction.sign() * angle.cos(), speed * angle.sin()),
            size: Vec2::new(w, h),
            lifetime: combat.projectile_lifetime,
            active: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    /// Move one frame; expire when out of time or well outside the arena.
    pub fn update(&mut self, arena: Vec2, margin: f32) {
        if !self.active {
            return;
        }
        self.position += self.velocity;
        self.lifetime = self.lifetime.saturating_sub(1);

        let p = self.position;
        if p.x < -margin
            || p.x > arena.x + margin
            || p.y < -margin
            || p.y > arena.y + margin
            || self.lifetime == 0
        {
            self.active = false;
        }
    }

    /// The platform a descending projectile has dropped onto, if any.
    pub fn landing_platform<'a>(&self, platforms: &'a [Platform]) -> Option<&'a Platform> {
        if self.velocity.y <= 0.0 {
            return None;
        }
        overlapping(platforms, self.rect()).next()
    }
}

/// Receives projectiles spawned during resolution.
pub trait ProjectileSink {
    fn spawn(&mut self, projectile: Projectile);
}

impl ProjectileSink for Vec<Projectile> {
    fn spawn(&mut self, projectile: Projectile) {
        self.push(projectile);
    }
}

/// Burning patch sitting on top of a platform.
#[derive(Debug, Clone, PartialEq)]
pub struct FireHazard {
    pub x: f32,
    /// Platform top the fire stands on
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub remaining: u32,
    pub damage_timer: u32,
    damage_interval: u32,
}

impl FireHazard {
    pub fn new(x: f32, y: f32, platform_width: f32, combat: &CombatTuning) -> Self {
        Self {
            x,
            y,
            width: platform_width.min(combat.fire_max_width),
            height: combat.fire_height,
            remaining: combat.fire_duration,
            damage_timer: 0,
            damage_interval: combat.fire_damage_interval,
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// The flames rise above the platform surface.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y - self.height, self.width, self.height)
    }

    pub fn update(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
        self.damage_timer += 1;
    }

    /// True once per damage interval; resets the interval when it fires.
    pub fn can_damage(&mut self) -> bool {
        if self.damage_timer >= self.damage_interval {
            self.damage_timer = 0;
            return true;
        }
        false
    }
}
