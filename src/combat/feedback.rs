//! Combat domain: presentation cues and screen shake state.

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::combat::ProjectileKind;

/// Colour set a particle burst should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Palette {
    Shockwave,
    BossHit,
    Deflect,
    Teleport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DamageSource {
    Shockwave,
    Slash,
    Contact,
    Projectile(ProjectileKind),
    Fire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttackSource {
    Melee,
    Ranged,
}

/// Something the presentation layer should show or play.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    ParticleBurst {
        at: Vec2,
        count: u32,
        palette: Palette,
    },
    ScreenShake {
        frames: u32,
        intensity: f32,
    },
    BossHit {
        source: AttackSource,
        damage: u32,
        health: u32,
    },
    AttackBlocked {
        source: AttackSource,
    },
    PlayerDamaged {
        source: DamageSource,
    },
    FireIgnited {
        at: Vec2,
    },
    PlatformCollapse {
        index: usize,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenShake {
    pub frames: u32,
    pub intensity: f32,
}

impl ScreenShake {
    /// Replace whatever shake is running.
    pub fn start(&mut self, frames: u32, intensity: f32) {
        self.frames = frames;
        self.intensity = intensity;
    }

    pub fn tick(&mut self) {
        self.frames = self.frames.saturating_sub(1);
    }

    pub fn is_active(&self) -> bool {
        self.frames > 0
    }

    /// Random camera offset for this frame.
    pub fn offset(&self, rng: &mut ChaCha8Rng) -> Vec2 {
        if !self.is_active() || self.intensity <= 0.0 {
            return Vec2::ZERO;
        }
        let i = self.intensity;
        Vec2::new(rng.random_range(-i..=i), rng.random_range(-i..=i))
    }
}
