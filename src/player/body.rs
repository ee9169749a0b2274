//! Player domain: movement, dashing, attacks, and damage for the player.

use bevy::prelude::*;

use crate::content::PlayerTuning;
use crate::physics::{Body, Facing, Platform, Rect, StepParams, attack_box, clamp_to_arena};
use crate::player::{PlayerInput, PlayerSnapshot, PlayerTarget};

#[derive(Debug, Clone)]
pub struct PlayerBody {
    pub body: Body,
    pub facing: Facing,
    pub health: u32,
    pub max_health: u32,
    pub invincible_frames: u32,
    pub hit_flash: u32,
    pub has_sword: bool,
    pub dash_frames: u32,
    pub dash_cooldown: u32,
    dash_direction: Facing,
    pub melee_cooldown: u32,
    pub swing_frames: u32,
    pub ranged_cooldown: u32,
    tuning: PlayerTuning,
}

impl PlayerBody {
    pub fn new(tuning: &PlayerTuning, spawn: Vec2) -> Self {
        Self {
            body: Body::new(spawn, Vec2::new(tuning.width, tuning.height)),
            facing: Facing::Right,
            health: tuning.max_health,
            max_health: tuning.max_health,
            invincible_frames: 0,
            hit_flash: 0,
            has_sword: tuning.starts_with_sword,
            dash_frames: 0,
            dash_cooldown: 0,
            dash_direction: Facing::Right,
            melee_cooldown: 0,
            swing_frames: 0,
            ranged_cooldown: 0,
            tuning: tuning.clone(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Swing animation hook for rendering.
    pub fn is_attacking(&self) -> bool {
        self.swing_frames > 0
    }

    /// Dash trail hook for rendering.
    pub fn is_dashing(&self) -> bool {
        self.dash_frames > 0
    }

    /// Move one frame. Attacks are started separately by the combat loop.
    pub fn update(&mut self, input: &PlayerInput, platforms: &[Platform], arena_width: f32) {
        self.tick_timers();

        if input.dash {
            self.start_dash();
        }

        if self.dash_frames > 0 {
            self.body.velocity.x = self.dash_direction.sign() * self.tuning.dash_speed;
            self.dash_frames -= 1;
            if self.dash_frames == 0 {
                self.body.velocity.x = 0.0;
            }
        } else {
            self.body.velocity.x = 0.0;
            if input.axis < 0.0 {
                self.body.velocity.x = -self.tuning.speed;
                self.facing = Facing::Left;
            } else if input.axis > 0.0 {
                self.body.velocity.x = self.tuning.speed;
                self.facing = Facing::Right;
            }
        }

        if input.jump && self.body.grounded {
            self.body.velocity.y = -self.tuning.jump_power;
            self.body.grounded = false;
        }

        let params = StepParams {
            gravity: self.tuning.gravity,
            max_fall_speed: self.tuning.max_fall_speed,
            friction: 1.0,
            pass_through_ledges: false,
        };
        self.body.step(&params, platforms);
        clamp_to_arena(&mut self.body, arena_width);
    }

    fn tick_timers(&mut self) {
        self.invincible_frames = self.invincible_frames.saturating_sub(1);
        self.hit_flash = self.hit_flash.saturating_sub(1);
        self.dash_cooldown = self.dash_cooldown.saturating_sub(1);
        self.melee_cooldown = self.melee_cooldown.saturating_sub(1);
        self.ranged_cooldown = self.ranged_cooldown.saturating_sub(1);
        self.swing_frames = self.swing_frames.saturating_sub(1);
    }

    /// Dash in the facing direction. Dashing grants invincibility.
    pub fn start_dash(&mut self) -> bool {
        if self.dash_cooldown > 0 {
            return false;
        }
        self.dash_direction = self.facing;
        self.dash_frames = self.tuning.dash_frames;
        self.dash_cooldown = self.tuning.dash_cooldown;
        self.invincible_frames = self.tuning.invincible_frames;
        true
    }

    pub fn can_attack(&self) -> bool {
        self.has_sword && self.melee_cooldown == 0
    }

    pub fn start_attack(&mut self) -> bool {
        if !self.can_attack() {
            return false;
        }
        self.swing_frames = self.tuning.melee_swing_frames;
        self.melee_cooldown = self.tuning.melee_cooldown;
        true
    }

    pub fn start_ranged_attack(&mut self) -> bool {
        if self.ranged_cooldown > 0 {
            return false;
        }
        self.ranged_cooldown = self.tuning.ranged_cooldown;
        true
    }

    /// Sword hitbox in front of the player.
    pub fn attack_box(&self) -> Rect {
        attack_box(self.body.rect(), self.facing, self.tuning.melee_range)
    }

    /// Where a ranged shot leaves the player.
    pub fn muzzle(&self) -> Vec2 {
        let x = match self.facing {
            Facing::Right => self.body.position.x + self.body.size.x,
            Facing::Left => self.body.position.x,
        };
        Vec2::new(x, self.body.position.y + 15.0)
    }
}

impl PlayerTarget for PlayerBody {
    fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.body.position,
            size: self.body.size,
            facing: self.facing,
            grounded: self.body.grounded,
            invincible_frames: self.invincible_frames,
        }
    }

    fn apply_damage(&mut self, amount: u32) -> bool {
        if self.invincible_frames > 0 || !self.is_alive() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        self.invincible_frames = self.tuning.invincible_frames;
        self.hit_flash = self.tuning.hit_flash_frames;
        if self.health == 0 {
            info!("Player defeated");
        }
        true
    }
}
