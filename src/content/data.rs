//! Data definitions for the encounter tuning file.
//!
//! These structs mirror assets/data/encounter_tuning.ron. Every struct carries
//! `#[serde(default)]` so a file only needs the values it overrides. All frame
//! counts assume the fixed 60 Hz simulation tick.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Root
// ============================================================================

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EncounterTuning {
    pub schema_version: u32,
    /// Seeds the boss and arena RNG streams.
    pub seed: u64,
    pub arena: ArenaTuning,
    pub boss: BossTuning,
    pub patterns: PatternTimings,
    pub combat: CombatTuning,
    pub player: PlayerTuning,
}

impl Default for EncounterTuning {
    fn default() -> Self {
        Self {
            schema_version: 1,
            seed: 42,
            arena: ArenaTuning::default(),
            boss: BossTuning::default(),
            patterns: PatternTimings::default(),
            combat: CombatTuning::default(),
            player: PlayerTuning::default(),
        }
    }
}

// ============================================================================
// Arena
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArenaTuning {
    pub width: f32,
    pub height: f32,
    pub platforms: Vec<PlatformDef>,
    pub boss_spawn: (f32, f32),
    pub player_spawn: (f32, f32),
    /// Boss health at or below which the ledges start to collapse
    pub collapse_hp_threshold: u32,
    pub collapse_count: usize,
    pub collapse_warning_frames: u32,
    pub collapse_crumble_frames: u32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 700.0,
            platforms: vec![
                PlatformDef::solid(0.0, 650.0, 1000.0, 50.0),
                PlatformDef::ledge(200.0, 550.0, 600.0, 30.0),
                PlatformDef::ledge(50.0, 450.0, 130.0, 20.0),
                PlatformDef::ledge(820.0, 450.0, 130.0, 20.0),
                PlatformDef::ledge(100.0, 350.0, 150.0, 20.0),
                PlatformDef::ledge(425.0, 350.0, 150.0, 20.0),
                PlatformDef::ledge(750.0, 350.0, 150.0, 20.0),
                PlatformDef::ledge(250.0, 250.0, 150.0, 20.0),
                PlatformDef::ledge(550.0, 250.0, 150.0, 20.0),
            ],
            boss_spawn: (452.0, 480.0),
            player_spawn: (100.0, 500.0),
            collapse_hp_threshold: 30,
            collapse_count: 2,
            collapse_warning_frames: 60,
            collapse_crumble_frames: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlatformDef {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub collapsible: bool,
}

impl PlatformDef {
    pub fn solid(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            collapsible: false,
        }
    }

    pub fn ledge(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            collapsible: true,
        }
    }
}

// ============================================================================
// Boss
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BossTuning {
    pub width: f32,
    pub height: f32,
    pub max_health: u32,
    /// At or below this health the shield is gone for good and berserk starts
    pub vulnerable_threshold: u32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub jump_impulse: f32,
    /// Horizontal homing speed while falling out of a jump
    pub homing_speed: f32,
    pub charge_speed: f32,
    /// Per-frame multiplier applied to the charge velocity
    pub charge_drag: f32,
    /// A charge ends cleanly once its speed drops below this
    pub charge_end_speed: f32,
    /// A charge faster than this that hits an obstacle stuns the boss
    pub charge_stun_speed: f32,
    pub ground_friction: f32,
    pub stun_frames: u32,
    pub cooldown_frames: u32,
    pub berserk_cooldown_frames: u32,
    pub hit_flash_frames: u32,
    pub knockback: f32,
    pub telegraph_frames: u32,
    pub teleport_offset: (f32, f32),
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            width: 96.0,
            height: 96.0,
            max_health: 100,
            vulnerable_threshold: 10,
            gravity: 0.8,
            max_fall_speed: 20.0,
            jump_impulse: 18.0,
            homing_speed: 3.0,
            charge_speed: 15.0,
            charge_drag: 0.985,
            charge_end_speed: 5.0,
            charge_stun_speed: 10.0,
            ground_friction: 0.85,
            stun_frames: 90,
            cooldown_frames: 60,
            berserk_cooldown_frames: 30,
            hit_flash_frames: 10,
            knockback: 10.0,
            telegraph_frames: 45,
            teleport_offset: (80.0, 100.0),
        }
    }
}

// ============================================================================
// Pattern timings
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PatternTimings {
    pub jump: JumpTiming,
    pub flame: FlameTiming,
    pub charge: ChargeTiming,
    pub slash: SlashTiming,
    pub teleport: TeleportTiming,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JumpTiming {
    pub telegraph: u32,
    pub min_airtime: u32,
    pub vulnerable: u32,
    pub recovery: u32,
}

impl Default for JumpTiming {
    fn default() -> Self {
        Self {
            telegraph: 30,
            min_airtime: 10,
            vulnerable: 90,
            recovery: 90,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FlameTiming {
    pub charge: u32,
    /// Frames between shots inside the firing phase
    pub interval: u32,
    /// One angle offset (radians) per shot
    pub angles: Vec<f32>,
    pub window: u32,
    pub vulnerable: u32,
    pub recovery: u32,
}

impl Default for FlameTiming {
    fn default() -> Self {
        Self {
            charge: 40,
            interval: 10,
            angles: vec![0.0, -0.3, 0.3],
            window: 40,
            vulnerable: 60,
            recovery: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChargeTiming {
    pub telegraph: u32,
    pub vulnerable: u32,
    pub recovery: u32,
}

impl Default for ChargeTiming {
    fn default() -> Self {
        Self {
            telegraph: 20,
            vulnerable: 60,
            recovery: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SlashTiming {
    pub windup: u32,
    pub interval: u32,
    pub strikes: u32,
    pub vulnerable: u32,
    pub recovery: u32,
}

impl Default for SlashTiming {
    fn default() -> Self {
        Self {
            windup: 15,
            interval: 15,
            strikes: 3,
            vulnerable: 60,
            recovery: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TeleportTiming {
    pub windup: u32,
    pub strike_frame: u32,
    pub end_frame: u32,
}

impl Default for TeleportTiming {
    fn default() -> Self {
        Self {
            windup: 20,
            strike_frame: 5,
            end_frame: 20,
        }
    }
}

// ============================================================================
// Combat resolution
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CombatTuning {
    pub shockwave_radius: f32,
    pub slash_range: f32,
    /// Strike index that also releases a sword beam
    pub sword_beam_strike: u32,
    pub boss_attack_damage: u32,
    pub contact_damage: u32,
    pub melee_damage: u32,
    pub ranged_damage: u32,
    pub hit_shake_frames: u32,
    pub fire_shake_frames: u32,
    pub shockwave_shake_frames: u32,
    pub collapse_shake_frames: u32,
    pub shake_intensity: f32,
    pub projectile_size: (f32, f32),
    pub boss_projectile_speed: f32,
    pub player_projectile_speed: f32,
    pub projectile_lifetime: u32,
    pub offscreen_margin: f32,
    pub fire_height: f32,
    pub fire_max_width: f32,
    pub fire_duration: u32,
    pub fire_damage_interval: u32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            shockwave_radius: 200.0,
            slash_range: 80.0,
            sword_beam_strike: 2,
            boss_attack_damage: 1,
            contact_damage: 1,
            melee_damage: 1,
            ranged_damage: 5,
            hit_shake_frames: 5,
            fire_shake_frames: 5,
            shockwave_shake_frames: 10,
            collapse_shake_frames: 30,
            shake_intensity: 5.0,
            projectile_size: (16.0, 16.0),
            boss_projectile_speed: 6.0,
            player_projectile_speed: 10.0,
            projectile_lifetime: 180,
            offscreen_margin: 50.0,
            fire_height: 30.0,
            fire_max_width: 100.0,
            fire_duration: 300,
            fire_damage_interval: 30,
        }
    }
}

// ============================================================================
// Player
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    pub max_health: u32,
    pub speed: f32,
    pub jump_power: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub invincible_frames: u32,
    pub dash_speed: f32,
    pub dash_frames: u32,
    pub dash_cooldown: u32,
    pub melee_range: f32,
    pub melee_cooldown: u32,
    pub melee_swing_frames: u32,
    pub ranged_cooldown: u32,
    pub hit_flash_frames: u32,
    /// The boss stage hands the player a sword on entry
    pub starts_with_sword: bool,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 30.0,
            height: 40.0,
            max_health: 5,
            speed: 5.0,
            jump_power: 15.0,
            gravity: 0.8,
            max_fall_speed: 20.0,
            invincible_frames: 60,
            dash_speed: 15.0,
            dash_frames: 10,
            dash_cooldown: 60,
            melee_range: 50.0,
            melee_cooldown: 20,
            melee_swing_frames: 15,
            ranged_cooldown: 30,
            hit_flash_frames: 10,
            starts_with_sword: true,
        }
    }
}
