//! Boss encounter simulation for a frame-stepped 2D platformer.

pub mod boss;
pub mod combat;
pub mod content;
pub mod encounter;
pub mod physics;
pub mod player;
