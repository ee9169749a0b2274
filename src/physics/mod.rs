//! Physics domain: box geometry, frame-stepped bodies, and arena platforms.
//!
//! Everything here is a plain value or pure function; the boss, the player and
//! the combat loop each own their bodies and call [`Body::step`] once per frame.

mod body;
mod geometry;
mod platform;

pub use body::{Body, Contacts, StepParams, clamp_to_arena};
pub use geometry::{Facing, Rect, attack_box};
pub use platform::{Collapse, Platform, overlapping};
