//! Physics domain: static platforms and the collapse sequence.

use crate::content::PlatformDef;
use crate::physics::Rect;

/// Progress of a collapsing platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collapse {
    pub elapsed: u32,
}

#[derive(Debug, Clone)]
pub struct Platform {
    pub rect: Rect,
    /// Invisible platforms are ignored by every collision query
    pub visible: bool,
    pub collapsible: bool,
    pub collapse: Option<Collapse>,
}

impl Platform {
    pub fn solid(rect: Rect) -> Self {
        Self {
            rect,
            visible: true,
            collapsible: false,
            collapse: None,
        }
    }

    pub fn ledge(rect: Rect) -> Self {
        Self {
            collapsible: true,
            ..Self::solid(rect)
        }
    }

    pub fn is_collapsing(&self) -> bool {
        self.collapse.is_some()
    }

    /// Whether the warning flash is showing (collapsing but not yet crumbling).
    /// Read by rendering only.
    pub fn is_warning(&self, warning_frames: u32) -> bool {
        self.visible && self.collapse.is_some_and(|c| c.elapsed < warning_frames)
    }

    pub fn start_collapse(&mut self) {
        if self.collapse.is_none() {
            self.collapse = Some(Collapse { elapsed: 0 });
        }
    }

    /// Advance a running collapse. Returns true on the frame the platform vanishes.
    pub fn update_collapse(&mut self, warning_frames: u32, crumble_frames: u32) -> bool {
        let Some(collapse) = self.collapse.as_mut() else {
            return false;
        };
        if !self.visible {
            return false;
        }

        collapse.elapsed += 1;
        if collapse.elapsed >= warning_frames + crumble_frames {
            self.visible = false;
            return true;
        }
        false
    }
}

impl From<&PlatformDef> for Platform {
    fn from(def: &PlatformDef) -> Self {
        let rect = Rect::new(def.x, def.y, def.width, def.height);
        if def.collapsible {
            Platform::ledge(rect)
        } else {
            Platform::solid(rect)
        }
    }
}

/// Visible platforms overlapping `rect`.
pub fn overlapping(platforms: &[Platform], rect: Rect) -> impl Iterator<Item = &Platform> {
    platforms
        .iter()
        .filter(move |p| p.visible && p.rect.overlaps(&rect))
}
