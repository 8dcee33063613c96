use glam::Vec2;

/// Drag-to-look tracking for one pointer press.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub active: bool,
    pub origin: Vec2,
    pub last: Vec2,
    /// Furthest the pointer has been from `origin` during this press.
    pub travelled: f32,
}

impl DragState {
    pub fn begin(&mut self, pos: Vec2) {
        *self = Self {
            active: true,
            origin: pos,
            last: pos,
            travelled: 0.0,
        };
    }

    /// Movement since the previous pointer event; zero when not dragging.
    pub fn update(&mut self, pos: Vec2) -> Vec2 {
        if !self.active {
            return Vec2::ZERO;
        }
        let delta = pos - self.last;
        self.last = pos;
        self.travelled = self.travelled.max(pos.distance(self.origin));
        delta
    }

    /// Release the press. Returns true when it never left `slop` and so
    /// counts as a click.
    pub fn end(&mut self, pos: Vec2, slop: f32) -> bool {
        if !self.active {
            return false;
        }
        self.update(pos);
        self.active = false;
        self.travelled <= slop
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    CloseArtifact,
    ToggleNarration,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "Escape" => Some(KeyAction::CloseArtifact),
        "n" | "N" => Some(KeyAction::ToggleNarration),
        _ => None,
    }
}

/// Top-left corner of the tooltip for a pointer at `pointer`.
#[inline]
pub fn tooltip_position(pointer: Vec2, offset: f32) -> Vec2 {
    pointer + Vec2::splat(offset)
}
