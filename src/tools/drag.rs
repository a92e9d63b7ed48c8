/// Drag hooks of the canvas-drag tool. The pointer reports its offset from
/// the press position; the view wants the step since the previous update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragTracker {
    last_offset: (f64, f64),
    active: bool,
}

impl DragTracker {
    pub fn begin(&mut self) {
        self.last_offset = (0.0, 0.0);
        self.active = true;
    }

    pub fn update(&mut self, offset_x: f64, offset_y: f64) -> Option<(f64, f64)> {
        if !self.active {
            return None;
        }
        let step = (offset_x - self.last_offset.0, offset_y - self.last_offset.1);
        self.last_offset = (offset_x, offset_y);
        Some(step)
    }

    pub fn end(&mut self) -> bool {
        std::mem::take(&mut self.active)
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }
}
