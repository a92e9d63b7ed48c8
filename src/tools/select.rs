use super::ToolEffect;
use crate::geometry::{CanvasPoint, CanvasRect};

pub(super) fn span(from: CanvasPoint, to: CanvasPoint) -> ToolEffect {
    ToolEffect::Select(CanvasRect::from_corners(from, to))
}
