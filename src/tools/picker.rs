use super::{ToolEffect, ToolInput};
use crate::geometry::CanvasPoint;

/// Samples the main surface; points off the canvas pick nothing.
pub(super) fn pick(input: ToolInput<'_>, point: CanvasPoint) -> ToolEffect {
    if !input.main.size().contains(point) {
        return ToolEffect::None;
    }
    let color = input.main.get_pixel(point.x as u32, point.y as u32);
    ToolEffect::PickColor(color)
}
