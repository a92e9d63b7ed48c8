use super::{ToolEffect, ToolInput};
use crate::fill::flood_fill;
use crate::geometry::CanvasPoint;

/// Flood-fills the preview, which the session primed with a copy of the
/// canvas, starting at the pressed pixel.
pub(super) fn fill(input: ToolInput<'_>, seed: CanvasPoint) -> ToolEffect {
    let color = input.colors.primary;
    if let Some(preview) = input.preview {
        flood_fill(preview, seed, color);
    }
    ToolEffect::None
}
