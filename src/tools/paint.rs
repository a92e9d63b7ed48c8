use super::{ToolEffect, ToolInput};
use crate::geometry::{CanvasPoint, CanvasSize};
use crate::surface::DrawingContext;

pub(super) fn freehand_dot(input: ToolInput<'_>, point: CanvasPoint) -> ToolEffect {
    let color = input.colors.primary;
    if let Some(preview) = input.preview {
        DrawingContext::new(preview).plot(point, color);
    }
    ToolEffect::None
}

pub(super) fn freehand_segment(input: ToolInput<'_>, point: CanvasPoint) -> ToolEffect {
    let (from, color) = (input.last_point, input.colors.primary);
    if let Some(preview) = input.preview {
        DrawingContext::new(preview).stroke_line(from, point, 1.0, color);
    }
    ToolEffect::None
}

/// Point reflection through the canvas center.
fn mirrored(point: CanvasPoint, canvas: CanvasSize) -> CanvasPoint {
    let reflect = |value: i32, extent: u32| {
        let mirrored = i64::from(extent) - i64::from(value) - 1;
        mirrored.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    };
    CanvasPoint::new(
        reflect(point.x, canvas.width),
        reflect(point.y, canvas.height),
    )
}

pub(super) fn symmetric_dot(input: ToolInput<'_>, point: CanvasPoint) -> ToolEffect {
    let (canvas, color) = (input.main.size(), input.colors.primary);
    if let Some(preview) = input.preview {
        let mut ctx = DrawingContext::new(preview);
        ctx.plot(point, color);
        ctx.plot(mirrored(point, canvas), color);
    }
    ToolEffect::None
}

pub(super) fn symmetric_segment(input: ToolInput<'_>, point: CanvasPoint) -> ToolEffect {
    let (canvas, from, color) = (input.main.size(), input.last_point, input.colors.primary);
    if let Some(preview) = input.preview {
        let mut ctx = DrawingContext::new(preview);
        ctx.stroke_line(from, point, 1.0, color);
        ctx.stroke_line(mirrored(from, canvas), mirrored(point, canvas), 1.0, color);
    }
    ToolEffect::None
}

pub(super) fn brush_dab(input: ToolInput<'_>, point: CanvasPoint) -> ToolEffect {
    let settings = *input.settings;
    let color = input.colors.primary;
    if let Some(preview) = input.preview {
        DrawingContext::new(preview)
            .with_antialias(settings.antialiasing)
            .fill_square(point, settings.brush_size, color);
    }
    ToolEffect::None
}

pub(super) fn brush_segment(input: ToolInput<'_>, point: CanvasPoint) -> ToolEffect {
    let settings = *input.settings;
    let (from, color) = (input.last_point, input.colors.primary);
    if let Some(preview) = input.preview {
        DrawingContext::new(preview)
            .with_antialias(settings.antialiasing)
            .stroke_line(from, point, settings.brush_size, color);
    }
    ToolEffect::None
}

/// The eraser paints the secondary color onto a preview that already holds
/// the whole canvas.
pub(super) fn eraser_dab(input: ToolInput<'_>, point: CanvasPoint) -> ToolEffect {
    let settings = *input.settings;
    let color = input.colors.secondary;
    if let Some(preview) = input.preview {
        DrawingContext::new(preview)
            .with_antialias(settings.antialiasing)
            .fill_square(point, settings.eraser_size, color);
    }
    ToolEffect::None
}

pub(super) fn eraser_segment(input: ToolInput<'_>, point: CanvasPoint) -> ToolEffect {
    let settings = *input.settings;
    let (from, color) = (input.last_point, input.colors.secondary);
    if let Some(preview) = input.preview {
        let mut ctx = DrawingContext::new(preview).with_antialias(settings.antialiasing);
        ctx.stroke_line(from, point, settings.eraser_size, color);
        ctx.fill_square(point, settings.eraser_size, color);
    }
    ToolEffect::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Color;
    use crate::surface::test_support::{count_pixels, filled};
    use crate::surface::Surface;
    use crate::tools::test_support::{input, BLUE, RED};
    use crate::tools::{ToolKind, ToolSettings};

    fn blank(width: u32, height: u32) -> Surface {
        Surface::new(width, height).expect("test surface should allocate")
    }

    #[test]
    fn freehand_press_plots_single_pixel_and_motion_connects() {
        let main = blank(10, 10);
        let mut preview = blank(10, 10);
        let settings = ToolSettings::default();
        let start = CanvasPoint::new(2, 5);

        ToolKind::Freehand.draw(input(&main, &mut preview, &settings, start), start, start);
        assert_eq!(count_pixels(&preview, RED), 1);

        ToolKind::Freehand.motion(
            input(&main, &mut preview, &settings, start),
            CanvasPoint::new(6, 5),
        );
        assert_eq!(count_pixels(&preview, RED), 5);
    }

    #[test]
    fn symmetric_freehand_mirrors_through_canvas_center() {
        let main = blank(10, 8);
        let mut preview = blank(10, 8);
        let settings = ToolSettings::default();
        let point = CanvasPoint::new(1, 2);

        ToolKind::SymmetricFreehand.draw(input(&main, &mut preview, &settings, point), point, point);
        assert_eq!(preview.get_pixel(1, 2), RED);
        assert_eq!(preview.get_pixel(8, 5), RED);
        assert_eq!(count_pixels(&preview, RED), 2);
    }

    #[test]
    fn symmetric_segment_draws_mirrored_line() {
        let main = blank(10, 10);
        let mut preview = blank(10, 10);
        let settings = ToolSettings::default();

        ToolKind::SymmetricFreehand.motion(
            input(&main, &mut preview, &settings, CanvasPoint::new(0, 0)),
            CanvasPoint::new(3, 0),
        );
        assert_eq!(preview.get_pixel(9, 9), RED);
        assert_eq!(preview.get_pixel(6, 9), RED);
        assert_eq!(count_pixels(&preview, RED), 8);
    }

    #[test]
    fn brush_dab_uses_brush_size() {
        let main = blank(10, 10);
        let mut preview = blank(10, 10);
        let settings = ToolSettings {
            brush_size: 3.0,
            ..ToolSettings::default()
        };
        let point = CanvasPoint::new(4, 4);

        ToolKind::Brush.draw(input(&main, &mut preview, &settings, point), point, point);
        assert_eq!(count_pixels(&preview, RED), 9);
    }

    #[test]
    fn eraser_paints_secondary_color_over_copied_canvas() {
        let main = filled(10, 10, Color::WHITE);
        let mut preview = main.duplicate();
        let settings = ToolSettings {
            eraser_size: 2.0,
            ..ToolSettings::default()
        };
        let point = CanvasPoint::new(5, 5);

        ToolKind::Eraser.draw(input(&main, &mut preview, &settings, point), point, point);
        assert_eq!(count_pixels(&preview, BLUE), 4);
        assert_eq!(count_pixels(&preview, Color::WHITE), 96);

        ToolKind::Eraser.motion(input(&main, &mut preview, &settings, point), CanvasPoint::new(8, 5));
        assert_eq!(preview.get_pixel(7, 5), BLUE);
        assert_eq!(preview.get_pixel(8, 5), BLUE);
        // two rows tall, from the first dab's left edge to the last dab's right edge
        assert_eq!(count_pixels(&preview, BLUE), 2 * 5);
        assert_eq!(preview.get_pixel(6, 6), Color::WHITE);
        assert_eq!(preview.get_pixel(9, 5), Color::WHITE);
    }
}
