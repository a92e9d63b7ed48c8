use super::{FillMode, ToolEffect, ToolInput};
use crate::geometry::CanvasPoint;
use crate::surface::{rect_interior, DrawingContext};

pub(super) fn line(input: ToolInput<'_>, from: CanvasPoint, to: CanvasPoint) -> ToolEffect {
    if from == to {
        return ToolEffect::None;
    }
    let settings = *input.settings;
    let color = input.colors.primary;
    if let Some(preview) = input.preview {
        DrawingContext::new(preview)
            .with_antialias(settings.antialiasing)
            .stroke_line(from, to, settings.width, color);
    }
    ToolEffect::None
}

pub(super) fn rectangle(input: ToolInput<'_>, from: CanvasPoint, to: CanvasPoint) -> ToolEffect {
    if from == to {
        return ToolEffect::None;
    }
    let settings = *input.settings;
    let colors = input.colors;
    let Some(preview) = input.preview else {
        return ToolEffect::None;
    };
    let mut ctx = DrawingContext::new(preview).with_antialias(settings.antialiasing);
    match settings.fill_mode {
        FillMode::Primary => ctx.fill_rect(from, to, colors.primary),
        FillMode::Transparent => ctx.stroke_rect(from, to, settings.width, colors.primary),
        FillMode::Secondary => {
            ctx.stroke_rect(from, to, settings.width, colors.primary);
            if let Some((lo, hi)) = rect_interior(from, to, settings.width) {
                ctx.fill_rect(lo, hi, colors.secondary);
            }
        }
    }
    ToolEffect::None
}

pub(super) fn ellipse(input: ToolInput<'_>, from: CanvasPoint, to: CanvasPoint) -> ToolEffect {
    if from == to {
        return ToolEffect::None;
    }
    let settings = *input.settings;
    let colors = input.colors;
    let Some(preview) = input.preview else {
        return ToolEffect::None;
    };
    let mut ctx = DrawingContext::new(preview).with_antialias(settings.antialiasing);
    match settings.fill_mode {
        FillMode::Primary => ctx.fill_ellipse(from, to, colors.primary),
        FillMode::Transparent => ctx.stroke_ellipse(from, to, settings.width, colors.primary),
        FillMode::Secondary => {
            ctx.stroke_ellipse(from, to, settings.width, colors.primary);
            ctx.fill_ellipse_inset(from, to, settings.width, colors.secondary);
        }
    }
    ToolEffect::None
}

pub(super) fn triangle(input: ToolInput<'_>, from: CanvasPoint, to: CanvasPoint) -> ToolEffect {
    if from == to {
        return ToolEffect::None;
    }
    let settings = *input.settings;
    let colors = input.colors;
    let Some(preview) = input.preview else {
        return ToolEffect::None;
    };
    let mut ctx = DrawingContext::new(preview).with_antialias(settings.antialiasing);
    match settings.fill_mode {
        FillMode::Primary => ctx.fill_triangle(from, to, colors.primary),
        FillMode::Transparent => ctx.stroke_triangle(from, to, settings.width, colors.primary),
        FillMode::Secondary => {
            ctx.stroke_triangle(from, to, settings.width, colors.primary);
            ctx.fill_triangle_inset(from, to, settings.width, colors.secondary);
        }
    }
    ToolEffect::None
}
