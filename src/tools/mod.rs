mod bucket;
mod drag;
mod paint;
mod picker;
mod select;
mod shapes;

use serde::{Deserialize, Serialize};

use crate::geometry::{CanvasPoint, CanvasRect, Color};
use crate::surface::Surface;

pub use drag::DragTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Freehand,
    SymmetricFreehand,
    Brush,
    Line,
    Rectangle,
    Ellipse,
    Triangle,
    Eraser,
    Bucket,
    Picker,
    SelectRectangle,
    Drag,
}

impl ToolKind {
    pub const ALL: [ToolKind; 12] = [
        Self::Freehand,
        Self::SymmetricFreehand,
        Self::Brush,
        Self::Line,
        Self::Rectangle,
        Self::Ellipse,
        Self::Triangle,
        Self::Eraser,
        Self::Bucket,
        Self::Picker,
        Self::SelectRectangle,
        Self::Drag,
    ];

    pub const fn descriptor(self) -> ToolDescriptor {
        let base = ToolDescriptor {
            kind: self,
            name: self.name(),
            override_main_surface: false,
            draws_while_idle: true,
            continuous: false,
            has_motion: false,
            pans_view: false,
        };
        match self {
            Self::Freehand | Self::SymmetricFreehand | Self::Brush => ToolDescriptor {
                continuous: true,
                has_motion: true,
                ..base
            },
            Self::Eraser => ToolDescriptor {
                override_main_surface: true,
                continuous: true,
                has_motion: true,
                ..base
            },
            Self::Bucket => ToolDescriptor {
                override_main_surface: true,
                continuous: true,
                has_motion: true,
                ..base
            },
            Self::Picker => ToolDescriptor {
                draws_while_idle: false,
                continuous: true,
                has_motion: true,
                ..base
            },
            Self::SelectRectangle => ToolDescriptor {
                draws_while_idle: false,
                ..base
            },
            Self::Drag => ToolDescriptor {
                draws_while_idle: false,
                pans_view: true,
                ..base
            },
            Self::Line | Self::Rectangle | Self::Ellipse | Self::Triangle => base,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Freehand => "freehand",
            Self::SymmetricFreehand => "symmetric_freehand",
            Self::Brush => "brush",
            Self::Line => "line",
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Triangle => "triangle",
            Self::Eraser => "eraser",
            Self::Bucket => "bucket",
            Self::Picker => "picker",
            Self::SelectRectangle => "select_rectangle",
            Self::Drag => "drag",
        }
    }

    /// Runs the tool's `draw` entry point: once on press for continuous
    /// tools, on every move for tools without a motion handler, and once
    /// more on release with the final pair of points.
    pub fn draw(self, input: ToolInput<'_>, from: CanvasPoint, to: CanvasPoint) -> ToolEffect {
        match self {
            Self::Freehand => paint::freehand_dot(input, to),
            Self::SymmetricFreehand => paint::symmetric_dot(input, to),
            Self::Brush => paint::brush_dab(input, from),
            Self::Eraser => paint::eraser_dab(input, from),
            Self::Line => shapes::line(input, from, to),
            Self::Rectangle => shapes::rectangle(input, from, to),
            Self::Ellipse => shapes::ellipse(input, from, to),
            Self::Triangle => shapes::triangle(input, from, to),
            Self::Bucket => bucket::fill(input, to),
            Self::Picker => picker::pick(input, to),
            Self::SelectRectangle => select::span(from, to),
            Self::Drag => ToolEffect::None,
        }
    }

    /// Runs the tool's motion handler, if it has one. Motion handlers
    /// accumulate on the preview from the gesture's last point.
    pub fn motion(self, input: ToolInput<'_>, point: CanvasPoint) -> ToolEffect {
        match self {
            Self::Freehand => paint::freehand_segment(input, point),
            Self::SymmetricFreehand => paint::symmetric_segment(input, point),
            Self::Brush => paint::brush_segment(input, point),
            Self::Eraser => paint::eraser_segment(input, point),
            Self::Picker => picker::pick(input, point),
            Self::Bucket
            | Self::Line
            | Self::Rectangle
            | Self::Ellipse
            | Self::Triangle
            | Self::SelectRectangle
            | Self::Drag => ToolEffect::None,
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Static behavior flags for one tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub kind: ToolKind,
    pub name: &'static str,
    /// The preview starts as a copy of the main surface and replaces it on
    /// release instead of being painted over it.
    pub override_main_surface: bool,
    /// Opens a preview surface on press.
    pub draws_while_idle: bool,
    /// `draw` runs immediately on press.
    pub continuous: bool,
    pub has_motion: bool,
    /// Has drag hooks that scroll the view rather than paint.
    pub pans_view: bool,
}

/// Descriptor table built once at startup and handed to the session.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    descriptors: [ToolDescriptor; 12],
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            descriptors: ToolKind::ALL.map(ToolKind::descriptor),
        }
    }

    pub fn get(&self, kind: ToolKind) -> &ToolDescriptor {
        let index = ToolKind::ALL
            .iter()
            .position(|candidate| *candidate == kind)
            .unwrap_or(0);
        &self.descriptors[index]
    }

    pub fn find_by_name(&self, name: &str) -> Option<&ToolDescriptor> {
        self.descriptors
            .iter()
            .find(|descriptor| descriptor.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.descriptors.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Border only.
    #[default]
    Transparent,
    /// Solid primary fill instead of a border.
    Primary,
    /// Border plus an inset secondary fill.
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolSettings {
    pub width: f64,
    pub brush_size: f64,
    pub eraser_size: f64,
    pub fill_mode: FillMode,
    pub antialiasing: bool,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            width: 1.0,
            brush_size: 4.0,
            eraser_size: 4.0,
            fill_mode: FillMode::Transparent,
            antialiasing: false,
        }
    }
}

/// The color pair a gesture paints with. Pressing with the secondary
/// button swaps the palette's primary and secondary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeColors {
    pub primary: Color,
    pub secondary: Color,
}

/// Everything a tool may touch during one call.
pub struct ToolInput<'a> {
    pub main: &'a Surface,
    pub preview: Option<&'a mut Surface>,
    pub settings: &'a ToolSettings,
    pub colors: StrokeColors,
    pub last_point: CanvasPoint,
}

/// Side effects a tool asks the session to apply outside the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolEffect {
    None,
    /// The active gesture color should become this color.
    PickColor(Color),
    /// The selection rectangle spanned so far.
    Select(CanvasRect),
}
