use crate::geometry::{CanvasPoint, CanvasRect, CanvasSize};
use crate::history::HistoryAvailability;

const VIEWPORT_ZOOM_MIN_PERCENT: u16 = 5;
const VIEWPORT_ZOOM_MAX_PERCENT: u16 = 6400;
const VIEWPORT_ZOOM_LEVELS_PERCENT: &[u16] = &[
    5, 8, 12, 16, 25, 33, 50, 66, 100, 125, 150, 175, 200, 500, 1000, 1200, 1600, 2400, 3600,
];

fn clamp_zoom_percent(zoom_percent: u16) -> u16 {
    zoom_percent.clamp(VIEWPORT_ZOOM_MIN_PERCENT, VIEWPORT_ZOOM_MAX_PERCENT)
}

fn next_zoom_in_level(current_zoom_percent: u16) -> u16 {
    for &level in VIEWPORT_ZOOM_LEVELS_PERCENT {
        if level > current_zoom_percent {
            return level;
        }
    }
    current_zoom_percent
}

fn next_zoom_out_level(current_zoom_percent: u16) -> u16 {
    for &level in VIEWPORT_ZOOM_LEVELS_PERCENT.iter().rev() {
        if level < current_zoom_percent {
            return level;
        }
    }
    VIEWPORT_ZOOM_MIN_PERCENT
}

/// Maps a pointer position on the zoomed canvas widget to a canvas pixel.
pub fn pointer_to_canvas(pointer_x: f64, pointer_y: f64, zoom: f64) -> CanvasPoint {
    let to_canvas = |value: f64| {
        let scaled = (value / zoom).floor();
        if scaled.is_nan() {
            0
        } else {
            scaled.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
        }
    };
    CanvasPoint::new(to_canvas(pointer_x), to_canvas(pointer_y))
}

/// Zoom factor plus scroll offset (in widget pixels) of the canvas widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    zoom_percent: u16,
    pan_x: i32,
    pan_y: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub const fn new() -> Self {
        Self {
            zoom_percent: 100,
            pan_x: 0,
            pan_y: 0,
        }
    }

    pub const fn zoom_percent(&self) -> u16 {
        self.zoom_percent
    }

    pub fn zoom(&self) -> f64 {
        f64::from(self.zoom_percent) / 100.0
    }

    pub const fn pan_x(&self) -> i32 {
        self.pan_x
    }

    pub const fn pan_y(&self) -> i32 {
        self.pan_y
    }

    pub fn zoom_in(&mut self) {
        self.zoom_percent = next_zoom_in_level(clamp_zoom_percent(self.zoom_percent));
    }

    pub fn zoom_out(&mut self) {
        self.zoom_percent = next_zoom_out_level(clamp_zoom_percent(self.zoom_percent));
    }

    pub fn set_zoom_percent(&mut self, zoom_percent: u16) {
        self.zoom_percent = clamp_zoom_percent(zoom_percent);
    }

    /// Sets the zoom from a factor, clamped to `[0.05, 64]`.
    pub fn set_zoom(&mut self, zoom: f64) {
        let percent = (zoom * 100.0).round();
        let percent = if percent.is_nan() {
            100.0
        } else {
            percent.clamp(
                f64::from(VIEWPORT_ZOOM_MIN_PERCENT),
                f64::from(VIEWPORT_ZOOM_MAX_PERCENT),
            )
        };
        self.zoom_percent = percent as u16;
    }

    pub fn reset_zoom(&mut self) {
        self.zoom_percent = 100;
    }

    pub fn pan_by(&mut self, delta_x: i32, delta_y: i32) {
        if delta_x == 0 && delta_y == 0 {
            return;
        }
        self.pan_x = self.pan_x.saturating_add(delta_x);
        self.pan_y = self.pan_y.saturating_add(delta_y);
    }

    pub(crate) fn set_pan(&mut self, pan_x: i32, pan_y: i32) {
        self.pan_x = pan_x;
        self.pan_y = pan_y;
    }
}

/// What the editing engine needs from whatever displays the canvas.
pub trait CanvasView {
    fn request_redraw(&mut self);
    fn set_canvas_size(&mut self, size: CanvasSize);
    fn current_zoom(&self) -> f64;
    fn set_zoom(&mut self, zoom: f64);
    /// Part of the canvas currently on screen, in canvas pixels.
    fn visible_region(&self) -> CanvasRect;
    /// Scrolls the view so the content follows a pointer moved by `(dx, dy)`
    /// widget pixels.
    fn pan_by(&mut self, dx: f64, dy: f64);
    fn set_history_actions(&mut self, availability: HistoryAvailability);
    fn set_selection_actions(&mut self, has_selection: bool);
}

/// A [`CanvasView`] without a window: tracks what a real view would show.
/// Used by batch mode and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessView {
    viewport: Viewport,
    canvas: CanvasSize,
    widget: CanvasSize,
    redraws: u64,
    history: HistoryAvailability,
    has_selection: bool,
}

impl HeadlessView {
    pub fn new(widget: CanvasSize) -> Self {
        Self {
            viewport: Viewport::new(),
            canvas: CanvasSize::new(1, 1),
            widget,
            redraws: 0,
            history: HistoryAvailability::default(),
            has_selection: false,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub const fn canvas_size(&self) -> CanvasSize {
        self.canvas
    }

    pub const fn redraw_count(&self) -> u64 {
        self.redraws
    }

    pub const fn history_actions(&self) -> HistoryAvailability {
        self.history
    }

    pub const fn selection_actions(&self) -> bool {
        self.has_selection
    }

    fn max_pan(&self) -> (i32, i32) {
        let zoom = self.viewport.zoom();
        let limit = |canvas: u32, widget: u32| {
            let overflow = (f64::from(canvas) * zoom - f64::from(widget)).floor();
            overflow.clamp(0.0, f64::from(i32::MAX)) as i32
        };
        (
            limit(self.canvas.width, self.widget.width),
            limit(self.canvas.height, self.widget.height),
        )
    }

    fn clamp_pan(&mut self) {
        let (max_x, max_y) = self.max_pan();
        let pan_x = self.viewport.pan_x().clamp(0, max_x);
        let pan_y = self.viewport.pan_y().clamp(0, max_y);
        self.viewport.set_pan(pan_x, pan_y);
    }
}

impl CanvasView for HeadlessView {
    fn request_redraw(&mut self) {
        self.redraws = self.redraws.saturating_add(1);
    }

    fn set_canvas_size(&mut self, size: CanvasSize) {
        self.canvas = size;
        self.clamp_pan();
    }

    fn current_zoom(&self) -> f64 {
        self.viewport.zoom()
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.viewport.set_zoom(zoom);
        self.clamp_pan();
    }

    fn visible_region(&self) -> CanvasRect {
        let zoom = self.viewport.zoom();
        let origin = pointer_to_canvas(
            f64::from(self.viewport.pan_x()),
            f64::from(self.viewport.pan_y()),
            zoom,
        );
        let extent = |widget: u32, canvas: u32| {
            let visible = (f64::from(widget) / zoom).ceil();
            (visible.clamp(1.0, f64::from(u32::MAX)) as u32).min(canvas)
        };
        CanvasRect::new(
            origin.x,
            origin.y,
            extent(self.widget.width, self.canvas.width),
            extent(self.widget.height, self.canvas.height),
        )
    }

    fn pan_by(&mut self, dx: f64, dy: f64) {
        let to_step = |value: f64| {
            if value.is_nan() {
                0
            } else {
                (-value)
                    .round()
                    .clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
            }
        };
        self.viewport.pan_by(to_step(dx), to_step(dy));
        self.clamp_pan();
    }

    fn set_history_actions(&mut self, availability: HistoryAvailability) {
        self.history = availability;
    }

    fn set_selection_actions(&mut self, has_selection: bool) {
        self.has_selection = has_selection;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_defaults_to_100_percent_and_origin() {
        let viewport = Viewport::new();
        assert_eq!(viewport.zoom_percent(), 100);
        assert_eq!(viewport.pan_x(), 0);
        assert_eq!(viewport.pan_y(), 0);
    }

    #[test]
    fn viewport_zoom_steps_through_level_ladder() {
        let mut viewport = Viewport::new();
        viewport.zoom_in();
        assert_eq!(viewport.zoom_percent(), 125);
        viewport.reset_zoom();
        viewport.zoom_out();
        assert_eq!(viewport.zoom_percent(), 66);

        for _ in 0..100 {
            viewport.zoom_out();
        }
        assert_eq!(viewport.zoom_percent(), 5);

        for _ in 0..100 {
            viewport.zoom_in();
        }
        assert_eq!(viewport.zoom_percent(), 3600);
    }

    #[test]
    fn viewport_zoom_steps_follow_ladder_for_non_level_values() {
        let mut viewport = Viewport::new();
        viewport.set_zoom_percent(137);
        viewport.zoom_in();
        assert_eq!(viewport.zoom_percent(), 150);

        viewport.set_zoom_percent(137);
        viewport.zoom_out();
        assert_eq!(viewport.zoom_percent(), 125);
    }

    #[test]
    fn set_zoom_clamps_factor() {
        let mut viewport = Viewport::new();
        viewport.set_zoom(0.01);
        assert_eq!(viewport.zoom_percent(), 5);
        viewport.set_zoom(100.0);
        assert_eq!(viewport.zoom_percent(), 6400);
        viewport.set_zoom(f64::NAN);
        assert_eq!(viewport.zoom_percent(), 100);
    }

    #[test]
    fn pointer_maps_to_canvas_by_flooring_over_zoom() {
        assert_eq!(pointer_to_canvas(9.9, 4.0, 2.0), CanvasPoint::new(4, 2));
        assert_eq!(pointer_to_canvas(-0.5, 3.0, 1.0), CanvasPoint::new(-1, 3));
        assert_eq!(pointer_to_canvas(12.0, 12.0, 0.5), CanvasPoint::new(24, 24));
    }

    #[test]
    fn headless_view_pan_follows_pointer_and_clamps_to_scroll_range() {
        let mut view = HeadlessView::new(CanvasSize::new(100, 100));
        view.set_canvas_size(CanvasSize::new(300, 150));

        view.pan_by(-40.0, -80.0);
        assert_eq!(view.viewport().pan_x(), 40);
        assert_eq!(view.viewport().pan_y(), 50);

        view.pan_by(500.0, 0.0);
        assert_eq!(view.viewport().pan_x(), 0);
    }

    #[test]
    fn headless_view_visible_region_scales_with_zoom() {
        let mut view = HeadlessView::new(CanvasSize::new(100, 80));
        view.set_canvas_size(CanvasSize::new(400, 400));
        view.viewport_mut().set_zoom_percent(200);
        view.pan_by(-60.0, -20.0);
        assert_eq!(view.visible_region(), CanvasRect::new(30, 10, 50, 40));
    }
}
