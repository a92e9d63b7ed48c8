//! Canvas session: owns the main surface and routes pointer gestures through
//! the active tool.
//!
//! A gesture runs press → motion* → release. Drawing tools paint into a
//! preview surface that is flattened onto the main surface on release, right
//! after a history snapshot of the untouched canvas. The selection tool never
//! opens a preview; it reports the spanned rectangle and the cut happens on
//! release.

mod actions;

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::geometry::{CanvasPoint, CanvasRect, Color};
use crate::history::{BackupManager, HistoryAction};
use crate::selection::SelectionManager;
use crate::surface::{CompositeOp, Surface, SurfaceResult};
use crate::tools::{
    DragTracker, FillMode, StrokeColors, ToolDescriptor, ToolEffect, ToolInput, ToolKind,
    ToolRegistry, ToolSettings,
};
use crate::view::{pointer_to_canvas, CanvasView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Gesture {
    button: PointerButton,
    start: CanvasPoint,
    last: CanvasPoint,
    colors: StrokeColors,
    press_pointer: (f64, f64),
    selected: Option<CanvasRect>,
}

pub struct CanvasSession<V: CanvasView> {
    registry: ToolRegistry,
    tool: ToolKind,
    settings: ToolSettings,
    palette: StrokeColors,
    main: Surface,
    preview: Option<Surface>,
    history: BackupManager,
    selection: SelectionManager,
    gesture: Option<Gesture>,
    drag: DragTracker,
    clipboard: Option<Surface>,
    view: V,
}

impl<V: CanvasView> CanvasSession<V> {
    pub fn new(config: &EditorConfig, registry: ToolRegistry, mut view: V) -> SurfaceResult<Self> {
        let config = config.clone().normalized();
        let main = Surface::with_size(config.canvas_size())?;
        let history = BackupManager::with_max_depth(config.history_limit);

        view.set_canvas_size(main.size());
        view.set_history_actions(history.availability());
        view.set_selection_actions(false);
        view.request_redraw();
        tracing::debug!(size = ?main.size(), "canvas session created");

        Ok(Self {
            registry,
            tool: ToolKind::Freehand,
            settings: ToolSettings {
                width: config.stroke_width,
                brush_size: config.brush_size,
                eraser_size: config.eraser_size,
                fill_mode: config.fill_mode,
                antialiasing: config.antialiasing,
            },
            palette: StrokeColors {
                primary: Color::BLACK,
                secondary: Color::TRANSPARENT,
            },
            main,
            preview: None,
            history,
            selection: SelectionManager::new(),
            gesture: None,
            drag: DragTracker::default(),
            clipboard: None,
            view,
        })
    }

    pub fn main(&self) -> &Surface {
        &self.main
    }

    pub fn preview(&self) -> Option<&Surface> {
        self.preview.as_ref()
    }

    pub fn history(&self) -> &BackupManager {
        &self.history
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub const fn tool(&self) -> ToolKind {
        self.tool
    }

    pub const fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub const fn palette(&self) -> StrokeColors {
        self.palette
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.is_some()
    }

    /// Activates `kind`. A floating selection is committed and any gesture
    /// in flight is abandoned.
    pub fn set_tool(&mut self, kind: ToolKind) {
        self.commit_selection();
        if self.cancel_gesture() {
            tracing::debug!(tool = %self.tool, "gesture abandoned by tool switch");
        }
        if self.tool != kind {
            tracing::debug!(from = %self.tool, to = %kind, "tool changed");
            self.tool = kind;
        }
        self.refresh(false);
    }

    pub fn set_primary(&mut self, color: Color) {
        self.palette.primary = color;
    }

    pub fn set_secondary(&mut self, color: Color) {
        self.palette.secondary = color;
    }

    pub fn swap_colors(&mut self) {
        std::mem::swap(&mut self.palette.primary, &mut self.palette.secondary);
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.settings.width = at_least_one(width);
    }

    pub fn set_brush_size(&mut self, size: f64) {
        self.settings.brush_size = at_least_one(size);
    }

    pub fn set_eraser_size(&mut self, size: f64) {
        self.settings.eraser_size = at_least_one(size);
    }

    pub fn set_fill_mode(&mut self, fill_mode: FillMode) {
        self.settings.fill_mode = fill_mode;
    }

    pub fn set_antialiasing(&mut self, antialiasing: bool) {
        self.settings.antialiasing = antialiasing;
    }

    /// Pointer press in widget coordinates.
    pub fn press(
        &mut self,
        pointer_x: f64,
        pointer_y: f64,
        button: PointerButton,
    ) -> SurfaceResult<()> {
        let point = self.canvas_point(pointer_x, pointer_y);

        if self.tool == ToolKind::SelectRectangle && self.selection.begin_drag(point) {
            tracing::debug!(?point, "selection drag started");
            return Ok(());
        }

        self.commit_selection();

        if self.cancel_gesture() {
            tracing::debug!(tool = %self.tool, "gesture cancelled by second press");
            self.refresh(true);
            return Ok(());
        }

        let descriptor = *self.registry.get(self.tool);
        let preview = if !descriptor.draws_while_idle {
            None
        } else if descriptor.override_main_surface {
            Some(self.main.duplicate())
        } else {
            Some(Surface::with_size(self.main.size())?)
        };

        if descriptor.pans_view {
            self.drag.begin();
        }

        let colors = match button {
            PointerButton::Primary => self.palette,
            PointerButton::Secondary => StrokeColors {
                primary: self.palette.secondary,
                secondary: self.palette.primary,
            },
        };
        let mut gesture = Gesture {
            button,
            start: point,
            last: point,
            colors,
            press_pointer: (pointer_x, pointer_y),
            selected: None,
        };
        self.preview = preview;
        tracing::debug!(tool = %self.tool, ?button, ?point, "gesture started");

        if descriptor.continuous {
            self.run_draw(&mut gesture, point, point);
        }
        self.gesture = Some(gesture);
        self.refresh(false);
        Ok(())
    }

    /// Pointer motion while a button is held.
    pub fn motion(&mut self, pointer_x: f64, pointer_y: f64) {
        let point = self.canvas_point(pointer_x, pointer_y);

        if self.selection.is_dragging() {
            let canvas = self.main.size();
            if self.selection.drag_to(point, canvas) {
                self.refresh(true);
            }
            return;
        }

        let Some(mut gesture) = self.gesture else {
            return;
        };
        let descriptor = *self.registry.get(self.tool);

        if descriptor.pans_view {
            let (press_x, press_y) = gesture.press_pointer;
            if let Some((dx, dy)) = self.drag.update(pointer_x - press_x, pointer_y - press_y) {
                self.view.pan_by(dx, dy);
                self.refresh(true);
            }
            return;
        }

        if descriptor.has_motion {
            let effect = self.tool.motion(
                ToolInput {
                    main: &self.main,
                    preview: self.preview.as_mut(),
                    settings: &self.settings,
                    colors: gesture.colors,
                    last_point: gesture.last,
                },
                point,
            );
            self.apply_effect(&mut gesture, effect);
        } else {
            let start = gesture.start;
            self.reset_preview(&descriptor);
            self.run_draw(&mut gesture, start, point);
        }

        gesture.last = point;
        self.gesture = Some(gesture);
        self.refresh(true);
    }

    /// Pointer release: ends a selection drag, cuts a new selection, or
    /// flattens the preview onto the main surface.
    pub fn release(&mut self, pointer_x: f64, pointer_y: f64) -> SurfaceResult<()> {
        let point = self.canvas_point(pointer_x, pointer_y);

        if self.selection.end_drag() {
            tracing::debug!(rect = ?self.selection.rect(), "selection drag ended");
            self.refresh(true);
            return Ok(());
        }

        let Some(mut gesture) = self.gesture.take() else {
            return Ok(());
        };
        let descriptor = *self.registry.get(self.tool);

        if descriptor.pans_view {
            self.drag.end();
        } else if !descriptor.has_motion {
            let start = gesture.start;
            self.reset_preview(&descriptor);
            self.run_draw(&mut gesture, start, point);
        }

        if self.tool == ToolKind::SelectRectangle {
            if let Some(rect) = gesture.selected {
                self.cut_to_selection(rect, gesture.colors.secondary)?;
            }
        } else if let Some(preview) = self.preview.take() {
            let op = if descriptor.override_main_surface {
                CompositeOp::Source
            } else {
                CompositeOp::Over
            };
            self.save_backup();
            self.main.paint_region(&preview, op);
            tracing::debug!(tool = %self.tool, ?op, "preview flattened");
        }

        tracing::debug!(tool = %self.tool, ?point, "gesture finished");
        self.refresh(true);
        Ok(())
    }

    pub fn undo(&mut self) -> bool {
        self.apply_history(HistoryAction::Undo)
    }

    pub fn redo(&mut self) -> bool {
        self.apply_history(HistoryAction::Redo)
    }

    fn apply_history(&mut self, action: HistoryAction) -> bool {
        self.commit_selection();
        self.cancel_gesture();
        let applied = self.history.apply(action, &mut self.main);
        self.view.set_history_actions(self.history.availability());
        if applied {
            self.view.set_canvas_size(self.main.size());
        }
        self.refresh(false);
        applied
    }

    fn canvas_point(&self, pointer_x: f64, pointer_y: f64) -> CanvasPoint {
        pointer_to_canvas(pointer_x, pointer_y, self.view.current_zoom())
    }

    fn run_draw(&mut self, gesture: &mut Gesture, from: CanvasPoint, to: CanvasPoint) {
        let effect = self.tool.draw(
            ToolInput {
                main: &self.main,
                preview: self.preview.as_mut(),
                settings: &self.settings,
                colors: gesture.colors,
                last_point: gesture.last,
            },
            from,
            to,
        );
        self.apply_effect(gesture, effect);
    }

    fn apply_effect(&mut self, gesture: &mut Gesture, effect: ToolEffect) {
        match effect {
            ToolEffect::None => {}
            ToolEffect::PickColor(color) => {
                match gesture.button {
                    PointerButton::Primary => self.palette.primary = color,
                    PointerButton::Secondary => self.palette.secondary = color,
                }
                gesture.colors.primary = color;
                tracing::debug!(?color, button = ?gesture.button, "color picked");
            }
            ToolEffect::Select(rect) => gesture.selected = Some(rect),
        }
    }

    /// Starts a redraw of a non-motion tool from a clean preview.
    fn reset_preview(&mut self, descriptor: &ToolDescriptor) {
        let Some(preview) = self.preview.as_mut() else {
            return;
        };
        if descriptor.override_main_surface {
            preview.paint_region(&self.main, CompositeOp::Source);
        } else {
            preview.clear();
        }
    }

    fn cancel_gesture(&mut self) -> bool {
        self.preview = None;
        self.drag.end();
        self.selection.end_drag();
        self.gesture.take().is_some()
    }

    fn save_backup(&mut self) {
        let availability = self.history.snapshot(&self.main);
        self.view.set_history_actions(availability);
    }

    fn cut_to_selection(&mut self, rect: CanvasRect, fill: Color) -> SurfaceResult<bool> {
        if rect.intersect(&self.main.size().bounds()).is_none() {
            tracing::debug!(?rect, "empty selection ignored");
            return Ok(false);
        }
        self.save_backup();
        let cut = self.selection.cut(&mut self.main, rect, fill)?;
        self.report_selection();
        Ok(cut)
    }

    fn commit_selection(&mut self) -> bool {
        let committed = self.selection.commit(&mut self.main);
        if committed {
            self.report_selection();
        }
        committed
    }

    fn report_selection(&mut self) {
        self.view.set_selection_actions(self.selection.has_selection());
    }

    /// Requests a redraw when a surface changed, or unconditionally with
    /// `force` for changes that live outside the surfaces.
    fn refresh(&mut self, force: bool) {
        let main_dirty = self.main.take_dirty();
        let preview_dirty = self
            .preview
            .as_mut()
            .is_some_and(|preview| preview.take_dirty());
        if force || main_dirty || preview_dirty {
            self.view.request_redraw();
        }
    }
}

fn at_least_one(value: f64) -> f64 {
    if value >= 1.0 {
        value
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CanvasSize;
    use crate::surface::test_support::{count_pixels, filled};
    use crate::tools::test_support::{BLUE, RED};
    use crate::view::HeadlessView;

    fn session(width: u32, height: u32) -> CanvasSession<HeadlessView> {
        let config = EditorConfig {
            canvas_width: width,
            canvas_height: height,
            ..EditorConfig::default()
        };
        CanvasSession::new(
            &config,
            ToolRegistry::new(),
            HeadlessView::new(CanvasSize::new(100, 100)),
        )
        .expect("session should allocate")
    }

    fn drag(session: &mut CanvasSession<HeadlessView>, from: (f64, f64), to: (f64, f64)) {
        session
            .press(from.0, from.1, PointerButton::Primary)
            .expect("press should succeed");
        session.motion(to.0, to.1);
        session.release(to.0, to.1).expect("release should succeed");
    }

    #[test]
    fn new_session_reports_initial_state_to_view() {
        let session = session(20, 10);
        assert_eq!(session.main().size(), CanvasSize::new(20, 10));
        assert_eq!(session.view().canvas_size(), CanvasSize::new(20, 10));
        assert_eq!(session.tool(), ToolKind::Freehand);
        assert_eq!(session.palette().primary, Color::BLACK);
        assert_eq!(session.palette().secondary, Color::TRANSPARENT);
        assert!(!session.view().history_actions().undo);
        assert!(session.view().redraw_count() > 0);
    }

    #[test]
    fn rectangle_gesture_flattens_secondary_fill_matrix() {
        let mut session = session(20, 20);
        session.set_tool(ToolKind::Rectangle);
        session.set_fill_mode(FillMode::Secondary);
        session.set_stroke_width(2.0);
        session.set_primary(RED);
        session.set_secondary(BLUE);

        session
            .press(2.0, 2.0, PointerButton::Primary)
            .expect("press should succeed");
        session.motion(10.0, 10.0);
        session.motion(17.0, 17.0);
        assert!(session.preview().is_some());
        session.release(17.0, 17.0).expect("release should succeed");

        assert!(session.preview().is_none());
        for y in 0..20_i32 {
            for x in 0..20_i32 {
                let in_outer = (1..=18).contains(&x) && (1..=18).contains(&y);
                let in_inner = (3..=16).contains(&x) && (3..=16).contains(&y);
                let expected = match (in_outer, in_inner) {
                    (_, true) => BLUE,
                    (true, false) => RED,
                    (false, false) => Color::TRANSPARENT,
                };
                assert_eq!(
                    session.main().get_pixel(x as u32, y as u32),
                    expected,
                    "pixel ({x}, {y})"
                );
            }
        }
        assert_eq!(session.history().undo_depth(), 1);
        assert!(session.view().history_actions().undo);
    }

    #[test]
    fn shape_motion_redraws_from_a_clean_preview() {
        let mut session = session(12, 12);
        session.set_tool(ToolKind::Line);
        session
            .press(1.0, 1.0, PointerButton::Primary)
            .expect("press should succeed");
        session.motion(10.0, 1.0);
        session.motion(1.0, 10.0);
        let preview = session.preview().expect("line should draw into a preview");
        assert_eq!(preview.get_pixel(10, 1), Color::TRANSPARENT);
        assert_eq!(preview.get_pixel(1, 10), Color::BLACK);
    }

    #[test]
    fn second_press_cancels_gesture_without_touching_canvas() {
        let mut session = session(10, 10);
        session.set_tool(ToolKind::Rectangle);
        session
            .press(1.0, 1.0, PointerButton::Primary)
            .expect("press should succeed");
        session.motion(6.0, 6.0);
        session
            .press(7.0, 7.0, PointerButton::Secondary)
            .expect("second press should succeed");

        assert!(!session.is_drawing());
        assert!(session.preview().is_none());
        session.release(7.0, 7.0).expect("release should succeed");
        assert_eq!(count_pixels(session.main(), Color::TRANSPARENT), 100);
        assert_eq!(session.history().undo_depth(), 0);
    }

    #[test]
    fn freehand_stroke_draws_on_press_and_motion() {
        let mut session = session(10, 10);
        drag(&mut session, (1.0, 1.0), (4.0, 1.0));
        assert_eq!(count_pixels(session.main(), Color::BLACK), 4);
        assert_eq!(session.history().undo_depth(), 1);
    }

    #[test]
    fn secondary_button_paints_with_swapped_colors() {
        let mut session = session(6, 6);
        session.set_primary(RED);
        session.set_secondary(BLUE);
        session
            .press(2.0, 2.0, PointerButton::Secondary)
            .expect("press should succeed");
        session.release(2.0, 2.0).expect("release should succeed");
        assert_eq!(session.main().get_pixel(2, 2), BLUE);
    }

    #[test]
    fn bucket_replaces_canvas_and_undo_redo_round_trip() {
        let mut session = session(8, 8);
        session.set_tool(ToolKind::Bucket);
        session.set_primary(RED);
        drag(&mut session, (3.0, 3.0), (3.0, 3.0));
        assert_eq!(count_pixels(session.main(), RED), 64);

        let filled_bytes = session.main().data().to_vec();
        assert!(session.undo());
        assert_eq!(count_pixels(session.main(), Color::TRANSPARENT), 64);
        assert!(session.view().history_actions().redo);
        assert!(session.redo());
        assert_eq!(session.main().data(), filled_bytes.as_slice());
        assert!(!session.redo());
    }

    #[test]
    fn undo_and_redo_walk_a_mixed_edit_sequence_byte_for_byte() {
        fn state(session: &CanvasSession<HeadlessView>) -> (CanvasSize, Vec<u8>) {
            (session.main().size(), session.main().data().to_vec())
        }

        let mut session = session(10, 10);
        let mut states = vec![state(&session)];

        session.set_tool(ToolKind::Rectangle);
        session.set_primary(RED);
        drag(&mut session, (1.0, 1.0), (5.0, 5.0));
        states.push(state(&session));
        session.set_primary(BLUE);
        session.set_fill_mode(FillMode::Primary);
        drag(&mut session, (4.0, 4.0), (8.0, 7.0));
        states.push(state(&session));
        session.resize_canvas(14, 12).expect("resize should succeed");
        states.push(state(&session));
        session.set_tool(ToolKind::Bucket);
        session.set_primary(Color::WHITE);
        drag(&mut session, (12.0, 11.0), (12.0, 11.0));
        states.push(state(&session));
        session.set_tool(ToolKind::Freehand);
        session.set_primary(RED);
        drag(&mut session, (0.0, 11.0), (13.0, 11.0));
        states.push(state(&session));

        let edits = states.len() - 1;
        assert_eq!(session.history().undo_depth(), edits);
        for expected in states.iter().rev().skip(1) {
            assert!(session.undo());
            assert_eq!(&state(&session), expected);
            assert_eq!(session.view().canvas_size(), expected.0);
        }
        assert!(!session.undo());
        assert_eq!(state(&session), states[0]);

        for expected in &states[1..] {
            assert!(session.redo());
            assert_eq!(&state(&session), expected);
        }
        assert!(!session.redo());
        assert_eq!(session.main().size(), CanvasSize::new(14, 12));
    }

    #[test]
    fn eraser_flattens_with_replace_so_transparent_secondary_erases() {
        let mut session = session(8, 8);
        session.replace_canvas(filled(8, 8, Color::WHITE));
        session.set_tool(ToolKind::Eraser);
        session.set_eraser_size(2.0);
        drag(&mut session, (4.0, 4.0), (4.0, 4.0));
        assert_eq!(count_pixels(session.main(), Color::TRANSPARENT), 4);
        assert_eq!(count_pixels(session.main(), Color::WHITE), 60);
    }

    #[test]
    fn picker_sets_color_of_pressed_button_without_history() {
        let mut session = session(4, 4);
        let mut canvas = filled(4, 4, Color::WHITE);
        canvas.set_pixel(1, 1, RED);
        canvas.set_pixel(2, 2, BLUE);
        session.replace_canvas(canvas);
        let depth = session.history().undo_depth();

        session.set_tool(ToolKind::Picker);
        drag(&mut session, (0.0, 0.0), (1.0, 1.0));
        assert_eq!(session.palette().primary, RED);

        session
            .press(2.0, 2.0, PointerButton::Secondary)
            .expect("press should succeed");
        session.release(2.0, 2.0).expect("release should succeed");
        assert_eq!(session.palette().secondary, BLUE);
        assert_eq!(session.history().undo_depth(), depth);
    }

    #[test]
    fn select_tool_cuts_on_release_and_moves_by_drag() {
        let mut session = session(10, 10);
        session.replace_canvas(filled(10, 10, Color::WHITE));
        session.set_tool(ToolKind::SelectRectangle);

        drag(&mut session, (2.0, 2.0), (5.0, 5.0));
        assert_eq!(
            session.selection().rect(),
            Some(CanvasRect::new(2, 2, 3, 3))
        );
        assert_eq!(session.main().get_pixel(3, 3), Color::TRANSPARENT);
        assert!(session.view().selection_actions());
        assert_eq!(session.history().undo_depth(), 2);

        drag(&mut session, (3.0, 3.0), (6.0, 3.0));
        assert_eq!(
            session.selection().rect(),
            Some(CanvasRect::new(5, 2, 3, 3))
        );

        session.set_tool(ToolKind::Brush);
        assert!(!session.selection().has_selection());
        assert!(!session.view().selection_actions());
        assert_eq!(session.main().get_pixel(2, 2), Color::TRANSPARENT);
        assert_eq!(session.main().get_pixel(5, 2), Color::WHITE);
        assert_eq!(session.main().get_pixel(7, 4), Color::WHITE);
    }

    #[test]
    fn select_click_without_span_selects_nothing() {
        let mut session = session(10, 10);
        session.set_tool(ToolKind::SelectRectangle);
        drag(&mut session, (4.0, 4.0), (4.0, 4.0));
        assert!(!session.selection().has_selection());
        assert_eq!(session.history().undo_depth(), 0);
    }

    #[test]
    fn canvas_drag_pans_view_without_painting() {
        let config = EditorConfig {
            canvas_width: 40,
            canvas_height: 40,
            ..EditorConfig::default()
        };
        let mut session = CanvasSession::new(
            &config,
            ToolRegistry::new(),
            HeadlessView::new(CanvasSize::new(10, 10)),
        )
        .expect("session should allocate");
        session.set_tool(ToolKind::Drag);

        session
            .press(5.0, 5.0, PointerButton::Primary)
            .expect("press should succeed");
        session.motion(2.0, 1.0);
        session.motion(1.0, 1.0);
        session.release(1.0, 1.0).expect("release should succeed");

        assert_eq!(session.view().viewport().pan_x(), 4);
        assert_eq!(session.view().viewport().pan_y(), 4);
        assert!(session.preview().is_none());
        assert_eq!(session.history().undo_depth(), 0);
    }

    #[test]
    fn pointer_coordinates_are_divided_by_zoom() {
        let mut session = session(10, 10);
        session.view_mut().viewport_mut().set_zoom_percent(200);
        drag(&mut session, (9.0, 5.0), (9.0, 5.0));
        assert_eq!(session.main().get_pixel(4, 2), Color::BLACK);
    }

    #[test]
    fn tool_switch_mid_gesture_discards_preview() {
        let mut session = session(10, 10);
        session.set_tool(ToolKind::Brush);
        session
            .press(5.0, 5.0, PointerButton::Primary)
            .expect("press should succeed");
        session.set_tool(ToolKind::Line);
        session.release(5.0, 5.0).expect("release should succeed");
        assert_eq!(count_pixels(session.main(), Color::TRANSPARENT), 100);
        assert_eq!(session.history().undo_depth(), 0);
    }

    #[test]
    fn settings_setters_clamp_sizes() {
        let mut session = session(4, 4);
        session.set_stroke_width(0.0);
        session.set_brush_size(-3.0);
        session.set_eraser_size(12.0);
        session.set_antialiasing(true);
        assert_eq!(session.settings().width, 1.0);
        assert_eq!(session.settings().brush_size, 1.0);
        assert_eq!(session.settings().eraser_size, 12.0);
        assert!(session.settings().antialiasing);
    }
}
