use super::CanvasSession;
use crate::geometry::CanvasPoint;
use crate::input::ShortcutAction;
use crate::surface::{Surface, SurfaceResult};
use crate::tools::ToolKind;
use crate::view::{CanvasView, Viewport};

impl<V: CanvasView> CanvasSession<V> {
    /// Duplicates the floating selection into the internal clipboard and
    /// returns a copy for the system clipboard.
    pub fn copy_selection(&mut self) -> Option<Surface> {
        let copied = self.selection.copy()?;
        self.clipboard = Some(copied.duplicate());
        tracing::debug!(width = copied.width(), height = copied.height(), "selection copied");
        Some(copied)
    }

    /// Like [`Self::copy_selection`], but the selection is dropped instead
    /// of being painted back, so the vacated area keeps its fill.
    pub fn cut_selection(&mut self) -> Option<Surface> {
        let cut = self.selection.discard()?;
        self.clipboard = Some(cut.duplicate());
        self.report_selection();
        self.refresh(true);
        tracing::debug!(width = cut.width(), height = cut.height(), "selection cut to clipboard");
        Some(cut)
    }

    pub fn clipboard(&self) -> Option<&Surface> {
        self.clipboard.as_ref()
    }

    /// Floats `surface` as the selection at the top-left of the visible
    /// region and activates the selection tool.
    pub fn paste(&mut self, surface: Surface) {
        self.set_tool(ToolKind::SelectRectangle);
        let visible = self.view.visible_region();
        let origin = CanvasPoint::new(visible.x.max(0), visible.y.max(0));
        self.selection.paste(&mut self.main, surface, origin);
        self.report_selection();
        self.refresh(true);
    }

    pub fn paste_clipboard(&mut self) -> bool {
        let Some(surface) = self.clipboard.as_ref().map(Surface::duplicate) else {
            tracing::debug!("clipboard is empty");
            return false;
        };
        self.paste(surface);
        true
    }

    /// Lifts the whole canvas into the selection, leaving the secondary
    /// color behind. Ignored while a selection is being dragged.
    pub fn select_all(&mut self) -> SurfaceResult<bool> {
        if self.selection.is_dragging() {
            return Ok(false);
        }
        self.set_tool(ToolKind::SelectRectangle);
        let bounds = self.main.size().bounds();
        let fill = self.palette.secondary;
        let selected = self.cut_to_selection(bounds, fill)?;
        self.refresh(true);
        Ok(selected)
    }

    /// Clears the canvas, keeping its size.
    pub fn new_canvas(&mut self) {
        self.commit_selection();
        self.cancel_gesture();
        self.save_backup();
        self.main.clear();
        tracing::info!(size = ?self.main.size(), "new canvas");
        self.refresh(true);
    }

    /// Installs an opened image as the canvas.
    pub fn replace_canvas(&mut self, surface: Surface) {
        self.commit_selection();
        self.cancel_gesture();
        self.save_backup();
        self.main = surface;
        self.main.mark_dirty();
        self.view.set_canvas_size(self.main.size());
        tracing::info!(size = ?self.main.size(), "canvas replaced");
        self.refresh(true);
    }

    /// Resizes the canvas keeping the content at the top-left corner.
    /// Sizes below one pixel clamp to one.
    pub fn resize_canvas(&mut self, width: i64, height: i64) -> SurfaceResult<()> {
        self.commit_selection();
        self.cancel_gesture();
        let resized = self.main.resize_preserving(width, height, 0, 0)?;
        self.install_resized(resized);
        Ok(())
    }

    /// Resize from a drag handle. `(dx, dy)` is the pointer travel in widget
    /// pixels; `dir_x`/`dir_y` are -1 for the left/top edge, 1 for the
    /// right/bottom edge and 0 for an axis the handle does not move.
    pub fn resize_from_edge(
        &mut self,
        dx: f64,
        dy: f64,
        dir_x: i32,
        dir_y: i32,
    ) -> SurfaceResult<()> {
        self.commit_selection();
        self.cancel_gesture();
        let zoom = self.view.current_zoom();
        let grow = |delta: f64, dir: i32| ((delta / zoom) * f64::from(dir.signum())) as i64;
        let width = i64::from(self.main.width()) + grow(dx, dir_x);
        let height = i64::from(self.main.height()) + grow(dy, dir_y);
        let resized = self.main.resize_preserving(width, height, dir_x, dir_y)?;
        self.install_resized(resized);
        Ok(())
    }

    fn install_resized(&mut self, resized: Surface) {
        self.save_backup();
        let from = self.main.size();
        self.main = resized;
        self.main.mark_dirty();
        self.view.set_canvas_size(self.main.size());
        tracing::info!(?from, to = ?self.main.size(), "canvas resized");
        self.refresh(true);
    }

    /// Runs the canvas side of a keyboard shortcut. Returns `false` for
    /// actions that did nothing or belong to the application shell.
    pub fn apply_shortcut(&mut self, action: ShortcutAction) -> SurfaceResult<bool> {
        let is_zoom = matches!(
            action,
            ShortcutAction::ZoomIn | ShortcutAction::ZoomOut | ShortcutAction::ZoomReset
        );
        if self.is_drawing() && !is_zoom {
            tracing::debug!(?action, "shortcut ignored mid-gesture");
            return Ok(false);
        }
        if !action.is_canvas_action() {
            tracing::debug!(?action, "shortcut left to the application");
            return Ok(false);
        }
        let applied = match action {
            ShortcutAction::NewFile => {
                self.new_canvas();
                true
            }
            ShortcutAction::Cut => self.cut_selection().is_some(),
            ShortcutAction::Copy => self.copy_selection().is_some(),
            ShortcutAction::Paste => self.paste_clipboard(),
            ShortcutAction::SelectAll => self.select_all()?,
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
            ShortcutAction::ZoomIn | ShortcutAction::ZoomOut | ShortcutAction::ZoomReset => {
                self.step_zoom(action);
                true
            }
            ShortcutAction::OpenFile
            | ShortcutAction::SaveFile
            | ShortcutAction::Quit
            | ShortcutAction::DialogConfirm
            | ShortcutAction::DialogCancel => false,
        };
        tracing::debug!(?action, applied, "shortcut handled");
        Ok(applied)
    }

    fn step_zoom(&mut self, action: ShortcutAction) {
        let mut viewport = Viewport::new();
        viewport.set_zoom(self.view.current_zoom());
        match action {
            ShortcutAction::ZoomIn => viewport.zoom_in(),
            ShortcutAction::ZoomOut => viewport.zoom_out(),
            _ => viewport.reset_zoom(),
        }
        self.view.set_zoom(viewport.zoom());
        tracing::debug!(zoom_percent = viewport.zoom_percent(), "zoom changed");
        self.refresh(true);
    }
}
