use crate::geometry::{CanvasPoint, CanvasRect, CanvasSize, Color};
use crate::surface::{CompositeOp, Surface, SurfaceResult};

/// Pixels lifted off the canvas together with where they currently sit.
#[derive(Debug)]
pub struct Selection {
    rect: CanvasRect,
    surface: Surface,
}

impl Selection {
    pub const fn rect(&self) -> CanvasRect {
        self.rect
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SelectionDrag {
    press: CanvasPoint,
    origin: CanvasPoint,
}

#[derive(Debug, Default)]
pub struct SelectionManager {
    current: Option<Selection>,
    drag: Option<SelectionDrag>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_selection(&self) -> bool {
        self.current.is_some()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    pub fn rect(&self) -> Option<CanvasRect> {
        self.current.as_ref().map(Selection::rect)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Edge-inclusive hit test against the selection rectangle.
    pub fn contains(&self, point: CanvasPoint) -> bool {
        self.rect().is_some_and(|rect| rect.contains(point))
    }

    /// Lifts `rect` (clipped to the canvas) out of `main`, leaving `fill`
    /// behind. Any previous selection is committed first. Returns `false`
    /// when the clipped rectangle is empty.
    pub fn cut(&mut self, main: &mut Surface, rect: CanvasRect, fill: Color) -> SurfaceResult<bool> {
        self.commit(main);
        let Some(clipped) = rect.intersect(&main.size().bounds()) else {
            tracing::debug!(?rect, "selection rectangle is empty after clipping");
            return Ok(false);
        };
        let surface = main.copy_region(clipped)?;
        main.fill_rect(clipped, fill);
        tracing::debug!(rect = ?clipped, "selection cut");
        self.current = Some(Selection {
            rect: clipped,
            surface,
        });
        Ok(true)
    }

    pub fn select_all(&mut self, main: &mut Surface, fill: Color) -> SurfaceResult<bool> {
        let bounds = main.size().bounds();
        self.cut(main, bounds, fill)
    }

    /// Installs an external surface as the selection at `origin` without
    /// touching the canvas underneath.
    pub fn paste(&mut self, main: &mut Surface, surface: Surface, origin: CanvasPoint) {
        self.commit(main);
        let rect = CanvasRect::new(origin.x, origin.y, surface.width(), surface.height());
        tracing::debug!(?rect, "selection pasted");
        self.current = Some(Selection { rect, surface });
    }

    /// Moves the selection, keeping at least its edge on the canvas:
    /// the origin is clamped to `[-width, canvas.width] x [-height, canvas.height]`.
    pub fn move_to(&mut self, origin: CanvasPoint, canvas: CanvasSize) -> bool {
        let Some(selection) = self.current.as_mut() else {
            return false;
        };
        selection.rect = clamp_origin(selection.rect, origin, canvas);
        true
    }

    pub fn move_by(&mut self, dx: i32, dy: i32, canvas: CanvasSize) -> bool {
        let Some(rect) = self.rect() else {
            return false;
        };
        let origin = CanvasPoint::new(rect.x.saturating_add(dx), rect.y.saturating_add(dy));
        self.move_to(origin, canvas)
    }

    /// Starts a drag if `press` grabs the selection.
    pub fn begin_drag(&mut self, press: CanvasPoint) -> bool {
        let Some(rect) = self.rect().filter(|rect| rect.contains(press)) else {
            return false;
        };
        self.drag = Some(SelectionDrag {
            press,
            origin: CanvasPoint::new(rect.x, rect.y),
        });
        true
    }

    pub fn drag_to(&mut self, point: CanvasPoint, canvas: CanvasSize) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let origin = CanvasPoint::new(
            drag.origin.x.saturating_add(point.x.saturating_sub(drag.press.x)),
            drag.origin.y.saturating_add(point.y.saturating_sub(drag.press.y)),
        );
        self.move_to(origin, canvas)
    }

    pub fn end_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Paints the selection back with source-over at its current position.
    pub fn commit(&mut self, main: &mut Surface) -> bool {
        self.drag = None;
        let Some(selection) = self.current.take() else {
            return false;
        };
        main.paint_at(
            &selection.surface,
            selection.rect.x,
            selection.rect.y,
            CompositeOp::Over,
        );
        tracing::debug!(rect = ?selection.rect, "selection committed");
        true
    }

    /// Drops the selection without painting it back.
    pub fn discard(&mut self) -> Option<Surface> {
        self.drag = None;
        let selection = self.current.take()?;
        tracing::debug!(rect = ?selection.rect, "selection discarded");
        Some(selection.surface)
    }

    pub fn copy(&self) -> Option<Surface> {
        self.current
            .as_ref()
            .map(|selection| selection.surface.duplicate())
    }
}

fn clamp_origin(rect: CanvasRect, origin: CanvasPoint, canvas: CanvasSize) -> CanvasRect {
    let clamp_axis = |value: i32, extent: u32, limit: u32| {
        let value = i64::from(value).clamp(-i64::from(extent), i64::from(limit));
        i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
    };
    CanvasRect::new(
        clamp_axis(origin.x, rect.width, canvas.width),
        clamp_axis(origin.y, rect.height, canvas.height),
        rect.width,
        rect.height,
    )
}
