use super::{CompositeOp, Pixel, Surface};
use crate::geometry::{CanvasPoint, Color};

/// Samples per axis when antialiasing is on.
const SUPERSAMPLE: u32 = 4;

/// A rasterizer bound to one surface for the duration of a single draw call.
///
/// Coordinates passed to the primitives are pixel indices; shapes are
/// evaluated against pixel centers (`x + 0.5`).
pub struct DrawingContext<'a> {
    surface: &'a mut Surface,
    operator: CompositeOp,
    antialias: bool,
}

impl<'a> DrawingContext<'a> {
    pub fn new(surface: &'a mut Surface) -> Self {
        Self {
            surface,
            operator: CompositeOp::Source,
            antialias: false,
        }
    }

    pub fn with_operator(mut self, operator: CompositeOp) -> Self {
        self.operator = operator;
        self
    }

    pub fn with_antialias(mut self, antialias: bool) -> Self {
        self.antialias = antialias;
        self
    }

    pub fn plot(&mut self, point: CanvasPoint, color: Color) {
        self.blend(
            i64::from(point.x),
            i64::from(point.y),
            Pixel::from_color(color),
            1.0,
        );
    }

    /// Round-capped line between two pixels. With antialiasing off and a
    /// width that rounds to 1 this is a single-pixel Bresenham line.
    ///
    /// A width of `w` whole pixels covers exactly `w` pixels across, on the
    /// same rows and columns a [`fill_square`](Self::fill_square) dab of that
    /// size covers.
    pub fn stroke_line(&mut self, from: CanvasPoint, to: CanvasPoint, width: f64, color: Color) {
        let band = stroke_pixels(width);
        if !self.antialias && band <= 1 {
            self.bresenham(from, to, Pixel::from_color(color));
            return;
        }
        let segment = Segment::between(path_point(from, band), path_point(to, band));
        let radius = band as f64 / 2.0;
        let (min, max) = segment.bounds(radius);
        self.rasterize(min, max, color, |x, y| segment.covers(x, y, radius));
    }

    /// Axis-aligned square of side `size` centered on the pixel, covering
    /// pixels `[x - size/2, x + size/2)` on each axis.
    pub fn fill_square(&mut self, center: CanvasPoint, size: f64, color: Color) {
        let half = stroke_pixels(size) as f64 / 2.0;
        let (cx, cy) = pixel_center(center);
        self.rasterize(
            (cx - half, cy - half),
            (cx + half, cy + half),
            color,
            |x, y| x >= cx - half && x < cx + half && y >= cy - half && y < cy + half,
        );
    }

    /// Solid box with both corners inclusive.
    pub fn fill_rect(&mut self, a: CanvasPoint, b: CanvasPoint, color: Color) {
        let (min, max) = ordered(a, b);
        self.fill_box(
            (i64::from(min.x), i64::from(min.y)),
            (i64::from(max.x), i64::from(max.y)),
            Pixel::from_color(color),
        );
    }

    /// Rectangle outline through the pixels at `a` and `b`. Like every other
    /// stroke, `width` is rounded to whole pixels first. The band is
    /// `width / 2` pixels outside the path and `(width + 1) / 2` pixels inside
    /// it, path pixel included; [`rect_interior`] is exactly what it leaves.
    pub fn stroke_rect(&mut self, a: CanvasPoint, b: CanvasPoint, width: f64, color: Color) {
        let band = stroke_pixels(width);
        let (min, max) = ordered(a, b);
        let outward = band / 2;
        let interior = rect_interior(a, b, width);
        let pixel = Pixel::from_color(color);
        for y in i64::from(min.y) - outward..=i64::from(max.y) + outward {
            for x in i64::from(min.x) - outward..=i64::from(max.x) + outward {
                let inside = interior.is_some_and(|(lo, hi)| {
                    x >= i64::from(lo.x)
                        && x <= i64::from(hi.x)
                        && y >= i64::from(lo.y)
                        && y <= i64::from(hi.y)
                });
                if !inside {
                    self.blend(x, y, pixel, 1.0);
                }
            }
        }
    }

    /// Solid ellipse inscribed in the box spanned by `a` and `b`.
    pub fn fill_ellipse(&mut self, a: CanvasPoint, b: CanvasPoint, color: Color) {
        let ellipse = Ellipse::spanning(a, b);
        let (min, max) = ellipse.bounds(0.0);
        self.rasterize(min, max, color, |x, y| ellipse.contains(x, y, 0.0));
    }

    pub fn stroke_ellipse(&mut self, a: CanvasPoint, b: CanvasPoint, width: f64, color: Color) {
        let ellipse = Ellipse::spanning(a, b);
        let half = stroke_pixels(width) as f64 / 2.0;
        let (min, max) = ellipse.bounds(half);
        self.rasterize(min, max, color, |x, y| {
            ellipse.contains(x, y, half) && !ellipse.contains(x, y, -half)
        });
    }

    /// Fills the part of the ellipse left inside a stroke of `width`.
    /// Returns `false` when the inset collapses and nothing was drawn.
    pub fn fill_ellipse_inset(
        &mut self,
        a: CanvasPoint,
        b: CanvasPoint,
        width: f64,
        color: Color,
    ) -> bool {
        let ellipse = Ellipse::spanning(a, b);
        let inset = -(stroke_pixels(width) as f64 / 2.0);
        if !ellipse.has_extent(inset) {
            return false;
        }
        let (min, max) = ellipse.bounds(inset);
        self.rasterize(min, max, color, |x, y| ellipse.contains(x, y, inset));
        true
    }

    /// Closed polyline through vertices given in pixel-index space
    /// (fractional positions allowed). Covers the same band as
    /// [`stroke_line`](Self::stroke_line) along each edge.
    pub fn stroke_polygon(&mut self, vertices: &[(f64, f64)], width: f64, color: Color) {
        if vertices.len() < 2 {
            return;
        }
        let band = stroke_pixels(width);
        let path = shift(vertices, path_offset(band));
        let segments = edges(&path);
        let radius = band as f64 / 2.0;
        let (mut min, mut max) = segments[0].bounds(radius);
        for segment in &segments[1..] {
            let (lo, hi) = segment.bounds(radius);
            min = (min.0.min(lo.0), min.1.min(lo.1));
            max = (max.0.max(hi.0), max.1.max(hi.1));
        }
        self.rasterize(min, max, color, |x, y| {
            segments
                .iter()
                .any(|segment| segment.covers(x, y, radius))
        });
    }

    /// Fills a convex polygon given in pixel-index space.
    pub fn fill_polygon(&mut self, vertices: &[(f64, f64)], color: Color) -> bool {
        self.fill_convex(&shift(vertices, 0.5), 0.0, color)
    }

    /// Fills a convex polygon whose vertices are already in sample space,
    /// keeping only points at least `inset` away from every edge. Returns
    /// `false` if nothing was drawn.
    fn fill_convex(&mut self, centered: &[(f64, f64)], inset: f64, color: Color) -> bool {
        if centered.len() < 3 {
            return false;
        }
        let segments = edges(centered);
        let orientation = signed_area(centered).signum();
        if orientation == 0.0 {
            return false;
        }
        let inset_sq = inset.max(0.0).powi(2);
        let mut min = centered[0];
        let mut max = centered[0];
        for &(x, y) in &centered[1..] {
            min = (min.0.min(x), min.1.min(y));
            max = (max.0.max(x), max.1.max(y));
        }
        let mut drawn = false;
        let inside = |x: f64, y: f64| {
            segments.iter().all(|segment| {
                let cross = (segment.b.0 - segment.a.0) * (y - segment.a.1)
                    - (segment.b.1 - segment.a.1) * (x - segment.a.0);
                cross * orientation >= 0.0
                    && (inset_sq == 0.0 || segment.distance_sq(x, y) >= inset_sq)
            })
        };
        let pixel = Pixel::from_color(color);
        let width = f64::from(self.surface.width());
        let height = f64::from(self.surface.height());
        let x_range = min.0.floor().max(0.0) as i64..max.0.ceil().min(width) as i64;
        for y in min.1.floor().max(0.0) as i64..max.1.ceil().min(height) as i64 {
            for x in x_range.clone() {
                let coverage = self.coverage(x, y, &inside);
                if coverage > 0.0 {
                    drawn = true;
                    self.blend(x, y, pixel, coverage);
                }
            }
        }
        drawn
    }

    /// Equilateral triangle on the base `p0`–`p1`, apex at
    /// `p0 + rotate60(p1 - p0)`. Degenerate bases draw nothing.
    pub fn stroke_triangle(&mut self, p0: CanvasPoint, p1: CanvasPoint, width: f64, color: Color) {
        if let Some(vertices) = equilateral_triangle(p0, p1) {
            self.stroke_polygon(&vertices, width, color);
        }
    }

    pub fn fill_triangle(&mut self, p0: CanvasPoint, p1: CanvasPoint, color: Color) {
        if let Some(vertices) = equilateral_triangle(p0, p1) {
            self.fill_polygon(&vertices, color);
        }
    }

    /// Fills exactly what a stroke of `width` leaves inside the triangle.
    pub fn fill_triangle_inset(
        &mut self,
        p0: CanvasPoint,
        p1: CanvasPoint,
        width: f64,
        color: Color,
    ) -> bool {
        let band = stroke_pixels(width);
        equilateral_triangle(p0, p1).is_some_and(|vertices| {
            let path = shift(&vertices, path_offset(band));
            self.fill_convex(&path, band as f64 / 2.0, color)
        })
    }

    fn fill_box(&mut self, min: (i64, i64), max: (i64, i64), pixel: Pixel) {
        let (x0, x1) = (min.0.max(0), max.0.min(i64::from(self.surface.width()) - 1));
        let (y0, y1) = (min.1.max(0), max.1.min(i64::from(self.surface.height()) - 1));
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.blend(x, y, pixel, 1.0);
            }
        }
    }

    fn bresenham(&mut self, from: CanvasPoint, to: CanvasPoint, pixel: Pixel) {
        let (mut x, mut y) = (i64::from(from.x), i64::from(from.y));
        let (x1, y1) = (i64::from(to.x), i64::from(to.y));
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let step_x = if x < x1 { 1 } else { -1 };
        let step_y = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.blend(x, y, pixel, 1.0);
            if x == x1 && y == y1 {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x += step_x;
            }
            if doubled <= dx {
                err += dx;
                y += step_y;
            }
        }
    }

    fn rasterize(
        &mut self,
        min: (f64, f64),
        max: (f64, f64),
        color: Color,
        inside: impl Fn(f64, f64) -> bool,
    ) {
        let pixel = Pixel::from_color(color);
        let width = f64::from(self.surface.width());
        let height = f64::from(self.surface.height());
        let x_start = min.0.floor().max(0.0) as i64;
        let x_end = max.0.ceil().min(width) as i64;
        let y_start = min.1.floor().max(0.0) as i64;
        let y_end = max.1.ceil().min(height) as i64;
        for y in y_start..y_end {
            for x in x_start..x_end {
                let coverage = self.coverage(x, y, &inside);
                self.blend(x, y, pixel, coverage);
            }
        }
    }

    fn coverage(&self, x: i64, y: i64, inside: &impl Fn(f64, f64) -> bool) -> f64 {
        let (fx, fy) = (x as f64, y as f64);
        if !self.antialias {
            return if inside(fx + 0.5, fy + 0.5) { 1.0 } else { 0.0 };
        }
        let step = 1.0 / f64::from(SUPERSAMPLE);
        let mut hits = 0_u32;
        for sy in 0..SUPERSAMPLE {
            for sx in 0..SUPERSAMPLE {
                let sample_x = fx + (f64::from(sx) + 0.5) * step;
                let sample_y = fy + (f64::from(sy) + 0.5) * step;
                if inside(sample_x, sample_y) {
                    hits += 1;
                }
            }
        }
        f64::from(hits) / f64::from(SUPERSAMPLE * SUPERSAMPLE)
    }

    fn blend(&mut self, x: i64, y: i64, src: Pixel, coverage: f64) {
        if coverage <= 0.0 {
            return;
        }
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x >= self.surface.width() || y >= self.surface.height() {
            return;
        }
        let dst = self.surface.pixel(x, y);
        let out = match (self.operator, coverage >= 1.0) {
            (CompositeOp::Clear, true) => Pixel::TRANSPARENT,
            (CompositeOp::Source, true) => src,
            (CompositeOp::Over, true) => src.over(dst),
            (CompositeOp::Clear, false) => lerp(dst, Pixel::TRANSPARENT, coverage),
            (CompositeOp::Source, false) => lerp(dst, src, coverage),
            (CompositeOp::Over, false) => scale(src, coverage).over(dst),
        };
        self.surface.set_raw_pixel(x, y, out);
    }
}

/// Inclusive interior box left by a rectangle stroke of `width`, or `None`
/// when the border swallows it.
pub fn rect_interior(
    a: CanvasPoint,
    b: CanvasPoint,
    width: f64,
) -> Option<(CanvasPoint, CanvasPoint)> {
    let (min, max) = ordered(a, b);
    let inward = (stroke_pixels(width) + 1) / 2;
    let lo = (i64::from(min.x) + inward, i64::from(min.y) + inward);
    let hi = (i64::from(max.x) - inward, i64::from(max.y) - inward);
    if lo.0 > hi.0 || lo.1 > hi.1 {
        return None;
    }
    Some((
        CanvasPoint::new(lo.0 as i32, lo.1 as i32),
        CanvasPoint::new(hi.0 as i32, hi.1 as i32),
    ))
}

/// Third vertex of the equilateral triangle on `p0`–`p1`: the base vector
/// rotated by 60 degrees, added to `p0`.
pub fn equilateral_apex(p0: CanvasPoint, p1: CanvasPoint) -> Option<(f64, f64)> {
    let ux = f64::from(p1.x) - f64::from(p0.x);
    let uy = f64::from(p1.y) - f64::from(p0.y);
    if ux.hypot(uy) < 1e-6 {
        return None;
    }
    let sin60 = 3.0_f64.sqrt() / 2.0;
    let vx = ux * 0.5 - uy * sin60;
    let vy = ux * sin60 + uy * 0.5;
    Some((f64::from(p0.x) + vx, f64::from(p0.y) + vy))
}

fn equilateral_triangle(p0: CanvasPoint, p1: CanvasPoint) -> Option<[(f64, f64); 3]> {
    let apex = equilateral_apex(p0, p1)?;
    Some([
        (f64::from(p0.x), f64::from(p0.y)),
        (f64::from(p1.x), f64::from(p1.y)),
        apex,
    ])
}

fn signed_area(vertices: &[(f64, f64)]) -> f64 {
    vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(a, b)| a.0 * b.1 - b.0 * a.1)
        .sum::<f64>()
        / 2.0
}

/// Stroke widths and dab sizes snap to whole pixels, at least one.
fn stroke_pixels(width: f64) -> i64 {
    width.round().max(1.0) as i64
}

/// Odd bands are centered on pixel centers, even bands on the pixel's
/// top-left corner, so either covers a whole number of pixels.
fn path_offset(band: i64) -> f64 {
    if band % 2 == 0 {
        0.0
    } else {
        0.5
    }
}

fn path_point(point: CanvasPoint, band: i64) -> (f64, f64) {
    let offset = path_offset(band);
    (f64::from(point.x) + offset, f64::from(point.y) + offset)
}

fn shift(vertices: &[(f64, f64)], offset: f64) -> Vec<(f64, f64)> {
    vertices.iter().map(|&(x, y)| (x + offset, y + offset)).collect()
}

fn edges(path: &[(f64, f64)]) -> Vec<Segment> {
    path.iter()
        .zip(path.iter().cycle().skip(1))
        .map(|(&a, &b)| Segment::between(a, b))
        .collect()
}

fn ordered(a: CanvasPoint, b: CanvasPoint) -> (CanvasPoint, CanvasPoint) {
    (
        CanvasPoint::new(a.x.min(b.x), a.y.min(b.y)),
        CanvasPoint::new(a.x.max(b.x), a.y.max(b.y)),
    )
}

fn pixel_center(point: CanvasPoint) -> (f64, f64) {
    (f64::from(point.x) + 0.5, f64::from(point.y) + 0.5)
}

fn lerp(from: Pixel, to: Pixel, t: f64) -> Pixel {
    let mut out = [0_u8; 4];
    for (channel, (a, b)) in out.iter_mut().zip(from.0.iter().zip(to.0.iter())) {
        let value = f64::from(*a) + (f64::from(*b) - f64::from(*a)) * t;
        *channel = value.round().clamp(0.0, 255.0) as u8;
    }
    Pixel(out)
}

fn scale(pixel: Pixel, t: f64) -> Pixel {
    lerp(Pixel::TRANSPARENT, pixel, t)
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: (f64, f64),
    b: (f64, f64),
}

impl Segment {
    fn between(a: (f64, f64), b: (f64, f64)) -> Self {
        Self { a, b }
    }

    fn bounds(&self, radius: f64) -> ((f64, f64), (f64, f64)) {
        (
            (self.a.0.min(self.b.0) - radius, self.a.1.min(self.b.1) - radius),
            (self.a.0.max(self.b.0) + radius, self.a.1.max(self.b.1) + radius),
        )
    }

    fn distance_sq(&self, x: f64, y: f64) -> f64 {
        let (dx, dy) = (self.b.0 - self.a.0, self.b.1 - self.a.1);
        let len_sq = dx * dx + dy * dy;
        let t = if len_sq == 0.0 {
            0.0
        } else {
            (((x - self.a.0) * dx + (y - self.a.1) * dy) / len_sq).clamp(0.0, 1.0)
        };
        let (px, py) = (self.a.0 + t * dx - x, self.a.1 + t * dy - y);
        px * px + py * py
    }

    /// Strict capsule test; samples exactly `radius` away stay outside.
    fn covers(&self, x: f64, y: f64, radius: f64) -> bool {
        self.distance_sq(x, y) < radius * radius
    }
}

/// Ellipse inscribed in an inclusive pixel box.
#[derive(Debug, Clone, Copy)]
struct Ellipse {
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
}

impl Ellipse {
    fn spanning(a: CanvasPoint, b: CanvasPoint) -> Self {
        let (min, max) = ordered(a, b);
        let dx = f64::from(max.x) - f64::from(min.x) + 1.0;
        let dy = f64::from(max.y) - f64::from(min.y) + 1.0;
        Self {
            cx: f64::from(min.x) + dx / 2.0,
            cy: f64::from(min.y) + dy / 2.0,
            rx: dx / 2.0,
            ry: dy / 2.0,
        }
    }

    fn has_extent(&self, grow: f64) -> bool {
        self.rx + grow > 0.0 && self.ry + grow > 0.0
    }

    fn bounds(&self, grow: f64) -> ((f64, f64), (f64, f64)) {
        let (rx, ry) = ((self.rx + grow).max(0.0), (self.ry + grow).max(0.0));
        ((self.cx - rx, self.cy - ry), (self.cx + rx, self.cy + ry))
    }

    /// Point test against the ellipse with both radii grown by `grow`.
    fn contains(&self, x: f64, y: f64, grow: f64) -> bool {
        if !self.has_extent(grow) {
            return false;
        }
        let nx = (x - self.cx) / (self.rx + grow);
        let ny = (y - self.cy) / (self.ry + grow);
        nx * nx + ny * ny <= 1.0
    }
}
