/// Shared geometric and color primitives used across surface, tool and session modules.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CanvasPoint {
    pub x: i32,
    pub y: i32,
}

impl CanvasPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in canvas coordinates. The origin may be negative
/// (a selection dragged partially off-canvas).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CanvasRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CanvasRect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanned by two drag corners, in the same convention the
    /// selection tool uses: origin at the minimum corner, size is the absolute
    /// coordinate difference.
    pub fn from_corners(a: CanvasPoint, b: CanvasPoint) -> Self {
        Self::new(
            a.x.min(b.x),
            a.y.min(b.y),
            a.x.abs_diff(b.x),
            a.y.abs_diff(b.y),
        )
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(clamp_u32_to_i32(self.width))
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(clamp_u32_to_i32(self.height))
    }

    /// Edge-inclusive hit test used for grabbing a selection.
    pub fn contains(&self, point: CanvasPoint) -> bool {
        point.x >= self.x && point.y >= self.y && point.x <= self.right() && point.y <= self.bottom()
    }

    pub fn intersect(&self, other: &CanvasRect) -> Option<CanvasRect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(CanvasRect::new(
            left,
            top,
            right.abs_diff(left),
            bottom.abs_diff(top),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Non-positive requests collapse to a single pixel instead of failing.
    pub fn clamped(width: i64, height: i64) -> Self {
        let clamp = |value: i64| u32::try_from(value.max(1)).unwrap_or(u32::MAX);
        Self::new(clamp(width), clamp(height))
    }

    pub const fn bounds(&self) -> CanvasRect {
        CanvasRect::new(0, 0, self.width, self.height)
    }

    pub fn contains(&self, point: CanvasPoint) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as i64) < i64::from(self.width)
            && (point.y as i64) < i64::from(self.height)
    }
}

/// Straight (non-premultiplied) RGBA color with channels in `[0, 1]`.
///
/// Equality compares the 8-bit quantized channels, so colors that went
/// through several float conversions still compare equal when they land on
/// the same stored pixel value.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            f64::from(a) / 255.0,
        )
    }

    /// `[r, g, b, a]`, each channel `round(channel * 255)`.
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            quantize_channel(self.r),
            quantize_channel(self.g),
            quantize_channel(self.b),
            quantize_channel(self.a),
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.to_rgba8() == other.to_rgba8()
    }
}

impl Eq for Color {}

fn quantize_channel(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub(crate) fn clamp_u32_to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
