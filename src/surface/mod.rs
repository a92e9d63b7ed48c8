//! Owned raster buffers and the compositing primitives every other module builds on.

mod draw;

use crate::geometry::{CanvasRect, CanvasSize, Color};
use thiserror::Error;

pub use draw::{equilateral_apex, rect_interior, DrawingContext};

pub const BYTES_PER_PIXEL: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("surface dimensions {width}x{height} are invalid")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("failed to allocate {bytes} bytes for a {width}x{height} surface")]
    AllocationFailed { width: u32, height: u32, bytes: usize },
    #[error("pixel buffer has {actual} bytes, expected {expected} for {width}x{height}")]
    BufferSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type SurfaceResult<T> = std::result::Result<T, SurfaceError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeOp {
    /// Zero the destination wherever the source has extent.
    Clear,
    /// Replace the destination with the source.
    Source,
    /// Porter-Duff source-over.
    Over,
}

/// One stored pixel: premultiplied alpha, bytes in B, G, R, A order
/// (ARGB32 as laid out on little-endian machines).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel(pub [u8; 4]);

impl Pixel {
    pub const TRANSPARENT: Pixel = Pixel([0, 0, 0, 0]);

    pub fn from_color(color: Color) -> Self {
        let [r, g, b, a] = color.to_rgba8();
        Self([premultiply(b, a), premultiply(g, a), premultiply(r, a), a])
    }

    pub fn to_color(self) -> Color {
        let [b, g, r, a] = self.0;
        if a == 0 {
            return Color::TRANSPARENT;
        }
        Color::from_rgba8(
            unpremultiply(r, a),
            unpremultiply(g, a),
            unpremultiply(b, a),
            a,
        )
    }

    pub const fn alpha(self) -> u8 {
        self.0[3]
    }

    pub fn over(self, dst: Pixel) -> Pixel {
        let inverse_alpha = u16::from(u8::MAX - self.alpha());
        let mut out = [0_u8; 4];
        for (channel, (src, dst)) in out.iter_mut().zip(self.0.iter().zip(dst.0.iter())) {
            let scaled = (u16::from(*dst) * inverse_alpha + 127) / 255;
            *channel = (u16::from(*src) + scaled).min(255) as u8;
        }
        Pixel(out)
    }
}

fn premultiply(channel: u8, alpha: u8) -> u8 {
    ((u16::from(channel) * u16::from(alpha) + 127) / 255) as u8
}

fn unpremultiply(channel: u8, alpha: u8) -> u8 {
    let alpha = u32::from(alpha);
    ((u32::from(channel) * 255 + alpha / 2) / alpha).min(255) as u8
}

/// An owned pixel buffer. Deliberately not `Clone`: moving a surface
/// transfers ownership, and [`Surface::duplicate`] is the only way to get a
/// second buffer with the same content.
#[derive(Debug)]
pub struct Surface {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
    dirty: bool,
}

impl PartialEq for Surface {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.data == other.data
    }
}

impl Eq for Surface {}

impl Surface {
    /// Allocates a fully transparent surface.
    pub fn new(width: u32, height: u32) -> SurfaceResult<Self> {
        let (stride, len) = buffer_layout(width, height)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| SurfaceError::AllocationFailed {
                width,
                height,
                bytes: len,
            })?;
        data.resize(len, 0);
        Ok(Self {
            width,
            height,
            stride,
            data,
            dirty: true,
        })
    }

    pub fn with_size(size: CanvasSize) -> SurfaceResult<Self> {
        Self::new(size.width, size.height)
    }

    /// Builds a surface from tightly packed straight-alpha RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, rgba: &[u8]) -> SurfaceResult<Self> {
        let mut surface = Self::new(width, height)?;
        let expected = surface.row_len() * height as usize;
        if rgba.len() != expected {
            return Err(SurfaceError::BufferSizeMismatch {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }
        let row_len = surface.row_len();
        for (row, src_row) in rgba.chunks_exact(row_len).enumerate() {
            let offset = row * surface.stride;
            let dst_row = &mut surface.data[offset..offset + row_len];
            for (src, dst) in src_row
                .chunks_exact(BYTES_PER_PIXEL)
                .zip(dst_row.chunks_exact_mut(BYTES_PER_PIXEL))
            {
                let alpha = src[3];
                match alpha {
                    0 => dst.copy_from_slice(&[0, 0, 0, 0]),
                    255 => dst.copy_from_slice(&[src[2], src[1], src[0], 255]),
                    _ => dst.copy_from_slice(&[
                        premultiply(src[2], alpha),
                        premultiply(src[1], alpha),
                        premultiply(src[0], alpha),
                        alpha,
                    ]),
                }
            }
        }
        Ok(surface)
    }

    /// Tightly packed straight-alpha RGBA8 copy of the pixels.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let row_len = self.row_len();
        let mut rgba = Vec::with_capacity(row_len * self.height as usize);
        for row in self.data.chunks_exact(self.stride) {
            for pixel in row[..row_len].chunks_exact(BYTES_PER_PIXEL) {
                let [b, g, r, a] = [pixel[0], pixel[1], pixel[2], pixel[3]];
                if a == 0 {
                    rgba.extend_from_slice(&[0, 0, 0, 0]);
                } else {
                    rgba.extend_from_slice(&[
                        unpremultiply(r, a),
                        unpremultiply(g, a),
                        unpremultiply(b, a),
                        a,
                    ]);
                }
            }
        }
        rgba
    }

    /// Deep copy with the same size and format.
    pub fn duplicate(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            stride: self.stride,
            data: self.data.clone(),
            dirty: true,
        }
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn stride(&self) -> usize {
        self.stride
    }

    pub const fn size(&self) -> CanvasSize {
        CanvasSize::new(self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn row_len(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} surface",
            self.width,
            self.height
        );
        y as usize * self.stride + x as usize * BYTES_PER_PIXEL
    }

    /// Raw stored pixel. Callers must have clipped `(x, y)` to the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        let offset = self.offset(x, y);
        let mut bytes = [0_u8; 4];
        bytes.copy_from_slice(&self.data[offset..offset + BYTES_PER_PIXEL]);
        Pixel(bytes)
    }

    pub fn set_raw_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        let offset = self.offset(x, y);
        self.data[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&pixel.0);
        self.dirty = true;
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        self.pixel(x, y).to_color()
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.set_raw_pixel(x, y, Pixel::from_color(color));
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
        self.dirty = true;
    }

    /// Replaces every pixel of the clipped rectangle with `color`.
    pub fn fill_rect(&mut self, rect: CanvasRect, color: Color) {
        let Some(clipped) = rect.intersect(&self.size().bounds()) else {
            return;
        };
        let pixel = Pixel::from_color(color);
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set_raw_pixel(x as u32, y as u32, pixel);
            }
        }
    }

    /// Composites `src` onto `self` with its origin at `(0, 0)`.
    pub fn paint_region(&mut self, src: &Surface, op: CompositeOp) {
        self.paint_at(src, 0, 0, op);
    }

    /// Composites `src` with its origin at `(x, y)`, clipped to `self`.
    pub fn paint_at(&mut self, src: &Surface, x: i32, y: i32, op: CompositeOp) {
        let target = CanvasRect::new(x, y, src.width, src.height);
        let Some(clipped) = target.intersect(&self.size().bounds()) else {
            return;
        };
        for dst_y in clipped.y..clipped.bottom() {
            for dst_x in clipped.x..clipped.right() {
                let src_pixel = src.pixel((dst_x - x) as u32, (dst_y - y) as u32);
                let (dst_x, dst_y) = (dst_x as u32, dst_y as u32);
                let out = match op {
                    CompositeOp::Clear => Pixel::TRANSPARENT,
                    CompositeOp::Source => src_pixel,
                    CompositeOp::Over => src_pixel.over(self.pixel(dst_x, dst_y)),
                };
                self.set_raw_pixel(dst_x, dst_y, out);
            }
        }
    }

    /// Copies the part of `rect` that lies on the surface into a new surface
    /// of exactly that clipped size.
    pub fn copy_region(&self, rect: CanvasRect) -> SurfaceResult<Surface> {
        let clipped = rect
            .intersect(&self.size().bounds())
            .ok_or(SurfaceError::InvalidDimensions {
                width: rect.width,
                height: rect.height,
            })?;
        let mut region = Surface::new(clipped.width, clipped.height)?;
        region.paint_at(self, -clipped.x, -clipped.y, CompositeOp::Source);
        Ok(region)
    }

    /// Allocates a cleared surface of the new size and paints the current
    /// content into it. A negative anchor on an axis grows (or shrinks) the
    /// leading edge, so the old content stays flush with the trailing edge.
    pub fn resize_preserving(
        &self,
        new_width: i64,
        new_height: i64,
        anchor_dx: i32,
        anchor_dy: i32,
    ) -> SurfaceResult<Surface> {
        let size = CanvasSize::clamped(new_width, new_height);
        let mut resized = Surface::with_size(size)?;
        let offset_x = if anchor_dx < 0 {
            i64::from(size.width) - i64::from(self.width)
        } else {
            0
        };
        let offset_y = if anchor_dy < 0 {
            i64::from(size.height) - i64::from(self.height)
        } else {
            0
        };
        resized.paint_at(
            self,
            clamp_i64_to_i32(offset_x),
            clamp_i64_to_i32(offset_y),
            CompositeOp::Source,
        );
        Ok(resized)
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether the surface changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn drawing_context(&mut self) -> DrawingContext<'_> {
        DrawingContext::new(self)
    }
}

fn buffer_layout(width: u32, height: u32) -> SurfaceResult<(usize, usize)> {
    if width == 0 || height == 0 {
        return Err(SurfaceError::InvalidDimensions { width, height });
    }
    let stride = (width as usize)
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or(SurfaceError::InvalidDimensions { width, height })?;
    let len = stride
        .checked_mul(height as usize)
        .filter(|len| isize::try_from(*len).is_ok())
        .ok_or(SurfaceError::InvalidDimensions { width, height })?;
    Ok((stride, len))
}

fn clamp_i64_to_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}


#[cfg(test)]
mod tests {
    use super::test_support::{count_pixels, filled};
    use super::*;

    const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

    #[test]
    fn new_surface_is_transparent_with_packed_stride() {
        let surface = Surface::new(3, 2).expect("surface should allocate");
        assert_eq!(surface.stride(), 12);
        assert!(surface.stride() >= surface.width() as usize * BYTES_PER_PIXEL);
        assert!(surface.data().iter().all(|byte| *byte == 0));
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        let err = Surface::new(0, 4).expect_err("zero width should fail");
        assert_eq!(
            err,
            SurfaceError::InvalidDimensions {
                width: 0,
                height: 4
            }
        );
    }

    #[test]
    fn pixels_are_stored_premultiplied_bgra() {
        let mut surface = Surface::new(1, 1).expect("surface should allocate");
        surface.set_pixel(0, 0, Color::from_rgba8(200, 100, 50, 128));
        assert_eq!(surface.data(), &[25, 50, 100, 128]);
        assert_eq!(surface.get_pixel(0, 0).to_rgba8()[3], 128);
    }

    #[test]
    fn duplicate_is_a_deep_copy() {
        let original = filled(2, 2, RED);
        let mut copy = original.duplicate();
        copy.set_pixel(0, 0, BLUE);
        assert_eq!(original.get_pixel(0, 0), RED);
        assert_eq!(copy.get_pixel(0, 0), BLUE);
    }

    #[test]
    fn paint_over_keeps_destination_under_transparent_source() {
        let mut dst = filled(4, 4, RED);
        let mut src = Surface::new(4, 4).expect("surface should allocate");
        src.set_pixel(1, 1, BLUE);
        dst.paint_region(&src, CompositeOp::Over);
        assert_eq!(dst.get_pixel(1, 1), BLUE);
        assert_eq!(count_pixels(&dst, RED), 15);
    }

    #[test]
    fn paint_source_replaces_destination_including_transparency() {
        let mut dst = filled(2, 2, RED);
        let src = Surface::new(2, 2).expect("surface should allocate");
        dst.paint_region(&src, CompositeOp::Source);
        assert_eq!(count_pixels(&dst, Color::TRANSPARENT), 4);
    }

    #[test]
    fn paint_clear_zeroes_covered_area_only() {
        let mut dst = filled(4, 4, RED);
        let src = Surface::new(2, 2).expect("surface should allocate");
        dst.paint_at(&src, 1, 1, CompositeOp::Clear);
        assert_eq!(count_pixels(&dst, Color::TRANSPARENT), 4);
        assert_eq!(dst.get_pixel(0, 0), RED);
    }

    #[test]
    fn paint_at_clips_negative_offsets() {
        let mut dst = Surface::new(4, 4).expect("surface should allocate");
        let src = filled(3, 3, BLUE);
        dst.paint_at(&src, -2, -1, CompositeOp::Over);
        assert_eq!(count_pixels(&dst, BLUE), 2);
        assert_eq!(dst.get_pixel(0, 1), BLUE);
    }

    #[test]
    fn over_blends_translucent_source() {
        let half_blue = Pixel::from_color(Color::from_rgba8(0, 0, 255, 128));
        let out = half_blue.over(Pixel::from_color(RED));
        assert_eq!(out.alpha(), 255);
        let [r, _, b, _] = out.to_color().to_rgba8();
        assert!(r > 120 && r < 135, "red channel was {r}");
        assert!(b > 120 && b < 135, "blue channel was {b}");
    }

    #[test]
    fn copy_region_clips_to_surface() {
        let mut surface = filled(5, 5, RED);
        surface.set_pixel(4, 4, BLUE);
        let region = surface
            .copy_region(CanvasRect::new(3, 3, 4, 4))
            .expect("region should copy");
        assert_eq!(region.size(), CanvasSize::new(2, 2));
        assert_eq!(region.get_pixel(1, 1), BLUE);
    }

    #[test]
    fn resize_toward_top_left_keeps_content_flush_bottom_right() {
        let original = filled(4, 4, RED);
        let resized = original
            .resize_preserving(6, 6, -1, -1)
            .expect("resize should allocate");
        assert_eq!(resized.size(), CanvasSize::new(6, 6));
        for y in 0..6 {
            for x in 0..6 {
                let expected = if x >= 2 && y >= 2 {
                    RED
                } else {
                    Color::TRANSPARENT
                };
                assert_eq!(resized.get_pixel(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn resize_on_trailing_edge_keeps_content_at_origin() {
        let original = filled(4, 4, RED);
        let resized = original
            .resize_preserving(6, 6, 0, 0)
            .expect("resize should allocate");
        assert_eq!(count_pixels(&resized, RED), 16);
        assert_eq!(resized.get_pixel(3, 3), RED);
        assert_eq!(resized.get_pixel(4, 4), Color::TRANSPARENT);
    }

    #[test]
    fn resize_to_non_positive_size_clamps_to_one_pixel() {
        let original = filled(4, 4, RED);
        let resized = original
            .resize_preserving(0, -3, 1, 1)
            .expect("resize should clamp");
        assert_eq!(resized.size(), CanvasSize::new(1, 1));
        assert_eq!(resized.get_pixel(0, 0), RED);
    }

    #[test]
    fn rgba8_round_trip_preserves_opaque_pixels() {
        let rgba = vec![10, 20, 30, 255, 0, 0, 0, 0];
        let surface = Surface::from_rgba8(2, 1, &rgba).expect("surface should build");
        assert_eq!(surface.to_rgba8(), rgba);

        let err = Surface::from_rgba8(2, 2, &rgba).expect_err("short buffer should fail");
        assert!(matches!(err, SurfaceError::BufferSizeMismatch { .. }));
    }

    #[test]
    fn dirty_flag_is_taken_once() {
        let mut surface = Surface::new(1, 1).expect("surface should allocate");
        assert!(surface.take_dirty());
        assert!(!surface.take_dirty());
        surface.set_pixel(0, 0, RED);
        assert!(surface.take_dirty());
    }
}
