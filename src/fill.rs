use std::collections::VecDeque;

use crate::geometry::{CanvasPoint, Color};
use crate::surface::{Pixel, Surface};

/// Four-connected flood fill from `seed`, replacing every pixel whose stored
/// value equals the seed's with `fill`. Returns the number of pixels changed.
///
/// The check for "already filled" happens before the queue is built, so a
/// pixel that was just written is never a target again and no visited set is
/// needed.
pub fn flood_fill(surface: &mut Surface, seed: CanvasPoint, fill: Color) -> usize {
    if !surface.size().contains(seed) {
        return 0;
    }
    let target = surface.pixel(seed.x as u32, seed.y as u32);
    let replacement = Pixel::from_color(fill);
    if target == replacement {
        return 0;
    }

    let (width, height) = (i64::from(surface.width()), i64::from(surface.height()));
    let mut queue = VecDeque::new();
    queue.push_back((i64::from(seed.x), i64::from(seed.y)));
    let mut changed = 0;
    while let Some((x, y)) = queue.pop_front() {
        if x < 0 || y < 0 || x >= width || y >= height {
            continue;
        }
        let (px, py) = (x as u32, y as u32);
        if surface.pixel(px, py) != target {
            continue;
        }
        surface.set_raw_pixel(px, py, replacement);
        changed += 1;
        queue.push_back((x + 1, y));
        queue.push_back((x - 1, y));
        queue.push_back((x, y + 1));
        queue.push_back((x, y - 1));
    }
    tracing::debug!(?seed, changed, "flood fill finished");
    changed
}
