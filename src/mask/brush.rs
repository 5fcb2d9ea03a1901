//! Brush stroke rasterization.
//!
//! The canvas reports pointer positions in screen coordinates of the
//! zoomed composite; strokes land in mask coordinates, so each stamp
//! first undoes the display scale.

use image::GrayImage;

/// Map a screen (canvas) position to mask pixel coordinates.
///
/// Inverse of the render-time scale-up: `mask = screen / zoom`,
/// truncated toward zero.
pub fn to_mask_point(screen_x: f32, screen_y: f32, zoom: f32) -> (i64, i64) {
    ((screen_x / zoom) as i64, (screen_y / zoom) as i64)
}

/// Stamp one brush dab into the mask.
///
/// Radius 1 (minimum thickness) plots a single pixel. Larger radii fill
/// a hard-edged disk whose bounding box is `[cx-r, cx+r] x [cy-r, cy+r]`.
/// Stamps falling partially or fully outside the mask are clipped.
pub fn stamp(mask: &mut GrayImage, cx: i64, cy: i64, radius: u32, value: u8) {
    if radius <= 1 {
        put_pixel(mask, cx, cy, value);
        return;
    }

    let r = radius as i64;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                put_pixel(mask, cx + dx, cy + dy, value);
            }
        }
    }
}

fn put_pixel(mask: &mut GrayImage, x: i64, y: i64, value: u8) {
    if x >= 0 && y >= 0 && (x as u32) < mask.width() && (y as u32) < mask.height() {
        mask.put_pixel(x as u32, y as u32, image::Luma([value]));
    }
}
