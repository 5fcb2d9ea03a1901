//! Display compositing.
//!
//! Builds the bitmap the canvas shows: image and mask scaled to the
//! current zoom, the mask colorized to grayscale RGB and alpha-blended
//! on top at the current opacity. Always a full recomposite; there is
//! no dirty-rectangle path.

use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage, Rgba, RgbaImage};

/// Zoomed output dimensions, truncated and clamped to at least 1x1.
pub fn scaled_dimensions(width: u32, height: u32, zoom: f32) -> (u32, u32) {
    (
        ((width as f32 * zoom) as u32).max(1),
        ((height as f32 * zoom) as u32).max(1),
    )
}

/// Composite the colorized mask over the image at the given zoom and opacity.
///
/// Mask intensity v maps to RGB(v,v,v) with uniform alpha `opacity * 255`
/// (truncated); standard alpha-over against the opaque image, so opacity
/// 0.0 reproduces the resized image exactly and 1.0 shows only the mask
/// colorization.
pub fn compose(image: &RgbImage, mask: &GrayImage, zoom: f32, opacity: f32) -> RgbaImage {
    let (width, height) = scaled_dimensions(image.width(), image.height(), zoom);
    let scaled_image = imageops::resize(image, width, height, FilterType::Lanczos3);
    let scaled_mask = imageops::resize(mask, width, height, FilterType::Lanczos3);

    let alpha = (opacity * 255.0) as u16;
    let mut out = RgbaImage::new(width, height);
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let bg = scaled_image.get_pixel(x, y);
        let fg = scaled_mask.get_pixel(x, y)[0] as u16;
        let blend = |bg: u8| ((fg * alpha + bg as u16 * (255 - alpha)) / 255) as u8;
        *pixel = Rgba([blend(bg[0]), blend(bg[1]), blend(bg[2]), 255]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image() -> RgbImage {
        RgbImage::from_fn(8, 6, |x, y| {
            image::Rgb([(x * 30) as u8, (y * 40) as u8, 170])
        })
    }

    #[test]
    fn test_scaled_dimensions_truncate() {
        assert_eq!(scaled_dimensions(100, 50, 1.0), (100, 50));
        assert_eq!(scaled_dimensions(100, 50, 2.0), (200, 100));
        assert_eq!(scaled_dimensions(100, 50, 1.1), (110, 55));
        // int(99 * 0.5) = 49
        assert_eq!(scaled_dimensions(99, 99, 0.5), (49, 49));
        // Never collapses to zero
        assert_eq!(scaled_dimensions(4, 4, 0.1), (1, 1));
    }

    #[test]
    fn test_zero_opacity_is_plain_image() {
        let image = test_image();
        let mask = GrayImage::from_pixel(8, 6, image::Luma([255]));
        let composite = compose(&image, &mask, 1.0, 0.0);
        for (x, y, pixel) in composite.enumerate_pixels() {
            let src = image.get_pixel(x, y);
            assert_eq!(&pixel.0[..3], &src.0[..]);
            assert_eq!(pixel[3], 255);
        }
    }

    #[test]
    fn test_full_opacity_shows_only_mask() {
        let image = test_image();
        let mut mask = GrayImage::new(8, 6);
        mask.put_pixel(3, 2, image::Luma([255]));
        mask.put_pixel(5, 4, image::Luma([128]));
        let composite = compose(&image, &mask, 1.0, 1.0);
        assert_eq!(composite.get_pixel(3, 2).0, [255, 255, 255, 255]);
        assert_eq!(composite.get_pixel(5, 4).0, [128, 128, 128, 255]);
        // Background pixels are the mask's zero, fully opaque black
        assert_eq!(composite.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_composite_matches_zoomed_size() {
        let image = test_image();
        let mask = GrayImage::new(8, 6);
        let composite = compose(&image, &mask, 2.0, 0.5);
        assert_eq!(composite.dimensions(), (16, 12));
    }
}
