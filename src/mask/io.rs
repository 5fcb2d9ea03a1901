//! Loading image/mask pairs and persisting masks.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::GrayImage;

use crate::error::EditorError;

/// Load the RGB image and its paired mask.
///
/// A missing mask file is not an error: a blank (all-zero) mask of the
/// image's dimensions is synthesized instead. A pre-existing mask whose
/// dimensions differ from the image is loaded as-is and not reconciled.
pub fn load_pair(
    image_path: &Path,
    mask_path: &Path,
) -> Result<(image::RgbImage, GrayImage), EditorError> {
    let image = image::open(image_path)
        .map_err(|source| EditorError::Decode {
            path: image_path.to_path_buf(),
            source,
        })?
        .to_rgb8();

    let mask = if mask_path.exists() {
        image::open(mask_path)
            .map_err(|source| EditorError::Decode {
                path: mask_path.to_path_buf(),
                source,
            })?
            .to_luma8()
    } else {
        GrayImage::new(image.width(), image.height())
    };

    Ok((image, mask))
}

/// Save the mask to disk at the original image's dimensions.
///
/// The in-memory mask normally already has those dimensions (zoom only
/// affects the display); a stray mismatch is resampled back with the
/// same filter the renderer uses. Overwrites any existing file.
pub fn save_mask(
    mask: &GrayImage,
    original_width: u32,
    original_height: u32,
    mask_path: &Path,
) -> Result<(), EditorError> {
    let result = if mask.dimensions() == (original_width, original_height) {
        mask.save(mask_path)
    } else {
        imageops::resize(mask, original_width, original_height, FilterType::Lanczos3)
            .save(mask_path)
    };

    result.map_err(|source| EditorError::Encode {
        path: mask_path.to_path_buf(),
        source,
    })
}
