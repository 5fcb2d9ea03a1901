//! The image store: a source directory of RGB images paired with a
//! sibling mask directory, plus the navigation cursor over it.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::EditorError;

/// Extensions the decode library handles; anything else in the source
/// directory is skipped during the scan.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp"];

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Cursor moved to this index.
    Moved(usize),
    /// Target index falls outside `[0, len)`; cursor unchanged.
    OutOfRange,
    /// There are no images to navigate.
    Empty,
}

/// Ordered image set and its paired mask directory.
///
/// Filenames are kept lexicographically sorted; masks pair strictly by
/// identical filename under the mask directory.
pub struct ImageStore {
    rgb_dir: Option<PathBuf>,
    mask_dir: Option<PathBuf>,
    files: Vec<String>,
    index: Option<usize>,
}

impl ImageStore {
    /// Build the store from the two chosen directories.
    ///
    /// Cancelling either dialog leaves the corresponding directory unset
    /// and yields an empty list: the session stays disabled.
    pub fn open(rgb_dir: Option<PathBuf>, mask_dir: Option<PathBuf>) -> Self {
        let files = match (&rgb_dir, &mask_dir) {
            (Some(rgb), Some(_)) => list_images(rgb),
            _ => Vec::new(),
        };

        ImageStore {
            rgb_dir,
            mask_dir,
            files,
            index: None,
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Filename at the cursor, if any image is loaded.
    pub fn current_file(&self) -> Option<&str> {
        self.index.map(|i| self.files[i].as_str())
    }

    /// Move the cursor by `delta` positions.
    ///
    /// The cursor starts before the first image, so the first `navigate(1)`
    /// lands on index 0. A target outside `[0, len)` leaves the cursor
    /// unchanged and reports `OutOfRange`.
    pub fn navigate(&mut self, delta: i64) -> NavOutcome {
        if self.files.is_empty() {
            return NavOutcome::Empty;
        }

        let current = self.index.map(|i| i as i64).unwrap_or(-1);
        let target = current + delta;
        if target >= 0 && (target as usize) < self.files.len() {
            self.index = Some(target as usize);
            NavOutcome::Moved(target as usize)
        } else {
            NavOutcome::OutOfRange
        }
    }

    /// Jump to a 1-based image number. `1 <= n <= len` is expected to be
    /// enforced by the input prompt; anything else is refused here too.
    pub fn jump_to(&mut self, number: usize) -> NavOutcome {
        if self.files.is_empty() {
            return NavOutcome::Empty;
        }
        if number >= 1 && number <= self.files.len() {
            self.index = Some(number - 1);
            NavOutcome::Moved(number - 1)
        } else {
            NavOutcome::OutOfRange
        }
    }

    /// Resolve the on-disk paths for a filename: the image under the RGB
    /// directory and the mask under the mask directory.
    pub fn resolve_paths(&self, filename: &str) -> Option<(PathBuf, PathBuf)> {
        let rgb = self.rgb_dir.as_ref()?;
        let mask = self.mask_dir.as_ref()?;
        Some((rgb.join(filename), mask.join(filename)))
    }

    /// Delete the current image/mask pair from disk and drop it from the
    /// list. Missing files are silently skipped. The cursor lands on the
    /// next image at the same position, or clears when the list empties.
    ///
    /// Irreversible: there is no confirmation and no undo for this.
    pub fn delete_current(&mut self) -> Result<Option<usize>, EditorError> {
        let Some(index) = self.index else {
            return Ok(None);
        };

        let filename = self.files[index].clone();
        if let Some((image_path, mask_path)) = self.resolve_paths(&filename) {
            remove_if_present(&image_path)?;
            remove_if_present(&mask_path)?;
        }

        self.files.remove(index);
        self.index = if self.files.is_empty() {
            None
        } else {
            Some(index.min(self.files.len() - 1))
        };

        Ok(self.index)
    }
}

/// Scan a directory (non-recursive) for image files, sorted by name.
fn list_images(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| {
                    let ext = ext.to_string_lossy().to_lowercase();
                    IMAGE_EXTENSIONS.contains(&ext.as_str())
                })
                .unwrap_or(false)
        })
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();

    files.sort();
    println!("📁 Found {} images in {}", files.len(), dir.display());
    files
}

fn remove_if_present(path: &Path) -> Result<(), EditorError> {
    if path.exists() {
        fs::remove_file(path).map_err(|source| EditorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
