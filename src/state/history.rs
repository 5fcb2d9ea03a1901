//! Undo history: a LIFO stack of whole-mask snapshots.
//!
//! One snapshot is pushed per stroke, at pointer-down. Unbounded depth;
//! the stack is cleared whenever a different image is loaded.

use image::GrayImage;

#[derive(Default)]
pub struct UndoStack {
    snapshots: Vec<GrayImage>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the mask state as it was before a stroke begins.
    pub fn push(&mut self, snapshot: GrayImage) {
        self.snapshots.push(snapshot);
    }

    /// Take back the most recent snapshot, if any.
    pub fn pop(&mut self) -> Option<GrayImage> {
        self.snapshots.pop()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_filled(value: u8) -> GrayImage {
        GrayImage::from_pixel(4, 4, image::Luma([value]))
    }

    #[test]
    fn test_strict_lifo_order() {
        let mut history = UndoStack::new();
        history.push(mask_filled(1));
        history.push(mask_filled(2));
        history.push(mask_filled(3));

        assert_eq!(history.pop().unwrap().get_pixel(0, 0)[0], 3);
        assert_eq!(history.pop().unwrap().get_pixel(0, 0)[0], 2);
        assert_eq!(history.pop().unwrap().get_pixel(0, 0)[0], 1);
        assert!(history.pop().is_none());
    }

    #[test]
    fn test_empty_after_clear() {
        let mut history = UndoStack::new();
        history.push(mask_filled(7));
        assert!(!history.is_empty());
        history.clear();
        assert!(history.is_empty());
        assert!(history.pop().is_none());
    }
}
