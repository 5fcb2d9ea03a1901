/// Mask processing module
///
/// This module handles everything that touches mask pixels:
/// - Rasterizing brush strokes into the mask buffer (brush.rs)
/// - Compositing image + colorized mask for display (render.rs)
/// - Loading image/mask pairs and saving masks to disk (io.rs)

pub mod brush;
pub mod io;
pub mod render;
