//! The editor session: one image, its mask, and the view state, with a
//! single dispatch point for pointer input.
//!
//! Pointer input arrives as a plain [`PointerEvent`] rather than toolkit
//! events, so stroke handling is testable without a live event loop.

use image::{GrayImage, RgbImage};

use crate::mask::brush;
use crate::state::history::UndoStack;

/// Intensity the eraser writes into the mask.
pub const ERASER_VALUE: u8 = 0;

/// Multiplicative zoom step per wheel notch.
const ZOOM_STEP: f32 = 1.1;

/// Which physical button started a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeButton {
    /// Left button: the current primary mode.
    Primary,
    /// Right button: the opposite of the current mode.
    Secondary,
}

/// What a stamp does to the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampKind {
    Paint,
    Erase,
}

/// Decide what a button press does under the current mode.
///
/// The eraser toggle swaps which button paints and which erases; the
/// secondary button always performs the opposite of the primary.
pub fn resolve_action(button: StrokeButton, eraser_on: bool) -> StampKind {
    match (button, eraser_on) {
        (StrokeButton::Primary, false) | (StrokeButton::Secondary, true) => StampKind::Paint,
        (StrokeButton::Primary, true) | (StrokeButton::Secondary, false) => StampKind::Erase,
    }
}

/// Pointer input in canvas (screen) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { button: StrokeButton, x: f32, y: f32 },
    Drag { x: f32, y: f32 },
    Up,
    Scroll { notches: f32 },
}

/// Preset pen intensities for the grayscale mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenShade {
    White,
    Silver,
    Gray,
    Charcoal,
}

impl PenShade {
    pub const ALL: [PenShade; 4] = [
        PenShade::White,
        PenShade::Silver,
        PenShade::Gray,
        PenShade::Charcoal,
    ];

    pub fn value(self) -> u8 {
        match self {
            PenShade::White => 255,
            PenShade::Silver => 192,
            PenShade::Gray => 128,
            PenShade::Charcoal => 64,
        }
    }
}

impl std::fmt::Display for PenShade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PenShade::White => "White",
            PenShade::Silver => "Silver",
            PenShade::Gray => "Gray",
            PenShade::Charcoal => "Charcoal",
        };
        write!(f, "{name}")
    }
}

/// Zoom, opacity, and brush settings shared by rendering and stamping.
#[derive(Debug, Clone, Copy)]
pub struct ViewState {
    /// Display scale; 1.0 = native pixels. Unbounded in either direction.
    pub zoom: f32,
    /// Mask overlay opacity, 0.0 to 1.0.
    pub opacity: f32,
    /// Pen thickness from the slider (1 to 20).
    pub thickness: u8,
    /// Persistent mode toggle; swaps what the two buttons do.
    pub eraser_on: bool,
    pub pen: PenShade,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            zoom: 1.0,
            opacity: 0.5,
            thickness: 5,
            eraser_on: false,
            pen: PenShade::White,
        }
    }
}

impl ViewState {
    /// Brush radius in mask pixels. Thickness 1 or 2 maps to the minimum
    /// radius of 1, which stamps a single pixel.
    pub fn brush_radius(&self) -> u32 {
        (self.thickness as u32 / 2).max(1)
    }

    /// Apply one wheel movement: ±10% per notch, sign only.
    pub fn zoom_by(&mut self, notches: f32) {
        if notches > 0.0 {
            self.zoom *= ZOOM_STEP;
        } else if notches < 0.0 {
            self.zoom /= ZOOM_STEP;
        }
    }
}

/// One image open for editing.
///
/// The image is immutable once loaded; the mask is mutated in place by
/// strokes and owned exclusively here.
pub struct EditorSession {
    pub file_name: String,
    pub image: RgbImage,
    pub mask: GrayImage,
    /// Stamp value of the stroke in progress, if a button is held.
    active_stamp: Option<u8>,
}

impl EditorSession {
    pub fn new(file_name: String, image: RgbImage, mask: GrayImage) -> Self {
        EditorSession {
            file_name,
            image,
            mask,
            active_stamp: None,
        }
    }

    /// Dispatch one pointer event. Returns true when the display needs a
    /// recomposite.
    ///
    /// A stroke snapshots the mask exactly once, at pointer-down. Each
    /// drag stamps one disk at the new position; samples are not
    /// interpolated, matching the per-event stamp policy.
    pub fn pointer(
        &mut self,
        event: PointerEvent,
        view: &mut ViewState,
        history: &mut UndoStack,
    ) -> bool {
        match event {
            PointerEvent::Down { button, x, y } => {
                history.push(self.mask.clone());
                let value = match resolve_action(button, view.eraser_on) {
                    StampKind::Paint => view.pen.value(),
                    StampKind::Erase => ERASER_VALUE,
                };
                self.active_stamp = Some(value);
                self.stamp_at(x, y, view, value);
                true
            }
            PointerEvent::Drag { x, y } => match self.active_stamp {
                Some(value) => {
                    self.stamp_at(x, y, view, value);
                    true
                }
                None => false,
            },
            PointerEvent::Up => {
                self.active_stamp = None;
                false
            }
            PointerEvent::Scroll { notches } => {
                view.zoom_by(notches);
                true
            }
        }
    }

    fn stamp_at(&mut self, x: f32, y: f32, view: &ViewState, value: u8) {
        let (cx, cy) = brush::to_mask_point(x, y, view.zoom);
        brush::stamp(&mut self.mask, cx, cy, view.brush_radius(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: u32) -> EditorSession {
        EditorSession::new(
            "test.png".to_string(),
            RgbImage::new(size, size),
            GrayImage::new(size, size),
        )
    }

    fn stroke_at(
        session: &mut EditorSession,
        view: &mut ViewState,
        history: &mut UndoStack,
        button: StrokeButton,
        x: f32,
        y: f32,
    ) {
        session.pointer(PointerEvent::Down { button, x, y }, view, history);
        session.pointer(PointerEvent::Up, view, history);
    }

    #[test]
    fn test_resolve_action_mode_table() {
        assert_eq!(resolve_action(StrokeButton::Primary, false), StampKind::Paint);
        assert_eq!(resolve_action(StrokeButton::Secondary, false), StampKind::Erase);
        assert_eq!(resolve_action(StrokeButton::Primary, true), StampKind::Erase);
        assert_eq!(resolve_action(StrokeButton::Secondary, true), StampKind::Paint);
    }

    #[test]
    fn test_stroke_paints_disk_at_zoomed_position() {
        let mut session = session(100);
        let mut view = ViewState {
            thickness: 20,
            ..ViewState::default()
        };
        let mut history = UndoStack::new();

        stroke_at(
            &mut session,
            &mut view,
            &mut history,
            StrokeButton::Primary,
            50.0,
            50.0,
        );

        // Thickness 20 -> radius 10 white disk centered at (50,50)
        assert_eq!(session.mask.get_pixel(50, 50)[0], 255);
        assert_eq!(session.mask.get_pixel(40, 50)[0], 255);
        assert_eq!(session.mask.get_pixel(60, 50)[0], 255);
        assert_eq!(session.mask.get_pixel(61, 50)[0], 0);
        assert!(!history.is_empty());
    }

    #[test]
    fn test_zoom_divides_stroke_coordinates() {
        let mut session = session(100);
        let mut view = ViewState {
            zoom: 2.0,
            thickness: 1,
            ..ViewState::default()
        };
        let mut history = UndoStack::new();

        stroke_at(
            &mut session,
            &mut view,
            &mut history,
            StrokeButton::Primary,
            80.0,
            40.0,
        );

        assert_eq!(session.mask.get_pixel(40, 20)[0], 255);
    }

    #[test]
    fn test_secondary_button_erases() {
        let mut session = session(50);
        session.mask = GrayImage::from_pixel(50, 50, image::Luma([255]));
        let mut view = ViewState {
            thickness: 1,
            ..ViewState::default()
        };
        let mut history = UndoStack::new();

        stroke_at(
            &mut session,
            &mut view,
            &mut history,
            StrokeButton::Secondary,
            10.0,
            10.0,
        );

        assert_eq!(session.mask.get_pixel(10, 10)[0], ERASER_VALUE);
    }

    #[test]
    fn test_eraser_toggle_swaps_buttons() {
        let mut session = session(50);
        let mut view = ViewState {
            thickness: 1,
            eraser_on: true,
            ..ViewState::default()
        };
        let mut history = UndoStack::new();

        // With the eraser on, the secondary button paints
        stroke_at(
            &mut session,
            &mut view,
            &mut history,
            StrokeButton::Secondary,
            5.0,
            5.0,
        );
        assert_eq!(session.mask.get_pixel(5, 5)[0], 255);
    }

    #[test]
    fn test_drag_without_press_is_ignored() {
        let mut session = session(50);
        let mut view = ViewState::default();
        let mut history = UndoStack::new();

        let redraw = session.pointer(
            PointerEvent::Drag { x: 10.0, y: 10.0 },
            &mut view,
            &mut history,
        );

        assert!(!redraw);
        assert!(session.mask.pixels().all(|p| p[0] == 0));
        assert!(history.is_empty());
    }

    #[test]
    fn test_one_snapshot_per_stroke() {
        let mut session = session(50);
        let mut view = ViewState::default();
        let mut history = UndoStack::new();

        session.pointer(
            PointerEvent::Down {
                button: StrokeButton::Primary,
                x: 10.0,
                y: 10.0,
            },
            &mut view,
            &mut history,
        );
        session.pointer(PointerEvent::Drag { x: 12.0, y: 10.0 }, &mut view, &mut history);
        session.pointer(PointerEvent::Drag { x: 14.0, y: 10.0 }, &mut view, &mut history);
        session.pointer(PointerEvent::Up, &mut view, &mut history);

        assert!(history.pop().is_some());
        assert!(history.pop().is_none());
    }

    #[test]
    fn test_n_strokes_then_n_undos_restores_mask() {
        let mut session = session(50);
        let original = session.mask.clone();
        let mut view = ViewState::default();
        let mut history = UndoStack::new();

        for i in 0..3 {
            stroke_at(
                &mut session,
                &mut view,
                &mut history,
                StrokeButton::Primary,
                10.0 * (i + 1) as f32,
                10.0,
            );
        }
        assert_ne!(session.mask, original);

        for _ in 0..3 {
            session.mask = history.pop().unwrap();
        }
        assert_eq!(session.mask, original);
        assert!(history.is_empty());
    }

    #[test]
    fn test_scroll_steps_zoom() {
        let mut session = session(10);
        let mut view = ViewState::default();
        let mut history = UndoStack::new();

        session.pointer(PointerEvent::Scroll { notches: 1.0 }, &mut view, &mut history);
        assert!((view.zoom - 1.1).abs() < 1e-6);
        session.pointer(PointerEvent::Scroll { notches: -1.0 }, &mut view, &mut history);
        assert!((view.zoom - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_brush_radius_from_thickness() {
        let mut view = ViewState::default();
        view.thickness = 1;
        assert_eq!(view.brush_radius(), 1);
        view.thickness = 2;
        assert_eq!(view.brush_radius(), 1);
        view.thickness = 5;
        assert_eq!(view.brush_radius(), 2);
        view.thickness = 20;
        assert_eq!(view.brush_radius(), 10);
    }
}
