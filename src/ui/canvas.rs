use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Program};
use iced::widget::image::Handle;
use iced::{Rectangle, Renderer, Theme};

use crate::state::session::{PointerEvent, StrokeButton};
use crate::Message;

/// Canvas showing the cached composite and translating mouse input into
/// [`PointerEvent`]s. Positions are relative to the canvas, which is
/// sized exactly to the composite, so they map straight to zoomed
/// screen coordinates.
pub struct MaskCanvas {
    pub composite: Handle,
}

/// State for an in-progress stroke.
#[derive(Debug, Clone, Default)]
pub struct StrokeState {
    pub is_drawing: bool,
}

impl Program<Message> for MaskCanvas {
    type State = StrokeState;

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        frame.draw_image(
            Rectangle::with_size(frame.size()),
            canvas::Image::new(self.composite.clone()),
        );
        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        match event {
            // Mouse wheel zooms in and out, one step per notch
            canvas::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                let notches = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => y,
                    mouse::ScrollDelta::Pixels { y, .. } => y / 20.0,
                };
                if notches != 0.0 {
                    return (
                        canvas::event::Status::Captured,
                        Some(Message::Canvas(PointerEvent::Scroll { notches })),
                    );
                }
            }

            // Either button starts a stroke; which action it performs is
            // resolved by the session, not here
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = cursor.position_in(bounds) {
                    state.is_drawing = true;
                    return (
                        canvas::event::Status::Captured,
                        Some(Message::Canvas(PointerEvent::Down {
                            button: StrokeButton::Primary,
                            x: position.x,
                            y: position.y,
                        })),
                    );
                }
            }

            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Right)) => {
                if let Some(position) = cursor.position_in(bounds) {
                    state.is_drawing = true;
                    return (
                        canvas::event::Status::Captured,
                        Some(Message::Canvas(PointerEvent::Down {
                            button: StrokeButton::Secondary,
                            x: position.x,
                            y: position.y,
                        })),
                    );
                }
            }

            canvas::Event::Mouse(mouse::Event::ButtonReleased(
                mouse::Button::Left | mouse::Button::Right,
            )) => {
                if state.is_drawing {
                    state.is_drawing = false;
                    return (
                        canvas::event::Status::Captured,
                        Some(Message::Canvas(PointerEvent::Up)),
                    );
                }
            }

            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                if state.is_drawing {
                    if let Some(position) = cursor.position_in(bounds) {
                        return (
                            canvas::event::Status::Captured,
                            Some(Message::Canvas(PointerEvent::Drag {
                                x: position.x,
                                y: position.y,
                            })),
                        );
                    }
                }
            }

            _ => {}
        }

        (canvas::event::Status::Ignored, None)
    }
}
