use iced::widget::image::Handle;
use iced::widget::{
    button, canvas, column, container, horizontal_space, pick_list, row, slider, text, text_input,
};
use iced::{keyboard, Alignment, Element, Length, Subscription, Task, Theme};
use rfd::{FileDialog, MessageDialog, MessageLevel};
use std::time::Duration;

mod error;
mod mask;
mod state;
mod ui;

use state::history::UndoStack;
use state::session::{EditorSession, PenShade, PointerEvent, ViewState};
use state::store::{ImageStore, NavOutcome};

/// Quick-select pen thicknesses next to the slider
const THICKNESS_PRESETS: [u8; 4] = [1, 5, 10, 20];

/// How long the transient "Saved!" notice stays on the status line
const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(3);

/// Main application state
struct MaskEditor {
    /// The image/mask directory pair and navigation cursor
    store: ImageStore,
    /// The image currently open for editing, if any
    session: Option<EditorSession>,
    /// Zoom, opacity, and brush settings
    view: ViewState,
    /// Undo snapshots for the current image
    history: UndoStack,
    /// Cached composite bitmap and its pixel dimensions
    composite: Option<(Handle, u32, u32)>,
    /// Status message to display to the user
    status: String,
    /// Bumped on every status change; a pending auto-clear whose
    /// generation no longer matches is stale and ignored
    status_generation: u64,
    /// Contents of the "go to image #" field
    jump_input: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Pointer input forwarded by the canvas
    Canvas(PointerEvent),
    PreviousImage,
    NextImage,
    JumpInputChanged(String),
    JumpSubmitted,
    /// Delete the current image/mask pair from disk
    DeleteCurrent,
    OpacityChanged(f32),
    ThicknessChanged(u8),
    PenShadeChanged(PenShade),
    ToggleEraser,
    SaveMask,
    Undo,
    /// The deferred status clear fired; carries the generation it was
    /// scheduled against
    StatusExpired(u64),
}

impl MaskEditor {
    /// Create a new instance of the application.
    ///
    /// Prompts for the RGB source directory and the mask directory, in
    /// that order. Cancelling either leaves the session disabled.
    fn new() -> (Self, Task<Message>) {
        let rgb_dir = FileDialog::new()
            .set_title("Select RGB Image Directory")
            .pick_folder();
        let mask_dir = FileDialog::new()
            .set_title("Select Mask Directory")
            .pick_folder();

        let store = ImageStore::open(rgb_dir, mask_dir);
        println!("🎨 Mask Editor initialized with {} images", store.len());

        let mut editor = MaskEditor {
            store,
            session: None,
            view: ViewState::default(),
            history: UndoStack::new(),
            composite: None,
            status: String::new(),
            status_generation: 0,
            jump_input: String::new(),
        };

        if editor.store.navigate(1) != NavOutcome::Empty {
            editor.load_current();
        } else {
            editor.show_status("No images found. Restart and select two directories.");
        }

        (editor, Task::none())
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Canvas(event) => {
                if let Some(session) = &mut self.session {
                    if session.pointer(event, &mut self.view, &mut self.history) {
                        self.refresh_composite();
                    }
                }
            }

            Message::PreviousImage => self.step(-1),
            Message::NextImage => self.step(1),

            Message::JumpInputChanged(value) => {
                // The prompt itself only admits digits
                self.jump_input = value.chars().filter(|c| c.is_ascii_digit()).collect();
            }
            Message::JumpSubmitted if self.store.is_empty() => {
                self.show_status("No images loaded.");
                self.jump_input.clear();
            }
            Message::JumpSubmitted => {
                // Range validation happens here at the prompt; navigation
                // only ever sees numbers already inside [1, len]
                match self.jump_input.parse::<usize>() {
                    Ok(n) if n >= 1 && n <= self.store.len() => {
                        self.store.jump_to(n);
                        self.load_current();
                    }
                    _ => {
                        self.show_status(format!(
                            "Enter an image number between 1 and {}",
                            self.store.len()
                        ));
                    }
                }
                self.jump_input.clear();
            }

            Message::DeleteCurrent => {
                if let Some(name) = self.store.current_file().map(str::to_owned) {
                    match self.store.delete_current() {
                        Ok(_) => {
                            println!("🗑  Deleted {name}");
                            self.load_current();
                            self.show_status(format!("Deleted {name}"));
                        }
                        Err(e) => {
                            eprintln!("⚠️  {e}");
                            self.show_status(e.to_string());
                        }
                    }
                }
            }

            Message::OpacityChanged(value) => {
                self.view.opacity = value;
                self.refresh_composite();
            }
            Message::ThicknessChanged(value) => {
                self.view.thickness = value;
            }
            Message::PenShadeChanged(shade) => {
                self.view.pen = shade;
                // Picking a pen shade leaves eraser mode
                self.view.eraser_on = false;
            }
            Message::ToggleEraser => {
                self.view.eraser_on = !self.view.eraser_on;
            }

            Message::SaveMask => {
                if let Some(session) = &self.session {
                    if let Some((_, mask_path)) = self.store.resolve_paths(&session.file_name) {
                        match mask::io::save_mask(
                            &session.mask,
                            session.image.width(),
                            session.image.height(),
                            &mask_path,
                        ) {
                            Ok(()) => {
                                println!("💾 Saved mask to {}", mask_path.display());
                                return self.show_transient_status("Saved!");
                            }
                            Err(e) => {
                                eprintln!("⚠️  {e}");
                                self.show_status(e.to_string());
                            }
                        }
                    }
                }
            }

            Message::Undo => match self.history.pop() {
                Some(snapshot) => {
                    if let Some(session) = &mut self.session {
                        session.mask = snapshot;
                        self.refresh_composite();
                    }
                }
                None => self.show_status("Nothing to undo."),
            },

            Message::StatusExpired(generation) => {
                if generation == self.status_generation {
                    self.status.clear();
                }
            }
        }

        Task::none()
    }

    /// Move the cursor one image forward or back. Out-of-range requests
    /// leave everything unchanged and raise a modal notice.
    fn step(&mut self, delta: i64) {
        match self.store.navigate(delta) {
            NavOutcome::Moved(_) => self.load_current(),
            NavOutcome::OutOfRange => {
                MessageDialog::new()
                    .set_level(MessageLevel::Info)
                    .set_title("Image Mask Editor")
                    .set_description("No more images in the directory.")
                    .show();
            }
            NavOutcome::Empty => self.show_status("No images loaded."),
        }
    }

    /// Load the image/mask pair at the cursor, replacing the session.
    /// Undo history does not survive navigation.
    fn load_current(&mut self) {
        self.history.clear();
        self.session = None;
        self.composite = None;

        let Some(file_name) = self.store.current_file().map(str::to_owned) else {
            return;
        };
        let Some((image_path, mask_path)) = self.store.resolve_paths(&file_name) else {
            return;
        };

        match mask::io::load_pair(&image_path, &mask_path) {
            Ok((image, mask)) => {
                println!(
                    "🖼  Loaded {} ({}x{})",
                    file_name,
                    image.width(),
                    image.height()
                );
                self.session = Some(EditorSession::new(file_name, image, mask));
                self.refresh_composite();
            }
            Err(e) => {
                eprintln!("⚠️  {e}");
                self.show_status(e.to_string());
            }
        }
    }

    /// Rebuild the displayed bitmap. Full recomposite every time; any
    /// change to mask, zoom, or opacity lands here.
    fn refresh_composite(&mut self) {
        self.composite = self.session.as_ref().map(|session| {
            let rgba = mask::render::compose(
                &session.image,
                &session.mask,
                self.view.zoom,
                self.view.opacity,
            );
            let (width, height) = rgba.dimensions();
            (
                Handle::from_rgba(width, height, rgba.into_raw()),
                width,
                height,
            )
        });
    }

    fn show_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.status_generation += 1;
    }

    /// Show a status message that clears itself after a fixed delay,
    /// unless a newer message has replaced it in the meantime.
    fn show_transient_status(&mut self, message: impl Into<String>) -> Task<Message> {
        self.show_status(message);
        let generation = self.status_generation;
        Task::perform(tokio::time::sleep(STATUS_CLEAR_DELAY), move |_| {
            Message::StatusExpired(generation)
        })
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let has_images = !self.store.is_empty();
        let has_session = self.session.is_some();

        let navigation = row![
            button("Previous").on_press_maybe(has_images.then_some(Message::PreviousImage)),
            button("Next").on_press_maybe(has_images.then_some(Message::NextImage)),
            text_input("go to #", &self.jump_input)
                .on_input(Message::JumpInputChanged)
                .on_submit(Message::JumpSubmitted)
                .width(Length::Fixed(70.0)),
            button("Delete").on_press_maybe(has_session.then_some(Message::DeleteCurrent)),
            button("Save Mask").on_press_maybe(has_session.then_some(Message::SaveMask)),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let mut presets = row![].spacing(5);
        for thickness in THICKNESS_PRESETS {
            presets = presets.push(
                button(text(thickness.to_string()))
                    .on_press(Message::ThicknessChanged(thickness))
                    .padding(5),
            );
        }

        let brush_controls = row![
            text(format!("Opacity {:.1}", self.view.opacity)),
            slider(0.0..=1.0, self.view.opacity, Message::OpacityChanged)
                .step(0.1)
                .width(Length::Fixed(120.0)),
            text(format!("Thickness {}", self.view.thickness)),
            slider(1..=20, self.view.thickness, Message::ThicknessChanged)
                .width(Length::Fixed(120.0)),
            presets,
            pick_list(PenShade::ALL, Some(self.view.pen), Message::PenShadeChanged),
            button(if self.view.eraser_on {
                "Eraser: on"
            } else {
                "Eraser: off"
            })
            .on_press(Message::ToggleEraser),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let canvas_area: Element<Message> = match &self.composite {
            Some((handle, width, height)) => canvas(ui::canvas::MaskCanvas {
                composite: handle.clone(),
            })
            .width(Length::Fixed(*width as f32))
            .height(Length::Fixed(*height as f32))
            .into(),
            None => text("Select an image to begin editing.").size(20).into(),
        };

        let position = match self.store.index() {
            Some(index) => format!("{}/{}", index + 1, self.store.len()),
            None => format!("-/{}", self.store.len()),
        };

        let status_bar = row![
            text(&self.status).size(14),
            horizontal_space(),
            text(position).size(14),
        ]
        .align_y(Alignment::Center);

        let content = column![
            navigation,
            brush_controls,
            container(canvas_area)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
            status_bar,
        ]
        .spacing(10)
        .padding(10);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn title(&self) -> String {
        match &self.session {
            Some(session) => format!("Image Mask Editor - {}", session.file_name),
            None => String::from("Image Mask Editor"),
        }
    }

    /// One accelerator: undo
    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, modifiers| match key.as_ref() {
            keyboard::Key::Character("z") if modifiers.command() => Some(Message::Undo),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application(MaskEditor::title, MaskEditor::update, MaskEditor::view)
        .subscription(MaskEditor::subscription)
        .theme(MaskEditor::theme)
        .centered()
        .run_with(MaskEditor::new)
}
