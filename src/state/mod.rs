/// State management module
///
/// This module handles all application state, including:
/// - The image/mask directory pair and navigation cursor (store.rs)
/// - The editing session: current image, mask, and view state (session.rs)
/// - The undo history of mask snapshots (history.rs)

pub mod history;
pub mod session;
pub mod store;
