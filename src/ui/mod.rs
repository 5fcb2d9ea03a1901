/// UI widgets
///
/// The interactive canvas lives here; the rest of the layout is plain
/// iced widgets assembled in main.rs.

pub mod canvas;
