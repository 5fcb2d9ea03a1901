//! Error types for file and image operations.
//!
//! Everything the editor reads or writes goes through these variants,
//! each carrying the path that failed so the status line can show it.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to write {path}: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
}
