// Document Renderer: turns a validated submission into the resume PDF.
// Rendering is CPU-bound; async callers run it inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod layout;
pub mod pdf;
pub mod photo;

use std::path::PathBuf;

use thiserror::Error;

pub use pdf::render_resume;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("The uploaded photo could not be read")]
    PhotoUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The uploaded photo is not a valid image: {0}")]
    PhotoDecode(#[from] image::ImageError),

    #[error("The photo could not be compressed: {0}")]
    Compress(#[source] std::io::Error),
}
