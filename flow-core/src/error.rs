use std::io;

use thiserror::Error;

/// Structural problems detected before or during the layout pass.
///
/// These are never transient: the same geometry and blocks will always
/// produce the same error, so callers should surface them, not retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),

    #[error("column widths sum to {total}pt but only {available}pt are available")]
    ColumnsExceedWidth { total: f64, available: f64 },

    #[error("block {index} needs {height}pt but a page frame holds only {frame_height}pt")]
    BlockTooTall {
        index: usize,
        height: f64,
        frame_height: f64,
    },

    #[error("repeated header rows need {height}pt but a page frame holds only {frame_height}pt")]
    HeaderTooTall { height: f64, frame_height: f64 },

    #[error("table row {row} needs {height}pt (with headers) but a page frame holds only {frame_height}pt")]
    RowTooTall {
        row: usize,
        height: f64,
        frame_height: f64,
    },

    #[error("table row {row} has {cells} cells for {columns} columns")]
    TooManyCells {
        row: usize,
        cells: usize,
        columns: usize,
    },

    #[error("invalid image size: {0}")]
    InvalidImageSize(String),

    #[error("invalid height: {0}")]
    InvalidHeight(String),
}

/// A render fails as a whole; partial output is never returned.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("PDF backend failed: {0}")]
    Backend(#[from] io::Error),
}

/// Why an image asset could not be turned into pixels.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image file could not be read: {0}")]
    Io(#[from] io::Error),

    #[error("unsupported image data: {0}")]
    Unsupported(String),

    #[error("PNG decode error: {0}")]
    Png(#[from] png::DecodingError),
}
