//! Minimal PDF backend: object model, serializer, content streams and
//! an incremental page writer.

pub mod content;
pub mod document;
pub mod object;
pub mod writer;

pub use content::ContentStream;
pub use document::{ImageHandle, PdfDocument};
