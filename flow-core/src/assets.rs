//! Asset resolution. Missing or unreadable images never fail a render;
//! they are swapped for a placeholder before layout starts.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};

use crate::block::{ImageBlock, ImageSource, ImageSize};
use crate::error::ImageError;
use crate::images::{load_image, ImageData};

/// Read and decode an image file.
pub fn load_image_file<P: AsRef<Path>>(path: P) -> Result<ImageData, ImageError> {
    let bytes = fs::read(path)?;
    load_image(bytes)
}

/// Image block for the file at `path`, or `fallback` when the file is
/// missing or cannot be decoded. The fallback's alignment is kept in
/// both cases.
pub fn resolve_image<P: AsRef<Path>>(path: P, size: ImageSize, fallback: ImageBlock) -> ImageBlock {
    let path = path.as_ref();
    match load_image_file(path) {
        Ok(data) => {
            debug!(
                "loaded image {} ({}x{})",
                path.display(),
                data.width,
                data.height
            );
            ImageBlock::new(ImageSource::Data(Arc::new(data)), size).with_align(fallback.align)
        }
        Err(err) => {
            warn!("image {} unavailable, using placeholder: {}", path.display(), err);
            fallback
        }
    }
}
