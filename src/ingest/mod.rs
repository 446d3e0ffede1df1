//! Image Ingest
//!
//! Turns uploaded bytes (PNG, JPEG and the other raster formats the `image`
//! crate understands) into an in-memory RGB pixel array. A failed decode is
//! returned to the caller immediately.

pub mod frame;

use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub use frame::DecodedImage;

/// File extensions offered by the upload control
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Errors raised while turning bytes into pixels
#[derive(Debug, Error)]
pub enum IngestError {
    /// The bytes are not a valid image
    #[error("could not decode image: {0}")]
    Decode(String),
    /// The image file could not be read
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Decode raw image bytes into an RGB pixel array
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, IngestError> {
    if bytes.is_empty() {
        return Err(IngestError::Decode("no data".to_string()));
    }

    let dynamic = image::load_from_memory(bytes).map_err(|e| IngestError::Decode(e.to_string()))?;
    let rgb = dynamic.to_rgb8();
    let image = DecodedImage::new(rgb);
    debug!(
        "Decoded {} bytes into {}x{}x{} image",
        bytes.len(),
        image.height(),
        image.width(),
        image.channels()
    );

    Ok(image)
}

/// Read an image file from disk and decode it
pub fn load_image_file(path: &Path) -> Result<DecodedImage, IngestError> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    decode_image(&bytes)
}

/// Whether the file extension is one the upload control accepts
pub fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
