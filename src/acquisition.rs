//! Image acquisition: read one image and encode it for the inference request.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Errors that can occur while acquiring an image.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("Failed to read image '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image data is empty")]
    Empty,

    #[error("Not a recognised image format")]
    NotAnImage,
}

/// An encoded image ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    base64: String,
    mime_type: &'static str,
    byte_len: usize,
}

impl ImagePayload {
    /// Encode raw image bytes.
    ///
    /// The format is detected from the leading magic bytes; anything that is
    /// not an image is rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AcquireError> {
        if bytes.is_empty() {
            return Err(AcquireError::Empty);
        }

        let format = image::guess_format(bytes).map_err(|_| AcquireError::NotAnImage)?;

        Ok(Self {
            base64: STANDARD.encode(bytes),
            mime_type: format.to_mime_type(),
            byte_len: bytes.len(),
        })
    }

    /// Read and encode an image file.
    pub fn from_path(path: &Path) -> Result<Self, AcquireError> {
        let bytes = std::fs::read(path).map_err(|e| AcquireError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_bytes(&bytes)
    }

    /// Bare base64 payload, without a data-URI prefix.
    pub fn base64(&self) -> &str {
        &self.base64
    }

    /// Detected MIME type, e.g. `image/jpeg`.
    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    /// Size of the original image in bytes.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Displayable preview handle for the result view.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

/// Acquire the selected image, if any.
///
/// No selection is not an error: it yields `Ok(None)`.
pub fn acquire(selection: Option<&Path>) -> Result<Option<ImagePayload>, AcquireError> {
    let Some(path) = selection else {
        tracing::debug!("No image selected");
        return Ok(None);
    };

    let payload = ImagePayload::from_path(path)?;
    tracing::debug!(
        path = %path.display(),
        mime_type = payload.mime_type(),
        bytes = payload.byte_len(),
        "Image acquired"
    );
    Ok(Some(payload))
}
