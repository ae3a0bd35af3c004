//! Core types for attribute analysis.

use crate::error::{AttriscanError, Result};
use image::GenericImageView;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Image formats accepted by the upload surface.
///
/// `jpg` and `jpeg` are the same format and collapse to [`ImageKind::Jpeg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// PNG format (lossless).
    Png,
    /// JPEG format (lossy).
    Jpeg,
}

impl ImageKind {
    /// Returns the file extension for this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    /// Returns the MIME type for this kind.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// Attempts to detect the kind from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Detects the kind from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        None
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// A user-uploaded photo, validated and ready for analysis.
///
/// The original bytes are kept untouched; they go to the wire payload
/// byte-for-byte. Decoding happens once, to reject non-images and to record
/// the pixel dimensions.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Raw image bytes as uploaded.
    pub data: Vec<u8>,
    /// Detected format.
    pub kind: ImageKind,
    /// Decoded width in pixels.
    pub width: u32,
    /// Decoded height in pixels.
    pub height: u32,
}

impl UploadedImage {
    /// Validates upload bytes and constructs an image.
    ///
    /// Rejects payloads whose magic bytes are not PNG/JPEG and payloads the
    /// decoder cannot parse.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let kind = ImageKind::from_magic_bytes(&data).ok_or_else(|| {
            AttriscanError::UnsupportedFormat("expected a png, jpg, or jpeg payload".into())
        })?;

        let decoded = image::load_from_memory(&data)?;
        let (width, height) = decoded.dimensions();

        Ok(Self {
            data,
            kind,
            width,
            height,
        })
    }

    /// Reads and validates an image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Returns the MIME type of the upload.
    pub fn mime_type(&self) -> &'static str {
        self.kind.mime_type()
    }

    /// Returns the size of the upload in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Encodes the original bytes as base64 for the wire payload.
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

/// Provenance metadata attached to an analysis result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Model that produced the description.
    pub model: Option<String>,
    /// Round-trip duration in milliseconds.
    pub duration_ms: Option<u64>,
}

/// The remote service's description of one uploaded image.
///
/// One opaque text blob; never parsed into the attributes it was asked for.
#[derive(Debug, Clone)]
#[must_use = "analysis result should be displayed"]
pub struct AnalysisResult {
    /// Description text, surrounding whitespace removed.
    pub text: String,
    /// Provenance metadata.
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    /// Creates a result, trimming surrounding whitespace from the text.
    pub fn new(text: impl Into<String>, metadata: AnalysisMetadata) -> Self {
        Self {
            text: text.into().trim().to_string(),
            metadata,
        }
    }
}
