//! Institution logo storage
//!
//! A logo is kept as raw bytes plus a sniffed format. The inline
//! representation shared with the browser is a base64 data URL, which is also
//! how a logo is serialized inside a form snapshot.
//!
//! Nothing here validates that the bytes decode as an image. A broken logo is
//! only noticed by the document library that tries to embed it.

use std::fmt;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, Result};

/// Image format, detected from the file signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Unknown,
}

impl ImageFormat {
    /// Sniff the format from the leading magic bytes
    pub fn detect(data: &[u8]) -> Self {
        if data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Self::Png
        } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Self::Jpeg
        } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            Self::Gif
        } else {
            Self::Unknown
        }
    }

    /// Map a MIME type to a format
    pub fn from_mime(mime: &str) -> Self {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Self::Png,
            "image/jpeg" | "image/jpg" => Self::Jpeg,
            "image/gif" => Self::Gif,
            _ => Self::Unknown,
        }
    }

    /// MIME type of the format
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Unknown => "application/octet-stream",
        }
    }

    /// File extension used when the logo is written into a package
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Unknown => "bin",
        }
    }
}

/// An uploaded logo image
#[derive(Clone, PartialEq, Eq)]
pub struct Logo {
    format: ImageFormat,
    data: Vec<u8>,
}

impl Logo {
    /// Wrap uploaded bytes
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self {
            format: ImageFormat::detect(&data),
            data,
        }
    }

    /// Read a logo from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Self::from_bytes(data))
    }

    /// Decode a `data:<mime>;base64,<payload>` URL
    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest = url
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| CoreError::InvalidDataUrl("missing 'data:' prefix".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| CoreError::InvalidDataUrl("missing ',' separator".to_string()))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| CoreError::InvalidDataUrl("only base64 payloads are supported".to_string()))?;

        let data = STANDARD.decode(payload.trim())?;
        let format = match ImageFormat::detect(&data) {
            ImageFormat::Unknown => ImageFormat::from_mime(mime),
            sniffed => sniffed,
        };

        Ok(Self { format, data })
    }

    /// Encode as a base64 data URL
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.format.mime(), STANDARD.encode(&self.data))
    }

    /// The detected format
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Raw image bytes
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Size of the image in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the upload was empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for Logo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logo")
            .field("format", &self.format)
            .field("len", &self.data.len())
            .finish()
    }
}

impl Serialize for Logo {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_url())
    }
}

impl<'de> Deserialize<'de> for Logo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let url = String::deserialize(deserializer)?;
        Logo::from_data_url(&url).map_err(serde::de::Error::custom)
    }
}

/// Smallest valid PNG (1x1), for tests across the workspace
#[cfg(any(test, feature = "test-fixtures"))]
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
    0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
    0xFF, 0xFF, 0x3F, 0x00, 0x05, 0xFE, 0x02, 0xFE, 0xDC, 0xCC, 0x59, 0xE7, 0x00, 0x00, 0x00,
    0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_formats() {
        assert_eq!(ImageFormat::detect(TINY_PNG), ImageFormat::Png);
        assert_eq!(ImageFormat::detect(&[0xFF, 0xD8, 0xFF, 0xE0]), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::detect(b"GIF89a...."), ImageFormat::Gif);
        assert_eq!(ImageFormat::detect(b"hello"), ImageFormat::Unknown);
    }

    #[test]
    fn test_data_url_roundtrip() {
        let logo = Logo::from_bytes(TINY_PNG.to_vec());
        let url = logo.to_data_url();
        assert!(url.starts_with("data:image/png;base64,"));

        let back = Logo::from_data_url(&url).unwrap();
        assert_eq!(back, logo);
        assert_eq!(back.format(), ImageFormat::Png);
    }

    #[test]
    fn test_data_url_uses_mime_when_bytes_unknown() {
        let url = format!("data:image/gif;base64,{}", STANDARD.encode(b"junk"));
        let logo = Logo::from_data_url(&url).unwrap();
        assert_eq!(logo.format(), ImageFormat::Gif);
        assert_eq!(logo.bytes(), b"junk");
    }

    #[test]
    fn test_data_url_errors() {
        assert!(Logo::from_data_url("image/png;base64,AAAA").is_err());
        assert!(Logo::from_data_url("data:image/png;base64").is_err());
        assert!(Logo::from_data_url("data:image/png,plain").is_err());
        assert!(matches!(
            Logo::from_data_url("data:image/png;base64,@@@"),
            Err(CoreError::Base64(_))
        ));
    }

    #[test]
    fn test_garbage_bytes_are_accepted() {
        let logo = Logo::from_bytes(vec![1, 2, 3]);
        assert_eq!(logo.format(), ImageFormat::Unknown);
        assert_eq!(logo.format().extension(), "bin");
        assert_eq!(logo.len(), 3);
    }

    #[test]
    fn test_debug_hides_payload() {
        let logo = Logo::from_bytes(TINY_PNG.to_vec());
        let dbg = format!("{:?}", logo);
        assert!(dbg.contains("Png"));
        assert!(!dbg.contains("137"));
    }
}
