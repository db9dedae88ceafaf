//! Background image, inlined into the page stylesheet as a data URL.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;
use tracing::info;

/// Background image encoded once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Background {
    data_url: String,
}

impl Background {
    /// Read and encode an image file. A configured but unreadable image is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read background image {:?}", path))?;
        let background = Self::from_bytes(mime_for(path), &bytes);
        info!("Background image loaded from {:?} ({} bytes)", path, bytes.len());
        Ok(background)
    }

    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self {
            data_url: format!("data:{};base64,{}", mime, STANDARD.encode(bytes)),
        }
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "image/png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url() {
        let bg = Background::from_bytes("image/png", b"abc");
        assert_eq!(bg.data_url(), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_for(Path::new("bg.JPG")), "image/jpeg");
        assert_eq!(mime_for(Path::new("bg.webp")), "image/webp");
        assert_eq!(mime_for(Path::new("background")), "image/png");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("background.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();
        let bg = Background::load(&path).unwrap();
        assert!(bg.data_url().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Background::load(&dir.path().join("nope.png")).unwrap_err();
        assert!(err.to_string().contains("background image"));
    }
}
