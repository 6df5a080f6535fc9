//! Screenshot resolution and embedding.
//!
//! Screenshots are the only runtime input of the generator, so this is the
//! one place with genuine partial-failure handling: a reference that does
//! not resolve to a decodable image becomes a visible placeholder in the
//! output instead of aborting the build. The failure is also handed back to
//! the assembler so callers can surface an aggregate warning.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;

use crate::model::{Flowable, ImageBlock};
use crate::styles::StyleId;

/// Gap between an embedded screenshot and its caption, in millimetres.
const CAPTION_GAP_MM: f64 = 1.4;

/// A (file path, caption) pair resolved against the filesystem at build time.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenshotRef {
    path: PathBuf,
    caption: String,
}

impl ScreenshotRef {
    /// Creates a reference to a screenshot file.
    pub fn new(path: impl Into<PathBuf>, caption: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            caption: caption.into(),
        }
    }

    /// Returns the referenced path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the caption shown under the image.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Reasons a screenshot reference failed to resolve.
#[derive(Debug)]
pub enum ScreenshotError {
    /// The file does not exist.
    NotFound(PathBuf),
    /// The file exists but could not be read.
    Read {
        /// The unreadable path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// The file contents are not a decodable image.
    Decode {
        /// The undecodable path.
        path: PathBuf,
        /// Underlying decoder failure.
        source: image::ImageError,
    },
}

impl ScreenshotError {
    /// Returns the path of the failed screenshot.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path) => path,
            Self::Read { path, .. } | Self::Decode { path, .. } => path,
        }
    }
}

impl fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "screenshot {} does not exist", path.display()),
            Self::Read { path, source } => {
                write!(f, "failed to read screenshot {}: {}", path.display(), source)
            }
            Self::Decode { path, source } => {
                write!(f, "failed to decode screenshot {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ScreenshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Read { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
        }
    }
}

/// Reads and decode-checks the file, returning the raw encoded bytes.
fn load_validated(path: &Path) -> Result<Vec<u8>, ScreenshotError> {
    if !path.exists() {
        return Err(ScreenshotError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(|source| ScreenshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    image::load_from_memory(&bytes).map_err(|source| ScreenshotError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(bytes)
}

/// Converts one screenshot reference into flowables.
///
/// On success the result is the image scaled into the fixed box followed by
/// its centered caption. On any failure the result is a single warning
/// paragraph naming the file, and the error is returned alongside for
/// aggregation. No failure escapes this boundary.
pub fn embed(
    shot: &ScreenshotRef,
    width_mm: f64,
    height_mm: f64,
) -> (Vec<Flowable>, Option<ScreenshotError>) {
    match load_validated(shot.path()) {
        Ok(bytes) => (
            vec![
                Flowable::Image(ImageBlock::new(bytes, width_mm, height_mm)),
                Flowable::spacer(CAPTION_GAP_MM),
                Flowable::text(shot.caption(), StyleId::Caption),
            ],
            None,
        ),
        Err(err) => {
            warn!("substituting placeholder for screenshot: {}", err);
            let text = match &err {
                ScreenshotError::NotFound(_) => {
                    format!("[Missing screenshot: {}]", shot.file_name())
                }
                ScreenshotError::Read { source, .. } => {
                    format!("[Error loading {}: {}]", shot.file_name(), source)
                }
                ScreenshotError::Decode { source, .. } => {
                    format!("[Error loading {}: {}]", shot.file_name(), source)
                }
            };
            (vec![Flowable::text(text, StyleId::Warning)], Some(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Rgb};

    fn png_bytes() -> Vec<u8> {
        let buffer = ImageBuffer::from_fn(8, 6, |x, y| Rgb([x as u8, y as u8, 128]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(buffer)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .expect("encode test image");
        bytes
    }

    #[test]
    fn missing_file_becomes_warning_text() {
        let shot = ScreenshotRef::new("does/not/exist.png", "A caption.");
        let (flowables, err) = embed(&shot, 150.0, 92.0);
        assert_eq!(flowables.len(), 1);
        match &flowables[0] {
            Flowable::Text(block) => {
                assert_eq!(block.style(), StyleId::Warning);
                assert!(block.text().contains("exist.png"));
            }
            other => panic!("expected warning text, got {:?}", other),
        }
        assert!(matches!(err, Some(ScreenshotError::NotFound(_))));
    }

    #[test]
    fn undecodable_file_becomes_warning_text() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("broken.png");
        fs::write(&path, b"not an image").expect("write broken file");

        let shot = ScreenshotRef::new(&path, "A caption.");
        let (flowables, err) = embed(&shot, 150.0, 92.0);
        assert_eq!(flowables.len(), 1);
        assert!(matches!(err, Some(ScreenshotError::Decode { .. })));
        match &flowables[0] {
            Flowable::Text(block) => assert!(block.text().starts_with("[Error loading broken.png")),
            other => panic!("expected warning text, got {:?}", other),
        }
    }

    #[test]
    fn valid_file_becomes_image_and_caption() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("shot.png");
        fs::write(&path, png_bytes()).expect("write test image");

        let shot = ScreenshotRef::new(&path, "Bucket settings.");
        let (flowables, err) = embed(&shot, 150.0, 92.0);
        assert!(err.is_none());
        assert_eq!(flowables.len(), 3);
        assert!(matches!(flowables[0], Flowable::Image(_)));
        match &flowables[2] {
            Flowable::Text(block) => {
                assert_eq!(block.style(), StyleId::Caption);
                assert_eq!(block.text(), "Bucket settings.");
            }
            other => panic!("expected caption text, got {:?}", other),
        }
    }
}
