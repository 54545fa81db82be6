//! Image text extraction stub
//!
//! Accepts image files and, after a fixed delay, returns canned text. No
//! pixels are read.

use std::path::Path;
use std::time::Duration;

use crate::{Error, Result};

/// Text returned for every accepted image
pub const CANNED_TEXT: &str = "Sample text extracted from image: Meeting notes - \
    Discuss project timeline, review budget, assign tasks.";

/// File extensions accepted as images
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Check whether `path` names an accepted image type
#[must_use]
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// "Extract" text from an image after `delay`
///
/// # Errors
///
/// Returns error if `path` is not an accepted image type
pub async fn extract_text(path: &Path, delay: Duration) -> Result<String> {
    if !is_image(path) {
        return Err(Error::UnsupportedFile(path.display().to_string()));
    }

    tracing::debug!(path = %path.display(), delay_ms = delay.as_millis(), "processing image");
    tokio::time::sleep(delay).await;

    Ok(CANNED_TEXT.to_string())
}
