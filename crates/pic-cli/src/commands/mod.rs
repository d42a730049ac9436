//! CLI command implementations

pub mod crop;
pub mod diff;
pub mod info;
pub mod locate;
pub mod view;

use anyhow::{Context, Result};
use pic_core::PixelView;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<PixelView> {
    pic_io::read_png(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &PixelView) -> Result<()> {
    pic_io::write_png(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Format byte count for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
