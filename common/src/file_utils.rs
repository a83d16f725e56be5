//! File utility functions for extension checks and directory bookkeeping.

use std::path::{Path, PathBuf};

use crate::file_format::get_file_extension;

/// Raster image extensions accepted for reading and writing.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp"];

/// Returns true if the path's extension is one of `extensions`.
/// Extensions are matched case-insensitively.
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    get_file_extension(path).is_some_and(|ext| extensions.contains(&ext.as_str()))
}

/// Directory a file dialog should reopen in after `path` was used.
///
/// Relative paths are resolved against the current directory; a bare file
/// name yields the current directory.
pub fn parent_dir(path: &Path) -> Option<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(path)
    };
    absolute.parent().map(Path::to_path_buf)
}
