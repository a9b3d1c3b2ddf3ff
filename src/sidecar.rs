//! Sidecar metadata file I/O: `<path>.meta`, `key=value` lines, one per
//! image's non-empty metadata map.

use std::path::Path;

use crate::error::Result;
use crate::image::{Channels, Image};

/// Derives the sidecar path for an image file: the same path with `.meta`
/// appended.
pub fn sidecar_path(image_path: impl AsRef<Path>) -> std::path::PathBuf {
    let mut s = image_path.as_ref().as_os_str().to_owned();
    s.push(".meta");
    s.into()
}

/// Writes `image`'s metadata to its sidecar file, one `key=value` line per
/// entry in insertion order. Does nothing if there is no metadata.
pub fn write_sidecar(image_path: impl AsRef<Path>, image: &Image) -> Result<()> {
    let mut entries = image.metadata_iter().peekable();
    if entries.peek().is_none() {
        return Ok(());
    }
    let mut contents = String::new();
    for (key, value) in entries {
        contents.push_str(key);
        contents.push('=');
        contents.push_str(value);
        contents.push('\n');
    }
    std::fs::write(sidecar_path(image_path), contents)?;
    Ok(())
}

/// Reads `<path>.meta` into `image`'s metadata, if the sidecar file exists.
/// Lines missing an `=` are skipped with a warning rather than failing the
/// whole read.
pub fn read_sidecar(image_path: impl AsRef<Path>, image: &mut Image) -> Result<()> {
    let path = sidecar_path(image_path);
    if !path.exists() {
        return Ok(());
    }
    let contents = std::fs::read_to_string(&path)?;
    for (line_no, line) in contents.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) => image.set_metadata(key, value),
            None => log::warn!("{}:{}: malformed sidecar line, skipping", path.display(), line_no + 1),
        }
    }
    Ok(())
}
