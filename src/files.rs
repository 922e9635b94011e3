//! Image file collection and copying helpers used by the command-line driver.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions of files the `exif` tool can load.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "jpe", "jfif"];

/// Buffer size for [`copy_stream`].
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Collect supported image files from the given paths.
///
/// Accepts a mix of file paths and directory paths. Directories are walked
/// recursively (following symlinks). Only files with supported image
/// extensions are included.
///
/// # Example
///
/// ```rust,no_run
/// use exif_bridge::files::collect_images;
/// use std::path::PathBuf;
///
/// let images = collect_images(&[
///     PathBuf::from("photo.jpg"),       // single file
///     PathBuf::from("./photos/"),        // entire directory
/// ]);
/// println!("Found {} images", images.len());
/// ```
pub fn collect_images(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut images = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_supported_image(path) {
                images.push(path.clone());
            } else {
                log::warn!("Skipping unsupported file: {}", path.display());
            }
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let p = entry.path();
                if p.is_file() && is_supported_image(p) {
                    images.push(p.to_path_buf());
                }
            }
        } else {
            log::warn!("Path does not exist: {}", path.display());
        }
    }

    images
}

/// Check if a file has a supported image extension.
fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Copy everything from `reader` to `writer` through fixed-size buffers.
///
/// Returns the number of bytes copied. The writer is flushed before returning.
pub fn copy_stream<R: Read, W: Write>(reader: R, writer: W) -> io::Result<u64> {
    let mut reader = BufReader::with_capacity(COPY_BUFFER_SIZE, reader);
    let mut writer = BufWriter::with_capacity(COPY_BUFFER_SIZE, writer);
    let copied = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    Ok(copied)
}

/// Copy the file at `src` to `dest`, creating or truncating `dest`.
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64> {
    let input = File::open(src).with_context(|| format!("Failed to open {}", src.display()))?;
    let output =
        File::create(dest).with_context(|| format!("Failed to create {}", dest.display()))?;
    let copied = copy_stream(input, output)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dest.display()))?;
    log::debug!("Copied {copied} bytes to {}", dest.display());
    Ok(copied)
}

/// Create a backup of the original file as `<name>.<ext>.bak`.
///
/// An existing backup is never overwritten, so the first backup keeps the
/// untouched original.
pub fn backup_file(path: &Path) -> Result<PathBuf> {
    let backup_path = path.with_extension(format!(
        "{}.bak",
        path.extension().unwrap_or_default().to_string_lossy()
    ));

    if !backup_path.exists() {
        copy_file(path, &backup_path).context("Failed to create backup")?;
        log::debug!("Backup created: {}", backup_path.display());
    }

    Ok(backup_path)
}
