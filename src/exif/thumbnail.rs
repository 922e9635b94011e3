use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tempfile::TempPath;

use crate::error::{Error, Result};
use crate::process::output_lines;

/// Prefix of the line `exif` prints when the file embeds a thumbnail,
/// e.g. `EXIF data contains a thumbnail (4823 bytes).`
pub const THUMBNAIL_MARKER: &str = "EXIF data contains a thumbnail";

/// How many trailing lines of the info dump are searched for the marker.
pub const THUMBNAIL_SCAN_LINES: usize = 3;

/// Whether the tail of an `exif <file>` dump announces a thumbnail.
///
/// Output shorter than the scan window is searched in full.
pub fn contains_thumbnail_marker(output: &str) -> bool {
    let lines = output_lines(output);
    let start = lines.len().saturating_sub(THUMBNAIL_SCAN_LINES);
    lines[start..]
        .iter()
        .any(|line| line.starts_with(THUMBNAIL_MARKER))
}

/// An extracted thumbnail, open for reading.
///
/// The bytes live in a temporary file owned by this handle. Dropping the
/// handle closes the file and removes it; use [`Thumbnail::close`] to see
/// removal errors, or [`Thumbnail::persist`] to keep the file.
#[derive(Debug)]
pub struct Thumbnail {
    file: File,
    path: TempPath,
}

impl Thumbnail {
    pub(crate) fn open(path: TempPath) -> Result<Self> {
        let file = File::open(&path)
            .map_err(|e| Error::resource("failed to open extracted thumbnail", e))?;
        Ok(Self { file, path })
    }

    /// Location of the backing temporary file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the extracted thumbnail in bytes.
    pub fn len(&self) -> Result<u64> {
        let meta = self
            .file
            .metadata()
            .map_err(|e| Error::resource("failed to stat extracted thumbnail", e))?;
        Ok(meta.len())
    }

    /// Whether extraction produced an empty file.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Close the handle and remove the temporary file.
    pub fn close(self) -> Result<()> {
        drop(self.file);
        self.path
            .close()
            .map_err(|e| Error::resource("failed to remove thumbnail file", e))
    }

    /// Close the handle and move the temporary file to `dest`.
    ///
    /// `dest` must be on the same filesystem as the temporary directory.
    /// If the move fails the temporary file is removed.
    pub fn persist(self, dest: impl AsRef<Path>) -> Result<()> {
        drop(self.file);
        self.path
            .persist(dest)
            .map_err(|e| Error::resource("failed to keep thumbnail file", e.error))
    }
}

impl Read for Thumbnail {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}
