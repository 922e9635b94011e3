//! External tool detection.
//!
//! Resolves the `exif` program (or a configured replacement) on `PATH` and
//! reports its version for diagnostics.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::process::ToolCommand;

/// Availability information for a tool, returned by [`check`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name as configured.
    pub name: String,
    /// Whether the tool was found.
    pub available: bool,
    /// First line of `--version` output, if available.
    pub version: Option<String>,
    /// Resolved path to the executable.
    pub path: Option<PathBuf>,
}

/// Resolve `program` to an executable path.
///
/// Names containing a path separator are checked as given; bare names are
/// searched for on `PATH`.
pub fn locate(program: &str) -> Result<PathBuf> {
    which::which(program).map_err(|e| {
        log::debug!("{program} lookup failed: {e}");
        Error::tool_not_found(program)
    })
}

/// Check whether `program` is installed and which version it reports.
pub fn check(program: &str) -> ToolInfo {
    match locate(program) {
        Ok(path) => ToolInfo {
            name: program.to_string(),
            available: true,
            version: detect_version(&path),
            path: Some(path),
        },
        Err(_) => ToolInfo {
            name: program.to_string(),
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Run `<tool> --version` and return the first non-empty line.
fn detect_version(path: &Path) -> Option<String> {
    let output = ToolCommand::new(path).arg("--version").execute().ok()?;
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
