//! Error types for exif-bridge.

use std::io;
use std::process::ExitStatus;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the `exif` tool.
///
/// Errors raised by a caller's [`TagVisitor`](crate::exif::TagVisitor) are
/// not wrapped here; [`ExifTool::read_tags`](crate::exif::ExifTool::read_tags)
/// hands them back unchanged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The external tool could not be found on `PATH`.
    #[error("tool not found: {program}")]
    ToolNotFound { program: String },

    /// The external tool could not be launched or exited with a non-zero status.
    ///
    /// `output` holds everything the tool wrote to stdout and stderr, in the
    /// order it wrote it.
    #[error("{program} failed: {source}")]
    Process {
        program: String,
        status: Option<ExitStatus>,
        output: String,
        #[source]
        source: io::Error,
    },

    /// The tag dump was not well-formed XML.
    #[error("failed to parse {program} output: {source}")]
    Parse {
        program: String,
        #[source]
        source: quick_xml::Error,
    },

    /// A temporary file could not be created, opened, or removed.
    #[error("{context}: {source}")]
    Resource {
        context: &'static str,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Create a tool not found error.
    pub fn tool_not_found(program: impl Into<String>) -> Self {
        Self::ToolNotFound {
            program: program.into(),
        }
    }

    /// Create a resource error for a temporary-file operation.
    pub fn resource(context: &'static str, source: io::Error) -> Self {
        Self::Resource { context, source }
    }

    /// The captured tool output, if this is a process error.
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Process { output, .. } => Some(output),
            _ => None,
        }
    }
}
