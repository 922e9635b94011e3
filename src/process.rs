//! Synchronous execution of the external tool.
//!
//! [`ToolCommand`] runs a program to completion with stdout and stderr
//! merged into a single buffer, the same way a terminal would interleave
//! them. The merge goes through one anonymous temporary file handed to the
//! child as both streams, so the write order the child produced is kept.

use std::ffi::{OsStr, OsString};
use std::io::{self, Read, Seek, SeekFrom};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// A builder for constructing and executing external tool invocations.
///
/// # Example
///
/// ```rust,no_run
/// use exif_bridge::process::ToolCommand;
///
/// let output = ToolCommand::new("exif")
///     .arg("-x")
///     .arg("photo.jpg")
///     .execute()?;
/// println!("{output}");
/// # Ok::<(), exif_bridge::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: OsString,
    args: Vec<OsString>,
    show_command: bool,
}

impl ToolCommand {
    /// Create a new command for the given program name or path.
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            show_command: false,
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl AsRef<OsStr>) -> &mut Self {
        self.args.push(s.as_ref().to_os_string());
        self
    }

    /// Append multiple arguments.
    pub fn args<I, S>(&mut self, iter: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(iter.into_iter().map(|s| s.as_ref().to_os_string()));
        self
    }

    /// Print the command line to stderr before running it.
    pub fn show_command(&mut self, show: bool) -> &mut Self {
        self.show_command = show;
        self
    }

    /// The program name, lossily converted for messages.
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// The arguments, in order.
    pub fn get_args(&self) -> impl Iterator<Item = &OsStr> {
        self.args.iter().map(OsString::as_os_str)
    }

    /// The full command line, with arguments containing whitespace quoted.
    pub fn command_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|part| {
                let part = part.to_string_lossy();
                if part.is_empty() || part.contains(char::is_whitespace) {
                    format!("'{part}'")
                } else {
                    part.into_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the command to completion and return its combined output.
    ///
    /// Output bytes that are not valid UTF-8 are replaced.
    ///
    /// # Errors
    ///
    /// - [`Error::Process`] if the program cannot be started (with empty
    ///   output) or exits with a non-zero status (with everything it wrote).
    /// - [`Error::Resource`] if the capture buffer cannot be created or read.
    pub fn execute(&self) -> Result<String> {
        let program = self.program_name();
        let command_line = self.command_line();

        if self.show_command {
            eprintln!("{command_line}");
        }
        log::debug!("Running: {command_line}");

        let mut capture = tempfile::tempfile()
            .map_err(|e| Error::resource("failed to create output buffer", e))?;
        let stdout = capture
            .try_clone()
            .map_err(|e| Error::resource("failed to share output buffer", e))?;
        let stderr = capture
            .try_clone()
            .map_err(|e| Error::resource("failed to share output buffer", e))?;

        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .status();

        let status = match status {
            Ok(status) => status,
            Err(source) => {
                return Err(Error::Process {
                    program,
                    status: None,
                    output: String::new(),
                    source,
                });
            }
        };

        let mut raw = Vec::new();
        capture
            .seek(SeekFrom::Start(0))
            .and_then(|_| capture.read_to_end(&mut raw))
            .map_err(|e| Error::resource("failed to read captured output", e))?;
        let output = String::from_utf8_lossy(&raw).into_owned();

        if !status.success() {
            log::debug!("{program} exited with {status}:\n{output}");
            return Err(Error::Process {
                program,
                status: Some(status),
                output,
                source: io::Error::other(status.to_string()),
            });
        }

        Ok(output)
    }
}

/// Split captured output into lines on `\n`.
///
/// Nothing is trimmed. Output ending in a newline yields a trailing empty
/// line, so `"a\nb\n"` gives `["a", "b", ""]`.
pub fn output_lines(output: &str) -> Vec<&str> {
    output.split('\n').collect()
}
