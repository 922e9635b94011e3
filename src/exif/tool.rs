use std::path::{Path, PathBuf};

use crate::config::ToolConfig;
use crate::error::{Error, Result};
use crate::process::ToolCommand;
use crate::tools;

use super::thumbnail::{Thumbnail, contains_thumbnail_marker};
use super::visitor::{TagVisitor, relay_tags};

/// Program name used when none is configured.
pub const DEFAULT_PROGRAM: &str = "exif";

/// Reads and writes the metadata of one image file through the `exif` tool.
///
/// Every operation starts one `exif` process and blocks until it exits.
/// Errors never poison the adapter; it can be reused after a failure.
///
/// # Example
///
/// ```rust,no_run
/// use exif_bridge::exif::ExifTool;
/// use std::path::Path;
///
/// let tool = ExifTool::new("photo.jpg");
///
/// tool.read_tags(&mut |name: &str, value: &str| {
///     println!("{name} = {value}");
///     Ok::<(), exif_bridge::Error>(())
/// })?;
///
/// tool.set_tag("GPS", "GPSLongitude", &["80", "1", "2", "1", "3", "1"], Some(Path::new("updated.jpg")))?;
/// # Ok::<(), exif_bridge::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ExifTool {
    path: PathBuf,
    program: String,
    show_commands: bool,
    temp_dir: Option<PathBuf>,
}

impl ExifTool {
    /// Adapter for `path` using the `exif` program from `PATH`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_program(path, DEFAULT_PROGRAM)
    }

    /// Adapter for `path` using a different program name or location.
    pub fn with_program(path: impl Into<PathBuf>, program: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            program: program.into(),
            show_commands: false,
            temp_dir: None,
        }
    }

    /// Adapter for `path` configured from the `tool` section of the config file.
    pub fn from_config(path: impl Into<PathBuf>, config: &ToolConfig) -> Self {
        let mut tool = Self::with_program(path, config.program.clone());
        tool.set_show_commands(config.show_commands);
        tool
    }

    /// The image this adapter operates on.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Extract thumbnails under `dir` instead of the system temp directory.
    pub fn set_temp_dir(&mut self, dir: impl Into<PathBuf>) {
        self.temp_dir = Some(dir.into());
    }

    /// Print each command line to stderr before it runs.
    pub fn set_show_commands(&mut self, show: bool) {
        self.show_commands = show;
    }

    pub fn show_commands(&self) -> bool {
        self.show_commands
    }

    /// Resolve the configured program on `PATH`.
    pub fn locate(&self) -> Result<PathBuf> {
        tools::locate(&self.program)
    }

    /// Dump every tag of the file and hand each `(name, value)` to `visitor`.
    ///
    /// Runs `exif -x <file>`. Tool and parse failures are converted into the
    /// visitor's error type; an error returned by the visitor ends the dump
    /// and is returned as-is.
    pub fn read_tags<V, E>(&self, visitor: &mut V) -> std::result::Result<(), E>
    where
        V: TagVisitor<E> + ?Sized,
        E: From<Error>,
    {
        let output = self.dump_command().execute()?;
        relay_tags(&self.program, &output, visitor)
    }

    /// Create or overwrite tag `name` in directory `ifd`.
    ///
    /// `value_parts` are joined with single spaces, so GPS rationals can be
    /// passed as `["80", "1", "2", "1", "3", "1"]`. With `output` set (and
    /// non-empty) the tool writes the result there and leaves the source
    /// untouched; otherwise the source file is rewritten in place.
    pub fn set_tag<S: AsRef<str>>(
        &self,
        ifd: &str,
        name: &str,
        value_parts: &[S],
        output: Option<&Path>,
    ) -> Result<()> {
        self.set_tag_command(ifd, name, value_parts, output)
            .execute()?;
        log::debug!(
            "Set {ifd}/{name} on {} -> {}",
            self.path.display(),
            output.unwrap_or(self.path.as_path()).display()
        );
        Ok(())
    }

    /// Whether the file embeds a thumbnail, judged from the tail of `exif <file>`.
    pub fn has_thumbnail(&self) -> Result<bool> {
        let output = self.command().arg(&self.path).execute()?;
        Ok(contains_thumbnail_marker(&output))
    }

    /// Extract the embedded thumbnail into a fresh temporary file.
    ///
    /// The returned handle is positioned at the start of the thumbnail and
    /// owns the temporary file. If extraction fails, the temporary file is
    /// removed before the error is returned.
    pub fn get_thumbnail(&self) -> Result<Thumbnail> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("exif-thumbnail-").suffix(".jpg");
        let temp = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(|e| Error::resource("failed to create thumbnail file", e))?;
        let temp_path = temp.into_temp_path();

        self.command()
            .arg("--extract-thumbnail")
            .arg("-o")
            .arg(temp_path.as_os_str())
            .arg(&self.path)
            .execute()?;

        Thumbnail::open(temp_path)
    }

    fn command(&self) -> ToolCommand {
        let mut cmd = ToolCommand::new(&self.program);
        cmd.show_command(self.show_commands);
        cmd
    }

    fn dump_command(&self) -> ToolCommand {
        let mut cmd = self.command();
        cmd.arg("-x").arg(&self.path);
        cmd
    }

    fn set_tag_command<S: AsRef<str>>(
        &self,
        ifd: &str,
        name: &str,
        value_parts: &[S],
        output: Option<&Path>,
    ) -> ToolCommand {
        let phrase = value_parts
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        let output = output.filter(|p| !p.as_os_str().is_empty());

        let mut cmd = self.command();
        match output {
            Some(output) => {
                cmd.arg("--output").arg(output);
                cmd.args(["--create-exif", "--tag", name, "--ifd", ifd]);
            }
            None => {
                cmd.args(["--create-exif", "--tag", name, "--ifd", ifd]);
                cmd.arg("-o").arg(&self.path);
            }
        }
        cmd.arg("--set-value").arg(phrase).arg(&self.path);
        cmd
    }
}
