//! # exif-bridge
//!
//! Read and write image metadata by driving the libexif `exif` command-line
//! tool. The tool does the real work; this crate builds its argument lists,
//! runs it, and relays what it prints.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use exif_bridge::exif::ExifTool;
//! use std::io::Read;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut tool = ExifTool::new("img.jpg");
//!     tool.set_show_commands(true);
//!
//!     // 1. Dump every tag
//!     tool.read_tags(&mut |name: &str, value: &str| {
//!         println!("TAG [{name}]=[{value}]");
//!         Ok::<(), anyhow::Error>(())
//!     })?;
//!
//!     // 2. Write a tag into a copy, leaving img.jpg untouched
//!     tool.set_tag(
//!         "GPS",
//!         "GPSLongitude",
//!         &["80", "1", "2", "1", "3", "1"],
//!         Some(Path::new("updated.jpg")),
//!     )?;
//!
//!     // 3. Pull out the embedded thumbnail
//!     if tool.has_thumbnail()? {
//!         let mut thumb = tool.get_thumbnail()?;
//!         let mut bytes = Vec::new();
//!         thumb.read_to_end(&mut bytes)?;
//!         println!("Thumbnail: {} bytes", bytes.len());
//!         thumb.close()?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Invocations
//!
//! | Operation | Command line |
//! |-----------|--------------|
//! | [`read_tags`](exif::ExifTool::read_tags) | `exif -x <file>` |
//! | [`set_tag`](exif::ExifTool::set_tag) (in place) | `exif --create-exif --tag <name> --ifd <ifd> -o <file> --set-value <value> <file>` |
//! | [`set_tag`](exif::ExifTool::set_tag) (new file) | `exif --output <out> --create-exif --tag <name> --ifd <ifd> --set-value <value> <file>` |
//! | [`has_thumbnail`](exif::ExifTool::has_thumbnail) | `exif <file>` |
//! | [`get_thumbnail`](exif::ExifTool::get_thumbnail) | `exif --extract-thumbnail -o <temp> <file>` |
//!
//! ## Modules
//!
//! - [`exif`]: the [`ExifTool`](exif::ExifTool) adapter, tag visitors, thumbnails
//! - [`process`]: running the external tool with merged output
//! - [`tools`]: locating the tool on `PATH`
//! - [`config`]: configuration types and loading/saving
//! - [`files`]: image collection and buffered copies
//! - [`error`]: the crate's error type

pub mod config;
pub mod error;
pub mod exif;
pub mod files;
pub mod process;
pub mod tools;

pub use error::{Error, Result};
