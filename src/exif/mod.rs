//! Metadata access through the libexif `exif` command-line tool.
//!
//! [`ExifTool`] is the entry point. It exposes four operations:
//!
//! - [`ExifTool::read_tags`]: dump all tags to a [`TagVisitor`]
//! - [`ExifTool::set_tag`]: create or overwrite one tag, in place or into a new file
//! - [`ExifTool::has_thumbnail`]: check whether a thumbnail is embedded
//! - [`ExifTool::get_thumbnail`]: extract the thumbnail into a temporary [`Thumbnail`]

mod thumbnail;
mod tool;
mod visitor;

pub use thumbnail::{THUMBNAIL_MARKER, THUMBNAIL_SCAN_LINES, Thumbnail, contains_thumbnail_marker};
pub use tool::{DEFAULT_PROGRAM, ExifTool};
pub use visitor::TagVisitor;
