//! Writing sections to a stream.
//!
//! # Submodules
//!
//! - [`text`]: the plain listing printed by default
//! - [`json`]: one JSON object per section, one section per line

pub mod json;
pub mod text;

use crate::models::{Article, Section};
use clap::ValueEnum;
use std::io::{self, Write};

/// How sections are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Write one section's articles to `w` in `format`.
///
/// # Arguments
///
/// * `w` - Destination, usually locked stdout
/// * `format` - Text block or JSON line
/// * `section` - Supplies the title (and, for JSON, the key)
/// * `articles` - The section's articles, in page order
/// * `images` - Include image URLs in text output; JSON always has them
///
/// # Errors
///
/// Any I/O error from `w`, e.g. a closed pipe.
pub fn write_section<W: Write>(
    w: &mut W,
    format: OutputFormat,
    section: &Section,
    articles: &[Article],
    images: bool,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => text::write_section(w, &section.title(), articles, images),
        OutputFormat::Json => json::write_section(w, section, articles),
    }
}
