//! JSON output.
//!
//! Each section is written as a single line:
//!
//! ```text
//! {"section":"top","title":"Top","articles":[{"headline":"...","url":"..."}]}
//! ```

use crate::models::{Article, Section};
use serde::Serialize;
use std::io::{self, Write};

/// One section as serialized.
#[derive(Debug, Serialize)]
pub struct SectionOutput<'a> {
    pub section: String,
    pub title: String,
    pub articles: &'a [Article],
}

/// Write `articles` as one line of JSON.
pub fn write_section<W: Write>(w: &mut W, section: &Section, articles: &[Article]) -> io::Result<()> {
    let out = SectionOutput {
        section: section.key(),
        title: section.title(),
        articles,
    };
    serde_json::to_writer(&mut *w, &out)?;
    writeln!(w)?;
    w.flush()
}
