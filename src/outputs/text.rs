//! Plain text listing.
//!
//! ```text
//! ### Top ###
//!
//! HEADLINE
//! 	https://example.com/story
//!
//! ```

use crate::models::Article;
use std::io::{self, Write};

/// Write a titled block of headlines, each followed by its tab-indented URL
/// (and image URL when `images` is set), then a blank line.
pub fn write_section<W: Write>(
    w: &mut W,
    title: &str,
    articles: &[Article],
    images: bool,
) -> io::Result<()> {
    writeln!(w, "### {title} ###\n")?;
    for article in articles {
        writeln!(w, "{}", article.headline)?;
        writeln!(w, "\t{}", article.url)?;
        if images {
            if let Some(image) = &article.image {
                writeln!(w, "\t{image}")?;
            }
        }
    }
    writeln!(w)?;
    w.flush()
}
