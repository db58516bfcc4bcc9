//! Data models for headlines and the page sections they come from.
//!
//! - [`Article`]: one headline link pulled from the front page
//! - [`Section`]: which region of the page to read

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Element id of the top stories block.
pub const TOP_STORIES_ID: &str = "app_topstories";

/// Number of headline columns on the page.
pub const COLUMN_COUNT: usize = 3;

/// A headline link pulled from the front page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// The link text used on the page. This is often not the linked
    /// article's own headline.
    pub headline: String,
    /// Where the link points.
    pub url: Url,
    /// The nearest image placed before the link among its siblings, unless
    /// an earlier link already claimed it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Url>,
}

/// A region of the page that holds a list of headlines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Section {
    /// The element carrying this `id`.
    Named(String),
    /// One of the page's columns, numbered from 1.
    Column(usize),
}

impl Section {
    /// The top stories, including the main headline.
    pub fn top() -> Self {
        Section::Named(TOP_STORIES_ID.to_string())
    }

    /// Human readable title, e.g. `Top` or `Column 2`.
    pub fn title(&self) -> String {
        match self {
            Section::Named(id) if id == TOP_STORIES_ID => "Top".to_string(),
            Section::Named(id) => id.clone(),
            Section::Column(n) => format!("Column {n}"),
        }
    }

    /// The short name accepted by [`FromStr`], e.g. `top` or `2`.
    pub fn key(&self) -> String {
        match self {
            Section::Named(id) if id == TOP_STORIES_ID => "top".to_string(),
            Section::Named(id) => id.clone(),
            Section::Column(n) => n.to_string(),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Parses `top` or a column number.
///
/// Any number is accepted here; out-of-range columns are rejected with
/// [`Error::InvalidColumn`](crate::Error::InvalidColumn) when the section is
/// requested, never clamped.
impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("top") {
            return Ok(Section::top());
        }
        s.parse::<usize>()
            .map(Section::Column)
            .map_err(|_| format!("unknown section: {s:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_from_str() {
        assert_eq!("top".parse::<Section>().unwrap(), Section::top());
        assert_eq!(" TOP ".parse::<Section>().unwrap(), Section::top());
        assert_eq!("2".parse::<Section>().unwrap(), Section::Column(2));
        assert_eq!("4".parse::<Section>().unwrap(), Section::Column(4));
        assert!("left".parse::<Section>().is_err());
        assert!("-1".parse::<Section>().is_err());
    }

    #[test]
    fn test_section_titles() {
        assert_eq!(Section::top().title(), "Top");
        assert_eq!(Section::Column(3).title(), "Column 3");
        assert_eq!(Section::Named("app_misc".into()).title(), "app_misc");
        assert_eq!(Section::top().to_string(), "top");
        assert_eq!(Section::Column(1).to_string(), "1");
    }

    #[test]
    fn test_article_serialization() {
        let article = Article {
            headline: "BIG STORY".to_string(),
            url: Url::parse("https://example.com/story").unwrap(),
            image: None,
        };

        let json = serde_json::to_string(&article).unwrap();
        assert_eq!(
            json,
            r#"{"headline":"BIG STORY","url":"https://example.com/story"}"#
        );

        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(back, article);
    }

    #[test]
    fn test_article_with_image_serialization() {
        let article = Article {
            headline: "Pictured".to_string(),
            url: Url::parse("https://example.com/a").unwrap(),
            image: Some(Url::parse("https://example.com/a.jpg").unwrap()),
        };

        let json = serde_json::to_string(&article).unwrap();
        assert!(json.contains(r#""image":"https://example.com/a.jpg""#));
    }
}
