//! Turning a located sub-tree into [`Article`]s.
//!
//! The walk visits the sub-tree in document order. Every `<a>` becomes an
//! article; the nearest `<img>` among the link's earlier siblings becomes its
//! image, unless an earlier article in the same walk already claimed it.
//! An optional [`StopMarker`] ends the walk at a sentinel comment.

use crate::document::{Document, Node, NodeId};
use crate::error::{Error, Result};
use crate::locate::NodePredicate;
use crate::models::Article;
use std::collections::HashSet;
use tracing::{debug, instrument};
use url::Url;

/// Comment text that marks the end of a column's headlines. Everything
/// after it is the column's list of outside links.
pub const STOP_TOKEN: &str = "L I N K S";

/// Latches once a comment containing the sentinel token is seen.
#[derive(Debug, Clone)]
pub struct StopMarker {
    token: String,
    latched: bool,
}

impl StopMarker {
    /// A marker that latches on any comment containing `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            latched: false,
        }
    }

    /// Whether the sentinel comment has been seen.
    pub fn is_latched(&self) -> bool {
        self.latched
    }
}

impl Default for StopMarker {
    fn default() -> Self {
        Self::new(STOP_TOKEN)
    }
}

impl NodePredicate for StopMarker {
    fn test(&mut self, node: &Node) -> bool {
        if !self.latched {
            self.latched = node
                .comment()
                .is_some_and(|text| text.contains(self.token.as_str()));
        }
        self.latched
    }
}

/// Resolve `raw` against `base`, so relative links become absolute.
fn resolve(base: &Url, raw: &str) -> Result<Url> {
    base.join(raw.trim()).map_err(|source| Error::MalformedUrl {
        url: raw.to_string(),
        source,
    })
}

/// Collect the articles under `root`.
///
/// Links after the stop marker (when one is given) are ignored. Any link
/// or image address that fails to parse aborts the whole call; no partial
/// list is returned.
///
/// # Arguments
///
/// * `doc` - The parsed page
/// * `root` - Sub-tree to walk, usually from [`locate`](crate::locate::locate)
/// * `base` - Address relative `href` and `src` values are resolved against
/// * `stop` - Optional end-of-section marker
///
/// # Returns
///
/// The articles in document order, empty if the sub-tree holds no links.
///
/// # Errors
///
/// [`Error::MalformedUrl`] if a link or image address cannot be resolved.
///
/// # Panics
///
/// If `root` does not belong to `doc`.
///
/// # Examples
///
/// ```
/// use drudge::{Document, extract};
/// use url::Url;
///
/// let doc = Document::parse(r#"<div><img src="/a.jpg"><br><a href="/one">ONE</a></div>"#);
/// let base = Url::parse("http://www.drudgereport.com").unwrap();
/// let articles = extract(&doc, doc.root(), &base, None).unwrap();
///
/// assert_eq!(articles[0].headline, "ONE");
/// assert_eq!(
///     articles[0].image.as_ref().map(Url::as_str),
///     Some("http://www.drudgereport.com/a.jpg")
/// );
/// ```
#[instrument(level = "debug", skip_all, fields(?root))]
pub fn extract(
    doc: &Document,
    root: NodeId,
    base: &Url,
    mut stop: Option<StopMarker>,
) -> Result<Vec<Article>> {
    let mut articles = Vec::new();
    let mut used_images: HashSet<Url> = HashSet::new();

    for id in doc.descendants(root) {
        let node = doc.node(id);
        if let Some(stop) = stop.as_mut()
            && stop.test(node)
        {
            debug!(?id, "Hit stop marker");
            break;
        }
        if !node.is_element("a") {
            continue;
        }

        let url = resolve(base, node.attr("href").unwrap_or_default())?;
        let mut article = Article {
            headline: doc.text(id),
            url,
            image: None,
        };

        if let Some(img) = doc.find_prev_sibling(id, |prev| prev.is_element("img")) {
            let src = resolve(base, doc.node(img).attr("src").unwrap_or_default())?;
            // First claim wins; later links reaching the same image get none.
            if used_images.insert(src.clone()) {
                article.image = Some(src);
            }
        }

        articles.push(article);
    }

    debug!(count = articles.len(), "Extracted articles");
    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::locate;
    use crate::models::Section;

    fn base() -> Url {
        Url::parse("http://www.drudgereport.com").unwrap()
    }

    fn section(html: &str, stop: Option<StopMarker>) -> Result<Vec<Article>> {
        let doc = Document::parse(html);
        let root = locate(&doc, &Section::top()).unwrap();
        extract(&doc, root, &base(), stop)
    }

    fn headlines(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.headline.as_str()).collect()
    }

    #[test]
    fn test_links_in_document_order() {
        let articles = section(
            r#"<div id="app_topstories">
                <a href="https://a.example/1">FIRST</a><br>
                <p><a href="https://b.example/2">SECOND <b>BOLD</b></a></p>
            </div>
            <a href="https://c.example/3">OUTSIDE</a>"#,
            None,
        )
        .unwrap();

        assert_eq!(headlines(&articles), ["FIRST", "SECOND BOLD"]);
        assert_eq!(articles[0].url.as_str(), "https://a.example/1");
        assert!(articles.iter().all(|a| a.image.is_none()));
    }

    #[test]
    fn test_image_attached_to_following_link() {
        let articles = section(
            r#"<div id="app_topstories">
                <img src="https://img.example/main.jpg">
                <a href="https://a.example/1">MAIN</a>
                <a href="https://a.example/2">NEXT</a>
            </div>"#,
            None,
        )
        .unwrap();

        assert_eq!(
            articles[0].image.as_ref().map(Url::as_str),
            Some("https://img.example/main.jpg")
        );
        assert!(articles[1].image.is_none());
    }

    #[test]
    fn test_image_found_past_line_breaks() {
        let articles = section(
            r#"<div id="app_topstories"><img src="/pic.jpg"><br><a href="/one">ONE</a><br><a href="/two">TWO</a></div>"#,
            None,
        )
        .unwrap();

        let images: Vec<_> = articles
            .iter()
            .map(|a| a.image.as_ref().map(Url::as_str))
            .collect();
        assert_eq!(images, [Some("http://www.drudgereport.com/pic.jpg"), None]);
    }

    #[test]
    fn test_nearest_image_wins() {
        let articles = section(
            r#"<div id="app_topstories">
                <img src="/old.jpg"><br><a href="/one">ONE</a><br>
                <img src="/new.jpg"><br><br><a href="/two">TWO</a>
            </div>"#,
            None,
        )
        .unwrap();

        assert_eq!(
            articles[1].image.as_ref().map(Url::as_str),
            Some("http://www.drudgereport.com/new.jpg")
        );
    }

    #[test]
    fn test_duplicate_image_goes_to_first_link_only() {
        let articles = section(
            r#"<div id="app_topstories">
                <p><img src="/pic.jpg"><a href="/one">ONE</a></p>
                <p><img src="/pic.jpg"><a href="/two">TWO</a></p>
            </div>"#,
            None,
        )
        .unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(
            articles[0].image.as_ref().map(Url::as_str),
            Some("http://www.drudgereport.com/pic.jpg")
        );
        assert!(articles[1].image.is_none());
    }

    #[test]
    fn test_stop_marker_ends_walk() {
        let html = r#"<div id="app_topstories">
                <a href="/a">A</a>
                <a href="/b">B</a>
                <!-- L I N K S      F I R S T      C O L U M N -->
                <a href="/c">C</a>
            </div>"#;

        let articles = section(html, Some(StopMarker::default())).unwrap();
        assert_eq!(headlines(&articles), ["A", "B"]);

        let all = section(html, None).unwrap();
        assert_eq!(headlines(&all), ["A", "B", "C"]);
    }

    #[test]
    fn test_unrelated_comment_does_not_stop() {
        let articles = section(
            r#"<div id="app_topstories"><a href="/a">A</a><!-- ad slot --><a href="/b">B</a></div>"#,
            Some(StopMarker::default()),
        )
        .unwrap();
        assert_eq!(headlines(&articles), ["A", "B"]);
    }

    #[test]
    fn test_malformed_link_aborts() {
        let err = section(
            r#"<div id="app_topstories">
                <a href="https://ok.example/">OK</a>
                <a href="http://[broken">BAD</a>
            </div>"#,
            None,
        )
        .unwrap_err();

        assert!(matches!(err, Error::MalformedUrl { ref url, .. } if url == "http://[broken"));
    }

    #[test]
    fn test_malformed_image_aborts() {
        let err = section(
            r#"<div id="app_topstories"><img src="http://[broken"><a href="/a">A</a></div>"#,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedUrl { .. }));
    }

    #[test]
    fn test_empty_section() {
        let articles = section(r#"<div id="app_topstories"><p>nothing here</p></div>"#, None).unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn test_relative_links_resolved() {
        let articles = section(
            r#"<div id="app_topstories"><a href="/story?id=7">S</a></div>"#,
            None,
        )
        .unwrap();
        assert_eq!(
            articles[0].url.as_str(),
            "http://www.drudgereport.com/story?id=7"
        );
    }

    #[test]
    fn test_stop_marker_latches() {
        let doc = Document::parse("<div><!-- L I N K S --><p>after</p></div>");
        let mut stop = StopMarker::default();
        let mut seen = Vec::new();
        for id in doc.descendants(doc.root()) {
            seen.push(stop.test(doc.node(id)));
        }
        assert!(stop.is_latched());
        // Once set, every later node reports the latch.
        let first = seen.iter().position(|&hit| hit).unwrap();
        assert!(seen[first..].iter().all(|&hit| hit));
    }
}
