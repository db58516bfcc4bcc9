//! The public entry point for reading sections of the front page.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::extract::extract;
use crate::models::{Article, Section};
use crate::source::{DocumentSource, HttpTransport, Transport};
use tracing::{info, instrument};

/// Reads headlines from the Drudge Report front page.
///
/// The parsed page is cached for an hour and shared by every call, so a
/// client can be wrapped in an `Arc` and used from many tasks at once.
#[derive(Debug)]
pub struct Client<T = HttpTransport> {
    source: DocumentSource<T>,
}

impl Client<HttpTransport> {
    /// A client fetching over HTTP with the given settings.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> Client<T> {
    /// A client fetching `config.url` through `transport`.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            source: DocumentSource::new(config.url, transport),
        }
    }

    /// The cached page source, for inspecting or invalidating the cache.
    pub fn source(&self) -> &DocumentSource<T> {
        &self.source
    }

    /// The top stories, including the main headline.
    pub async fn top(&self) -> Result<Vec<Article>> {
        self.section(&Section::top()).await
    }

    /// The headlines in column `num`, which must be in `1..=3`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidColumn`](crate::Error::InvalidColumn) for any other
    /// number; no fetch happens in that case.
    pub async fn column(&self, num: usize) -> Result<Vec<Article>> {
        self.section(&Section::Column(num)).await
    }

    /// The headlines in `section`, in page order.
    ///
    /// # Arguments
    ///
    /// * `section` - `top`, a column number, or any element id on the page
    ///
    /// # Errors
    ///
    /// Whatever the steps below raise: [`Error::InvalidColumn`] before any
    /// fetch, then [`Error::Fetch`] or [`Error::Parse`] from the page,
    /// [`Error::SectionNotFound`] and [`Error::MalformedUrl`] from the walk.
    ///
    /// [`Error::InvalidColumn`]: crate::Error::InvalidColumn
    /// [`Error::Fetch`]: crate::Error::Fetch
    /// [`Error::Parse`]: crate::Error::Parse
    /// [`Error::SectionNotFound`]: crate::Error::SectionNotFound
    /// [`Error::MalformedUrl`]: crate::Error::MalformedUrl
    #[instrument(level = "info", skip_all, fields(section = %section))]
    pub async fn section(&self, section: &Section) -> Result<Vec<Article>> {
        let mut plan = section.plan()?;
        let doc = self.source.get().await?;
        let root = plan.locate(&doc)?;
        let articles = extract(&doc, root, self.source.url(), plan.stop)?;

        info!(count = articles.len(), "Extracted section");
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::source::tests::FakeTransport;
    use url::Url;

    const PAGE: &str = r#"<html><body>
        <div id="app_topstories">
            <img src="/main.jpg"><a href="https://news.example/main">MAIN STORY</a>
        </div>
        <table><tr>
            <td><a href="/c1a">C1 A</a><!-- L I N K S  F I R S T  C O L U M N --><a href="/c1x">C1 LINK</a></td>
            <td>spacer</td>
            <td><img src="/main.jpg"><a href="/c2a">C2 A</a><a href="/c2b">C2 B</a></td>
            <td>spacer</td>
            <td><a href="/c3a">C3 A</a></td>
            <td>spacer</td>
        </tr></table>
    </body></html>"#;

    fn client() -> Client<FakeTransport> {
        let config = ClientConfig::default().with_url(Url::parse("http://news.test/").unwrap());
        Client::with_transport(config, FakeTransport::serving(PAGE))
    }

    fn headlines(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.headline.as_str()).collect()
    }

    #[tokio::test]
    async fn test_top() {
        let client = client();
        let top = client.top().await.unwrap();

        assert_eq!(headlines(&top), ["MAIN STORY"]);
        assert_eq!(top[0].url.as_str(), "https://news.example/main");
        assert_eq!(
            top[0].image.as_ref().map(Url::as_str),
            Some("http://news.test/main.jpg")
        );
    }

    #[tokio::test]
    async fn test_columns() {
        let client = client();

        assert_eq!(headlines(&client.column(1).await.unwrap()), ["C1 A"]);
        let col2 = client.column(2).await.unwrap();
        assert_eq!(headlines(&col2), ["C2 A", "C2 B"]);
        // Image dedup is per extraction, so column 2 keeps its own claim.
        assert!(col2[0].image.is_some());
        assert_eq!(headlines(&client.column(3).await.unwrap()), ["C3 A"]);

        assert_eq!(client.source().transport_calls(), 1);
    }

    #[tokio::test]
    async fn test_invalid_column_skips_fetch() {
        let client = client();
        for num in [0, 4] {
            let err = client.column(num).await.unwrap_err();
            assert!(matches!(err, Error::InvalidColumn(n) if n == num));
        }
        assert_eq!(client.source().transport_calls(), 0);
    }

    #[tokio::test]
    async fn test_latin1_page_still_yields_articles() {
        let mut body = br#"<div id="app_topstories"><a href="/cafe">CAF"#.to_vec();
        body.push(0xE9);
        body.extend_from_slice(b" REOPENS</a></div>");

        let config = ClientConfig::default().with_url(Url::parse("http://news.test/").unwrap());
        let client = Client::with_transport(
            config,
            FakeTransport {
                body,
                ..FakeTransport::default()
            },
        );

        let top = client.top().await.unwrap();
        assert_eq!(headlines(&top), ["CAF\u{FFFD} REOPENS"]);
        assert_eq!(top[0].url.as_str(), "http://news.test/cafe");
    }

    #[tokio::test]
    async fn test_missing_section() {
        let client = client();
        let err = client
            .section(&Section::Named("app_nope".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SectionNotFound(_)));
    }
}
