//! Error types for fetching and extracting Drudge Report sections.

use thiserror::Error;

/// Result type alias for drudge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the client.
///
/// None of these are retried internally. A stale cache entry is not an
/// error; it just causes a fresh fetch.
#[derive(Error, Debug)]
pub enum Error {
    /// The transport failed or the server answered with a non-success status
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The response body could not be turned into a document, e.g. it was
    /// empty. Invalid UTF-8 is replaced, not reported here.
    #[error("failed to parse page: {0}")]
    Parse(String),

    /// No element carries the requested identifier
    #[error("couldn't find section {0:?}")]
    SectionNotFound(String),

    /// Column number outside `1..=3`
    #[error("bad column number: {0}")]
    InvalidColumn(usize),

    /// A link or image address is not a valid URL
    #[error("malformed URL {url:?}: {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
