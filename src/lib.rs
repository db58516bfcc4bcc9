//! # drudge
//!
//! Reads headlines off the [Drudge Report](http://www.drudgereport.com)
//! front page.
//!
//! The page is fetched once, parsed into an immutable [`Document`], and
//! cached for an hour. Sections are pulled out of the cached page on
//! demand:
//!
//! - the top stories, found by element id
//! - the three columns, found by position and cut off at the comment that
//!   starts each column's list of outside links
//!
//! Every link in a section becomes an [`Article`]; the nearest image placed
//! before a link among its siblings is attached to it, each image to at most
//! one article.
//!
//! ## Usage
//!
//! ```no_run
//! use drudge::{Client, ClientConfig};
//!
//! # async fn run() -> drudge::Result<()> {
//! let client = Client::new(ClientConfig::default())?;
//! for article in client.top().await? {
//!     println!("{}\n\t{}", article.headline, article.url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! [`Client`] is `Send + Sync`. Concurrent calls that find the cache empty
//! each fetch the page; the last one to finish is what stays cached.

pub mod cache;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod locate;
pub mod models;
pub mod outputs;
pub mod source;

pub use cache::{CACHE_TTL, CacheEntry, TimedCache};
pub use client::Client;
pub use config::ClientConfig;
pub use document::{Document, NodeId};
pub use error::{Error, Result};
pub use extract::{StopMarker, extract};
pub use locate::{Matcher, NodePredicate, SectionPlan, locate};
pub use models::{Article, Section};
pub use source::{DocumentSource, HttpTransport, Transport};
