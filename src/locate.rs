//! Finding the sub-tree that holds a section.
//!
//! A [`Section`] maps to a [`Matcher`] for its root and, for columns, a
//! [`StopMarker`] ending the headline list. Matching is one pre-order pass
//! over the document; the first node the matcher accepts wins.
//!
//! Columns are addressed by position. The page lays its columns out as
//! table cells with spacer cells between them, so column `n` is the
//! `2 * (n - 1) + 1`-th cell in document order.

use crate::document::{Document, Node, NodeId};
use crate::error::{Error, Result};
use crate::extract::StopMarker;
use crate::models::{COLUMN_COUNT, Section};
use tracing::{debug, instrument};

/// Structural tag counted when addressing columns.
pub const COLUMN_TAG: &str = "td";

/// A stateful test applied to nodes in document order.
///
/// Implementors may keep state between calls, so the same value must not
/// be reused for a second pass.
pub trait NodePredicate {
    /// Advance over `node` and report whether it matches.
    fn test(&mut self, node: &Node) -> bool;
}

/// Matches the first element whose `id` equals the given identifier.
#[derive(Debug, Clone)]
pub struct ById {
    id: String,
}

impl ById {
    /// Match the element whose `id` attribute is exactly `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl NodePredicate for ById {
    fn test(&mut self, node: &Node) -> bool {
        node.attr("id") == Some(self.id.as_str())
    }
}

/// Matches the `n`-th element with a given tag.
///
/// Holds a countdown seeded at `n`; every element with the tag decrements
/// it and the element that brings it to zero matches. Later elements never
/// match.
#[derive(Debug, Clone)]
pub struct NthTag {
    tag: String,
    remaining: usize,
}

impl NthTag {
    /// `n` counts from 1.
    pub fn new(tag: impl Into<String>, n: usize) -> Self {
        Self {
            tag: tag.into(),
            remaining: n,
        }
    }
}

impl NodePredicate for NthTag {
    fn test(&mut self, node: &Node) -> bool {
        if self.remaining == 0 || !node.is_element(&self.tag) {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}

/// How a section's root is found.
#[derive(Debug, Clone)]
pub enum Matcher {
    Id(ById),
    Nth(NthTag),
}

impl NodePredicate for Matcher {
    fn test(&mut self, node: &Node) -> bool {
        match self {
            Matcher::Id(m) => m.test(node),
            Matcher::Nth(m) => m.test(node),
        }
    }
}

/// Everything needed to pull one section out of a document.
#[derive(Debug, Clone)]
pub struct SectionPlan {
    pub section: Section,
    pub matcher: Matcher,
    pub stop: Option<StopMarker>,
}

impl SectionPlan {
    /// Find this section's root in `doc`.
    ///
    /// Consumes the plan's matcher state, so call it once per plan.
    pub fn locate(&mut self, doc: &Document) -> Result<NodeId> {
        find(doc, &mut self.matcher)
            .ok_or_else(|| Error::SectionNotFound(self.section.title()))
    }
}

impl Section {
    /// Work out how to find this section.
    ///
    /// Column numbers outside `1..=3` fail here, before any page is
    /// fetched or walked.
    ///
    /// # Returns
    ///
    /// A plan with a fresh matcher; columns also get a [`StopMarker`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidColumn`] for a column outside `1..=3`.
    ///
    /// # Examples
    ///
    /// ```
    /// use drudge::{Error, Section};
    ///
    /// assert!(Section::Column(3).plan().unwrap().stop.is_some());
    /// assert!(matches!(Section::Column(4).plan(), Err(Error::InvalidColumn(4))));
    /// ```
    pub fn plan(&self) -> Result<SectionPlan> {
        let (matcher, stop) = match self {
            Section::Named(id) => (Matcher::Id(ById::new(id.as_str())), None),
            Section::Column(n) => {
                if !(1..=COLUMN_COUNT).contains(n) {
                    return Err(Error::InvalidColumn(*n));
                }
                let nth = 2 * (n - 1) + 1;
                (
                    Matcher::Nth(NthTag::new(COLUMN_TAG, nth)),
                    Some(StopMarker::default()),
                )
            }
        };
        Ok(SectionPlan {
            section: self.clone(),
            matcher,
            stop,
        })
    }
}

/// First node under `doc`'s root, in pre-order, accepted by `predicate`.
pub fn find(doc: &Document, predicate: &mut impl NodePredicate) -> Option<NodeId> {
    doc.descendants(doc.root())
        .find(|&id| predicate.test(doc.node(id)))
}

/// Locate `section` in `doc`.
///
/// # Errors
///
/// [`Error::InvalidColumn`] for a bad column number, or
/// [`Error::SectionNotFound`] if nothing on the page matches.
#[instrument(level = "debug", skip_all, fields(section = %section))]
pub fn locate(doc: &Document, section: &Section) -> Result<NodeId> {
    let root = section.plan()?.locate(doc)?;
    debug!(?root, "Located section");
    Ok(root)
}
