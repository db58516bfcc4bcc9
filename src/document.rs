//! Parsed page held as an arena of nodes.
//!
//! `scraper` parses the markup; the resulting tree is copied into a flat
//! arena of owned nodes addressed by [`NodeId`]. Each node records its
//! parent, first/last child and both siblings, so walking up, down or
//! sideways is an index lookup. The arena is immutable once built and is
//! `Send + Sync`, so one parsed page can be shared between any number of
//! readers behind an `Arc`.

use crate::error::{Error, Result};
use scraper::Html;
use scraper::node::Node as HtmlNode;
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Stable index of a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document root.
    Document,
    /// An element with its lowercase tag name and attributes in source order.
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
    Comment(String),
    /// Doctypes and processing instructions.
    Other,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
}

impl Node {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    /// Tag name if this is an element.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag, .. } => Some(tag.as_str()),
            _ => None,
        }
    }

    /// True if this is an element named `name`, ignoring ASCII case.
    pub fn is_element(&self, name: &str) -> bool {
        self.tag().is_some_and(|tag| tag.eq_ignore_ascii_case(name))
    }

    /// Value of the attribute `name`, if this is an element carrying it.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// Comment text, for comment nodes.
    pub fn comment(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Comment(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

/// An immutable parsed page.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Parse a response body.
    ///
    /// Bytes that aren't valid UTF-8 are replaced with `U+FFFD` rather than
    /// rejected, so a stray Windows-1252 byte costs one character instead of
    /// the whole page.
    ///
    /// # Arguments
    ///
    /// * `body` - The raw response body
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] if the body is empty; there is no page to read.
    #[instrument(level = "debug", skip_all, fields(bytes = body.len()))]
    pub fn parse_bytes(body: &[u8]) -> Result<Self> {
        if body.is_empty() {
            return Err(Error::Parse("response body is empty".to_string()));
        }
        let html = String::from_utf8_lossy(body);
        if let Cow::Owned(_) = html {
            warn!("Response body is not valid UTF-8; replaced invalid bytes");
        }
        Ok(Self::parse(&html))
    }

    /// Parse a markup string.
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        if !parsed.errors.is_empty() {
            debug!(count = parsed.errors.len(), "Recovered from markup errors");
        }

        let mut doc = Document { nodes: Vec::new() };
        let mut index: HashMap<_, NodeId> = HashMap::new();

        // Pre-order, so every parent is already in the arena when its
        // children arrive and children are appended in source order.
        for node in parsed.tree.root().descendants() {
            let parent = node.parent().and_then(|p| index.get(&p.id()).copied());
            let kind = match node.value() {
                HtmlNode::Document | HtmlNode::Fragment => NodeKind::Document,
                HtmlNode::Element(element) => NodeKind::Element {
                    tag: element.name().to_ascii_lowercase(),
                    attrs: element
                        .attrs()
                        .map(|(key, value)| (key.to_string(), value.to_string()))
                        .collect(),
                },
                HtmlNode::Text(text) => NodeKind::Text(String::from(&**text)),
                HtmlNode::Comment(comment) => NodeKind::Comment(String::from(&**comment)),
                _ => NodeKind::Other,
            };
            let id = doc.push(kind, parent);
            index.insert(node.id(), id);
        }

        debug!(nodes = doc.nodes.len(), "Built document");
        doc
    }

    fn push(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, parent));

        if let Some(parent) = parent {
            let prev = self.nodes[parent.0].last_child;
            if let Some(prev) = prev {
                self.nodes[prev.0].next_sibling = Some(id);
                self.nodes[id.0].prev_sibling = Some(prev);
            } else {
                self.nodes[parent.0].first_child = Some(id);
            }
            self.nodes[parent.0].last_child = Some(id);
        }
        id
    }

    /// The document node every other node hangs off.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true for a parsed page, which always has its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node behind `id`.
    ///
    /// # Panics
    ///
    /// If `id` came from a different, smaller document. Every method here
    /// that takes a [`NodeId`] shares this condition.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Direct children of `id`, in source order.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            doc: self,
            next: self.node(id).first_child,
        }
    }

    /// `id` and everything below it, in document order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            root: id,
            next: Some(id),
        }
    }

    /// Nearest earlier sibling of `id` accepted by `pred`.
    ///
    /// Looks past any number of non-matching siblings, so in
    /// `<img><br><a>` the `<a>` finds the `<img>`.
    pub fn find_prev_sibling(&self, id: NodeId, pred: impl Fn(&Node) -> bool) -> Option<NodeId> {
        let mut cur = self.node(id).prev_sibling;
        while let Some(sibling) = cur {
            if pred(self.node(sibling)) {
                return Some(sibling);
            }
            cur = self.node(sibling).prev_sibling;
        }
        None
    }

    /// Rendered text of `id`: every descendant text node, with runs of
    /// whitespace collapsed to single spaces.
    pub fn text(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants(id) {
            if let NodeKind::Text(text) = &self.node(node).kind {
                for word in text.split_whitespace() {
                    if !out.is_empty() {
                        out.push(' ');
                    }
                    out.push_str(word);
                }
            }
        }
        out
    }
}

/// Iterator over the direct children of a node.
pub struct Children<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.doc.node(id).next_sibling;
        Some(id)
    }
}

/// Pre-order iterator over a sub-tree, root included.
pub struct Descendants<'a> {
    doc: &'a Document,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        let node = self.doc.node(id);

        self.next = if let Some(child) = node.first_child {
            Some(child)
        } else {
            // Climb until some ancestor (short of the root) has a next sibling.
            let mut cur = id;
            loop {
                if cur == self.root {
                    break None;
                }
                let n = self.doc.node(cur);
                if let Some(sibling) = n.next_sibling {
                    break Some(sibling);
                }
                match n.parent {
                    Some(parent) => cur = parent,
                    None => break None,
                }
            }
        };
        Some(id)
    }
}
