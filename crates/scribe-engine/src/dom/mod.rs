//! DOM capability interface.
//!
//! The selector engine and the recorder never touch a concrete DOM. They work
//! against [`DomNode`], which any binding (a parsed HTML snapshot, a live
//! browser bridge, a test double) can implement.

pub mod html;

pub use html::{HtmlNode, HtmlPage};

use thiserror::Error;

/// Identity of a node within its document. Used to key pending input per node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub u64);

/// What the selector engine and recorder need to know about an element.
pub trait DomNode: Clone {
    /// Stable identity of this node for as long as the document lives.
    fn key(&self) -> NodeKey;

    /// True for the document element (`<html>`).
    fn is_document_root(&self) -> bool;

    /// Lowercase tag name.
    fn tag_name(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;

    /// Concatenated text of the node and its descendants, untrimmed.
    fn text_content(&self) -> String;

    fn class_list(&self) -> Vec<String>;

    /// Parent element, `None` above the document root.
    fn parent(&self) -> Option<Self>;

    /// Element children of this node's parent in document order, including
    /// this node. A node without a parent is its own only sibling.
    fn element_siblings(&self) -> Vec<Self>;

    /// Number of elements `selector` currently matches in the node's document.
    /// `None` when the selector cannot be evaluated. Must not mutate the document.
    fn count_matches(&self, selector: &str) -> Option<usize>;

    fn has_element_children(&self) -> bool;

    fn id(&self) -> Option<String> {
        self.attribute("id")
    }

    fn name(&self) -> Option<String> {
        self.attribute("name")
    }

    /// Checkbox inputs commit `check`/`uncheck` actions.
    fn is_checkbox(&self) -> bool {
        self.tag_name() == "input"
            && self
                .attribute("type")
                .is_some_and(|t| t.eq_ignore_ascii_case("checkbox"))
    }

    fn is_select(&self) -> bool {
        self.tag_name() == "select"
    }
}

#[derive(Debug, Clone, Error)]
pub enum DomError {
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}
