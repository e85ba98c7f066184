//! [`DomNode`] binding over a parsed HTML snapshot.

use super::{DomError, DomNode, NodeKey};
use scraper::{ElementRef, Html, Selector};
use std::fmt;

/// A parsed HTML document acting as the live DOM of one interaction source.
pub struct HtmlPage {
    html: Html,
}

impl HtmlPage {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// The document element.
    pub fn root(&self) -> HtmlNode<'_> {
        HtmlNode::new(self.html.root_element(), &self.html)
    }

    /// First element matching a CSS selector.
    pub fn query(&self, css: &str) -> Result<Option<HtmlNode<'_>>, DomError> {
        Ok(self.query_all(css)?.into_iter().next())
    }

    pub fn query_all(&self, css: &str) -> Result<Vec<HtmlNode<'_>>, DomError> {
        let selector =
            Selector::parse(css).map_err(|e| DomError::InvalidSelector(format!("{css}: {e:?}")))?;
        Ok(self
            .html
            .select(&selector)
            .map(|element| HtmlNode::new(element, &self.html))
            .collect())
    }
}

impl fmt::Debug for HtmlPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlPage").finish_non_exhaustive()
    }
}

#[derive(Clone, Copy)]
pub struct HtmlNode<'a> {
    element: ElementRef<'a>,
    document: &'a Html,
}

impl<'a> HtmlNode<'a> {
    fn new(element: ElementRef<'a>, document: &'a Html) -> Self {
        Self { element, document }
    }

    fn wrap(&self, element: ElementRef<'a>) -> Self {
        Self::new(element, self.document)
    }
}

impl fmt::Debug for HtmlNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlNode")
            .field("tag", &self.element.value().name())
            .field("id", &self.element.value().id())
            .finish()
    }
}

impl DomNode for HtmlNode<'_> {
    /// Arena index of the node, which never changes for a parsed snapshot.
    fn key(&self) -> NodeKey {
        let id = self.element.id();
        let index = self
            .document
            .tree
            .nodes()
            .position(|node| node.id() == id)
            .unwrap_or(usize::MAX);
        NodeKey(index as u64)
    }

    fn is_document_root(&self) -> bool {
        self.element.id() == self.document.root_element().id()
    }

    fn tag_name(&self) -> String {
        self.element.value().name().to_ascii_lowercase()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element.value().attr(name).map(str::to_string)
    }

    fn text_content(&self) -> String {
        self.element.text().collect()
    }

    fn class_list(&self) -> Vec<String> {
        self.element.value().classes().map(str::to_string).collect()
    }

    fn parent(&self) -> Option<Self> {
        self.element
            .parent()
            .and_then(ElementRef::wrap)
            .map(|element| self.wrap(element))
    }

    fn element_siblings(&self) -> Vec<Self> {
        match self.element.parent() {
            Some(parent) => parent
                .children()
                .filter_map(ElementRef::wrap)
                .map(|element| self.wrap(element))
                .collect(),
            None => vec![*self],
        }
    }

    fn count_matches(&self, selector: &str) -> Option<usize> {
        let selector = Selector::parse(selector).ok()?;
        Some(self.document.select(&selector).count())
    }

    fn has_element_children(&self) -> bool {
        self.element.children().any(|child| child.value().is_element())
    }
}
