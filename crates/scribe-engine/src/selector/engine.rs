use super::classes::stable_classes;
use super::escape::{attribute_value, css_ident, normalize_text, truncate_chars};
use super::{ResolvedSelector, SelectorStrategy};
use crate::config::SelectorConfig;
use crate::dom::DomNode;
use tracing::trace;

/// Elements whose visible text is a reasonable handle for replay.
const INTERACTIVE_TEXT_TAGS: &[&str] = &["button", "a"];
const INTERACTIVE_ROLES: &[&str] = &["button", "link"];

/// Layout and inline containers that carry no meaning of their own.
const GENERIC_CONTAINERS: &[&str] = &[
    "div", "span", "section", "article", "aside", "header", "footer", "main", "nav", "li", "p",
    "td", "th", "label", "em", "strong", "b", "i", "small",
];

type Rule<N> = fn(&SelectorEngine, &N, &str) -> Option<String>;

/// Turns an element into a selector by walking a fixed priority chain.
///
/// Resolution is deterministic. The only document access beyond the node's own
/// attributes and ancestry is the read-only match count used to vet class
/// selectors.
#[derive(Debug, Clone, Default)]
pub struct SelectorEngine {
    config: SelectorConfig,
}

impl SelectorEngine {
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Selector for `node`, or `None` for the document root.
    pub fn resolve<N: DomNode>(&self, node: &N) -> Option<String> {
        self.resolve_with_strategy(node).map(|resolved| resolved.selector)
    }

    pub fn resolve_with_strategy<N: DomNode>(&self, node: &N) -> Option<ResolvedSelector> {
        if node.is_document_root() {
            trace!("Document root has no selector");
            return None;
        }

        let tag = node.tag_name();
        let rules: [(SelectorStrategy, Rule<N>); 6] = [
            (SelectorStrategy::Id, Self::by_id),
            (SelectorStrategy::StableAttribute, Self::by_stable_attribute),
            (SelectorStrategy::Name, Self::by_name),
            (SelectorStrategy::Text, Self::by_interactive_text),
            (SelectorStrategy::AriaLabel, Self::by_aria_label),
            (SelectorStrategy::Classes, Self::by_classes),
        ];

        let resolved = rules
            .iter()
            .find_map(|(strategy, rule)| {
                rule(self, node, &tag).map(|selector| ResolvedSelector {
                    strategy: *strategy,
                    selector,
                })
            })
            .unwrap_or_else(|| self.structural(node, &tag));

        trace!(
            strategy = %resolved.strategy,
            selector = %resolved.selector,
            "Resolved selector"
        );
        Some(resolved)
    }

    fn by_id<N: DomNode>(&self, node: &N, _tag: &str) -> Option<String> {
        let id = node.id()?;
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            return None;
        }
        Some(format!("#{}", css_ident(&id)))
    }

    fn by_stable_attribute<N: DomNode>(&self, node: &N, _tag: &str) -> Option<String> {
        self.config.stable_attributes.iter().find_map(|attr| {
            node.attribute(attr)
                .filter(|value| !value.is_empty())
                .map(|value| format!("[{}=\"{}\"]", attr, attribute_value(&value)))
        })
    }

    fn by_name<N: DomNode>(&self, node: &N, tag: &str) -> Option<String> {
        let name = node.name().filter(|name| !name.is_empty())?;
        Some(format!("{}[name=\"{}\"]", tag, attribute_value(&name)))
    }

    fn by_interactive_text<N: DomNode>(&self, node: &N, tag: &str) -> Option<String> {
        let interactive = INTERACTIVE_TEXT_TAGS.contains(&tag)
            || node
                .attribute("role")
                .is_some_and(|role| INTERACTIVE_ROLES.contains(&role.as_str()));
        if !interactive {
            return None;
        }
        self.text_selector(node)
    }

    fn by_aria_label<N: DomNode>(&self, node: &N, _tag: &str) -> Option<String> {
        let label = node
            .attribute("aria-label")
            .filter(|label| !label.trim().is_empty())?;
        Some(format!("[aria-label=\"{}\"]", attribute_value(&label)))
    }

    fn by_classes<N: DomNode>(&self, node: &N, _tag: &str) -> Option<String> {
        let classes = node.class_list();
        let stable = stable_classes(&classes, self.config.min_class_len);
        if stable.is_empty() {
            return None;
        }

        let selector: String = stable
            .iter()
            .map(|class| format!(".{}", css_ident(class)))
            .collect();

        // Shared across near-duplicates, the selector would replay against the wrong element.
        match node.count_matches(&selector) {
            Some(count) if count > 0 && count < self.config.class_match_limit => Some(selector),
            count => {
                trace!(%selector, ?count, "Rejected class selector");
                None
            }
        }
    }

    fn structural<N: DomNode>(&self, node: &N, tag: &str) -> ResolvedSelector {
        if GENERIC_CONTAINERS.contains(&tag)
            && !node.has_element_children()
            && let Some(selector) = self.text_selector(node)
        {
            return ResolvedSelector {
                strategy: SelectorStrategy::Text,
                selector,
            };
        }

        ResolvedSelector {
            strategy: SelectorStrategy::Structural,
            selector: structural_path(node),
        }
    }

    fn text_selector<N: DomNode>(&self, node: &N) -> Option<String> {
        let text = normalize_text(&node.text_content());
        if text.is_empty() {
            return None;
        }
        Some(format!("text={}", truncate_chars(&text, self.config.text_limit)))
    }
}

/// `tag[:nth-of-type(k)]` for every level from below the document root down
/// to `node`, joined with child combinators.
fn structural_path<N: DomNode>(node: &N) -> String {
    let mut segments = Vec::new();
    let mut current = Some(node.clone());

    while let Some(level) = current {
        if level.is_document_root() {
            break;
        }
        segments.push(path_segment(&level));
        current = level.parent();
    }

    segments.reverse();
    segments.join(" > ")
}

fn path_segment<N: DomNode>(node: &N) -> String {
    let tag = node.tag_name();
    let key = node.key();
    let same_tag: Vec<N> = node
        .element_siblings()
        .into_iter()
        .filter(|sibling| sibling.tag_name() == tag)
        .collect();

    if same_tag.len() <= 1 {
        return tag;
    }

    let position = same_tag
        .iter()
        .position(|sibling| sibling.key() == key)
        .map_or(1, |index| index + 1);
    format!("{tag}:nth-of-type({position})")
}
