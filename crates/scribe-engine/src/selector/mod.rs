//! Selector synthesis for recorded elements.
//!
//! Given an element, produce a selector likely to find the same element when
//! the script is replayed against a later version of the page. Stable
//! identifiers win over structural positions.

pub mod classes;
pub mod engine;
pub mod escape;

pub use engine::SelectorEngine;

use std::fmt;

/// Rule of the priority chain that produced a selector, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SelectorStrategy {
    Id,
    StableAttribute,
    Name,
    Text,
    AriaLabel,
    Classes,
    Structural,
}

impl fmt::Display for SelectorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectorStrategy::Id => "id",
            SelectorStrategy::StableAttribute => "stable-attribute",
            SelectorStrategy::Name => "name",
            SelectorStrategy::Text => "text",
            SelectorStrategy::AriaLabel => "aria-label",
            SelectorStrategy::Classes => "classes",
            SelectorStrategy::Structural => "structural",
        };
        f.write_str(name)
    }
}

/// A resolved selector together with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSelector {
    pub strategy: SelectorStrategy,
    pub selector: String,
}
