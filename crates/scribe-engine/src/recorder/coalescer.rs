//! Turns raw notifications into actions.
//!
//! The coalescer is synchronous and owns no timers: a keystroke yields a
//! [`PendingInput`] that the caller debounces and later hands back through
//! [`Coalescer::commit_input`].

use super::navigation::NavigationFilter;
use super::notification::{ControlState, Notification};
use crate::config::ScribeConfig;
use crate::dom::{DomNode, NodeKey};
use crate::selector::SelectorEngine;
use crate::session::Session;
use scribe_common::protocol::{Action, SourceId};
use thiserror::Error;

/// Identity of a control with typing in flight.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputKey {
    pub source: SourceId,
    pub node: NodeKey,
}

/// Latest state of a control that is still being typed into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInput {
    pub key: InputKey,
    pub selector: String,
    pub value: String,
}

/// What a single notification produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Appended(Action),
    /// Keystroke accepted; the action is appended once typing pauses.
    Pending(PendingInput),
    Dropped(DropReason),
}

/// Why a notification produced nothing. None of these are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DropReason {
    #[error("not recording")]
    Inactive,
    #[error("malformed notification: {0}")]
    Malformed(&'static str),
    #[error("no selector for target")]
    Unresolvable,
    #[error("unsupported control: {0}")]
    UnsupportedControl(String),
    #[error("excluded url: {0}")]
    Excluded(String),
    #[error("duplicate navigation: {0}")]
    Duplicate(String),
    #[error("entry page already recorded for source {0}")]
    AlreadyMarked(SourceId),
    #[error("action rejected by session")]
    Rejected,
}

#[derive(Debug, Clone, Default)]
pub struct Coalescer {
    selectors: SelectorEngine,
    navigation: NavigationFilter,
}

impl Coalescer {
    pub fn new(selectors: SelectorEngine, navigation: NavigationFilter) -> Self {
        Self {
            selectors,
            navigation,
        }
    }

    pub fn from_config(config: &ScribeConfig) -> Self {
        Self::new(
            SelectorEngine::new(config.selector.clone()),
            NavigationFilter::from_config(&config.recording),
        )
    }

    pub fn selectors(&self) -> &SelectorEngine {
        &self.selectors
    }

    pub fn coalesce<N: DomNode>(&self, session: &mut Session, notification: Notification<N>) -> Outcome {
        if !session.is_active() {
            return Outcome::Dropped(DropReason::Inactive);
        }

        match notification {
            Notification::Click { target, .. } => {
                let Some(target) = target else {
                    return Outcome::Dropped(DropReason::Malformed("click without target"));
                };
                match self.selectors.resolve(&target) {
                    Some(selector) => append(session, Action::click(selector)),
                    None => Outcome::Dropped(DropReason::Unresolvable),
                }
            }
            Notification::ValueChange {
                source,
                target,
                value,
            } => {
                let Some(target) = target else {
                    return Outcome::Dropped(DropReason::Malformed("input without target"));
                };
                let Some(value) = value else {
                    return Outcome::Dropped(DropReason::Malformed("input without value"));
                };
                let Some(selector) = self.selectors.resolve(&target) else {
                    return Outcome::Dropped(DropReason::Unresolvable);
                };
                Outcome::Pending(PendingInput {
                    key: InputKey {
                        source,
                        node: target.key(),
                    },
                    selector,
                    value,
                })
            }
            Notification::StructuralChange { target, state, .. } => {
                let Some(target) = target else {
                    return Outcome::Dropped(DropReason::Malformed("change without target"));
                };
                self.structural_change(session, &target, state)
            }
            Notification::Navigation {
                source,
                url,
                initial,
            } => self.navigation(session, source, url, initial),
        }
    }

    /// Finalize typing that has gone quiet into a `type` action.
    pub fn commit_input(&self, session: &mut Session, input: PendingInput) -> Outcome {
        if !session.is_active() {
            return Outcome::Dropped(DropReason::Inactive);
        }
        append(session, Action::type_text(input.selector, input.value))
    }

    fn structural_change<N: DomNode>(&self, session: &mut Session, target: &N, state: ControlState) -> Outcome {
        let action = if target.is_checkbox() {
            let Some(checked) = state.checked else {
                return Outcome::Dropped(DropReason::Malformed("checkbox change without state"));
            };
            let Some(selector) = self.selectors.resolve(target) else {
                return Outcome::Dropped(DropReason::Unresolvable);
            };
            Action::set_checked(selector, checked)
        } else if target.is_select() {
            let Some(value) = state.value else {
                return Outcome::Dropped(DropReason::Malformed("select change without value"));
            };
            let Some(selector) = self.selectors.resolve(target) else {
                return Outcome::Dropped(DropReason::Unresolvable);
            };
            Action::select(selector, value)
        } else {
            return Outcome::Dropped(DropReason::UnsupportedControl(target.tag_name()));
        };

        append(session, action)
    }

    fn navigation(&self, session: &mut Session, source: SourceId, url: Option<String>, initial: bool) -> Outcome {
        let Some(url) = url.filter(|url| !url.trim().is_empty()) else {
            return Outcome::Dropped(DropReason::Malformed("navigation without url"));
        };
        if !self.navigation.allows(&url) {
            return Outcome::Dropped(DropReason::Excluded(url));
        }

        // The entry page of a source is logged once per activation; real
        // navigations are always candidates.
        if initial && session.has_marker(&source) {
            return Outcome::Dropped(DropReason::AlreadyMarked(source));
        }
        session.mark_source(&source);

        if session.log().last_navigation() == Some(url.as_str()) {
            return Outcome::Dropped(DropReason::Duplicate(url));
        }
        append(session, Action::navigate(url))
    }
}

fn append(session: &mut Session, action: Action) -> Outcome {
    if session.append(action.clone()) {
        Outcome::Appended(action)
    } else {
        Outcome::Dropped(DropReason::Rejected)
    }
}
