//! Recording session state machine and the action log it owns.

use scribe_common::protocol::{Action, ActionKind, RecordingState, SourceId};
use std::collections::HashSet;
use tracing::info;

/// Append-only, ordered record of captured actions. Insertion order is replay order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionLog {
    actions: Vec<Action>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    pub fn to_vec(&self) -> Vec<Action> {
        self.actions.clone()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn last(&self) -> Option<&Action> {
        self.actions.last()
    }

    /// URL of the most recently appended `navigate` action.
    pub fn last_navigation(&self) -> Option<&str> {
        self.actions.iter().rev().find_map(Action::url)
    }

    fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    fn clear(&mut self) {
        self.actions.clear();
    }
}

/// How `start` treats state left over from a previous activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartOptions {
    pub clear_log: bool,
    pub reset_markers: bool,
}

impl Default for StartOptions {
    fn default() -> Self {
        Self {
            clear_log: false,
            reset_markers: true,
        }
    }
}

/// `Idle` ⇄ `Active`, the action log, and the per-source markers recording
/// that a source's entry page has already been logged.
#[derive(Debug, Default)]
pub struct Session {
    state: RecordingState,
    log: ActionLog,
    markers: HashSet<SourceId>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start recording. Returns `false` without touching anything when already active.
    pub fn start(&mut self, options: StartOptions) -> bool {
        if self.is_active() {
            return false;
        }
        if options.clear_log {
            self.log.clear();
        }
        if options.reset_markers {
            self.markers.clear();
        }
        self.state = RecordingState::Active;
        info!(actions = self.log.len(), "Recording started");
        true
    }

    /// Stop recording. Returns `false` when already idle. The log is kept.
    pub fn stop(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.state = RecordingState::Idle;
        info!(actions = self.log.len(), "Recording stopped");
        true
    }

    /// Clear the log and all markers. Valid in either state.
    pub fn reset(&mut self) {
        self.log.clear();
        self.markers.clear();
        info!("Recording session reset");
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == RecordingState::Active
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn has_marker(&self, source: &SourceId) -> bool {
        self.markers.contains(source)
    }

    /// Record that `source`'s entry page has been seen. Returns `true` if newly marked.
    pub fn mark_source(&mut self, source: &SourceId) -> bool {
        self.markers.insert(source.clone())
    }

    pub fn marked_sources(&self) -> impl Iterator<Item = &SourceId> {
        self.markers.iter()
    }

    /// Append `action` while active. Actions missing their selector or value are refused.
    pub fn append(&mut self, action: Action) -> bool {
        if !self.is_active() || matches!(action.kind, ActionKind::Unrecognized(_)) {
            return false;
        }
        let has_selector = action.selector.as_deref().is_some_and(|s| !s.is_empty());
        if action.kind.requires_selector() && !has_selector {
            return false;
        }
        if action.kind.requires_value() && action.value.is_none() {
            return false;
        }
        self.log.push(action);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_requires_active() {
        let mut session = Session::new();
        assert!(!session.append(Action::click("#a")));
        assert!(session.log().is_empty());

        session.start(StartOptions::default());
        assert!(session.append(Action::click("#a")));
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn test_append_refuses_missing_selector() {
        let mut session = Session::new();
        session.start(StartOptions::default());

        let mut action = Action::click("#a");
        action.selector = None;
        assert!(!session.append(action));

        let mut action = Action::click("#a");
        action.selector = Some(String::new());
        assert!(!session.append(action));

        assert!(session.append(Action::navigate("https://example.com")));
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn test_last_navigation_skips_later_actions() {
        let mut session = Session::new();
        session.start(StartOptions::default());
        session.append(Action::navigate("https://a.test"));
        session.append(Action::click("#go"));
        assert_eq!(session.log().last_navigation(), Some("https://a.test"));
    }
}
