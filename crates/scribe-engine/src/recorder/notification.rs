use scribe_common::protocol::SourceId;

/// A raw interaction reported by the host transport.
///
/// `target` is `None` when the transport could not supply the node; such
/// notifications are dropped as malformed.
#[derive(Debug, Clone)]
pub enum Notification<N> {
    Click {
        source: SourceId,
        target: Option<N>,
    },
    /// Keystroke-level change; `value` is the control's value after the keystroke.
    ValueChange {
        source: SourceId,
        target: Option<N>,
        value: Option<String>,
    },
    /// Discrete commit on a checkbox or select control.
    StructuralChange {
        source: SourceId,
        target: Option<N>,
        state: ControlState,
    },
    Navigation {
        source: SourceId,
        url: Option<String>,
        /// The page the source was on when recording began, rather than a new navigation.
        initial: bool,
    },
}

impl<N> Notification<N> {
    pub fn source(&self) -> &SourceId {
        match self {
            Notification::Click { source, .. }
            | Notification::ValueChange { source, .. }
            | Notification::StructuralChange { source, .. }
            | Notification::Navigation { source, .. } => source,
        }
    }
}

/// Control state captured at the moment of a structural change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlState {
    pub checked: Option<bool>,
    pub value: Option<String>,
}

impl ControlState {
    pub fn checked(checked: bool) -> Self {
        Self {
            checked: Some(checked),
            value: None,
        }
    }

    pub fn selected(value: impl Into<String>) -> Self {
        Self {
            checked: None,
            value: Some(value.into()),
        }
    }
}
