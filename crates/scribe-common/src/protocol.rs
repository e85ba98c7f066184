use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an interaction source (a single page or tab).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of a recorded action.
///
/// Recording only ever produces the seven named kinds. `Unrecognized` exists so
/// that a log loaded from an external store with an unknown tag still loads;
/// the script generator skips such entries with a marker comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    Navigate,
    Click,
    Type,
    Select,
    Check,
    Uncheck,
    Wait,
    Unrecognized(String),
}

impl ActionKind {
    pub fn as_str(&self) -> &str {
        match self {
            ActionKind::Navigate => "navigate",
            ActionKind::Click => "click",
            ActionKind::Type => "type",
            ActionKind::Select => "select",
            ActionKind::Check => "check",
            ActionKind::Uncheck => "uncheck",
            ActionKind::Wait => "wait",
            ActionKind::Unrecognized(tag) => tag,
        }
    }

    /// Every kind except `navigate` targets an element.
    pub fn requires_selector(&self) -> bool {
        !matches!(self, ActionKind::Navigate | ActionKind::Unrecognized(_))
    }

    pub fn requires_value(&self) -> bool {
        matches!(
            self,
            ActionKind::Navigate | ActionKind::Type | ActionKind::Select
        )
    }
}

impl From<String> for ActionKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "navigate" => ActionKind::Navigate,
            "click" => ActionKind::Click,
            "type" => ActionKind::Type,
            "select" => ActionKind::Select,
            "check" => ActionKind::Check,
            "uncheck" => ActionKind::Uncheck,
            "wait" => ActionKind::Wait,
            _ => ActionKind::Unrecognized(tag),
        }
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Unrecognized(tag) => tag,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded user interaction or navigation. Never mutated once logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Action {
    pub fn navigate(url: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Navigate,
            selector: None,
            value: Some(url.into()),
        }
    }

    pub fn click(selector: impl Into<String>) -> Self {
        Self::targeted(ActionKind::Click, selector, None)
    }

    pub fn type_text(selector: impl Into<String>, value: impl Into<String>) -> Self {
        Self::targeted(ActionKind::Type, selector, Some(value.into()))
    }

    pub fn select(selector: impl Into<String>, value: impl Into<String>) -> Self {
        Self::targeted(ActionKind::Select, selector, Some(value.into()))
    }

    /// `check` when `checked` is true, `uncheck` otherwise.
    pub fn set_checked(selector: impl Into<String>, checked: bool) -> Self {
        let kind = if checked {
            ActionKind::Check
        } else {
            ActionKind::Uncheck
        };
        Self::targeted(kind, selector, None)
    }

    pub fn wait(selector: impl Into<String>) -> Self {
        Self::targeted(ActionKind::Wait, selector, None)
    }

    fn targeted(kind: ActionKind, selector: impl Into<String>, value: Option<String>) -> Self {
        Self {
            kind,
            selector: Some(selector.into()),
            value,
        }
    }

    /// The URL of a `navigate` action.
    pub fn url(&self) -> Option<&str> {
        match self.kind {
            ActionKind::Navigate => self.value.as_deref(),
            _ => None,
        }
    }
}

/// Whether the recorder is currently capturing interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordingState {
    #[default]
    Idle,
    Active,
}

impl fmt::Display for RecordingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordingState::Idle => f.write_str("idle"),
            RecordingState::Active => f.write_str("active"),
        }
    }
}

/// Line-delimited JSON messages accepted from the host transport.
///
/// Interaction notices locate their node with a CSS `target` evaluated against
/// the page loaded for their source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WireMessage {
    Click(ClickNotice),
    Input(InputNotice),
    Change(ChangeNotice),
    Navigate(NavigateNotice),
    Page(PageRequest),
    Pause(PauseRequest),
    Start(StartRequest),
    Stop,
    Reset,
    Status,
    Actions,
    Script,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickNotice {
    pub source: SourceId,
    #[serde(default)]
    pub target: Option<String>,
}

/// A keystroke-level value change. `value` is the control's value after the keystroke.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputNotice {
    pub source: SourceId,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// A committed change on a checkbox or select control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeNotice {
    pub source: SourceId,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub checked: Option<bool>,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigateNotice {
    pub source: SourceId,
    #[serde(default)]
    pub url: Option<String>,
    /// Set when the transport reports the page a source was already on when recording began.
    #[serde(default)]
    pub initial: bool,
}

/// Load an HTML snapshot as the live document of `source` (or of every source without one).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceId>,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PauseRequest {
    pub ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartRequest {
    #[serde(default)]
    pub clear_log: bool,
}
