use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScribeConfig {
    #[serde(default)]
    pub recording: RecordingConfig,
    #[serde(default)]
    pub selector: SelectorConfig,
    #[serde(default)]
    pub codegen: CodegenConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Quiet period after the last keystroke before a `type` action is committed.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Commit pending inputs on stop instead of discarding them.
    #[serde(default = "default_flush_pending_on_stop")]
    pub flush_pending_on_stop: bool,
    /// Navigations to URLs with these schemes are never recorded.
    #[serde(default = "default_excluded_schemes")]
    pub excluded_schemes: Vec<String>,
    /// Navigations to URLs starting with any of these are never recorded
    /// (e.g. the recorder's own UI surfaces).
    #[serde(default)]
    pub excluded_url_prefixes: Vec<String>,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            flush_pending_on_stop: default_flush_pending_on_stop(),
            excluded_schemes: default_excluded_schemes(),
            excluded_url_prefixes: Vec::new(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_flush_pending_on_stop() -> bool {
    true
}

fn default_excluded_schemes() -> Vec<String> {
    [
        "about",
        "chrome",
        "chrome-extension",
        "moz-extension",
        "edge",
        "devtools",
        "view-source",
        "javascript",
        "data",
        "blob",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Test-id style attributes tried in order after `id`.
    #[serde(default = "default_stable_attributes")]
    pub stable_attributes: Vec<String>,
    /// Characters of normalized text kept in `text=` selectors.
    #[serde(default = "default_text_limit")]
    pub text_limit: usize,
    /// A class selector is rejected once it matches this many elements.
    #[serde(default = "default_class_match_limit")]
    pub class_match_limit: usize,
    /// Shorter class names are treated as generated.
    #[serde(default = "default_min_class_len")]
    pub min_class_len: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            stable_attributes: default_stable_attributes(),
            text_limit: default_text_limit(),
            class_match_limit: default_class_match_limit(),
            min_class_len: default_min_class_len(),
        }
    }
}

fn default_stable_attributes() -> Vec<String> {
    ["data-testid", "data-test-id", "data-test", "data-cy", "data-qa"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_text_limit() -> usize {
    30
}

fn default_class_match_limit() -> usize {
    5
}

fn default_min_class_len() -> usize {
    3
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserEngine {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl BrowserEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserEngine::Chromium => "chromium",
            BrowserEngine::Firefox => "firefox",
            BrowserEngine::Webkit => "webkit",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodegenConfig {
    #[serde(default)]
    pub browser: BrowserEngine,
    #[serde(default)]
    pub headless: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Field names whose typed values are masked in logs and listings.
    #[serde(default = "default_sensitive_fields")]
    pub sensitive_fields: Vec<String>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            sensitive_fields: default_sensitive_fields(),
        }
    }
}

fn default_sensitive_fields() -> Vec<String> {
    vec![
        "password".to_string(),
        "token".to_string(),
        "card_number".to_string(),
        "cvv".to_string(),
        "ssn".to_string(),
        "secret".to_string(),
    ]
}
