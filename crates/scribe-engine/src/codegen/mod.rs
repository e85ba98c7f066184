//! Compiles an action log into a Playwright (Node.js) script.

mod literal;

pub use literal::js_string;

use crate::config::CodegenConfig;
use literal::comment_text;
use scribe_common::protocol::{Action, ActionKind};
use thiserror::Error;

const EMPTY_SCRIPT: &str = "// No actions recorded yet\n\
// Start recording and interact with the page to build a script\n";

const INDENT: &str = "  ";

/// Why an action could not be rendered as a statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("unrecognized action type '{0}'")]
    Unrecognized(String),
    #[error("{0} action without selector")]
    MissingSelector(ActionKind),
    #[error("{0} action without value")]
    MissingValue(ActionKind),
}

#[derive(Debug, Clone, Default)]
pub struct ScriptGenerator {
    config: CodegenConfig,
}

impl ScriptGenerator {
    pub fn new(config: CodegenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Render the whole script. Never fails: actions that cannot be rendered
    /// leave a `// skipped:` comment in their place.
    pub fn generate(&self, actions: &[Action]) -> String {
        if actions.is_empty() {
            return EMPTY_SCRIPT.to_string();
        }

        let browser = self.config.browser.as_str();
        let mut script = format!("const {{ {browser} }} = require('playwright');\n\n");
        script.push_str("(async () => {\n");
        script.push_str(&format!(
            "{INDENT}const browser = await {browser}.launch({{ headless: {} }});\n",
            self.config.headless
        ));
        script.push_str(&format!("{INDENT}const context = await browser.newContext();\n"));
        script.push_str(&format!("{INDENT}const page = await context.newPage();\n\n"));

        for action in actions {
            let line = match statement(action) {
                Ok(line) => line,
                Err(reason) => format!("// skipped: {}", comment_text(&reason.to_string())),
            };
            script.push_str(INDENT);
            script.push_str(&line);
            script.push('\n');
        }

        script.push_str(&format!("\n{INDENT}// Add assertions here\n"));
        script.push_str(&format!(
            "{INDENT}// await expect(page).toHaveTitle('Expected Title');\n"
        ));
        script.push_str(&format!("\n{INDENT}await browser.close();\n"));
        script.push_str("})();\n");
        script
    }
}

/// The single statement for `action`, without indentation.
pub fn statement(action: &Action) -> Result<String, SkipReason> {
    let selector = || {
        action
            .selector
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(js_string)
            .ok_or_else(|| SkipReason::MissingSelector(action.kind.clone()))
    };
    let value = || {
        action
            .value
            .as_deref()
            .map(js_string)
            .ok_or_else(|| SkipReason::MissingValue(action.kind.clone()))
    };

    let line = match &action.kind {
        ActionKind::Navigate => format!("await page.goto({});", value()?),
        ActionKind::Click => format!("await page.click({});", selector()?),
        ActionKind::Type => format!("await page.fill({}, {});", selector()?, value()?),
        ActionKind::Select => {
            format!("await page.selectOption({}, {});", selector()?, value()?)
        }
        ActionKind::Check => format!("await page.check({});", selector()?),
        ActionKind::Uncheck => format!("await page.uncheck({});", selector()?),
        ActionKind::Wait => format!("await page.waitForSelector({});", selector()?),
        ActionKind::Unrecognized(tag) => return Err(SkipReason::Unrecognized(tag.clone())),
    };
    Ok(line)
}
