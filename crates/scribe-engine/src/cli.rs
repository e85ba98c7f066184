//! Line-oriented driver: executes wire messages against a [`Recorder`] from a
//! file or an interactive prompt.

use crate::dom::{DomError, HtmlNode, HtmlPage};
use crate::recorder::{ControlState, Notification, Outcome, Recorder};
use crate::session::StartOptions;
use scribe_common::formatter::{format_action, format_actions, format_status};
use scribe_common::protocol::{SourceId, WireMessage};
use std::collections::HashMap;
use std::error::Error;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("Invalid message: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("No page loaded for source '{0}'")]
    NoPage(SourceId),
    #[error("No element matches '{0}'")]
    TargetNotFound(String),
    #[error(transparent)]
    Dom(#[from] DomError),
    #[error("Failed to read page '{path}': {source}")]
    PageFile { path: String, source: io::Error },
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Wire(#[from] WireError),
}

/// HTML snapshots standing in for each source's live document.
#[derive(Debug, Default)]
struct Pages {
    fallback: Option<HtmlPage>,
    by_source: HashMap<SourceId, HtmlPage>,
}

impl Pages {
    fn get(&self, source: &SourceId) -> Option<&HtmlPage> {
        self.by_source.get(source).or(self.fallback.as_ref())
    }
}

/// Feeds wire messages to a recorder. Holds parsed pages, so it stays on the
/// task that created it.
pub struct Driver {
    recorder: Recorder,
    pages: Pages,
}

impl Driver {
    pub fn new(recorder: Recorder) -> Self {
        Self {
            recorder,
            pages: Pages::default(),
        }
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// Use `page` for every source without a page of its own.
    pub fn set_default_page(&mut self, page: HtmlPage) {
        self.pages.fallback = Some(page);
    }

    pub fn set_page(&mut self, source: SourceId, page: HtmlPage) {
        self.pages.by_source.insert(source, page);
    }

    pub async fn load_page(&mut self, source: Option<SourceId>, path: &Path) -> Result<(), WireError> {
        let html = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| WireError::PageFile {
                path: path.display().to_string(),
                source: e,
            })?;
        let page = HtmlPage::parse(&html);
        match source {
            Some(source) => self.set_page(source, page),
            None => self.set_default_page(page),
        }
        Ok(())
    }

    /// Execute one line: a JSON wire message, or a bare control word such as `stop`.
    pub async fn execute_line(&mut self, line: &str) -> Result<String, DriverError> {
        let message = parse_line(line)?;
        debug!(?message, "Executing wire message");
        self.execute(message).await
    }

    pub async fn execute(&mut self, message: WireMessage) -> Result<String, DriverError> {
        let output = match message {
            WireMessage::Click(notice) => {
                let page = self.page(&notice.source)?;
                let target = locate(page, notice.target.as_deref())?;
                let outcome = self.recorder.handle(Notification::Click {
                    source: notice.source,
                    target,
                });
                self.describe(&outcome)
            }
            WireMessage::Input(notice) => {
                let page = self.page(&notice.source)?;
                let target = locate(page, notice.target.as_deref())?;
                let outcome = self.recorder.handle(Notification::ValueChange {
                    source: notice.source,
                    target,
                    value: notice.value,
                });
                self.describe(&outcome)
            }
            WireMessage::Change(notice) => {
                let page = self.page(&notice.source)?;
                let target = locate(page, notice.target.as_deref())?;
                let outcome = self.recorder.handle(Notification::StructuralChange {
                    source: notice.source,
                    target,
                    state: ControlState {
                        checked: notice.checked,
                        value: notice.value,
                    },
                });
                self.describe(&outcome)
            }
            WireMessage::Navigate(notice) => {
                let outcome = self.recorder.handle(Notification::<HtmlNode<'_>>::Navigation {
                    source: notice.source,
                    url: notice.url,
                    initial: notice.initial,
                });
                self.describe(&outcome)
            }
            WireMessage::Page(request) => {
                self.load_page(request.source, Path::new(&request.path)).await?;
                format!("Loaded page {}", request.path)
            }
            WireMessage::Pause(request) => {
                tokio::time::sleep(Duration::from_millis(request.ms)).await;
                format!("Paused {}ms", request.ms)
            }
            WireMessage::Start(request) => {
                let options = StartOptions {
                    clear_log: request.clear_log,
                    ..StartOptions::default()
                };
                if self.recorder.start(options) {
                    "Recording started".to_string()
                } else {
                    "Already recording".to_string()
                }
            }
            WireMessage::Stop => {
                if self.recorder.stop() {
                    format!(
                        "Recording stopped ({} actions)",
                        self.recorder.actions().len()
                    )
                } else {
                    "Not recording".to_string()
                }
            }
            WireMessage::Reset => {
                self.recorder.reset();
                "Recording reset".to_string()
            }
            WireMessage::Status => format_status(
                self.recorder.status(),
                self.recorder.actions().len(),
                self.recorder.pending_inputs(),
            ),
            WireMessage::Actions => {
                format_actions(&self.recorder.actions(), self.recorder.sensitive_fields())
            }
            WireMessage::Script => self.recorder.generate_script(),
        };
        Ok(output)
    }

    fn page(&self, source: &SourceId) -> Result<&HtmlPage, WireError> {
        self.pages
            .get(source)
            .ok_or_else(|| WireError::NoPage(source.clone()))
    }

    fn describe(&self, outcome: &Outcome) -> String {
        match outcome {
            Outcome::Appended(action) => {
                format!("Recorded: {}", format_action(action, self.recorder.sensitive_fields()))
            }
            Outcome::Pending(input) => format!("Typing into {}", input.selector),
            Outcome::Dropped(reason) => format!("Ignored: {}", reason),
        }
    }
}

/// `None` target passes through so the recorder reports it as malformed.
fn locate<'a>(page: &'a HtmlPage, target: Option<&str>) -> Result<Option<HtmlNode<'a>>, WireError> {
    match target {
        None => Ok(None),
        Some(css) => page
            .query(css)?
            .map(Some)
            .ok_or_else(|| WireError::TargetNotFound(css.to_string())),
    }
}

fn parse_line(line: &str) -> Result<WireMessage, WireError> {
    let line = line.trim();
    if line.starts_with('{') {
        Ok(serde_json::from_str(line)?)
    } else {
        Ok(serde_json::from_value(serde_json::json!({ "kind": line }))?)
    }
}

#[derive(Clone, Copy)]
pub struct OutputHandlers {
    pub out: fn(&str),
    pub err: fn(&str),
}

pub enum FileErrorMode {
    Plain,
    WithLine,
}

pub struct FileOptions {
    pub stop_on_error: bool,
    pub error_mode: FileErrorMode,
}

pub struct ReplOptions<'a> {
    pub banner_lines: &'a [&'a str],
    pub prompt: &'a str,
    pub exit_commands: &'a [&'a str],
    pub handle_ctrl_c: bool,
    pub ctrl_c_message: Option<&'a str>,
}

/// Run every message in an event file. Blank lines and `#` comments are skipped.
pub async fn run_file(
    driver: &mut Driver,
    output: OutputHandlers,
    path: &Path,
    options: FileOptions,
) -> Result<(), Box<dyn Error>> {
    let content = tokio::fs::read_to_string(path).await?;
    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match driver.execute_line(trimmed).await {
            Ok(result) => (output.out)(&result),
            Err(err) => {
                match options.error_mode {
                    FileErrorMode::Plain => (output.err)(&format!("Error: {}", err)),
                    FileErrorMode::WithLine => (output.err)(&format!(
                        "Error on line {}: '{}': {}",
                        index + 1,
                        trimmed,
                        err
                    )),
                }
                if options.stop_on_error {
                    return Err(err.into());
                }
            }
        }
    }
    Ok(())
}

enum ReadLineResult {
    Input(String),
    /// Blank line; re-prompt.
    Skip,
    /// EOF, exit command or Ctrl-C.
    Exit,
    Error(io::Error),
}

async fn read_line(
    reader: &mut tokio::io::Lines<BufReader<tokio::io::Stdin>>,
    options: &ReplOptions<'_>,
    output: OutputHandlers,
) -> ReadLineResult {
    if options.handle_ctrl_c {
        tokio::select! {
            line = reader.next_line() => classify_line(line, options.exit_commands),
            _ = tokio::signal::ctrl_c() => {
                if let Some(message) = options.ctrl_c_message {
                    (output.out)(message);
                }
                ReadLineResult::Exit
            }
        }
    } else {
        classify_line(reader.next_line().await, options.exit_commands)
    }
}

fn classify_line(result: Result<Option<String>, io::Error>, exit_commands: &[&str]) -> ReadLineResult {
    match result {
        Ok(Some(input)) => {
            let trimmed = input.trim().to_string();
            if trimmed.is_empty() {
                ReadLineResult::Skip
            } else if exit_commands.contains(&trimmed.as_str()) {
                ReadLineResult::Exit
            } else {
                ReadLineResult::Input(trimmed)
            }
        }
        Ok(None) => ReadLineResult::Exit,
        Err(e) => ReadLineResult::Error(e),
    }
}

pub async fn run_repl(
    driver: &mut Driver,
    output: OutputHandlers,
    options: ReplOptions<'_>,
) -> Result<(), Box<dyn Error>> {
    for line in options.banner_lines {
        (output.out)(line);
    }

    let mut reader = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        print!("{}", options.prompt);
        stdout.flush()?;

        match read_line(&mut reader, &options, output).await {
            ReadLineResult::Input(line) => match driver.execute_line(&line).await {
                Ok(result) => (output.out)(&result),
                Err(err) => (output.err)(&format!("Error: {}", err)),
            },
            ReadLineResult::Skip => continue,
            ReadLineResult::Exit => break,
            ReadLineResult::Error(e) => return Err(e.into()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_words_parse_as_commands() {
        assert!(matches!(parse_line("stop"), Ok(WireMessage::Stop)));
        assert!(matches!(
            parse_line(" start "),
            Ok(WireMessage::Start(request)) if !request.clear_log
        ));
        assert!(parse_line("dance").is_err());
    }

    #[test]
    fn test_classify_line() {
        let exits = ["exit", "quit"];
        assert!(matches!(classify_line(Ok(Some("  ".into())), &exits), ReadLineResult::Skip));
        assert!(matches!(classify_line(Ok(Some("quit".into())), &exits), ReadLineResult::Exit));
        assert!(matches!(classify_line(Ok(None), &exits), ReadLineResult::Exit));
        assert!(matches!(
            classify_line(Ok(Some(" status ".into())), &exits),
            ReadLineResult::Input(line) if line == "status"
        ));
    }
}
