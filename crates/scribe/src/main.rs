use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use scribe_engine::cli::{self, Driver, FileErrorMode, FileOptions, OutputHandlers, ReplOptions};
use scribe_engine::codegen::ScriptGenerator;
use scribe_engine::config::{ConfigLoader, ScribeConfig};
use scribe_engine::recorder::Recorder;
use scribe_engine::session::StartOptions;
use scribe_engine::store::{ActionStore, FileActionStore};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scribe", version, about = "Record browser interactions as Playwright scripts")]
struct Args {
    /// Config file (defaults to ./scribe.yaml, then ~/.scribe/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay an event file against an HTML page and print the resulting script
    Record {
        /// HTML snapshot used as the page for every source
        #[arg(long)]
        page: PathBuf,
        /// Line-delimited wire messages
        #[arg(long)]
        events: PathBuf,
        /// Write the script here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Also save the recorded actions as JSON
        #[arg(long)]
        save: Option<PathBuf>,
        /// Abort on the first line that fails
        #[arg(long)]
        strict: bool,
    },
    /// Generate a script from a saved action log
    Generate {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Interactive session reading wire messages from stdin
    Repl {
        #[arg(long)]
        page: Option<PathBuf>,
        /// Save the recorded actions as JSON on exit
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the generated script, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = ConfigLoader::load(args.config.as_deref()).await?;

    match args.command {
        Command::Record {
            page,
            events,
            output,
            save,
            strict,
        } => record(&config, &page, &events, output.as_deref(), save.as_deref(), strict).await?,
        Command::Generate { input, output } => generate(&config, &input, output.as_deref()).await?,
        Command::Repl { page, save } => repl(&config, page.as_deref(), save.as_deref()).await?,
    }
    Ok(())
}

async fn record(
    config: &ScribeConfig,
    page: &Path,
    events: &Path,
    output: Option<&Path>,
    save: Option<&Path>,
    strict: bool,
) -> anyhow::Result<()> {
    let mut driver = Driver::new(Recorder::new(config));
    driver
        .load_page(None, page)
        .await
        .with_context(|| format!("Failed to load page {}", page.display()))?;
    driver.recorder().start(StartOptions::default());

    let handlers = OutputHandlers {
        out: |msg| eprintln!("{}", msg),
        err: |msg| eprintln!("{}", msg),
    };
    cli::run_file(
        &mut driver,
        handlers,
        events,
        FileOptions {
            stop_on_error: strict,
            error_mode: FileErrorMode::WithLine,
        },
    )
    .await
    .map_err(|e| anyhow!("Error executing {}: {}", events.display(), e))?;

    let recorder = driver.recorder();
    recorder.stop();
    if let Some(path) = save {
        save_actions(path, recorder).await?;
    }
    write_script(output, &recorder.generate_script()).await
}

async fn generate(config: &ScribeConfig, input: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let actions = FileActionStore::new(input)
        .load()
        .await
        .with_context(|| format!("Failed to load actions from {}", input.display()))?;
    let script = ScriptGenerator::new(config.codegen.clone()).generate(&actions);
    write_script(output, &script).await
}

async fn repl(config: &ScribeConfig, page: Option<&Path>, save: Option<&Path>) -> anyhow::Result<()> {
    let mut driver = Driver::new(Recorder::new(config));
    if let Some(page) = page {
        driver
            .load_page(None, page)
            .await
            .with_context(|| format!("Failed to load page {}", page.display()))?;
    }

    let handlers = OutputHandlers {
        out: |msg| println!("{}", msg),
        err: |msg| eprintln!("{}", msg),
    };
    let options = ReplOptions {
        banner_lines: &[
            "Scribe recorder. Enter wire messages as JSON, or a command:",
            "  start, stop, reset, status, actions, script",
            "Type 'exit' or 'quit' to close.",
        ],
        prompt: "scribe> ",
        exit_commands: &["exit", "quit"],
        handle_ctrl_c: true,
        ctrl_c_message: Some("Interrupted"),
    };
    cli::run_repl(&mut driver, handlers, options)
        .await
        .map_err(|e| anyhow!("Error during session: {}", e))?;

    let recorder = driver.recorder();
    recorder.stop();
    if let Some(path) = save {
        save_actions(path, recorder).await?;
    }
    Ok(())
}

async fn save_actions(path: &Path, recorder: &Recorder) -> anyhow::Result<()> {
    let actions = recorder.actions();
    FileActionStore::new(path)
        .save(&actions)
        .await
        .with_context(|| format!("Failed to save actions to {}", path.display()))?;
    info!(path = %path.display(), count = actions.len(), "Saved actions");
    Ok(())
}

async fn write_script(output: Option<&Path>, script: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            tokio::fs::write(path, script)
                .await
                .with_context(|| format!("Failed to write script to {}", path.display()))?;
            info!(path = %path.display(), "Wrote script");
        }
        None => print!("{}", script),
    }
    Ok(())
}
