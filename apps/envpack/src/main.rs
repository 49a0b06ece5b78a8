use anyhow::Result;
use chrono::Local;
use clap::Parser;
use envpack_engine::{EnvironmentSelection, Pipeline, RunContext};
use envpack_proc::ProcessRunner;
use std::path::PathBuf;

mod ui;

#[derive(Parser, Debug)]
#[command(name = "envpack")]
#[command(about = "Build once per .env.* file and zip each dist output.", long_about = None)]
struct Cli {
    /// Project root containing package.json and the .env.* files.
    #[arg(default_value = ".")]
    project_root: PathBuf,

    /// Build every discovered environment, skipping the multi-select.
    #[arg(long)]
    all: bool,

    /// Build script to run; skips the script prompt. Must be one of the
    /// package.json scripts whose name contains "build".
    #[arg(long)]
    script: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let ctx = RunContext {
        project_root: cli.project_root,
        now: Local::now().naive_local(),
        environments: if cli.all {
            EnvironmentSelection::All
        } else {
            EnvironmentSelection::Prompt
        },
        script: cli.script,
    };

    let prompter = ui::TerminalPrompter;
    let notifier = ui::ConsoleNotifier;
    let runner = ProcessRunner;

    Pipeline::new(&prompter, &notifier, &runner).run(&ctx)
}
