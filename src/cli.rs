use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{self, CommandReport};

#[derive(Debug, Parser)]
#[command(
    name = "media-merge",
    version,
    about = "Merge project media metadata from a CSV export into projects.json"
)]
struct Cli {
    /// Print the command report as JSON.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify CSV media and splice it into the projects document.
    Merge(MergeArgs),
    /// Load and classify CSV media without touching the projects document.
    Classify(ClassifyArgs),
}

#[derive(Debug, Args)]
struct MergeArgs {
    /// CSV export with `Project` and `Media Objects` columns.
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Projects JSON document, rewritten in place.
    #[arg(long)]
    projects: Option<PathBuf>,
    #[arg(long)]
    dry_run: bool,
    /// Copy the projects document aside before rewriting it.
    #[arg(long)]
    backup: bool,
    /// Refuse to write when any CSV row failed to parse.
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Args)]
struct ClassifyArgs {
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn render(report: &CommandReport, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for line in &report.details {
        println!("{line}");
    }
    for issue in &report.issues {
        println!("issue: {issue}");
    }
    Ok(())
}

/// Parse arguments, run the selected command and print its report.
/// Returns the process exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    let report = match cli.command {
        Command::Merge(args) => commands::merge_media::run(&commands::merge_media::MergeOptions {
            csv: args.csv,
            projects: args.projects,
            dry_run: args.dry_run,
            backup: args.backup,
            strict: args.strict,
        })?,
        Command::Classify(args) => {
            commands::classify_media::run(&commands::classify_media::ClassifyOptions {
                csv: args.csv,
            })?
        }
    };

    render(&report, cli.json)?;
    Ok(if report.ok { 0 } else { 2 })
}
