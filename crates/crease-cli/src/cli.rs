use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "crease",
    about = "Crease: ball-by-ball scorer for box cricket",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Record a legal ball
    Run(RunArgs),
    /// Record a wide (one penalty run plus any runs taken)
    Wide(ExtraArgs),
    /// Record a no-ball (one penalty run plus any runs taken)
    NoBall(ExtraArgs),
    /// Record a wicket on a legal ball
    Wicket(WicketArgs),
    /// Remove the most recent ball
    Undo(UndoArgs),
    /// Clear the whole innings
    Reset(ResetArgs),
    /// Show the scoreboard
    Status(StatusArgs),
    /// Show the innings over by over
    History(HistoryArgs),
    /// Show the balls of the current over
    Over(OverArgs),
    /// Ask for a one-sentence tactical insight
    Insight(InsightArgs),
    /// Print the stored innings record
    Export(ExportArgs),
    /// Replay the innings and check stored state
    Verify(VerifyArgs),
    /// Score interactively from the keyboard
    Score(ScoreArgs),
}

#[derive(Args)]
pub struct RunArgs {
    pub runs: u32,
}

#[derive(Args)]
pub struct ExtraArgs {
    /// Runs taken off the delivery, on top of the penalty
    #[arg(default_value = "0")]
    pub runs: u32,
}

#[derive(Args)]
pub struct WicketArgs {
    /// Runs completed before the dismissal
    #[arg(long, default_value = "0")]
    pub runs: u32,
}

#[derive(Args)]
pub struct UndoArgs {}

#[derive(Args)]
pub struct ResetArgs {
    /// Confirm clearing the innings
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct StatusArgs {}

#[derive(Args)]
pub struct HistoryArgs {
    /// Only show the last N overs
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct OverArgs {}

#[derive(Args)]
pub struct InsightArgs {}

#[derive(Args)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct VerifyArgs {}

#[derive(Args)]
pub struct ScoreArgs {}
