use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use crease_insight::{
    GenerativeInsightClient, InsightConfig, InsightOutcome, MatchAnalyst, StaticInsightProvider,
    FAILURE_FALLBACK,
};
use crease_ledger::{DerivedView, LedgerValidator};
use crease_session::{HapticFeedback, NoopHaptics, Scorer, ScoringSession, TerminalBell};
use crease_store::{FileStateStore, InningsPersistence, InningsRecord, LoadOutcome};
use crease_types::{BallEvent, BallKind};
use serde_json::json;
use tracing::warn;

use crate::cli::*;
use crate::config::CreaseConfig;
use crate::render;
use crate::repl;

pub type CliScorer = Scorer<FileStateStore, Box<dyn HapticFeedback>>;

pub async fn run_command(cli: Cli, config: CreaseConfig) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Run(args) => cmd_record(&config, format, args.runs, BallKind::Legal, false),
        Command::Wide(args) => cmd_record(&config, format, args.runs, BallKind::Wide, false),
        Command::NoBall(args) => cmd_record(&config, format, args.runs, BallKind::NoBall, false),
        Command::Wicket(args) => cmd_record(&config, format, args.runs, BallKind::Legal, true),
        Command::Undo(_) => cmd_undo(&config, format),
        Command::Reset(args) => cmd_reset(&config, format, args),
        Command::Status(_) => cmd_status(&config, format),
        Command::History(args) => cmd_history(&config, format, args),
        Command::Over(_) => cmd_over(&config, format),
        Command::Insight(_) => cmd_insight(&config, format).await,
        Command::Export(args) => cmd_export(&config, args),
        Command::Verify(_) => cmd_verify(&config, format),
        Command::Score(_) => cmd_score(&config).await,
    }
}

pub fn open_scorer(config: &CreaseConfig) -> anyhow::Result<CliScorer> {
    let dir = config.storage.resolved_dir();
    let store = FileStateStore::open(dir.clone())
        .with_context(|| format!("opening innings store at {}", dir.display()))?;
    let persistence = InningsPersistence::with_key(store, config.storage.key.clone());
    let haptics: Box<dyn HapticFeedback> = if config.session.haptics {
        Box::new(TerminalBell)
    } else {
        Box::new(NoopHaptics)
    };
    let (scorer, outcome) = Scorer::open(persistence, haptics);
    if let LoadOutcome::Recovered { reason } = outcome {
        eprintln!(
            "{} stored innings could not be read ({reason}); starting fresh",
            "warning:".yellow().bold()
        );
    }
    Ok(scorer)
}

/// The analyst for this configuration. Without an API key every request
/// gets the fallback sentence.
pub fn build_analyst(config: &InsightConfig) -> MatchAnalyst {
    if config.enabled {
        match GenerativeInsightClient::from_config(config) {
            Ok(client) => return MatchAnalyst::new(Arc::new(client), config.clone()),
            Err(e) => warn!(error = %e, "insight generator unavailable; using fallback"),
        }
    }
    let offline = InsightConfig {
        enabled: false,
        ..config.clone()
    };
    MatchAnalyst::new(Arc::new(StaticInsightProvider::new(FAILURE_FALLBACK)), offline)
}

fn ensure_saved(scorer: &mut CliScorer) -> anyhow::Result<()> {
    match scorer.take_persist_error() {
        Some(e) => anyhow::bail!("innings was not saved: {e}"),
        None => Ok(()),
    }
}

fn print_board(view: &DerivedView, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(view)?),
        OutputFormat::Text => {
            println!("{}", render::scoreboard(view));
            println!("This over: {}", render::over_strip(&view.current_over_window));
        }
    }
    Ok(())
}

fn cmd_record(
    config: &CreaseConfig,
    format: OutputFormat,
    runs: u32,
    kind: BallKind,
    is_wicket: bool,
) -> anyhow::Result<()> {
    let mut scorer = open_scorer(config)?;
    let ball = scorer.record_ball(runs, kind, is_wicket);
    ensure_saved(&mut scorer)?;
    let view = scorer.view();
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "ball": ball, "view": view }))?)
        }
        OutputFormat::Text => {
            println!("{} {}", "✓".green().bold(), describe(&ball));
            print_board(&view, format)?;
        }
    }
    Ok(())
}

fn describe(ball: &BallEvent) -> String {
    let what = match (ball.kind, ball.is_wicket) {
        (_, true) => "Wicket".red().bold().to_string(),
        (BallKind::Legal, false) => format!("{} run(s)", ball.runs),
        (kind, false) => format!("{} +{}", kind, ball.total_runs()),
    };
    format!("{what} [{}]", ball.id.short_id().dimmed())
}

fn cmd_undo(config: &CreaseConfig, format: OutputFormat) -> anyhow::Result<()> {
    let mut scorer = open_scorer(config)?;
    let undone = scorer.undo();
    ensure_saved(&mut scorer)?;
    match format {
        OutputFormat::Json => {
            let view = scorer.view();
            println!("{}", serde_json::to_string_pretty(&json!({ "undone": undone, "view": view }))?);
        }
        OutputFormat::Text => {
            match &undone {
                Some(ball) => println!("Removed {}", describe(ball)),
                None => println!("Nothing to undo."),
            }
            print_board(&scorer.view(), format)?;
        }
    }
    Ok(())
}

fn cmd_reset(config: &CreaseConfig, format: OutputFormat, args: ResetArgs) -> anyhow::Result<()> {
    if !args.yes {
        anyhow::bail!("reset clears the whole innings and cannot be undone; pass --yes to confirm");
    }
    let mut scorer = open_scorer(config)?;
    let cleared = scorer.reset();
    ensure_saved(&mut scorer)?;
    match format {
        OutputFormat::Json => println!("{}", json!({ "cleared": cleared })),
        OutputFormat::Text => println!("{} Innings reset ({cleared} balls cleared).", "✓".green().bold()),
    }
    Ok(())
}

fn cmd_status(config: &CreaseConfig, format: OutputFormat) -> anyhow::Result<()> {
    let scorer = open_scorer(config)?;
    let view = scorer.view();
    print_board(&view, format)?;
    if format == OutputFormat::Text {
        println!("{}", render::tally_line(&view).dimmed());
    }
    Ok(())
}

fn cmd_history(config: &CreaseConfig, format: OutputFormat, args: HistoryArgs) -> anyhow::Result<()> {
    let scorer = open_scorer(config)?;
    let view = scorer.view();
    let skip = args
        .limit
        .map_or(0, |n| view.over_groups.len().saturating_sub(n));
    let groups = &view.over_groups[skip..];
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(groups)?),
        OutputFormat::Text if groups.is_empty() => println!("No balls recorded yet..."),
        OutputFormat::Text => {
            for row in render::history(groups) {
                println!("{row}");
            }
        }
    }
    Ok(())
}

fn cmd_over(config: &CreaseConfig, format: OutputFormat) -> anyhow::Result<()> {
    let scorer = open_scorer(config)?;
    let view = scorer.view();
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&view.current_over_window)?)
        }
        OutputFormat::Text => println!("{}", render::over_strip(&view.current_over_window)),
    }
    Ok(())
}

async fn cmd_insight(config: &CreaseConfig, format: OutputFormat) -> anyhow::Result<()> {
    let scorer = open_scorer(config)?;
    let analyst = build_analyst(&config.insight);
    let outcome = analyst.request(scorer.snapshot()).await;
    match (outcome, format) {
        (InsightOutcome::NotEnoughBalls { have, need }, OutputFormat::Json) => {
            println!("{}", json!({ "insight": null, "have": have, "need": need }))
        }
        (InsightOutcome::NotEnoughBalls { have, need }, OutputFormat::Text) => {
            println!("Need at least {need} balls for an insight ({have} recorded).")
        }
        (InsightOutcome::Ready(insight), OutputFormat::Json) => println!(
            "{}",
            json!({
                "insight": insight.text,
                "source": format!("{:?}", insight.source).to_lowercase(),
                "revision": insight.revision,
            })
        ),
        (InsightOutcome::Ready(insight), OutputFormat::Text) => {
            println!("{} \"{}\"", "Insight:".cyan().bold(), insight.text.italic())
        }
    }
    Ok(())
}

fn cmd_export(config: &CreaseConfig, args: ExportArgs) -> anyhow::Result<()> {
    let scorer = open_scorer(config)?;
    let record = InningsRecord::new(scorer.events().to_vec());
    let rendered = serde_json::to_string_pretty(&record)?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("{} Exported {} balls to {}", "✓".green().bold(), scorer.len(), path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn cmd_verify(config: &CreaseConfig, format: OutputFormat) -> anyhow::Result<()> {
    let scorer = open_scorer(config)?;
    let report = LedgerValidator::validate(scorer.events());
    let unwind = scorer.verify();

    match format {
        OutputFormat::Json => println!(
            "{}",
            json!({
                "balls": report.ball_count,
                "ids_unique": report.ids_unique,
                "timestamps_monotonic": report.timestamps_monotonic,
                "undo_consistent": unwind.is_ok(),
                "violations": report
                    .violations
                    .iter()
                    .map(|v| json!({ "index": v.index, "kind": format!("{:?}", v.kind), "description": v.description }))
                    .collect::<Vec<_>>(),
            })
        ),
        OutputFormat::Text => {
            for v in &report.violations {
                println!("  {} ball {}: {}", "!".yellow().bold(), v.index, v.description);
            }
            let mark = |ok: bool| if ok { "yes".green() } else { "no".red() };
            println!("Balls: {}", report.ball_count.to_string().bold());
            println!("  Ids unique: {}", mark(report.ids_unique));
            println!("  Timestamps in order: {}", mark(report.timestamps_monotonic));
            println!("  Undo unwinds to replay: {}", mark(unwind.is_ok()));
        }
    }

    unwind?;
    if let Some(e) = report.first_error() {
        return Err(e.into());
    }
    if format == OutputFormat::Text {
        println!("{} Innings verified.", "✓".green().bold());
    }
    Ok(())
}

async fn cmd_score(config: &CreaseConfig) -> anyhow::Result<()> {
    let scorer = open_scorer(config)?;
    let analyst = build_analyst(&config.insight);
    let session = ScoringSession::new(scorer, analyst, config.session.reset_window());
    repl::run(session).await
}
