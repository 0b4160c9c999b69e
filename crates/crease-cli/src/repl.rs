//! Interactive scoring from stdin, one action per line.

use std::str::FromStr;

use colored::Colorize;
use crease_insight::SlotUpdate;
use crease_session::{
    HapticFeedback, InsightRequestState, ResetPress, ScoringSession, SessionEvent,
};
use crease_store::FileStateStore;
use crease_types::BallKind;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

type CliSession = ScoringSession<FileStateStore, Box<dyn HapticFeedback>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Ball { runs: u32, kind: BallKind, is_wicket: bool },
    Undo,
    Reset,
    Insight,
    Status,
    History,
    Help,
    Quit,
}

const HELP: &str = "\
  0-6         legal ball with that many runs
  w           wicket
  wd [n]      wide, plus n runs taken
  nb [n]      no-ball, plus n runs taken
  u           undo last ball
  r           reset (press twice to confirm)
  i           tactical insight
  h           over-by-over history
  s           scoreboard
  q           quit";

fn parse_action(line: &str) -> Result<Action, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Action::Status);
    };
    let extra_runs = |word: Option<&str>| -> Result<u32, String> {
        word.map_or(Ok(0), |w| w.parse().map_err(|_| format!("not a run count: {w}")))
    };

    let action = match head.to_ascii_lowercase().as_str() {
        "w" | "wicket" => Action::Ball {
            runs: 0,
            kind: BallKind::Legal,
            is_wicket: true,
        },
        "u" | "undo" => Action::Undo,
        "r" | "reset" => Action::Reset,
        "i" | "insight" => Action::Insight,
        "s" | "status" => Action::Status,
        "h" | "history" => Action::History,
        "?" | "help" => Action::Help,
        "q" | "quit" | "exit" => Action::Quit,
        word => {
            if let Ok(runs) = word.parse::<u32>() {
                Action::Ball {
                    runs,
                    kind: BallKind::Legal,
                    is_wicket: false,
                }
            } else if let Ok(kind) = BallKind::from_str(word) {
                Action::Ball {
                    runs: extra_runs(words.next())?,
                    kind,
                    is_wicket: false,
                }
            } else {
                return Err(format!("unknown input {head:?}; type ? for help"));
            }
        }
    };
    Ok(action)
}

fn print_board(session: &CliSession) {
    let view = session.view();
    println!("{}", render::scoreboard(&view));
    println!("This over: {}", render::over_strip(&view.current_over_window));
}

fn apply(session: &mut CliSession, action: Action) {
    match action {
        Action::Ball {
            runs,
            kind,
            is_wicket,
        } => {
            session.record_ball(runs, kind, is_wicket);
            print_board(session);
        }
        Action::Undo => {
            if session.undo().is_none() {
                println!("Nothing to undo.");
            }
            print_board(session);
        }
        Action::Reset => match session.press_reset() {
            ResetPress::Armed { window } => println!(
                "{} press r again within {}s to clear the innings",
                "CONFIRM?".red().bold(),
                window.as_secs_f32()
            ),
            ResetPress::Cleared { balls } => {
                println!("{} Innings reset ({balls} balls cleared).", "✓".green().bold());
                print_board(session);
            }
        },
        Action::Insight => request_insight(session),
        Action::Status => {
            print_board(session);
            println!("{}", render::tally_line(&session.view()).dimmed());
        }
        Action::History => {
            let view = session.view();
            if view.over_groups.is_empty() {
                println!("No balls recorded yet...");
            }
            for row in render::history(&view.over_groups) {
                println!("{row}");
            }
        }
        Action::Help => println!("{HELP}"),
        Action::Quit => {}
    }
}

fn request_insight(session: &mut CliSession) {
    if !session.is_insight_visible() {
        println!(
            "Insights unlock after {} balls.",
            session.analyst().config().visible_from
        );
        return;
    }
    match session.request_insight() {
        InsightRequestState::Started { .. } => println!("{}", "ANALYZING...".dimmed()),
        InsightRequestState::AlreadyRunning => println!("Still analyzing..."),
        InsightRequestState::NotEnoughBalls { need, .. } => {
            println!("Need at least {need} balls for an insight.")
        }
    }
}

fn report(session: &CliSession, event: SessionEvent) {
    match event {
        SessionEvent::ResetDisarmed => println!("{}", "Reset cancelled.".dimmed()),
        SessionEvent::Insight(SlotUpdate::Shown) => {
            if let Some(text) = session.slot().text() {
                println!("{} \"{}\"", "Insight:".cyan().bold(), text.italic());
            }
        }
        SessionEvent::Insight(SlotUpdate::DiscardedStale { .. }) => {
            println!("{}", "Insight dropped: the innings moved on.".dimmed())
        }
        SessionEvent::InsightAborted => {}
    }
}

pub async fn run(mut session: CliSession) -> anyhow::Result<()> {
    println!("{HELP}\n");
    print_board(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_action(&line) {
                    Ok(Action::Quit) => break,
                    Ok(action) => apply(&mut session, action),
                    Err(msg) => println!("{msg}"),
                }
            }
            event = session.next_event() => report(&session, event),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_are_legal_runs() {
        assert_eq!(
            parse_action("4").unwrap(),
            Action::Ball {
                runs: 4,
                kind: BallKind::Legal,
                is_wicket: false
            }
        );
    }

    #[test]
    fn extras_take_optional_runs() {
        assert_eq!(
            parse_action("wd").unwrap(),
            Action::Ball {
                runs: 0,
                kind: BallKind::Wide,
                is_wicket: false
            }
        );
        assert_eq!(
            parse_action("nb 2").unwrap(),
            Action::Ball {
                runs: 2,
                kind: BallKind::NoBall,
                is_wicket: false
            }
        );
        assert!(parse_action("nb two").is_err());
    }

    #[test]
    fn wicket_is_a_legal_dot() {
        assert_eq!(
            parse_action("W").unwrap(),
            Action::Ball {
                runs: 0,
                kind: BallKind::Legal,
                is_wicket: true
            }
        );
    }

    #[test]
    fn commands_and_blank_lines() {
        assert_eq!(parse_action("u").unwrap(), Action::Undo);
        assert_eq!(parse_action("reset").unwrap(), Action::Reset);
        assert_eq!(parse_action("  ").unwrap(), Action::Status);
        assert_eq!(parse_action("q").unwrap(), Action::Quit);
        assert!(parse_action("boundary").is_err());
    }
}
