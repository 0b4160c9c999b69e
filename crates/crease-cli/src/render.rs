//! Text rendering of the derived view.

use colored::{ColoredString, Colorize};
use crease_ledger::{remaining_placeholders, DerivedView, OverGroup};
use crease_types::{BallEvent, BallTone};

pub fn scoreboard(view: &DerivedView) -> String {
    format!(
        "{}   Overs {}   CRR {}",
        view.score_line().bold(),
        view.overs_display.cyan(),
        view.run_rate_display().yellow()
    )
}

pub fn tally_line(view: &DerivedView) -> String {
    format!(
        "Extras {}   Boundaries {}   Legal balls {}",
        view.tally.extras, view.tally.boundaries, view.tally.legal_balls
    )
}

fn tint(text: String, tone: BallTone) -> ColoredString {
    match tone {
        BallTone::Wicket => text.red().bold(),
        BallTone::Boundary => text.green().bold(),
        BallTone::Extra => text.blue(),
        BallTone::Plain => text.normal(),
    }
}

/// The "this over" strip: recorded balls followed by one `·` per legal
/// ball still to come.
pub fn over_strip(window: &[BallEvent]) -> String {
    let mut cells: Vec<String> = window
        .iter()
        .map(|b| tint(b.strip_notation(), BallTone::of(b)).to_string())
        .collect();
    cells.extend((0..remaining_placeholders(window)).map(|_| "·".dimmed().to_string()));
    cells.join(" ")
}

pub fn over_group(group: &OverGroup) -> String {
    let balls = group
        .balls
        .iter()
        .map(|b| tint(b.history_notation(), BallTone::of(b)).to_string())
        .collect::<Vec<_>>()
        .join(" ");
    let label = if group.is_complete() {
        group.label().normal()
    } else {
        group.label().green().bold()
    };
    format!(
        "{:<14} {:<10} {}  ({} runs, {} wkts)",
        label,
        group.progress_label().dimmed(),
        balls,
        group.runs(),
        group.wickets()
    )
}

pub fn history(groups: &[OverGroup]) -> Vec<String> {
    groups.iter().map(over_group).collect()
}

#[cfg(test)]
mod tests {
    use crease_ledger::{current_over_window, partition_overs, ProjectionBuilder};
    use crease_types::BallKind;

    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn strip_pads_with_placeholders() {
        plain();
        let events = vec![
            BallEvent::legal(1),
            BallEvent::new(0, BallKind::Wide, false),
            BallEvent::legal(4),
        ];
        let window = current_over_window(&events);
        assert_eq!(over_strip(&window), "1 wd 4 · · · ·");
    }

    #[test]
    fn scoreboard_line() {
        plain();
        let mut events: Vec<BallEvent> = (0..6).map(|_| BallEvent::legal(2)).collect();
        events.push(BallEvent::wicket());
        let view = ProjectionBuilder::derive(&events);
        assert_eq!(scoreboard(&view), "12/1   Overs 1.1   CRR 10.3");
    }

    #[test]
    fn history_rows_use_history_notation() {
        plain();
        let events = vec![
            BallEvent::legal(0),
            BallEvent::new(2, BallKind::NoBall, false),
            BallEvent::wicket(),
        ];
        let rows = history(&partition_overs(&events));
        assert_eq!(rows.len(), 1);
        assert!(rows[0].starts_with("Current Over"));
        assert!(rows[0].contains("• Nb+2 W"));
        assert!(rows[0].contains("2/6 Legal"));
    }
}
