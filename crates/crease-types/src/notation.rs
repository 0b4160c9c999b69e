//! Short textual renderings of a ball.
//!
//! Three notations exist because three consumers read them: the over-by-over
//! history, the compact "this over" strip, and the prompt sent to the
//! insight generator.

use crate::ball::{BallEvent, BallKind};

/// Display classification of a ball, in precedence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BallTone {
    Wicket,
    Boundary,
    Extra,
    Plain,
}

impl BallTone {
    pub fn of(ball: &BallEvent) -> Self {
        if ball.is_wicket {
            Self::Wicket
        } else if ball.is_boundary() {
            Self::Boundary
        } else if ball.kind.is_extra() {
            Self::Extra
        } else {
            Self::Plain
        }
    }
}

impl BallEvent {
    /// History notation: `W`, `Wd`, `Wd+2`, `Nb+1`, `•` for a dot, else runs.
    pub fn history_notation(&self) -> String {
        if self.is_wicket {
            return "W".into();
        }
        match self.kind {
            BallKind::Wide => with_extra_runs("Wd", self.runs),
            BallKind::NoBall => with_extra_runs("Nb", self.runs),
            BallKind::Legal if self.runs == 0 => "•".into(),
            BallKind::Legal => self.runs.to_string(),
        }
    }

    /// Strip notation: `W`, `wd`, `nb`, else runs (dots shown as `0`).
    pub fn strip_notation(&self) -> String {
        if self.is_wicket {
            return "W".into();
        }
        match self.kind {
            BallKind::Wide => "wd".into(),
            BallKind::NoBall => "nb".into(),
            BallKind::Legal => self.runs.to_string(),
        }
    }

    /// Prompt notation: runs for legal balls, the kind label for extras,
    /// suffixed with `(W)` when a wicket fell.
    pub fn insight_notation(&self) -> String {
        let base = match self.kind {
            BallKind::Legal => self.runs.to_string(),
            kind => kind.label().to_string(),
        };
        if self.is_wicket {
            format!("{base}(W)")
        } else {
            base
        }
    }
}

fn with_extra_runs(prefix: &str, runs: u32) -> String {
    if runs > 0 {
        format!("{prefix}+{runs}")
    } else {
        prefix.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_notation_covers_every_shape() {
        assert_eq!(BallEvent::legal(0).history_notation(), "•");
        assert_eq!(BallEvent::legal(3).history_notation(), "3");
        assert_eq!(BallEvent::wide(0).history_notation(), "Wd");
        assert_eq!(BallEvent::wide(2).history_notation(), "Wd+2");
        assert_eq!(BallEvent::no_ball(1).history_notation(), "Nb+1");
        assert_eq!(BallEvent::wicket().history_notation(), "W");
    }

    #[test]
    fn strip_notation_shows_dots_as_zero() {
        assert_eq!(BallEvent::legal(0).strip_notation(), "0");
        assert_eq!(BallEvent::legal(6).strip_notation(), "6");
        assert_eq!(BallEvent::wide(3).strip_notation(), "wd");
        assert_eq!(BallEvent::no_ball(0).strip_notation(), "nb");
    }

    #[test]
    fn insight_notation_marks_wickets_on_any_kind() {
        assert_eq!(BallEvent::legal(4).insight_notation(), "4");
        assert_eq!(BallEvent::wicket().insight_notation(), "0(W)");
        assert_eq!(BallEvent::wide(0).insight_notation(), "WIDE");
        let nb_wicket = BallEvent::new(0, BallKind::NoBall, true);
        assert_eq!(nb_wicket.insight_notation(), "NO_BALL(W)");
    }

    #[test]
    fn tone_precedence() {
        let wicket_on_boundary = BallEvent::new(4, BallKind::Legal, true);
        assert_eq!(BallTone::of(&wicket_on_boundary), BallTone::Wicket);
        let wide_four = BallEvent::wide(4);
        assert_eq!(BallTone::of(&wide_four), BallTone::Boundary);
        assert_eq!(BallTone::of(&BallEvent::no_ball(1)), BallTone::Extra);
        assert_eq!(BallTone::of(&BallEvent::legal(2)), BallTone::Plain);
    }
}
