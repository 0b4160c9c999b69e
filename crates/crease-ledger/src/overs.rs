use std::fmt;

use crease_types::BallEvent;
use serde::Serialize;

/// Legal deliveries per over. Fixed for the lifetime of the system.
pub const BALLS_PER_OVER: u32 = 6;

/// Progress through the innings measured in legal balls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OverProgress {
    pub completed_overs: u32,
    pub balls_into_current_over: u32,
}

impl OverProgress {
    pub fn from_legal_balls(legal_balls: u32) -> Self {
        Self {
            completed_overs: legal_balls / BALLS_PER_OVER,
            balls_into_current_over: legal_balls % BALLS_PER_OVER,
        }
    }

    /// Overs including the fractional progress into the current one.
    pub fn as_decimal(&self) -> f64 {
        f64::from(self.completed_overs)
            + f64::from(self.balls_into_current_over) / f64::from(BALLS_PER_OVER)
    }
}

/// Renders as `"<completed>.<balls>"`, e.g. `2.0` or `1.1`.
impl fmt::Display for OverProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.completed_overs, self.balls_into_current_over)
    }
}

/// One over of the innings history: six legal balls plus any extras.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OverGroup {
    /// 1-based over number.
    pub number: usize,
    pub balls: Vec<BallEvent>,
}

impl OverGroup {
    pub fn legal_balls(&self) -> u32 {
        self.balls.iter().filter(|b| b.is_legal()).count() as u32
    }

    pub fn is_complete(&self) -> bool {
        self.legal_balls() >= BALLS_PER_OVER
    }

    pub fn runs(&self) -> u32 {
        self.balls
            .iter()
            .map(BallEvent::total_runs)
            .fold(0, u32::saturating_add)
    }

    pub fn wickets(&self) -> u32 {
        self.balls.iter().filter(|b| b.is_wicket).count() as u32
    }

    /// `"Over N"`, or `"Current Over"` while the over is still open.
    pub fn label(&self) -> String {
        if self.is_complete() {
            format!("Over {}", self.number)
        } else {
            "Current Over".into()
        }
    }

    /// Legal-ball progress, e.g. `"4/6 Legal"`.
    pub fn progress_label(&self) -> String {
        format!("{}/{} Legal", self.legal_balls(), BALLS_PER_OVER)
    }
}

/// Partition the ledger into overs for history display.
///
/// A group is sealed once it holds [`BALLS_PER_OVER`] legal balls; extras
/// join the open group without counting toward the seal, so an over may
/// hold more than six deliveries. A non-empty trailing group is emitted as
/// the in-progress over. An empty ledger yields no groups.
pub fn partition_overs(events: &[BallEvent]) -> Vec<OverGroup> {
    let mut groups = Vec::new();
    let mut current = Vec::new();
    let mut legal_in_group = 0;

    for event in events {
        current.push(event.clone());
        if event.is_legal() {
            legal_in_group += 1;
            if legal_in_group == BALLS_PER_OVER {
                groups.push(OverGroup {
                    number: groups.len() + 1,
                    balls: std::mem::take(&mut current),
                });
                legal_in_group = 0;
            }
        }
    }

    if !current.is_empty() {
        groups.push(OverGroup {
            number: groups.len() + 1,
            balls: current,
        });
    }

    groups
}

/// The balls shown in the compact "this over" strip, in bowling order.
///
/// Walks back from the end until it has collected as many legal balls as
/// have been bowled in the current over. When the current over has none
/// yet, the just-completed over is shown instead of an empty strip.
pub fn current_over_window(events: &[BallEvent]) -> Vec<BallEvent> {
    let legal_balls = events.iter().filter(|b| b.is_legal()).count() as u32;
    let progress = OverProgress::from_legal_balls(legal_balls);
    let target = match progress.balls_into_current_over {
        0 if events.is_empty() => return Vec::new(),
        0 => BALLS_PER_OVER,
        n => n,
    };

    let mut window = Vec::new();
    let mut legal_seen = 0;
    for event in events.iter().rev() {
        if legal_seen == target {
            break;
        }
        if event.is_legal() {
            legal_seen += 1;
        }
        window.push(event.clone());
    }
    window.reverse();
    window
}

/// Empty slots left in the strip for legal balls not yet bowled.
pub fn remaining_placeholders(window: &[BallEvent]) -> u32 {
    let legal = window.iter().filter(|b| b.is_legal()).count() as u32;
    BALLS_PER_OVER.saturating_sub(legal)
}
