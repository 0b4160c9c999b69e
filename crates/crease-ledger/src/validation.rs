use std::collections::HashSet;

use crease_types::BallEvent;

use crate::error::LedgerError;

/// Result of ledger validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub ball_count: usize,
    pub ids_unique: bool,
    pub timestamps_monotonic: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// First violation that affects display identity, as an error.
    ///
    /// Timestamp regressions are advisory and never reported here.
    pub fn first_error(&self) -> Option<LedgerError> {
        self.violations
            .iter()
            .find(|v| v.kind != ViolationKind::TimestampRegression)
            .map(|v| LedgerError::IntegrityViolation {
                index: v.index,
                reason: v.description.clone(),
            })
    }
}

/// A specific problem detected during validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub index: usize,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    EmptyId,
    DuplicateId,
    TimestampRegression,
}

/// Consistency checks for a restored ledger.
///
/// Bowling order is sequence position, so none of these findings make a
/// ledger unusable; callers log them and carry on.
pub struct LedgerValidator;

impl LedgerValidator {
    pub fn validate(events: &[BallEvent]) -> ValidationReport {
        let mut violations = Vec::new();
        let mut ids_unique = true;
        let mut timestamps_monotonic = true;
        let mut seen = HashSet::new();

        for (index, event) in events.iter().enumerate() {
            if event.id.as_str().is_empty() {
                violations.push(Violation {
                    index,
                    kind: ViolationKind::EmptyId,
                    description: "ball has an empty id".into(),
                });
            } else if !seen.insert(event.id.as_str()) {
                ids_unique = false;
                violations.push(Violation {
                    index,
                    kind: ViolationKind::DuplicateId,
                    description: format!("id {} already used earlier in the ledger", event.id),
                });
            }

            if index > 0 && event.recorded_at < events[index - 1].recorded_at {
                timestamps_monotonic = false;
                violations.push(Violation {
                    index,
                    kind: ViolationKind::TimestampRegression,
                    description: format!(
                        "recorded at {} but previous ball recorded at {}",
                        event.recorded_at.as_millis(),
                        events[index - 1].recorded_at.as_millis()
                    ),
                });
            }
        }

        ValidationReport {
            ball_count: events.len(),
            ids_unique,
            timestamps_monotonic,
            violations,
        }
    }
}
