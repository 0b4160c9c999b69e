/// Errors produced by ledger operations.
///
/// Appending, undoing, and clearing never fail. These variants come from
/// the consistency checks layered on top of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("integrity violation at ball {index}: {reason}")]
    IntegrityViolation { index: usize, reason: String },

    #[error("incremental tally diverged from replay: expected {expected}, found {actual}")]
    TallyDivergence { expected: String, actual: String },

    #[error("undoing back to ball {index} gives {actual}, replay gives {expected}")]
    UndoDivergence {
        index: usize,
        expected: String,
        actual: String,
    },
}
