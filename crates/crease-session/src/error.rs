use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("store error: {0}")]
    Store(#[from] crease_store::StoreError),

    #[error("ledger error: {0}")]
    Ledger(#[from] crease_ledger::LedgerError),
}

pub type SessionResult<T> = Result<T, SessionError>;
