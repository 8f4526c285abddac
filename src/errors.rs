use thiserror::Error;

/// Why a ledger action was refused or failed.
///
/// `InvalidAmount` and `InvalidCategory` are rejections: nothing was changed
/// and the caller should point the user back at the offending input.
/// `Storage` is a real failure of the underlying store.
#[derive(Debug, Error)]
pub(crate) enum LedgerError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl LedgerError {
    pub(crate) fn is_rejection(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}
