use crate::asset::AssetKind;

/// Alias for `Result<T, LedgerError>`.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors that can occur when mutating the ledger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// A caller other than the registered controller attempted to mint or burn.
    #[error("caller is not the ledger controller")]
    Unauthorized,

    /// Minting would leave the controller reserve negative.
    #[error("insufficient {kind} reserve: requested {requested}, available {available}")]
    InsufficientReserve {
        /// The asset kind being minted.
        kind: AssetKind,
        /// The amount requested.
        requested: u64,
        /// The reserve remaining.
        available: u64,
    },

    /// Burning more than the owner's balance.
    #[error("insufficient {kind} balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// The asset kind being burned.
        kind: AssetKind,
        /// The amount requested.
        requested: u64,
        /// The owner's balance.
        available: u64,
    },
}
