//! Fungible item ledger for Grimpath.
//!
//! Tracks Gold, Key, and Treasure balances per account under a closed
//! economy: the full supply of each asset exists from the moment the ledger
//! is created, held in the controller's reserve. Balances only move between
//! the reserve and player accounts via [`ItemLedger::mint`] and
//! [`ItemLedger::burn`], both restricted to the registered controller.

/// Account identifiers for players and the controller.
pub mod account;
/// Asset kinds and amount bundles.
pub mod asset;
/// Error types for ledger operations.
pub mod error;
/// The balance table itself.
pub mod ledger;

pub use account::AccountId;
pub use asset::{AssetKind, ItemBundle};
pub use error::{LedgerError, LedgerResult};
pub use ledger::ItemLedger;
