use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::asset::{AssetKind, ItemBundle};
use crate::error::{LedgerError, LedgerResult};

/// Fixed total supply of gold.
pub const GOLD_SUPPLY: u64 = 1_000_000;
/// Fixed total supply of keys.
pub const KEY_SUPPLY: u64 = 1_000;
/// Fixed total supply of treasures.
pub const TREASURE_SUPPLY: u64 = 1_000;

/// The fungible balance table. Owns every account's Gold, Key, and Treasure
/// balances plus the controller reserve.
///
/// The economy is closed: for each asset kind, the sum of all account
/// balances plus the reserve always equals the fixed total supply. Balances
/// move only via [`ItemLedger::mint`] (reserve to account) and
/// [`ItemLedger::burn`] (account to reserve), and only when called by the
/// controller registered at construction.
///
/// Exclusive mutation is structural: the ledger is an owned value mutated
/// through `&mut self`, so mint/burn on the same owner/asset pair cannot
/// interleave.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemLedger {
    controller: AccountId,
    reserve: [u64; 3],
    accounts: HashMap<AccountId, [u64; 3]>,
}

impl ItemLedger {
    /// Create a ledger with the full supply of every asset in the reserve.
    ///
    /// The controller identity is fixed here and immutable thereafter.
    pub fn new(controller: AccountId) -> Self {
        Self {
            controller,
            reserve: [GOLD_SUPPLY, KEY_SUPPLY, TREASURE_SUPPLY],
            accounts: HashMap::new(),
        }
    }

    /// The registered controller.
    pub fn controller(&self) -> AccountId {
        self.controller
    }

    /// The owner's balance of an asset kind. Zero for unknown accounts.
    pub fn balance_of(&self, owner: AccountId, kind: AssetKind) -> u64 {
        self.accounts
            .get(&owner)
            .map(|b| b[kind.index()])
            .unwrap_or(0)
    }

    /// The controller reserve of an asset kind.
    pub fn reserve(&self, kind: AssetKind) -> u64 {
        self.reserve[kind.index()]
    }

    /// The fixed total supply of an asset kind.
    pub fn total_supply(&self, kind: AssetKind) -> u64 {
        match kind {
            AssetKind::Gold => GOLD_SUPPLY,
            AssetKind::Key => KEY_SUPPLY,
            AssetKind::Treasure => TREASURE_SUPPLY,
        }
    }

    /// Move `amount` of `kind` from the reserve to `owner`.
    ///
    /// Fails with [`LedgerError::Unauthorized`] unless `caller` is the
    /// controller, and with [`LedgerError::InsufficientReserve`] if the
    /// reserve cannot cover the amount. A zero amount is a valid no-op.
    pub fn mint(
        &mut self,
        caller: AccountId,
        owner: AccountId,
        kind: AssetKind,
        amount: u64,
    ) -> LedgerResult<()> {
        self.authorize(caller)?;
        let available = self.reserve[kind.index()];
        if amount > available {
            return Err(LedgerError::InsufficientReserve {
                kind,
                requested: amount,
                available,
            });
        }
        self.reserve[kind.index()] -= amount;
        self.accounts.entry(owner).or_default()[kind.index()] += amount;
        Ok(())
    }

    /// Mint an entire bundle to `owner`, all-or-nothing.
    ///
    /// Every reserve is checked before anything moves, so a failure leaves
    /// the ledger untouched.
    pub fn mint_bundle(
        &mut self,
        caller: AccountId,
        owner: AccountId,
        bundle: &ItemBundle,
    ) -> LedgerResult<()> {
        self.authorize(caller)?;
        for kind in AssetKind::ALL {
            let requested = bundle.amount(kind);
            let available = self.reserve[kind.index()];
            if requested > available {
                return Err(LedgerError::InsufficientReserve {
                    kind,
                    requested,
                    available,
                });
            }
        }
        for kind in AssetKind::ALL {
            let amount = bundle.amount(kind);
            self.reserve[kind.index()] -= amount;
            self.accounts.entry(owner).or_default()[kind.index()] += amount;
        }
        Ok(())
    }

    /// Move `amount` of `kind` from `owner` back to the reserve.
    ///
    /// Fails with [`LedgerError::Unauthorized`] unless `caller` is the
    /// controller, and with [`LedgerError::InsufficientBalance`] if `owner`
    /// holds less than `amount`.
    pub fn burn(
        &mut self,
        caller: AccountId,
        owner: AccountId,
        kind: AssetKind,
        amount: u64,
    ) -> LedgerResult<()> {
        self.authorize(caller)?;
        let available = self.balance_of(owner, kind);
        if amount > available {
            return Err(LedgerError::InsufficientBalance {
                kind,
                requested: amount,
                available,
            });
        }
        if let Some(balances) = self.accounts.get_mut(&owner) {
            balances[kind.index()] -= amount;
        }
        self.reserve[kind.index()] += amount;
        Ok(())
    }

    /// Sum of all account balances of `kind`, excluding the reserve.
    pub fn circulating(&self, kind: AssetKind) -> u64 {
        self.accounts.values().map(|b| b[kind.index()]).sum()
    }

    fn authorize(&self, caller: AccountId) -> LedgerResult<()> {
        if caller != self.controller {
            return Err(LedgerError::Unauthorized);
        }
        Ok(())
    }
}
