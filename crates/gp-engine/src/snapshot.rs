//! Durable snapshots of the engine's mutable state.
//!
//! A snapshot carries every player session and the ledger — everything that
//! must survive a process restart. The path graph is static data and is
//! supplied again on restore. The encoding is JSON, written and read
//! through any `io` stream.

use std::collections::HashMap;
use std::io::{Read, Write};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gp_ledger::{AccountId, ItemLedger};

use crate::session::Session;

/// The durable state of a [`crate::GameEngine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the snapshot was captured.
    pub saved_at: DateTime<Utc>,
    /// Every player session, keyed by account.
    pub sessions: HashMap<AccountId, Session>,
    /// The full balance table, reserve included.
    pub ledger: ItemLedger,
}

impl Snapshot {
    /// Capture a snapshot of the given state, stamped with the current time.
    pub fn capture(sessions: HashMap<AccountId, Session>, ledger: ItemLedger) -> Self {
        Self {
            saved_at: Utc::now(),
            sessions,
            ledger,
        }
    }

    /// Serialize to a writer as pretty-printed JSON.
    pub fn write_to<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, self)
    }

    /// Deserialize from a reader.
    pub fn read_from<R: Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }
}
