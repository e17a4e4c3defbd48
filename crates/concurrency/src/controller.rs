//! Transaction state machine
//!
//! ```text
//!          begin()
//!   Idle ──────────▶ Active
//!    ▲                 │
//!    └─────────────────┘
//!    commit() / rollback()
//! ```
//!
//! The controller owns only the state. The backend is borrowed per call so
//! the owning store can hand the same backend to its other components.
//!
//! # State conflicts
//!
//! - `begin` while Active fails with [`Error::TransactionAlreadyActive`]
//! - `commit`/`rollback` while Idle fail with [`Error::TransactionNotActive`]
//!
//! Neither reaches the backend and neither changes the state.
//!
//! # Failure outcomes
//!
//! - A failed `begin` leaves the controller Idle.
//! - A failed `commit` or `rollback` still ends the transaction: the
//!   controller is Idle afterwards and the backend has discarded whatever it
//!   could not apply. Whether a failed commit's writes survive a reopen is
//!   up to the backend (see its documentation).

use tessera_core::{Error, Result, StorageBackend};
use tracing::{debug, warn};

/// Transaction state of one store handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionState {
    /// No transaction open; mutations autocommit
    #[default]
    Idle,
    /// A transaction is open; mutations are buffered until commit
    Active,
}

/// Counters for the lifetime of one controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionStats {
    /// Transactions successfully begun
    pub begun: u64,
    /// Transactions successfully committed
    pub committed: u64,
    /// Transactions rolled back (explicitly or on close)
    pub rolled_back: u64,
    /// Commits the backend failed to apply
    pub failed_commits: u64,
}

/// Idle/Active state machine wrapping a backend's transaction hooks
#[derive(Debug, Default)]
pub struct TransactionController {
    state: TransactionState,
    stats: TransactionStats,
}

impl TransactionController {
    /// Create a controller in the Idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// True while a transaction is open.
    pub fn is_active(&self) -> bool {
        self.state == TransactionState::Active
    }

    /// Lifetime counters.
    pub fn stats(&self) -> TransactionStats {
        self.stats
    }

    /// Open a transaction.
    pub fn begin<B: StorageBackend + ?Sized>(&mut self, backend: &mut B) -> Result<()> {
        if self.is_active() {
            return Err(Error::TransactionAlreadyActive);
        }

        if let Err(code) = backend.begin() {
            warn!(target: "tessera::txn", status = %code, "Begin failed");
            return Err(Error::from_status(code));
        }

        self.state = TransactionState::Active;
        self.stats.begun += 1;
        debug!(target: "tessera::txn", txn = self.stats.begun, "Transaction started");
        Ok(())
    }

    /// Durably apply the open transaction.
    pub fn commit<B: StorageBackend + ?Sized>(&mut self, backend: &mut B) -> Result<()> {
        if !self.is_active() {
            return Err(Error::TransactionNotActive);
        }

        let outcome = backend.commit();
        self.state = TransactionState::Idle;

        match outcome {
            Ok(()) => {
                self.stats.committed += 1;
                debug!(target: "tessera::txn", txn = self.stats.begun, "Transaction committed");
                Ok(())
            }
            Err(code) => {
                self.stats.failed_commits += 1;
                warn!(
                    target: "tessera::txn",
                    txn = self.stats.begun,
                    status = %code,
                    "Commit failed, transaction ended"
                );
                Err(Error::from_status(code))
            }
        }
    }

    /// Discard the open transaction.
    pub fn rollback<B: StorageBackend + ?Sized>(&mut self, backend: &mut B) -> Result<()> {
        if !self.is_active() {
            return Err(Error::TransactionNotActive);
        }

        let outcome = backend.rollback();
        self.state = TransactionState::Idle;
        self.stats.rolled_back += 1;

        match outcome {
            Ok(()) => {
                debug!(target: "tessera::txn", txn = self.stats.begun, "Transaction rolled back");
                Ok(())
            }
            Err(code) => {
                warn!(
                    target: "tessera::txn",
                    txn = self.stats.begun,
                    status = %code,
                    "Rollback reported failure, transaction ended"
                );
                Err(Error::from_status(code))
            }
        }
    }

    /// Roll back a transaction left open when the store goes away.
    ///
    /// Returns true if there was one. Failures are logged, not returned,
    /// since this runs on close and drop paths.
    pub fn abandon<B: StorageBackend + ?Sized>(&mut self, backend: &mut B) -> bool {
        if !self.is_active() {
            return false;
        }
        warn!(
            target: "tessera::txn",
            txn = self.stats.begun,
            "Store closed with an open transaction, rolling back"
        );
        // rollback() already logs a failure and always ends the transaction
        let _ = self.rollback(backend);
        true
    }
}
