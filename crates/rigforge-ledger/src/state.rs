//! # Shared Ledger Handle
//!
//! `LedgerState` wraps the ledger in `Arc<Mutex<..>>` for hand-out to
//! concurrent consumers (command handlers, background tasks). One mutex
//! over the whole ledger: every operation is already a short, purely
//! in-memory critical section, so finer-grained locking buys nothing and
//! would reopen the multi-collection races the single owner exists to
//! prevent.

use std::sync::{Arc, Mutex};

use crate::ledger::Ledger;
use crate::snapshot::LedgerSnapshot;

/// Cloneable handle to the process-wide ledger.
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    inner: Arc<Mutex<Ledger>>,
}

impl LedgerState {
    /// Creates a handle over an empty ledger.
    pub fn new() -> Self {
        LedgerState::default()
    }

    /// Creates a handle over existing collections.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        LedgerState {
            inner: Arc::new(Mutex::new(Ledger::from_snapshot(snapshot))),
        }
    }

    /// Runs a read-only closure against the ledger.
    pub fn with_ledger<T>(&self, f: impl FnOnce(&Ledger) -> T) -> T {
        let ledger = self.inner.lock().expect("Ledger mutex poisoned");
        f(&ledger)
    }

    /// Runs a mutating closure against the ledger. The lock spans the whole
    /// closure, so multi-step operations observe and produce consistent
    /// state.
    pub fn with_ledger_mut<T>(&self, f: impl FnOnce(&mut Ledger) -> T) -> T {
        let mut ledger = self.inner.lock().expect("Ledger mutex poisoned");
        f(&mut ledger)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
