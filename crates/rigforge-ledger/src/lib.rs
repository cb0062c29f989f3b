//! # RigForge Ledger
//!
//! The in-memory inventory ledger: the single owner of all shop state and
//! the only place it mutates.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          rigforge-ledger                                │
//! │                                                                         │
//! │   ┌──────────────┐    ┌───────────────────────────────────────────┐     │
//! │   │ state        │    │ ledger                                    │     │
//! │   │ Arc<Mutex<>> │───►│ products / serials / customers / builds   │     │
//! │   │ handle       │    │ + notification feed                       │     │
//! │   └──────────────┘    └───────────────┬───────────────────────────┘     │
//! │                                       │                                 │
//! │                       ┌───────────────┴───────────────┐                 │
//! │                       ▼                               ▼                 │
//! │              ┌─────────────────┐             ┌─────────────────┐        │
//! │              │ snapshot        │             │ build           │        │
//! │              │ point-in-time   │◄────────────│ assemble():     │        │
//! │              │ collections     │  snapshot   │ snapshot ──►    │        │
//! │              └─────────────────┘  in / out   │ snapshot        │        │
//! │                                              └─────────────────┘        │
//! │                       ┌─────────────────┐                               │
//! │                       │ notify          │                               │
//! │                       │ one feed for    │                               │
//! │                       │ all feedback    │                               │
//! │                       └─────────────────┘                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Core Guarantees
//! - **Single owner**: all four collections live in one [`Ledger`]; no
//!   consumer holds live references across operations
//! - **Reject whole**: every operation validates completely before its
//!   first write, so `Err` always means state unchanged
//! - **Atomic assembly**: `build_pc` computes a full replacement snapshot
//!   and swaps it in; intermediate states are never observable
//! - **Derived quantity**: a serialized product's quantity always equals
//!   its registered serial count, maintained by the serial operations

pub mod build;
pub mod ledger;
pub mod notify;
pub mod snapshot;
pub mod state;

pub use build::{assemble, BuildReceipt, BuildRequest, ComponentSelection};
pub use ledger::Ledger;
pub use notify::{Notification, NotificationFeed, Severity};
pub use snapshot::LedgerSnapshot;
pub use state::LedgerState;
