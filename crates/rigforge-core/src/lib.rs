//! # rigforge-core: Pure Domain Logic for RigForge
//!
//! This crate is the **heart** of RigForge. It contains the inventory
//! domain model as pure types and functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        RigForge Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (console app / future web UI)         │   │
//! │  │    Product forms ──► Serial manager ──► PC builder ──► Toasts   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    rigforge-ledger                              │   │
//! │  │    In-memory state owner: CRUD, cascades, build transitions     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rigforge-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ LedgerErr │  │   rules   │  │   │
//! │  │   │  PcBuild  │  │  (cents)  │  │ Validation│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE TYPES AND FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, SerializedItem, Customer, PcBuild)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use rigforge_core::Money` instead of
// `use rigforge_core::money::Money`

pub use error::{LedgerError, LedgerResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum SKU length in characters.
pub const MAX_SKU_LEN: usize = 50;

/// Maximum product / build / customer name length in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum serial number length in characters.
///
/// ## Business Reason
/// Longest real-world serials (motherboards, prebuilt chassis) run around
/// 25-30 characters; 64 leaves room without accepting pasted garbage.
pub const MAX_SERIAL_LEN: usize = 64;

/// SKU prefix for the synthetic product created by each PC build.
/// The full SKU appends the last four characters of the build's serial.
pub const CUSTOM_PC_SKU_PREFIX: &str = "CUSTOM-PC-";
