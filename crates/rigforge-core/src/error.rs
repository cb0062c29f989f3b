//! # Error Types
//!
//! Domain-specific error types for rigforge-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rigforge-core errors (this file)                                      │
//! │  ├── LedgerError      - Inventory rule violations                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  rigforge-namegen errors (separate crate)                              │
//! │  └── NamegenError     - Name suggestion call failures                  │
//! │                                                                         │
//! │  Flow: ValidationError → LedgerError → Notification → presentation     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, serial number, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message
//!
//! ## Propagation Policy
//! A failed ledger operation never leaves the collections half-mutated:
//! every operation validates before its first write (or works on a snapshot
//! copy), so an `Err` always means "state unchanged".

use thiserror::Error;

use crate::types::SerialStatus;

// =============================================================================
// Ledger Error
// =============================================================================

/// Inventory rule violations.
///
/// These errors represent business rule violations or missing entities.
/// The ledger converts each one into a user-facing notification at the
/// point of detection; callers additionally receive the typed value.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Product id doesn't match any record.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Serialized item id doesn't match any record.
    #[error("Serial number not found: {0}")]
    SerialNotFound(String),

    /// Customer id doesn't match any record.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Serial numbers can only be attached to serialized products.
    #[error("Product {sku} does not track serial numbers")]
    NotSerialized { sku: String },

    /// The serial number is already registered (case-insensitive match).
    #[error("Serial number '{serial_number}' already exists")]
    DuplicateSerial { serial_number: String },

    /// Only In Stock serials may be edited.
    ///
    /// ## When This Occurs
    /// - Renaming a serial that is already built into a PC
    /// - Renaming a serial recorded as Sold or Returned
    #[error("Serial number '{serial_number}' is {status} and cannot be edited")]
    SerialLocked {
        serial_number: String,
        status: SerialStatus,
    },

    /// A serialized unit selected for a build is not available.
    #[error("Serial number '{serial_number}' is {status} and cannot be used in a build")]
    SerialNotAvailable {
        serial_number: String,
        status: SerialStatus,
    },

    /// The same serialized unit was selected twice in one build request.
    #[error("Serial number '{serial_number}' is selected more than once")]
    SerialAlreadySelected { serial_number: String },

    /// A serialized product was selected for a build without naming the unit.
    ///
    /// Serialized stock is consumed unit-by-unit; an anonymous decrement
    /// would desynchronize the derived quantity from the serial list.
    #[error("Product {sku} is serialized; select a specific serial number")]
    SerialRequired { sku: String },

    /// The selected serial belongs to a different product than claimed.
    #[error("Serial number '{serial_number}' does not belong to product {product_id}")]
    SerialProductMismatch {
        serial_number: String,
        product_id: String,
    },

    /// Not enough non-serialized stock to assemble the build.
    ///
    /// ## User Workflow
    /// ```text
    /// Build with 2× "Corsair RM850"
    ///      │
    ///      ▼
    /// Check stock: available=1
    ///      │
    ///      ▼
    /// InsufficientStock { sku: "PSU-RM850", available: 1, requested: 2 }
    ///      │
    ///      ▼
    /// UI shows: "Only 1 PSU-RM850 in stock"
    /// ```
    #[error("Insufficient stock for {sku}: available {available}, requested {requested}")]
    InsufficientStock {
        sku: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before inventory rules run.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., disallowed characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LedgerError::InsufficientStock {
            sku: "PSU-RM850".to_string(),
            available: 1,
            requested: 2,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for PSU-RM850: available 1, requested 2"
        );

        let err = LedgerError::SerialLocked {
            serial_number: "SN001".to_string(),
            status: SerialStatus::UsedInBuild,
        };
        assert_eq!(
            err.to_string(),
            "Serial number 'SN001' is Used in Build and cannot be edited"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Negative {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must not be negative");
    }

    #[test]
    fn test_validation_converts_to_ledger_error() {
        let validation_err = ValidationError::Required {
            field: "sku".to_string(),
        };
        let ledger_err: LedgerError = validation_err.into();
        assert!(matches!(ledger_err, LedgerError::Validation(_)));
    }
}
