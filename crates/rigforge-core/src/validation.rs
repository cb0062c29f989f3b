//! # Validation Module
//!
//! Input validation utilities for RigForge.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (console app / future frontend)                 │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Ledger boundary (Rust)                                       │
//! │  ├── THIS MODULE: field validation on every draft                      │
//! │  └── Inventory rules (uniqueness, status, stock) in rigforge-ledger    │
//! │                                                                         │
//! │  Defense in depth: the ledger never trusts its caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rigforge_core::validation::{validate_sku, validate_serial_number};
//!
//! validate_sku("CPU-5900X").unwrap();
//! validate_serial_number("SN-2024-0001").unwrap();
//! ```

use crate::error::ValidationError;
use crate::{MAX_NAME_LEN, MAX_SERIAL_LEN, MAX_SKU_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Must contain only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use rigforge_core::validation::validate_sku;
///
/// assert!(validate_sku("CPU-5900X").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("has space").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LEN,
        });
    }

    // Check for valid characters (alphanumeric, hyphen, underscore)
    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product or build name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_name(field: &'static str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a serial number.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 64 characters
/// - Must not contain whitespace (serials are scanned or typed labels)
///
/// Uniqueness is an inventory rule, checked against the collections by the
/// ledger, not here.
pub fn validate_serial_number(serial: &str) -> ValidationResult<()> {
    let serial = serial.trim();

    if serial.is_empty() {
        return Err(ValidationError::Required {
            field: "serial number".to_string(),
        });
    }

    if serial.len() > MAX_SERIAL_LEN {
        return Err(ValidationError::TooLong {
            field: "serial number".to_string(),
            max: MAX_SERIAL_LEN,
        });
    }

    if serial.chars().any(|c| c.is_whitespace()) {
        return Err(ValidationError::InvalidFormat {
            field: "serial number".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (bundled/free items)
///
/// ## Example
/// ```rust
/// use rigforge_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(39999).is_ok()); // $399.99
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock quantity.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (out of stock)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
