//! # Domain Types
//!
//! Core domain types used throughout RigForge.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │ SerializedItem  │   │    PcBuild      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  sku (business) │   │  product_id(FK) │   │  pc_product_id  │       │
//! │  │  category       │   │  serial_number  │   │  serial_number  │       │
//! │  │  price_cents    │   │  status         │   │  component_ids  │       │
//! │  │  quantity       │   └─────────────────┘   │  customer_id?   │       │
//! │  │  is_serialized  │                         └─────────────────┘       │
//! │  └─────────────────┘   ┌─────────────────┐                             │
//! │                        │    Customer     │                             │
//! │  ┌─────────────────┐   │  ─────────────  │   ┌─────────────────┐       │
//! │  │ ProductCategory │   │  id (UUID)      │   │  SerialStatus   │       │
//! │  │  CPU, GPU, RAM  │   │  name           │   │  InStock        │       │
//! │  │  Motherboard …  │   │  email? phone?  │   │  UsedInBuild    │       │
//! │  │  CustomPc       │   │  address?       │   │  Sold, Returned │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for relations
//! - Business ID: (sku, serial_number) - human-readable, potentially mutable
//!
//! ## Serialized vs Non-Serialized Stock
//! A non-serialized product is tracked only by its `quantity` counter.
//! A serialized product tracks each physical unit as a `SerializedItem`;
//! its `quantity` is DERIVED (count of units) and must never be edited
//! directly once serial numbers exist. The ledger enforces this.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Category
// =============================================================================

/// Component category of a product.
///
/// Serializes to the display labels the frontend expects
/// (`"CPU"`, `"Motherboard"`, `"Custom PC"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ProductCategory {
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "GPU")]
    Gpu,
    #[serde(rename = "RAM")]
    Ram,
    Motherboard,
    Storage,
    #[serde(rename = "PSU")]
    Psu,
    Case,
    /// Synthetic category for assembled builds. Only `build_pc` creates
    /// products in this category.
    #[serde(rename = "Custom PC")]
    CustomPc,
    Other,
}

impl ProductCategory {
    /// All categories, in display order.
    pub const ALL: &'static [ProductCategory] = &[
        ProductCategory::Cpu,
        ProductCategory::Gpu,
        ProductCategory::Ram,
        ProductCategory::Motherboard,
        ProductCategory::Storage,
        ProductCategory::Psu,
        ProductCategory::Case,
        ProductCategory::CustomPc,
        ProductCategory::Other,
    ];

    /// Display label, identical to the serialized form.
    pub const fn label(&self) -> &'static str {
        match self {
            ProductCategory::Cpu => "CPU",
            ProductCategory::Gpu => "GPU",
            ProductCategory::Ram => "RAM",
            ProductCategory::Motherboard => "Motherboard",
            ProductCategory::Storage => "Storage",
            ProductCategory::Psu => "PSU",
            ProductCategory::Case => "Case",
            ProductCategory::CustomPc => "Custom PC",
            ProductCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProductCategory {
    type Err = String;

    /// Parses a category label, case-insensitively.
    /// Accepts `"custom pc"`, `"custom-pc"` and `"custompc"` for the
    /// synthetic category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" => Ok(ProductCategory::Cpu),
            "gpu" => Ok(ProductCategory::Gpu),
            "ram" => Ok(ProductCategory::Ram),
            "motherboard" | "mobo" => Ok(ProductCategory::Motherboard),
            "storage" => Ok(ProductCategory::Storage),
            "psu" => Ok(ProductCategory::Psu),
            "case" => Ok(ProductCategory::Case),
            "custom pc" | "custom-pc" | "custompc" => Ok(ProductCategory::CustomPc),
            "other" => Ok(ProductCategory::Other),
            other => Err(format!("unknown product category: {}", other)),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in inventory: either a component or an assembled Custom PC.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in lists and on builds.
    pub name: String,

    /// Component category.
    pub category: ProductCategory,

    /// Unit price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Units in stock. For serialized products this is DERIVED from the
    /// count of In Stock units and is only changed by serial add/remove.
    pub quantity: i64,

    /// Whether each physical unit carries its own serial number.
    pub is_serialized: bool,

    /// Stock Keeping Unit - business identifier, stored uppercase.
    pub sku: String,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether `quantity` non-serialized units can be consumed.
    ///
    /// Serialized products are consumed unit-by-unit through their
    /// serial numbers, never through this check.
    pub fn can_consume(&self, quantity: i64) -> bool {
        !self.is_serialized && self.quantity >= quantity
    }
}

/// Input shape for creating or replacing a product (everything but the id).
///
/// ## Full-Replace Semantics
/// `update_product` replaces every field from the draft; there is no
/// field-level patching. The ledger overrides `quantity` where the
/// serialized-stock invariant requires it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDraft {
    pub name: String,
    pub category: ProductCategory,
    pub price_cents: i64,
    pub quantity: i64,
    pub is_serialized: bool,
    pub sku: String,
}

// =============================================================================
// Serialized Item
// =============================================================================

/// Lifecycle status of a serialized unit.
///
/// ## State Machine
/// ```text
/// In Stock ──build_pc──► Used in Build
///     │
///     └── Sold / Returned are declared states with no ledger-driven
///         transition yet (set by a future sales flow)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SerialStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Used in Build")]
    UsedInBuild,
    Sold,
    Returned,
}

impl SerialStatus {
    /// Only In Stock units may have their serial number edited.
    #[inline]
    pub const fn is_editable(&self) -> bool {
        matches!(self, SerialStatus::InStock)
    }

    /// Display label, identical to the serialized form.
    pub const fn label(&self) -> &'static str {
        match self {
            SerialStatus::InStock => "In Stock",
            SerialStatus::UsedInBuild => "Used in Build",
            SerialStatus::Sold => "Sold",
            SerialStatus::Returned => "Returned",
        }
    }
}

impl fmt::Display for SerialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A physically trackable unit of a serialized product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SerializedItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The product this unit belongs to. The product must have
    /// `is_serialized = true`.
    pub product_id: String,

    /// Globally unique serial number (uniqueness is case-insensitive).
    pub serial_number: String,

    /// Current lifecycle status.
    pub status: SerialStatus,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer of the shop. Only the name is required.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Input shape for creating or replacing a customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerDraft {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

// =============================================================================
// PC Build
// =============================================================================

/// A reference to a unit consumed by a build.
///
/// ## Why an Enum?
/// The original data model stored a flat list of ids that were sometimes
/// product ids and sometimes serialized-item ids, distinguishable only by
/// probing both collections. The typed reference keeps the consumption
/// order while making the target collection explicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
#[ts(export)]
pub enum ComponentRef {
    /// One anonymous unit of a non-serialized product.
    Product(String),
    /// A specific serialized unit.
    Serial(String),
}

impl ComponentRef {
    /// The referenced id, regardless of target collection.
    pub fn id(&self) -> &str {
        match self {
            ComponentRef::Product(id) | ComponentRef::Serial(id) => id,
        }
    }
}

/// A record of components assembled into one sellable Custom PC.
///
/// The build always references exactly one synthetic product in the
/// `Custom PC` category (created alongside the build) plus that product's
/// own serialized unit, identified here by `serial_number`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PcBuild {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The synthetic Custom PC product created for this build.
    pub pc_product_id: String,

    /// Build name (user-supplied or AI-suggested).
    pub name: String,

    /// Serial number of the finished PC.
    pub serial_number: String,

    /// Consumed components, in selection order. Entries are removed when
    /// the underlying product or serial is deleted from inventory.
    pub component_ids: Vec<ComponentRef>,

    /// Owning customer, if the build was made to order.
    /// Cleared (not removed) when the customer is deleted.
    pub customer_id: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip() {
        for cat in ProductCategory::ALL {
            let json = serde_json::to_string(cat).unwrap();
            assert_eq!(json, format!("\"{}\"", cat.label()));
            let back: ProductCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *cat);
        }
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("cpu".parse::<ProductCategory>().unwrap(), ProductCategory::Cpu);
        assert_eq!("Custom PC".parse::<ProductCategory>().unwrap(), ProductCategory::CustomPc);
        assert_eq!("mobo".parse::<ProductCategory>().unwrap(), ProductCategory::Motherboard);
        assert!("keyboard".parse::<ProductCategory>().is_err());
    }

    #[test]
    fn test_serial_status_labels() {
        let json = serde_json::to_string(&SerialStatus::UsedInBuild).unwrap();
        assert_eq!(json, "\"Used in Build\"");
        assert!(SerialStatus::InStock.is_editable());
        assert!(!SerialStatus::UsedInBuild.is_editable());
        assert!(!SerialStatus::Sold.is_editable());
        assert!(!SerialStatus::Returned.is_editable());
    }

    #[test]
    fn test_can_consume() {
        let product = Product {
            id: "p1".to_string(),
            name: "Corsair RM850".to_string(),
            category: ProductCategory::Psu,
            price_cents: 12999,
            quantity: 2,
            is_serialized: false,
            sku: "PSU-RM850".to_string(),
        };
        assert!(product.can_consume(2));
        assert!(!product.can_consume(3));

        let serialized = Product {
            is_serialized: true,
            ..product
        };
        // Serialized stock is consumed per-unit via serial numbers
        assert!(!serialized.can_consume(1));
    }

    #[test]
    fn test_component_ref_serde_shape() {
        let c = ComponentRef::Serial("abc".to_string());
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"kind":"serial","id":"abc"}"#);
        assert_eq!(c.id(), "abc");
    }
}
