//! # Ledger Snapshot
//!
//! `LedgerSnapshot` is the complete inventory state at one point in time:
//! the four entity collections, nothing else. Cloning a snapshot is the
//! unit of atomicity for multi-entity transitions (`build_pc` computes a
//! whole new snapshot and the ledger swaps it in).
//!
//! Insertion order is display order; all lookups are linear scans, which is
//! the right trade at single-shop collection sizes.

use serde::{Deserialize, Serialize};

use rigforge_core::{Customer, PcBuild, Product, SerialStatus, SerializedItem};

/// The four entity collections owned by the ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    pub products: Vec<Product>,
    pub serialized_items: Vec<SerializedItem>,
    pub customers: Vec<Customer>,
    pub builds: Vec<PcBuild>,
}

impl LedgerSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        LedgerSnapshot::default()
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn product_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    // -------------------------------------------------------------------------
    // Serialized items
    // -------------------------------------------------------------------------

    pub fn serial(&self, id: &str) -> Option<&SerializedItem> {
        self.serialized_items.iter().find(|s| s.id == id)
    }

    pub fn serial_mut(&mut self, id: &str) -> Option<&mut SerializedItem> {
        self.serialized_items.iter_mut().find(|s| s.id == id)
    }

    /// All serialized units of one product, in insertion order.
    pub fn serials_for_product<'a>(
        &'a self,
        product_id: &'a str,
    ) -> impl Iterator<Item = &'a SerializedItem> {
        self.serialized_items
            .iter()
            .filter(move |s| s.product_id == product_id)
    }

    /// Whether `serial_number` is already registered, case-insensitively,
    /// on any unit other than `exclude_id`.
    ///
    /// Serial numbers are human-transcribed labels; `sn001` and `SN001`
    /// are the same physical sticker.
    pub fn serial_number_taken(&self, serial_number: &str, exclude_id: Option<&str>) -> bool {
        self.serialized_items.iter().any(|s| {
            exclude_id != Some(s.id.as_str())
                && s.serial_number.eq_ignore_ascii_case(serial_number)
        })
    }

    // -------------------------------------------------------------------------
    // Customers
    // -------------------------------------------------------------------------

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn customer_mut(&mut self, id: &str) -> Option<&mut Customer> {
        self.customers.iter_mut().find(|c| c.id == id)
    }

    // -------------------------------------------------------------------------
    // Builds
    // -------------------------------------------------------------------------

    pub fn build(&self, id: &str) -> Option<&PcBuild> {
        self.builds.iter().find(|b| b.id == id)
    }

    // -------------------------------------------------------------------------
    // Invariant audit
    // -------------------------------------------------------------------------

    /// Checks the derived-quantity invariant: for every serialized product,
    /// `quantity` equals the number of its serialized units.
    ///
    /// Returns a human-readable report line per violation; empty means
    /// consistent. Used by tests and debug assertions, never by operations.
    pub fn audit_serialized_quantities(&self) -> Vec<String> {
        let mut report = Vec::new();
        for product in self.products.iter().filter(|p| p.is_serialized) {
            let count = self.serials_for_product(&product.id).count() as i64;
            if product.quantity != count {
                report.push(format!(
                    "product {} ({}) has quantity {} but {} serialized units",
                    product.sku, product.id, product.quantity, count
                ));
            }
        }
        report
    }

    /// Number of units currently available for sale or assembly:
    /// the In Stock serial count for serialized products.
    pub fn in_stock_units(&self, product_id: &str) -> i64 {
        self.serials_for_product(product_id)
            .filter(|s| s.status == SerialStatus::InStock)
            .count() as i64
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
