//! Demo inventory for development sessions.

use rigforge_core::{CustomerDraft, ProductCategory, ProductDraft};
use rigforge_ledger::LedgerState;

/// Demo products: name, category, price in cents, bulk quantity,
/// and serial numbers to register (non-empty implies serialized).
const PRODUCTS: &[(&str, &str, ProductCategory, i64, i64, &[&str])] = &[
    (
        "CPU-5900X",
        "Ryzen 9 5900X",
        ProductCategory::Cpu,
        39999,
        0,
        &["SN-CPU-001", "SN-CPU-002"],
    ),
    (
        "GPU-4070",
        "GeForce RTX 4070",
        ProductCategory::Gpu,
        59999,
        0,
        &["SN-GPU-001"],
    ),
    (
        "MB-B550",
        "B550 Tomahawk",
        ProductCategory::Motherboard,
        17999,
        0,
        &["SN-MB-001", "SN-MB-002"],
    ),
    (
        "RAM-32-3600",
        "Vengeance 32GB 3600MHz",
        ProductCategory::Ram,
        10499,
        8,
        &[],
    ),
    (
        "SSD-980-1TB",
        "980 Pro 1TB NVMe",
        ProductCategory::Storage,
        12999,
        5,
        &[],
    ),
    ("PSU-RM850", "RM850x 850W", ProductCategory::Psu, 13999, 4, &[]),
    (
        "CASE-4000D",
        "4000D Airflow",
        ProductCategory::Case,
        10499,
        3,
        &[],
    ),
];

const CUSTOMERS: &[(&str, &str)] = &[
    ("Alex Morgan", "alex@example.com"),
    ("Sam Riis", "sam@example.com"),
];

/// Loads the demo products, serial numbers, and customers. Seed data is
/// well-formed, so operation failures here are programming errors.
pub fn seed_demo_inventory(state: &LedgerState) {
    state.with_ledger_mut(|ledger| {
        for (sku, name, category, price_cents, quantity, serials) in PRODUCTS {
            let product = ledger
                .add_product(ProductDraft {
                    name: name.to_string(),
                    category: *category,
                    price_cents: *price_cents,
                    quantity: *quantity,
                    is_serialized: !serials.is_empty(),
                    sku: sku.to_string(),
                })
                .expect("demo product is valid");
            for serial in *serials {
                ledger
                    .add_serial_number(&product.id, serial)
                    .expect("demo serial is valid");
            }
        }
        for (name, email) in CUSTOMERS {
            ledger
                .add_customer(CustomerDraft {
                    name: name.to_string(),
                    email: Some(email.to_string()),
                    phone: None,
                    address: None,
                })
                .expect("demo customer is valid");
        }
        // Seeding feedback is not interactive history
        let pending: Vec<String> = ledger.notifications().iter().map(|n| n.id.clone()).collect();
        for id in pending {
            ledger.dismiss_notification(&id);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_consistent() {
        let state = LedgerState::new();
        seed_demo_inventory(&state);

        state.with_ledger(|ledger| {
            assert_eq!(ledger.products().len(), PRODUCTS.len());
            assert_eq!(ledger.customers().len(), CUSTOMERS.len());
            assert_eq!(ledger.serialized_items().len(), 5);
            assert!(ledger.snapshot().audit_serialized_quantities().is_empty());
            assert!(ledger.notifications().is_empty());
        });
    }
}
