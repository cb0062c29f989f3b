//! # PC Assembly
//!
//! `build_pc` as a pure state transition: the whole prior snapshot goes in,
//! a whole new snapshot comes out (or a typed error and nothing changes).
//!
//! ## Transaction Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        assemble()                                       │
//! │                                                                         │
//! │  Pass 1: VALIDATE against the prior snapshot                            │
//! │  ├── every component product exists                                     │
//! │  ├── serialized picks: unit exists, belongs to that product,            │
//! │  │   is In Stock, not picked twice                                      │
//! │  ├── non-serialized picks: enough stock for the total requested         │
//! │  └── new PC serial doesn't collide with any existing serial             │
//! │           │                                                             │
//! │           ▼ (any failure: return Err, prior snapshot untouched)         │
//! │  Pass 2: APPLY on a clone                                               │
//! │  ├── consumed serials  ──► status = Used in Build                       │
//! │  ├── consumed products ──► quantity -= 1 per unit                       │
//! │  ├── new Product (category Custom PC, price = component sum,            │
//! │  │   serialized, quantity 1, sku CUSTOM-PC-<last 4 of serial>)          │
//! │  ├── new SerializedItem for it (In Stock)                               │
//! │  └── new PcBuild linking product, components, optional customer         │
//! │                                                                         │
//! │  The caller swaps the returned snapshot in whole: partial failure       │
//! │  mid-build is not observable, now or under future concurrent access.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use rigforge_core::validation::{validate_name, validate_serial_number};
use rigforge_core::{
    ComponentRef, LedgerError, Money, PcBuild, Product, ProductCategory, SerialStatus,
    SerializedItem, ValidationError, CUSTOM_PC_SKU_PREFIX,
};

use crate::snapshot::LedgerSnapshot;

// =============================================================================
// Request / Receipt
// =============================================================================

/// One component pick in a build request.
///
/// `serial_id` is required when the product is serialized (a specific
/// physical unit is consumed) and must be absent otherwise (one anonymous
/// unit is consumed).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSelection {
    pub product_id: String,
    pub serial_id: Option<String>,
}

/// A request to assemble components into one Custom PC.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
    /// Build name (user-supplied or AI-suggested).
    pub name: String,

    /// Serial number for the finished PC.
    pub serial_number: String,

    /// Components to consume, in order.
    pub components: Vec<ComponentSelection>,

    /// Owning customer, if built to order.
    pub customer_id: Option<String>,
}

/// Everything created by a successful assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReceipt {
    pub build: PcBuild,
    pub pc_product: Product,
    pub pc_serial: SerializedItem,
}

impl BuildReceipt {
    /// Total build price: the exact sum of component unit prices at
    /// assembly time.
    pub fn total(&self) -> Money {
        self.pc_product.price()
    }
}

// =============================================================================
// The Transition
// =============================================================================

/// Assembles a PC, returning the next snapshot and a receipt.
///
/// Pure function: `prior` is never mutated. All validation happens before
/// the clone is touched, so an `Err` guarantees the ledger state the caller
/// holds is exactly what it was.
pub fn assemble(
    prior: &LedgerSnapshot,
    request: &BuildRequest,
) -> Result<(LedgerSnapshot, BuildReceipt), LedgerError> {
    validate_name("build name", &request.name)?;
    validate_serial_number(&request.serial_number)?;

    if request.components.is_empty() {
        return Err(ValidationError::Required {
            field: "components".to_string(),
        }
        .into());
    }

    if let Some(customer_id) = &request.customer_id {
        if prior.customer(customer_id).is_none() {
            return Err(LedgerError::CustomerNotFound(customer_id.clone()));
        }
    }

    if prior.serial_number_taken(&request.serial_number, None) {
        return Err(LedgerError::DuplicateSerial {
            serial_number: request.serial_number.clone(),
        });
    }

    // Pass 1: validate every pick and accumulate the total price.
    let mut total = Money::zero();
    let mut picked_serials: HashSet<&str> = HashSet::new();
    let mut anonymous_units: HashMap<&str, i64> = HashMap::new();

    for selection in &request.components {
        let product = prior
            .product(&selection.product_id)
            .ok_or_else(|| LedgerError::ProductNotFound(selection.product_id.clone()))?;
        total += product.price();

        match &selection.serial_id {
            Some(serial_id) => {
                let serial = prior
                    .serial(serial_id)
                    .ok_or_else(|| LedgerError::SerialNotFound(serial_id.clone()))?;
                if serial.product_id != product.id {
                    return Err(LedgerError::SerialProductMismatch {
                        serial_number: serial.serial_number.clone(),
                        product_id: product.id.clone(),
                    });
                }
                if serial.status != SerialStatus::InStock {
                    return Err(LedgerError::SerialNotAvailable {
                        serial_number: serial.serial_number.clone(),
                        status: serial.status,
                    });
                }
                if !picked_serials.insert(serial_id.as_str()) {
                    return Err(LedgerError::SerialAlreadySelected {
                        serial_number: serial.serial_number.clone(),
                    });
                }
            }
            None => {
                if product.is_serialized {
                    return Err(LedgerError::SerialRequired {
                        sku: product.sku.clone(),
                    });
                }
                *anonymous_units.entry(product.id.as_str()).or_insert(0) += 1;
            }
        }
    }

    // Aggregate stock check so two picks of the same product can't each
    // pass against the same single unit.
    for (product_id, requested) in &anonymous_units {
        let product = prior
            .product(product_id)
            .ok_or_else(|| LedgerError::ProductNotFound(product_id.to_string()))?;
        if product.quantity < *requested {
            return Err(LedgerError::InsufficientStock {
                sku: product.sku.clone(),
                available: product.quantity,
                requested: *requested,
            });
        }
    }

    // Pass 2: apply on a clone. Nothing below can fail.
    let mut next = prior.clone();
    let mut component_ids: Vec<ComponentRef> = Vec::with_capacity(request.components.len());

    for selection in &request.components {
        match &selection.serial_id {
            Some(serial_id) => {
                if let Some(serial) = next.serial_mut(serial_id) {
                    serial.status = SerialStatus::UsedInBuild;
                }
                component_ids.push(ComponentRef::Serial(serial_id.clone()));
            }
            None => {
                if let Some(product) = next.product_mut(&selection.product_id) {
                    product.quantity -= 1;
                }
                component_ids.push(ComponentRef::Product(selection.product_id.clone()));
            }
        }
    }

    let name = request.name.trim().to_string();
    let serial_number = request.serial_number.trim().to_string();

    let pc_product = Product {
        id: Uuid::new_v4().to_string(),
        name: name.clone(),
        category: ProductCategory::CustomPc,
        price_cents: total.cents(),
        quantity: 1,
        is_serialized: true,
        sku: custom_pc_sku(&serial_number),
    };

    let pc_serial = SerializedItem {
        id: Uuid::new_v4().to_string(),
        product_id: pc_product.id.clone(),
        serial_number: serial_number.clone(),
        status: SerialStatus::InStock,
    };

    let build = PcBuild {
        id: Uuid::new_v4().to_string(),
        pc_product_id: pc_product.id.clone(),
        name,
        serial_number,
        component_ids,
        customer_id: request.customer_id.clone(),
    };

    debug!(
        build_id = %build.id,
        components = build.component_ids.len(),
        total = %total,
        "build assembled"
    );

    next.products.push(pc_product.clone());
    next.serialized_items.push(pc_serial.clone());
    next.builds.push(build.clone());

    let receipt = BuildReceipt {
        build,
        pc_product,
        pc_serial,
    };

    Ok((next, receipt))
}

/// SKU for the synthetic Custom PC product: `CUSTOM-PC-` plus the last
/// four characters of the build serial, uppercased.
fn custom_pc_sku(serial_number: &str) -> String {
    let tail: String = serial_number
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("{}{}", CUSTOM_PC_SKU_PREFIX, tail.to_ascii_uppercase())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rigforge_core::Customer;

    fn product(id: &str, price_cents: i64, quantity: i64, serialized: bool) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            category: ProductCategory::Other,
            price_cents,
            quantity,
            is_serialized: serialized,
            sku: format!("SKU-{}", id).to_uppercase(),
        }
    }

    fn serial(id: &str, product_id: &str, number: &str) -> SerializedItem {
        SerializedItem {
            id: id.to_string(),
            product_id: product_id.to_string(),
            serial_number: number.to_string(),
            status: SerialStatus::InStock,
        }
    }

    /// A shop with one serialized GPU (one unit) and one non-serialized PSU.
    fn shop() -> LedgerSnapshot {
        let mut snap = LedgerSnapshot::new();
        snap.products.push(product("gpu", 39999, 1, true));
        snap.products.push(product("psu", 8950, 2, false));
        snap.serialized_items.push(serial("s-gpu", "gpu", "GPU-001"));
        snap
    }

    fn request(components: Vec<ComponentSelection>) -> BuildRequest {
        BuildRequest {
            name: "Nova Prime".to_string(),
            serial_number: "PC-2024-0001".to_string(),
            components,
            customer_id: None,
        }
    }

    fn pick_serial(product_id: &str, serial_id: &str) -> ComponentSelection {
        ComponentSelection {
            product_id: product_id.to_string(),
            serial_id: Some(serial_id.to_string()),
        }
    }

    fn pick(product_id: &str) -> ComponentSelection {
        ComponentSelection {
            product_id: product_id.to_string(),
            serial_id: None,
        }
    }

    #[test]
    fn test_assemble_creates_product_serial_and_build() {
        let prior = shop();
        let req = request(vec![pick_serial("gpu", "s-gpu"), pick("psu")]);

        let (next, receipt) = assemble(&prior, &req).unwrap();

        // Exactly one new product, one new serial, one new build
        assert_eq!(next.products.len(), prior.products.len() + 1);
        assert_eq!(next.serialized_items.len(), prior.serialized_items.len() + 1);
        assert_eq!(next.builds.len(), 1);

        // The synthetic product
        let pc = &receipt.pc_product;
        assert_eq!(pc.category, ProductCategory::CustomPc);
        assert!(pc.is_serialized);
        assert_eq!(pc.quantity, 1);
        assert_eq!(pc.price_cents, 39999 + 8950);
        assert_eq!(pc.sku, "CUSTOM-PC-0001");

        // Its serialized unit
        assert_eq!(receipt.pc_serial.product_id, pc.id);
        assert_eq!(receipt.pc_serial.status, SerialStatus::InStock);
        assert_eq!(receipt.pc_serial.serial_number, "PC-2024-0001");

        // The build record preserves pick order
        assert_eq!(
            receipt.build.component_ids,
            vec![
                ComponentRef::Serial("s-gpu".to_string()),
                ComponentRef::Product("psu".to_string()),
            ]
        );

        // Consumption effects
        assert_eq!(
            next.serial("s-gpu").unwrap().status,
            SerialStatus::UsedInBuild
        );
        assert_eq!(next.product("psu").unwrap().quantity, 1);

        // Purity: the prior snapshot is untouched
        assert_eq!(prior.product("psu").unwrap().quantity, 2);
        assert_eq!(prior.serial("s-gpu").unwrap().status, SerialStatus::InStock);
    }

    #[test]
    fn test_total_is_sum_of_prices_at_invocation_time() {
        let mut prior = shop();
        prior.products.push(product("ram", 4599, 4, false));
        let req = request(vec![pick("psu"), pick("ram"), pick("ram")]);

        let (_, receipt) = assemble(&prior, &req).unwrap();
        assert_eq!(receipt.total().cents(), 8950 + 4599 + 4599);
    }

    #[test]
    fn test_insufficient_stock_rejected_across_duplicate_picks() {
        let prior = shop(); // psu quantity = 2
        let req = request(vec![pick("psu"), pick("psu"), pick("psu")]);

        let err = assemble(&prior, &req).unwrap_err();
        match err {
            LedgerError::InsufficientStock {
                sku,
                available,
                requested,
            } => {
                assert_eq!(sku, "SKU-PSU");
                assert_eq!(available, 2);
                assert_eq!(requested, 3);
            }
            other => panic!("expected InsufficientStock, got {other}"),
        }
    }

    #[test]
    fn test_unknown_product_rejected() {
        let prior = shop();
        let req = request(vec![pick("nope")]);
        assert!(matches!(
            assemble(&prior, &req),
            Err(LedgerError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_serial_must_be_in_stock() {
        let mut prior = shop();
        prior.serial_mut("s-gpu").unwrap().status = SerialStatus::UsedInBuild;
        let req = request(vec![pick_serial("gpu", "s-gpu")]);

        assert!(matches!(
            assemble(&prior, &req),
            Err(LedgerError::SerialNotAvailable { .. })
        ));
    }

    #[test]
    fn test_serial_picked_twice_rejected() {
        let prior = shop();
        let req = request(vec![
            pick_serial("gpu", "s-gpu"),
            pick_serial("gpu", "s-gpu"),
        ]);

        assert!(matches!(
            assemble(&prior, &req),
            Err(LedgerError::SerialAlreadySelected { .. })
        ));
    }

    #[test]
    fn test_serialized_product_requires_serial_pick() {
        let prior = shop();
        let req = request(vec![pick("gpu")]);

        assert!(matches!(
            assemble(&prior, &req),
            Err(LedgerError::SerialRequired { .. })
        ));
    }

    #[test]
    fn test_serial_from_other_product_rejected() {
        let prior = shop();
        let req = request(vec![pick_serial("psu", "s-gpu")]);

        assert!(matches!(
            assemble(&prior, &req),
            Err(LedgerError::SerialProductMismatch { .. })
        ));
    }

    #[test]
    fn test_duplicate_build_serial_rejected_case_insensitively() {
        let prior = shop();
        let mut req = request(vec![pick("psu")]);
        req.serial_number = "gpu-001".to_string(); // existing GPU unit, lowercased

        assert!(matches!(
            assemble(&prior, &req),
            Err(LedgerError::DuplicateSerial { .. })
        ));
    }

    #[test]
    fn test_unknown_customer_rejected() {
        let prior = shop();
        let mut req = request(vec![pick("psu")]);
        req.customer_id = Some("ghost".to_string());

        assert!(matches!(
            assemble(&prior, &req),
            Err(LedgerError::CustomerNotFound(_))
        ));
    }

    #[test]
    fn test_known_customer_is_linked() {
        let mut prior = shop();
        prior.customers.push(Customer {
            id: "c1".to_string(),
            name: "Mads".to_string(),
            email: None,
            phone: None,
            address: None,
        });
        let mut req = request(vec![pick("psu")]);
        req.customer_id = Some("c1".to_string());

        let (_, receipt) = assemble(&prior, &req).unwrap();
        assert_eq!(receipt.build.customer_id.as_deref(), Some("c1"));
    }

    #[test]
    fn test_empty_component_list_rejected() {
        let prior = shop();
        let req = request(vec![]);
        assert!(matches!(
            assemble(&prior, &req),
            Err(LedgerError::Validation(_))
        ));
    }

    #[test]
    fn test_custom_pc_sku_short_serial() {
        // Serials shorter than four characters use the whole serial
        assert_eq!(custom_pc_sku("A1"), "CUSTOM-PC-A1");
        assert_eq!(custom_pc_sku("pc-2024-0042"), "CUSTOM-PC-0042");
    }

    #[test]
    fn test_quantity_invariant_holds_after_assembly() {
        let prior = shop();
        let req = request(vec![pick_serial("gpu", "s-gpu"), pick("psu")]);
        let (next, _) = assemble(&prior, &req).unwrap();
        assert!(next.audit_serialized_quantities().is_empty());
    }
}
