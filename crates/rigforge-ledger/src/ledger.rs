//! # The Inventory Ledger
//!
//! `Ledger` is the process-wide state owner: the four entity collections
//! plus the notification feed, behind the full operation surface.
//!
//! ## Operation Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Every Mutating Operation                            │
//! │                                                                         │
//! │  validate inputs ──► check inventory rules ──► mutate ──► notify        │
//! │        │                     │                                          │
//! │        └─────────────────────┴──► on failure: record error              │
//! │                                   notification, return Err,             │
//! │                                   collections untouched                 │
//! │                                                                         │
//! │  All checks run before the first write, so Err always means             │
//! │  "state unchanged". Update-by-unknown-id is the one silent path:        │
//! │  it returns Ok(None) with no notification.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The ledger exclusively owns all collections. Callers get borrowing
//! accessors or a [`LedgerSnapshot`] clone; they never hold live references
//! across operations.

use std::collections::HashSet;

use tracing::{debug, info, warn};
use uuid::Uuid;

use rigforge_core::validation::{
    validate_name, validate_price_cents, validate_quantity, validate_serial_number, validate_sku,
};
use rigforge_core::{
    ComponentRef, Customer, CustomerDraft, LedgerError, LedgerResult, PcBuild, Product,
    ProductDraft, SerialStatus, SerializedItem, ValidationError,
};

use crate::build::{self, BuildReceipt, BuildRequest};
use crate::notify::{Notification, NotificationFeed};
use crate::snapshot::LedgerSnapshot;

// =============================================================================
// Ledger
// =============================================================================

/// The in-memory inventory ledger.
///
/// Constructed once at startup and handed to consumers by reference (or via
/// [`crate::state::LedgerState`] for shared access). State is transient by
/// design; a persistence backend slots in underneath later.
#[derive(Debug, Default)]
pub struct Ledger {
    state: LedgerSnapshot,
    feed: NotificationFeed,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger::default()
    }

    /// Creates a ledger over existing collections (tests, future backend
    /// hydration).
    pub fn from_snapshot(state: LedgerSnapshot) -> Self {
        Ledger {
            state,
            feed: NotificationFeed::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Read surface
    // -------------------------------------------------------------------------

    pub fn products(&self) -> &[Product] {
        &self.state.products
    }

    pub fn serialized_items(&self) -> &[SerializedItem] {
        &self.state.serialized_items
    }

    pub fn customers(&self) -> &[Customer] {
        &self.state.customers
    }

    pub fn builds(&self) -> &[PcBuild] {
        &self.state.builds
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.state.product(id)
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.state.customer(id)
    }

    /// All serialized units of one product, in insertion order.
    pub fn serials_for_product<'a>(
        &'a self,
        product_id: &'a str,
    ) -> impl Iterator<Item = &'a SerializedItem> {
        self.state.serials_for_product(product_id)
    }

    /// A full copy of the current collections.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.state.clone()
    }

    /// Live notifications, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        self.feed.entries()
    }

    /// Removes a notification by id (presentation-driven dismissal).
    pub fn dismiss_notification(&mut self, id: &str) -> bool {
        self.feed.dismiss(id)
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Adds a product.
    ///
    /// A serialized product always starts at quantity 0 regardless of the
    /// draft: its quantity is derived from serial numbers added later.
    pub fn add_product(&mut self, draft: ProductDraft) -> LedgerResult<Product> {
        if let Err(e) = validate_product_draft(&draft) {
            return Err(self.fail(e.into()));
        }

        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: draft.name.trim().to_string(),
            category: draft.category,
            price_cents: draft.price_cents,
            quantity: if draft.is_serialized { 0 } else { draft.quantity },
            is_serialized: draft.is_serialized,
            sku: normalize_sku(&draft.sku),
        };

        info!(product_id = %product.id, sku = %product.sku, "product added");
        self.feed
            .success(format!("Product \"{}\" added.", product.name));
        self.state.products.push(product.clone());
        Ok(product)
    }

    /// Replaces every field of the product matching `id`.
    ///
    /// Returns `Ok(None)` silently when the id is unknown. Quantity rules:
    /// a product that becomes serialized resets to 0 (no units registered
    /// yet); a product that stays serialized keeps its derived quantity and
    /// the draft's value is ignored.
    pub fn update_product(
        &mut self,
        id: &str,
        draft: ProductDraft,
    ) -> LedgerResult<Option<Product>> {
        if let Err(e) = validate_product_draft(&draft) {
            return Err(self.fail(e.into()));
        }

        let Some(existing) = self.state.product_mut(id) else {
            debug!(product_id = %id, "update for unknown product ignored");
            return Ok(None);
        };

        let was_serialized = existing.is_serialized;
        existing.name = draft.name.trim().to_string();
        existing.category = draft.category;
        existing.price_cents = draft.price_cents;
        existing.sku = normalize_sku(&draft.sku);
        existing.is_serialized = draft.is_serialized;
        existing.quantity = match (was_serialized, draft.is_serialized) {
            (false, true) => 0,
            (true, true) => existing.quantity,
            (_, false) => draft.quantity,
        };
        let updated = existing.clone();

        info!(product_id = %id, sku = %updated.sku, "product updated");
        self.feed
            .success(format!("Product \"{}\" updated.", updated.name));
        Ok(Some(updated))
    }

    /// Deletes a product and cascades:
    /// - every serialized unit of the product is removed
    /// - the product id and all its serial ids are stripped from every
    ///   build's component list (the builds themselves remain)
    pub fn delete_product(&mut self, id: &str) -> LedgerResult<Product> {
        let Some(pos) = self.state.products.iter().position(|p| p.id == id) else {
            return Err(self.fail(LedgerError::ProductNotFound(id.to_string())));
        };
        let product = self.state.products.remove(pos);

        let removed_serials: HashSet<String> = self
            .state
            .serials_for_product(id)
            .map(|s| s.id.clone())
            .collect();
        self.state.serialized_items.retain(|s| s.product_id != id);

        for build in &mut self.state.builds {
            build.component_ids.retain(|c| match c {
                ComponentRef::Product(pid) => pid != id,
                ComponentRef::Serial(sid) => !removed_serials.contains(sid),
            });
        }

        info!(
            product_id = %id,
            sku = %product.sku,
            cascaded_serials = removed_serials.len(),
            "product deleted"
        );
        self.feed
            .success(format!("Product \"{}\" removed.", product.name));
        Ok(product)
    }

    // -------------------------------------------------------------------------
    // Serial numbers
    // -------------------------------------------------------------------------

    /// Registers a new serialized unit as In Stock and increments the
    /// parent product's quantity by exactly 1.
    pub fn add_serial_number(
        &mut self,
        product_id: &str,
        serial_number: &str,
    ) -> LedgerResult<SerializedItem> {
        if let Err(e) = validate_serial_number(serial_number) {
            return Err(self.fail(e.into()));
        }
        let serial_number = serial_number.trim().to_string();

        let (product_name, is_serialized, sku) = match self.state.product(product_id) {
            Some(p) => (p.name.clone(), p.is_serialized, p.sku.clone()),
            None => return Err(self.fail(LedgerError::ProductNotFound(product_id.to_string()))),
        };
        if !is_serialized {
            return Err(self.fail(LedgerError::NotSerialized { sku }));
        }
        if self.state.serial_number_taken(&serial_number, None) {
            return Err(self.fail(LedgerError::DuplicateSerial { serial_number }));
        }

        let serial = SerializedItem {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            serial_number,
            status: SerialStatus::InStock,
        };
        self.state.serialized_items.push(serial.clone());
        if let Some(product) = self.state.product_mut(product_id) {
            product.quantity += 1;
        }

        info!(
            serial_id = %serial.id,
            product_id = %product_id,
            serial_number = %serial.serial_number,
            "serial number added"
        );
        self.feed
            .success(format!("Serial number added to \"{}\".", product_name));
        Ok(serial)
    }

    /// Renames an In Stock serialized unit. Quantity is unaffected.
    pub fn update_serial_number(
        &mut self,
        serial_id: &str,
        new_serial_number: &str,
    ) -> LedgerResult<SerializedItem> {
        if let Err(e) = validate_serial_number(new_serial_number) {
            return Err(self.fail(e.into()));
        }
        let new_serial_number = new_serial_number.trim().to_string();

        let Some(pos) = self
            .state
            .serialized_items
            .iter()
            .position(|s| s.id == serial_id)
        else {
            return Err(self.fail(LedgerError::SerialNotFound(serial_id.to_string())));
        };

        let current = &self.state.serialized_items[pos];
        if !current.status.is_editable() {
            let err = LedgerError::SerialLocked {
                serial_number: current.serial_number.clone(),
                status: current.status,
            };
            return Err(self.fail(err));
        }
        if self
            .state
            .serial_number_taken(&new_serial_number, Some(serial_id))
        {
            return Err(self.fail(LedgerError::DuplicateSerial {
                serial_number: new_serial_number,
            }));
        }

        self.state.serialized_items[pos].serial_number = new_serial_number;
        let updated = self.state.serialized_items[pos].clone();

        info!(serial_id = %serial_id, serial_number = %updated.serial_number, "serial number updated");
        self.feed.success(format!(
            "Serial number updated to \"{}\".",
            updated.serial_number
        ));
        Ok(updated)
    }

    /// Removes a serialized unit, decrements the parent quantity by 1
    /// (floored at 0), and strips the unit from every build's component
    /// list.
    pub fn delete_serial_number(&mut self, serial_id: &str) -> LedgerResult<SerializedItem> {
        let Some(pos) = self
            .state
            .serialized_items
            .iter()
            .position(|s| s.id == serial_id)
        else {
            return Err(self.fail(LedgerError::SerialNotFound(serial_id.to_string())));
        };
        let serial = self.state.serialized_items.remove(pos);

        if let Some(product) = self.state.product_mut(&serial.product_id) {
            product.quantity = (product.quantity - 1).max(0);
        }
        for build in &mut self.state.builds {
            build
                .component_ids
                .retain(|c| !matches!(c, ComponentRef::Serial(sid) if sid == &serial.id));
        }

        info!(
            serial_id = %serial_id,
            serial_number = %serial.serial_number,
            "serial number deleted"
        );
        self.feed.success(format!(
            "Serial number \"{}\" removed.",
            serial.serial_number
        ));
        Ok(serial)
    }

    // -------------------------------------------------------------------------
    // PC assembly
    // -------------------------------------------------------------------------

    /// Assembles components into a Custom PC.
    ///
    /// Delegates to [`crate::build::assemble`], which computes a complete
    /// new snapshot; the ledger swaps it in whole. See that module for the
    /// validation and consumption rules.
    pub fn build_pc(&mut self, request: BuildRequest) -> LedgerResult<BuildReceipt> {
        match build::assemble(&self.state, &request) {
            Ok((next, receipt)) => {
                self.state = next;
                info!(
                    build_id = %receipt.build.id,
                    components = receipt.build.component_ids.len(),
                    total = %receipt.total(),
                    "PC assembled"
                );
                self.feed.success(format!(
                    "Build \"{}\" assembled: {} components, {} total.",
                    receipt.build.name,
                    receipt.build.component_ids.len(),
                    receipt.total()
                ));
                Ok(receipt)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    // -------------------------------------------------------------------------
    // Customers
    // -------------------------------------------------------------------------

    /// Adds a customer. Only the name is required; blank optional fields
    /// are stored as absent.
    pub fn add_customer(&mut self, draft: CustomerDraft) -> LedgerResult<Customer> {
        if let Err(e) = validate_name("name", &draft.name) {
            return Err(self.fail(e.into()));
        }

        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: draft.name.trim().to_string(),
            email: normalize_optional(draft.email),
            phone: normalize_optional(draft.phone),
            address: normalize_optional(draft.address),
        };

        info!(customer_id = %customer.id, "customer added");
        self.feed
            .success(format!("Customer \"{}\" added.", customer.name));
        self.state.customers.push(customer.clone());
        Ok(customer)
    }

    /// Replaces every field of the customer matching `id`.
    /// Returns `Ok(None)` silently when the id is unknown.
    pub fn update_customer(
        &mut self,
        id: &str,
        draft: CustomerDraft,
    ) -> LedgerResult<Option<Customer>> {
        if let Err(e) = validate_name("name", &draft.name) {
            return Err(self.fail(e.into()));
        }

        let Some(existing) = self.state.customer_mut(id) else {
            debug!(customer_id = %id, "update for unknown customer ignored");
            return Ok(None);
        };

        existing.name = draft.name.trim().to_string();
        existing.email = normalize_optional(draft.email);
        existing.phone = normalize_optional(draft.phone);
        existing.address = normalize_optional(draft.address);
        let updated = existing.clone();

        info!(customer_id = %id, "customer updated");
        self.feed
            .success(format!("Customer \"{}\" updated.", updated.name));
        Ok(Some(updated))
    }

    /// Deletes a customer. Builds that referenced the customer remain,
    /// with their `customer_id` cleared.
    pub fn delete_customer(&mut self, id: &str) -> LedgerResult<Customer> {
        let Some(pos) = self.state.customers.iter().position(|c| c.id == id) else {
            return Err(self.fail(LedgerError::CustomerNotFound(id.to_string())));
        };
        let customer = self.state.customers.remove(pos);

        for build in &mut self.state.builds {
            if build.customer_id.as_deref() == Some(id) {
                build.customer_id = None;
            }
        }

        info!(customer_id = %id, "customer deleted");
        self.feed
            .success(format!("Customer \"{}\" removed.", customer.name));
        Ok(customer)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Records a rejected operation in the feed and hands the error back.
    /// Called before any state mutation, so the collections are untouched.
    fn fail(&mut self, err: LedgerError) -> LedgerError {
        warn!(error = %err, "ledger operation rejected");
        self.feed.error(err.to_string());
        err
    }
}

/// SKUs are stored uppercase by convention.
fn normalize_sku(sku: &str) -> String {
    sku.trim().to_ascii_uppercase()
}

/// Blank optional fields are stored as absent, not as empty strings.
fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_product_draft(draft: &ProductDraft) -> Result<(), ValidationError> {
    validate_name("name", &draft.name)?;
    validate_sku(&draft.sku)?;
    validate_price_cents(draft.price_cents)?;
    validate_quantity(draft.quantity)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::ComponentSelection;
    use crate::notify::Severity;
    use rigforge_core::ProductCategory;

    fn draft(name: &str, sku: &str, price_cents: i64, quantity: i64, serialized: bool) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            category: ProductCategory::Cpu,
            price_cents,
            quantity,
            is_serialized: serialized,
            sku: sku.to_string(),
        }
    }

    fn customer_draft(name: &str) -> CustomerDraft {
        CustomerDraft {
            name: name.to_string(),
            ..CustomerDraft::default()
        }
    }

    /// Serialized "Ryzen 9" at $400, then one serial registered.
    #[test]
    fn test_add_serialized_product_then_serial() {
        let mut ledger = Ledger::new();
        let product = ledger
            .add_product(draft("Ryzen 9", "CPU-1", 40000, 7, true))
            .unwrap();

        // Serialized products ignore the drafted quantity
        assert_eq!(product.quantity, 0);

        ledger.add_serial_number(&product.id, "SN001").unwrap();

        let product = ledger.product(&product.id).unwrap();
        assert_eq!(product.quantity, 1);

        let serials: Vec<_> = ledger.serials_for_product(&product.id).collect();
        assert_eq!(serials.len(), 1);
        assert_eq!(serials[0].serial_number, "SN001");
        assert_eq!(serials[0].status, SerialStatus::InStock);
    }

    #[test]
    fn test_sku_normalized_to_uppercase() {
        let mut ledger = Ledger::new();
        let product = ledger
            .add_product(draft("Ryzen 9", "cpu-5900x", 40000, 0, false))
            .unwrap();
        assert_eq!(product.sku, "CPU-5900X");
    }

    #[test]
    fn test_duplicate_serial_rejected_and_state_unchanged() {
        let mut ledger = Ledger::new();
        let product = ledger
            .add_product(draft("Ryzen 9", "CPU-1", 40000, 0, true))
            .unwrap();
        ledger.add_serial_number(&product.id, "SN001").unwrap();

        // Same case
        let err = ledger.add_serial_number(&product.id, "SN001").unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateSerial { .. }));

        // Different case: uniqueness is case-insensitive
        let err = ledger.add_serial_number(&product.id, "sn001").unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateSerial { .. }));

        // Idempotent rejection: nothing moved
        assert_eq!(ledger.serialized_items().len(), 1);
        assert_eq!(ledger.product(&product.id).unwrap().quantity, 1);
    }

    #[test]
    fn test_serial_rejected_for_unserialized_product() {
        let mut ledger = Ledger::new();
        let product = ledger
            .add_product(draft("Thermal Paste", "PASTE-1", 799, 10, false))
            .unwrap();

        let err = ledger.add_serial_number(&product.id, "SN001").unwrap_err();
        assert!(matches!(err, LedgerError::NotSerialized { .. }));
        assert!(ledger.serialized_items().is_empty());
        assert_eq!(ledger.product(&product.id).unwrap().quantity, 10);
    }

    #[test]
    fn test_serial_for_unknown_product() {
        let mut ledger = Ledger::new();
        let err = ledger.add_serial_number("ghost", "SN001").unwrap_err();
        assert!(matches!(err, LedgerError::ProductNotFound(_)));
    }

    #[test]
    fn test_update_serial_number() {
        let mut ledger = Ledger::new();
        let product = ledger
            .add_product(draft("Ryzen 9", "CPU-1", 40000, 0, true))
            .unwrap();
        let serial = ledger.add_serial_number(&product.id, "SN001").unwrap();

        let updated = ledger.update_serial_number(&serial.id, "SN002").unwrap();
        assert_eq!(updated.serial_number, "SN002");
        // Quantity unaffected by renames
        assert_eq!(ledger.product(&product.id).unwrap().quantity, 1);
    }

    #[test]
    fn test_update_serial_rejects_case_insensitive_collision() {
        let mut ledger = Ledger::new();
        let product = ledger
            .add_product(draft("Ryzen 9", "CPU-1", 40000, 0, true))
            .unwrap();
        ledger.add_serial_number(&product.id, "SN001").unwrap();
        let second = ledger.add_serial_number(&product.id, "SN002").unwrap();

        let err = ledger.update_serial_number(&second.id, "sn001").unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateSerial { .. }));

        // Renaming to its own number (case change only) is allowed
        let renamed = ledger.update_serial_number(&second.id, "sn002").unwrap();
        assert_eq!(renamed.serial_number, "sn002");
    }

    #[test]
    fn test_update_serial_locked_when_used_in_build() {
        let mut ledger = Ledger::new();
        let cpu = ledger
            .add_product(draft("Ryzen 9", "CPU-1", 40000, 0, true))
            .unwrap();
        let serial = ledger.add_serial_number(&cpu.id, "SN001").unwrap();

        ledger
            .build_pc(BuildRequest {
                name: "Nova Prime".to_string(),
                serial_number: "PC-001".to_string(),
                components: vec![ComponentSelection {
                    product_id: cpu.id.clone(),
                    serial_id: Some(serial.id.clone()),
                }],
                customer_id: None,
            })
            .unwrap();

        let err = ledger.update_serial_number(&serial.id, "SN099").unwrap_err();
        assert!(matches!(err, LedgerError::SerialLocked { .. }));

        // Serial number unchanged
        let unchanged = ledger
            .serialized_items()
            .iter()
            .find(|s| s.id == serial.id)
            .unwrap();
        assert_eq!(unchanged.serial_number, "SN001");
    }

    #[test]
    fn test_delete_serial_decrements_and_strips_builds() {
        let mut ledger = Ledger::new();
        let cpu = ledger
            .add_product(draft("Ryzen 9", "CPU-1", 40000, 0, true))
            .unwrap();
        let psu = ledger
            .add_product(draft("RM850", "PSU-1", 8950, 3, false))
            .unwrap();
        let serial = ledger.add_serial_number(&cpu.id, "SN001").unwrap();

        let receipt = ledger
            .build_pc(BuildRequest {
                name: "Nova Prime".to_string(),
                serial_number: "PC-001".to_string(),
                components: vec![
                    ComponentSelection {
                        product_id: cpu.id.clone(),
                        serial_id: Some(serial.id.clone()),
                    },
                    ComponentSelection {
                        product_id: psu.id.clone(),
                        serial_id: None,
                    },
                ],
                customer_id: None,
            })
            .unwrap();

        ledger.delete_serial_number(&serial.id).unwrap();

        assert_eq!(ledger.product(&cpu.id).unwrap().quantity, 0);
        let build = &ledger.builds()[0];
        assert_eq!(build.id, receipt.build.id);
        // Only the product component remains in the build record
        assert_eq!(
            build.component_ids,
            vec![ComponentRef::Product(psu.id.clone())]
        );

        // Floor at zero: deleting the Custom PC's own serial later
        let pc_serial_id = receipt.pc_serial.id.clone();
        ledger.delete_serial_number(&pc_serial_id).unwrap();
        let err = ledger.delete_serial_number(&pc_serial_id).unwrap_err();
        assert!(matches!(err, LedgerError::SerialNotFound(_)));
    }

    #[test]
    fn test_delete_product_cascades() {
        let mut ledger = Ledger::new();
        let cpu = ledger
            .add_product(draft("Ryzen 9", "CPU-1", 40000, 0, true))
            .unwrap();
        let psu = ledger
            .add_product(draft("RM850", "PSU-1", 8950, 3, false))
            .unwrap();
        let s1 = ledger.add_serial_number(&cpu.id, "SN001").unwrap();
        ledger.add_serial_number(&cpu.id, "SN002").unwrap();

        ledger
            .build_pc(BuildRequest {
                name: "Nova Prime".to_string(),
                serial_number: "PC-001".to_string(),
                components: vec![
                    ComponentSelection {
                        product_id: cpu.id.clone(),
                        serial_id: Some(s1.id.clone()),
                    },
                    ComponentSelection {
                        product_id: psu.id.clone(),
                        serial_id: None,
                    },
                ],
                customer_id: None,
            })
            .unwrap();

        ledger.delete_product(&cpu.id).unwrap();

        // Product gone, every serial of it gone
        assert!(ledger.product(&cpu.id).is_none());
        assert!(ledger.serials_for_product(&cpu.id).next().is_none());

        // Build remains but the CPU serial is stripped from its components
        let build = &ledger.builds()[0];
        assert_eq!(
            build.component_ids,
            vec![ComponentRef::Product(psu.id.clone())]
        );
    }

    #[test]
    fn test_delete_product_not_found() {
        let mut ledger = Ledger::new();
        let err = ledger.delete_product("ghost").unwrap_err();
        assert!(matches!(err, LedgerError::ProductNotFound(_)));

        let last = ledger.notifications().last().unwrap();
        assert_eq!(last.severity, Severity::Error);
    }

    #[test]
    fn test_update_product_unknown_is_silent_noop() {
        let mut ledger = Ledger::new();
        let before = ledger.notifications().len();
        let result = ledger
            .update_product("ghost", draft("X", "SKU-X", 100, 0, false))
            .unwrap();
        assert!(result.is_none());
        // Silent: no notification either way
        assert_eq!(ledger.notifications().len(), before);
    }

    #[test]
    fn test_update_product_serialization_transition_resets_quantity() {
        let mut ledger = Ledger::new();
        let product = ledger
            .add_product(draft("RM850", "PSU-1", 8950, 5, false))
            .unwrap();

        let updated = ledger
            .update_product(&product.id, draft("RM850", "PSU-1", 8950, 5, true))
            .unwrap()
            .unwrap();
        assert_eq!(updated.quantity, 0);
        assert!(updated.is_serialized);
    }

    #[test]
    fn test_update_product_keeps_derived_quantity_while_serialized() {
        let mut ledger = Ledger::new();
        let product = ledger
            .add_product(draft("Ryzen 9", "CPU-1", 40000, 0, true))
            .unwrap();
        ledger.add_serial_number(&product.id, "SN001").unwrap();
        ledger.add_serial_number(&product.id, "SN002").unwrap();

        // Draft claims quantity 99; the derived count wins
        let updated = ledger
            .update_product(&product.id, draft("Ryzen 9", "CPU-1", 41000, 99, true))
            .unwrap()
            .unwrap();
        assert_eq!(updated.quantity, 2);
        assert_eq!(updated.price_cents, 41000);
    }

    #[test]
    fn test_customer_crud_and_cascade() {
        let mut ledger = Ledger::new();
        let customer = ledger.add_customer(customer_draft("Mads Jensen")).unwrap();

        let updated = ledger
            .update_customer(
                &customer.id,
                CustomerDraft {
                    name: "Mads Jensen".to_string(),
                    email: Some("mads@example.com".to_string()),
                    phone: Some("   ".to_string()),
                    address: None,
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.email.as_deref(), Some("mads@example.com"));
        // Blank fields normalize to absent
        assert_eq!(updated.phone, None);

        // Silent no-op for unknown id
        assert!(ledger
            .update_customer("ghost", customer_draft("Nobody"))
            .unwrap()
            .is_none());

        // Build owned by the customer
        let psu = ledger
            .add_product(draft("RM850", "PSU-1", 8950, 3, false))
            .unwrap();
        ledger
            .build_pc(BuildRequest {
                name: "Office PC".to_string(),
                serial_number: "PC-001".to_string(),
                components: vec![ComponentSelection {
                    product_id: psu.id.clone(),
                    serial_id: None,
                }],
                customer_id: Some(customer.id.clone()),
            })
            .unwrap();

        ledger.delete_customer(&customer.id).unwrap();

        // The build remains, unassigned
        assert_eq!(ledger.builds().len(), 1);
        assert_eq!(ledger.builds()[0].customer_id, None);

        let err = ledger.delete_customer(&customer.id).unwrap_err();
        assert!(matches!(err, LedgerError::CustomerNotFound(_)));
    }

    #[test]
    fn test_failed_build_leaves_state_unchanged() {
        let mut ledger = Ledger::new();
        let psu = ledger
            .add_product(draft("RM850", "PSU-1", 8950, 1, false))
            .unwrap();
        let before = ledger.snapshot();

        let err = ledger
            .build_pc(BuildRequest {
                name: "Over Ambitious".to_string(),
                serial_number: "PC-001".to_string(),
                components: vec![
                    ComponentSelection {
                        product_id: psu.id.clone(),
                        serial_id: None,
                    },
                    ComponentSelection {
                        product_id: psu.id.clone(),
                        serial_id: None,
                    },
                ],
                customer_id: None,
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientStock { .. }));

        let after = ledger.snapshot();
        assert_eq!(after.products.len(), before.products.len());
        assert_eq!(after.builds.len(), before.builds.len());
        assert_eq!(after.product(&psu.id).unwrap().quantity, 1);

        // The rejection itself is user-visible
        let last = ledger.notifications().last().unwrap();
        assert_eq!(last.severity, Severity::Error);
        assert!(last.message.contains("Insufficient stock"));
    }

    #[test]
    fn test_notifications_and_dismiss() {
        let mut ledger = Ledger::new();
        ledger
            .add_product(draft("RM850", "PSU-1", 8950, 3, false))
            .unwrap();

        assert_eq!(ledger.notifications().len(), 1);
        assert_eq!(
            ledger.notifications()[0].message,
            "Product \"RM850\" added."
        );

        let id = ledger.notifications()[0].id.clone();
        assert!(ledger.dismiss_notification(&id));
        assert!(ledger.notifications().is_empty());
    }

    #[test]
    fn test_validation_failures_reject_drafts() {
        let mut ledger = Ledger::new();
        assert!(ledger
            .add_product(draft("", "SKU-1", 100, 0, false))
            .is_err());
        assert!(ledger
            .add_product(draft("Name", "bad sku", 100, 0, false))
            .is_err());
        assert!(ledger
            .add_product(draft("Name", "SKU-1", -1, 0, false))
            .is_err());
        assert!(ledger
            .add_product(draft("Name", "SKU-1", 100, -1, false))
            .is_err());
        assert!(ledger.add_customer(customer_draft("  ")).is_err());
        assert!(ledger.products().is_empty());
        assert!(ledger.customers().is_empty());
    }

    #[test]
    fn test_quantity_invariant_across_operation_mix() {
        let mut ledger = Ledger::new();
        let cpu = ledger
            .add_product(draft("Ryzen 9", "CPU-1", 40000, 0, true))
            .unwrap();
        let s1 = ledger.add_serial_number(&cpu.id, "SN001").unwrap();
        ledger.add_serial_number(&cpu.id, "SN002").unwrap();
        ledger.delete_serial_number(&s1.id).unwrap();
        ledger.add_serial_number(&cpu.id, "SN003").unwrap();

        assert!(ledger.snapshot().audit_serialized_quantities().is_empty());
        assert_eq!(ledger.product(&cpu.id).unwrap().quantity, 2);
    }
}
