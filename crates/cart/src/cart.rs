//! Cart state holder.

use std::cell::RefCell;
use std::rc::Rc;

use kiosk_catalog::Product;
use kiosk_core::{DomainError, DomainResult, ProductId};
use kiosk_events::{EventBus, names};

/// Owns the cart contents: a set of products deduplicated by id.
///
/// Every mutation that actually changes the contents emits exactly one
/// `cart:changed` after the change is committed; mutations that change
/// nothing emit nothing. Read accessors never emit.
#[derive(Debug)]
pub struct Cart {
    items: RefCell<Vec<Product>>,
    bus: Rc<EventBus>,
}

impl Cart {
    pub fn new(bus: Rc<EventBus>) -> Self {
        Self {
            items: RefCell::new(Vec::new()),
            bus,
        }
    }

    /// Add a product.
    ///
    /// A product without a price is not for sale and is rejected. Adding a
    /// product already in the cart is an idempotent no-op: `Ok(false)`, no
    /// emission. Returns `Ok(true)` when the item was actually added.
    pub fn add_item(&self, product: Product) -> DomainResult<bool> {
        if !product.is_purchasable() {
            return Err(DomainError::validation(format!(
                "product {} has no price and cannot be added to the cart",
                product.id
            )));
        }

        {
            let mut items = self.items.borrow_mut();
            if items.iter().any(|p| p.id == product.id) {
                return Ok(false);
            }
            items.push(product);
        }
        self.bus.emit_unit(names::CART_CHANGED);
        Ok(true)
    }

    /// Remove the item with `id`; returns whether anything was removed.
    pub fn remove_item(&self, id: &ProductId) -> bool {
        let removed = {
            let mut items = self.items.borrow_mut();
            let before = items.len();
            items.retain(|p| &p.id != id);
            items.len() != before
        };
        if removed {
            self.bus.emit_unit(names::CART_CHANGED);
        }
        removed
    }

    /// Empty the cart.
    ///
    /// The whole cart is cleared before the single `cart:changed` goes out,
    /// so no observer can see a half-cleared cart.
    pub fn clear(&self) {
        {
            let mut items = self.items.borrow_mut();
            if items.is_empty() {
                return;
            }
            items.clear();
        }
        self.bus.emit_unit(names::CART_CHANGED);
    }

    pub fn items(&self) -> Vec<Product> {
        self.items.borrow().clone()
    }

    pub fn item_ids(&self) -> Vec<ProductId> {
        self.items.borrow().iter().map(|p| p.id.clone()).collect()
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.borrow().iter().any(|p| &p.id == id)
    }

    /// Sum of item prices. Items without a price contribute 0 (they cannot
    /// normally get in, but the total stays well-defined regardless).
    pub fn total(&self) -> u64 {
        self.items
            .borrow()
            .iter()
            .map(|p| p.price.unwrap_or(0))
            .sum()
    }

    pub fn count(&self) -> usize {
        self.items.borrow().len()
    }
}
