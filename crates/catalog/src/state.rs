//! Catalog state holder.

use std::cell::RefCell;
use std::rc::Rc;

use kiosk_core::ProductId;
use kiosk_events::{EventBus, names};

use crate::product::Product;

/// Owns the loaded product list and the currently selected product.
///
/// Mutations commit fully before their announcement is emitted, so a
/// re-entrant reaction always reads consistent state. Read accessors never
/// emit.
#[derive(Debug)]
pub struct CatalogState {
    products: RefCell<Vec<Product>>,
    selected: RefCell<Option<Product>>,
    bus: Rc<EventBus>,
}

impl CatalogState {
    pub fn new(bus: Rc<EventBus>) -> Self {
        Self {
            products: RefCell::new(Vec::new()),
            selected: RefCell::new(None),
            bus,
        }
    }

    /// Replace the product list; announces `products:changed`.
    pub fn set_products(&self, products: Vec<Product>) {
        *self.products.borrow_mut() = products;
        self.bus.emit_unit(names::PRODUCTS_CHANGED);
    }

    /// Select a product; announces `product:selected` carrying the product.
    pub fn set_selected(&self, product: Product) {
        *self.selected.borrow_mut() = Some(product.clone());
        self.bus.emit_serialized(names::PRODUCT_SELECTED, &product);
    }

    pub fn products(&self) -> Vec<Product> {
        self.products.borrow().clone()
    }

    pub fn selected(&self) -> Option<Product> {
        self.selected.borrow().clone()
    }

    pub fn product_by_id(&self, id: &ProductId) -> Option<Product> {
        self.products.borrow().iter().find(|p| &p.id == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Category;

    fn product(id: &str, price: Option<u64>) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("product {id}"),
            description: String::new(),
            image: format!("/{id}.png"),
            category: Category::Other,
            price,
        }
    }

    #[test]
    fn set_products_announces_and_commits_before_emitting() {
        let bus = Rc::new(EventBus::with_journal(8));
        let state = Rc::new(CatalogState::new(Rc::clone(&bus)));

        // The reaction must observe the already-committed list.
        let observed = Rc::new(RefCell::new(0usize));
        {
            let state = Rc::clone(&state);
            let observed = Rc::clone(&observed);
            bus.on(names::PRODUCTS_CHANGED, move |_, _| {
                *observed.borrow_mut() = state.products().len();
                Ok(())
            });
        }

        state.set_products(vec![product("a", Some(10)), product("b", None)]);

        assert_eq!(*observed.borrow(), 2);
        assert_eq!(
            bus.journal().unwrap().names(),
            vec![names::PRODUCTS_CHANGED.to_string()]
        );
    }

    #[test]
    fn set_selected_carries_the_product_in_the_payload() {
        let bus = Rc::new(EventBus::new());
        let state = CatalogState::new(Rc::clone(&bus));

        let seen = Rc::new(RefCell::new(None));
        {
            let seen = Rc::clone(&seen);
            bus.on(names::PRODUCT_SELECTED, move |_, payload| {
                let p: Product = serde_json::from_value(payload.clone())?;
                *seen.borrow_mut() = Some(p);
                Ok(())
            });
        }

        state.set_selected(product("a", Some(100)));

        assert_eq!(seen.borrow().as_ref().unwrap().id, ProductId::new("a"));
        assert_eq!(state.selected().unwrap().price, Some(100));
    }

    #[test]
    fn product_by_id_finds_loaded_products() {
        let bus = Rc::new(EventBus::new());
        let state = CatalogState::new(bus);
        state.set_products(vec![product("a", Some(10))]);

        assert!(state.product_by_id(&ProductId::new("a")).is_some());
        assert!(state.product_by_id(&ProductId::new("zzz")).is_none());
    }
}
