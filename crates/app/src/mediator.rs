//! The mediator: one reaction per event, no reaction calls another.
//!
//! Each reaction follows the same discipline: read what it needs from the
//! UI state and drop that borrow, mutate holders (which may re-enter other
//! reactions through the bus, synchronously), then render and commit the new
//! UI state. Holders commit before they emit, so a nested reaction always
//! observes consistent state.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Context;

use kiosk_cart::Cart;
use kiosk_catalog::{CatalogState, Product};
use kiosk_checkout::{FormField, FormGroup, OrderForm, OrderPayload, OrderReceipt, OrderSubmitter};
use kiosk_core::ProductId;
use kiosk_events::{EventBus, Handler, Payload, SubjectKey, names};

use crate::ui_state::UiState;
use crate::view::{CardSnapshot, CartLine, CartSnapshot, FormSnapshot, PreviewExtras, ViewSurface};

struct Shared {
    catalog: Rc<CatalogState>,
    cart: Rc<Cart>,
    form: Rc<OrderForm>,
    submitter: Rc<OrderSubmitter>,
    view: Rc<RefCell<dyn ViewSurface>>,
    ui: RefCell<UiState>,
    /// Guards against duplicate order submissions while one is pending.
    in_flight: Cell<bool>,
}

/// Subscribes the reaction table to a bus and keeps the handles so the whole
/// table can be detached again.
pub struct Mediator {
    bus: Rc<EventBus>,
    shared: Rc<Shared>,
    subscriptions: Vec<(SubjectKey, Handler)>,
}

impl Mediator {
    pub fn attach(
        bus: Rc<EventBus>,
        catalog: Rc<CatalogState>,
        cart: Rc<Cart>,
        form: Rc<OrderForm>,
        submitter: Rc<OrderSubmitter>,
        view: Rc<RefCell<dyn ViewSurface>>,
    ) -> Self {
        let shared = Rc::new(Shared {
            catalog,
            cart,
            form,
            submitter,
            view,
            ui: RefCell::new(UiState::default()),
            in_flight: Cell::new(false),
        });

        let mut mediator = Self {
            bus,
            shared,
            subscriptions: Vec::new(),
        };

        // Observe the whole vocabulary for diagnostics.
        mediator.react_to(SubjectKey::pattern("*"), |_, name, _| {
            tracing::debug!(event = name, "event observed");
            Ok(())
        });

        mediator.react_to(names::PRODUCTS_LOADED, |s, _, p| s.on_products_loaded(p));
        mediator.react_to(names::CARD_SELECT, |s, _, p| s.on_card_select(p));
        mediator.react_to(names::CART_ADD, |s, _, p| s.on_cart_add(p));
        mediator.react_to(names::CART_REMOVE, |s, _, p| s.on_cart_remove(p));
        mediator.react_to(names::CART_CHANGED, |s, _, _| s.on_cart_changed());
        mediator.react_to(names::CART_OPEN, |s, _, _| s.on_cart_open());
        mediator.react_to(names::ORDER_OPEN, |s, _, _| s.on_order_open());
        mediator.react_to(names::ORDER_PAYMENT, |s, _, p| {
            s.on_field_input(FormField::Payment, FormGroup::Order, p)
        });
        mediator.react_to(names::ORDER_ADDRESS, |s, _, p| {
            s.on_field_input(FormField::Address, FormGroup::Order, p)
        });
        mediator.react_to(names::ORDER_SUBMIT, |s, _, _| s.on_order_submit());
        mediator.react_to(names::CONTACTS_EMAIL, |s, _, p| {
            s.on_field_input(FormField::Email, FormGroup::Contacts, p)
        });
        mediator.react_to(names::CONTACTS_PHONE, |s, _, p| {
            s.on_field_input(FormField::Phone, FormGroup::Contacts, p)
        });
        mediator.react_to(names::CONTACTS_SUBMIT, |s, _, _| s.on_contacts_submit());
        mediator.react_to(names::ORDER_SUCCESS, |s, _, p| s.on_order_success(p));
        mediator.react_to(names::ORDER_ERROR, |s, _, p| s.on_order_error(p));
        mediator.react_to(names::MODAL_CLOSE, |s, _, _| s.on_modal_close());

        mediator
    }

    fn react_to(
        &mut self,
        key: impl Into<SubjectKey>,
        reaction: impl Fn(&Shared, &str, &Payload) -> anyhow::Result<()> + 'static,
    ) {
        let key = key.into();
        let shared = Rc::clone(&self.shared);
        let handler = self.bus.on(key.clone(), move |name, payload| {
            reaction(&shared, name, payload)
        });
        self.subscriptions.push((key, handler));
    }

    /// Unsubscribe every reaction. The mediator is inert afterwards.
    pub fn detach(&mut self) {
        for (key, handler) in self.subscriptions.drain(..) {
            self.bus.unsubscribe(key, &handler);
        }
    }

    pub fn ui_state(&self) -> UiState {
        self.shared.ui.borrow().clone()
    }

    pub fn submission_in_flight(&self) -> bool {
        self.shared.in_flight.get()
    }
}

impl Drop for Mediator {
    fn drop(&mut self) {
        self.detach();
    }
}

impl Shared {
    fn on_products_loaded(&self, payload: &Payload) -> anyhow::Result<()> {
        let products: Vec<Product> =
            serde_json::from_value(payload.clone()).context("products:loaded payload")?;
        self.catalog.set_products(products.clone());

        let cards: Vec<CardSnapshot> = products.iter().map(CardSnapshot::from_product).collect();
        self.view.borrow_mut().render_gallery(&cards);
        Ok(())
    }

    fn on_card_select(&self, payload: &Payload) -> anyhow::Result<()> {
        let product: Product =
            serde_json::from_value(payload.clone()).context("card:select payload")?;
        self.catalog.set_selected(product.clone());
        self.render_preview_of(&product);
        *self.ui.borrow_mut() = UiState::PreviewOpen(product.id);
        Ok(())
    }

    fn on_cart_add(&self, payload: &Payload) -> anyhow::Result<()> {
        let product: Product =
            serde_json::from_value(payload.clone()).context("cart:add payload")?;
        let id = product.id.clone();

        // `cart:changed` reactions run inside this call, while the preview
        // (if any) is still on screen.
        match self.cart.add_item(product) {
            Ok(true) => {}
            Ok(false) => tracing::debug!(product = %id, "already in cart"),
            Err(err) => tracing::warn!(product = %id, error = %err, "cart addition rejected"),
        }

        {
            let mut view = self.view.borrow_mut();
            view.set_cart_counter(self.cart.count());
            view.close_modal();
        }
        *self.ui.borrow_mut() = UiState::ViewingCatalog;
        Ok(())
    }

    fn on_cart_remove(&self, payload: &Payload) -> anyhow::Result<()> {
        let id: ProductId =
            serde_json::from_value(payload.clone()).context("cart:remove payload")?;
        if !self.cart.remove_item(&id) {
            tracing::debug!(product = %id, "remove for item not in cart");
        }
        Ok(())
    }

    fn on_cart_changed(&self) -> anyhow::Result<()> {
        let ui = self.ui.borrow().clone();
        self.view.borrow_mut().set_cart_counter(self.cart.count());

        match ui {
            UiState::CartOpen => self.render_cart(),
            UiState::PreviewOpen(id) => {
                if let Some(selected) = self.catalog.selected() {
                    if selected.id == id {
                        self.render_preview_of(&selected);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn on_cart_open(&self) -> anyhow::Result<()> {
        self.render_cart();
        *self.ui.borrow_mut() = UiState::CartOpen;
        Ok(())
    }

    fn on_order_open(&self) -> anyhow::Result<()> {
        self.form.reset();
        self.render_form_step(FormGroup::Order);
        *self.ui.borrow_mut() = UiState::OrderFormOpen;
        Ok(())
    }

    fn on_field_input(
        &self,
        field: FormField,
        group: FormGroup,
        payload: &Payload,
    ) -> anyhow::Result<()> {
        let value: String = serde_json::from_value(payload.clone())
            .with_context(|| format!("{field} field payload"))?;
        self.form.set_field(field, value);
        self.render_form_step(group);
        Ok(())
    }

    fn on_order_submit(&self) -> anyhow::Result<()> {
        if self.form.validate_group(FormGroup::Order).is_valid() {
            self.render_form_step(FormGroup::Contacts);
            *self.ui.borrow_mut() = UiState::ContactsFormOpen;
        } else {
            self.render_form_step(FormGroup::Order);
        }
        Ok(())
    }

    fn on_contacts_submit(&self) -> anyhow::Result<()> {
        if self.in_flight.get() {
            tracing::warn!("order submission already in flight, ignoring");
            return Ok(());
        }
        if !self.form.validate_group(FormGroup::Contacts).is_valid() {
            self.render_form_step(FormGroup::Contacts);
            return Ok(());
        }
        if !self.form.validate_group(FormGroup::Order).is_valid() {
            // Unreachable through the two-step flow; an order payload is
            // never built from a partially valid form.
            tracing::warn!("contacts submitted while order details are invalid");
            self.render_form_step(FormGroup::Order);
            return Ok(());
        }

        let payload = OrderPayload {
            details: self.form.data(),
            items: self.cart.item_ids(),
            total: self.cart.total(),
        };
        self.in_flight.set(true);
        // Completion arrives as order:success / order:error, possibly before
        // this call returns.
        self.submitter.submit_order(payload);
        Ok(())
    }

    fn on_order_success(&self, payload: &Payload) -> anyhow::Result<()> {
        self.in_flight.set(false);
        let receipt: OrderReceipt =
            serde_json::from_value(payload.clone()).context("order:success payload")?;

        self.cart.clear();
        self.form.reset();
        {
            let mut view = self.view.borrow_mut();
            view.set_cart_counter(self.cart.count());
            view.render_success(&receipt);
        }
        *self.ui.borrow_mut() = UiState::SuccessShown;
        Ok(())
    }

    fn on_order_error(&self, payload: &Payload) -> anyhow::Result<()> {
        self.in_flight.set(false);
        let message = payload
            .get("message")
            .and_then(Payload::as_str)
            .unwrap_or("order submission failed")
            .to_string();
        // Deliberately no cart/form reset: the user can fix and resubmit.
        self.view.borrow_mut().render_order_failure(&message);
        Ok(())
    }

    fn on_modal_close(&self) -> anyhow::Result<()> {
        *self.ui.borrow_mut() = UiState::Idle;
        Ok(())
    }

    fn render_preview_of(&self, product: &Product) {
        let extras = PreviewExtras {
            description: product.description.clone(),
            in_cart: self.cart.contains(&product.id),
            purchasable: product.is_purchasable(),
        };
        self.view
            .borrow_mut()
            .render_preview(&CardSnapshot::from_product(product), &extras);
    }

    fn render_cart(&self) {
        let lines = self
            .cart
            .items()
            .iter()
            .enumerate()
            .map(|(i, p)| CartLine {
                index: i + 1,
                id: p.id.clone(),
                title: p.title.clone(),
                price: p.price,
            })
            .collect();
        let snapshot = CartSnapshot {
            lines,
            total: self.cart.total(),
        };
        self.view.borrow_mut().render_cart(&snapshot);
    }

    fn render_form_step(&self, group: FormGroup) {
        let validation = self.form.validate_group(group);
        let snapshot = FormSnapshot {
            data: self.form.data(),
            valid: validation.is_valid(),
            errors: validation.errors().clone(),
        };
        let mut view = self.view.borrow_mut();
        match group {
            FormGroup::Order => view.render_order_step(&snapshot),
            FormGroup::Contacts => view.render_contacts_step(&snapshot),
        }
    }
}
