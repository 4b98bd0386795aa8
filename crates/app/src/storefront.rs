//! Composition root: constructs the bus, the holders and the mediator.

use std::cell::RefCell;
use std::rc::Rc;

use kiosk_cart::Cart;
use kiosk_catalog::{CatalogError, CatalogGateway, CatalogState};
use kiosk_checkout::{OrderForm, OrderGateway, OrderSubmitter};
use kiosk_events::{EventBus, names};

use crate::mediator::Mediator;
use crate::view::ViewSurface;

/// Emissions kept around for diagnostics on the default bus.
const JOURNAL_CAPACITY: usize = 64;

/// A fully wired storefront core.
///
/// The host supplies the two opaque collaborators (view surface and order
/// gateway), drives everything else through the bus, and reads state back
/// through the accessors.
pub struct Storefront {
    bus: Rc<EventBus>,
    catalog: Rc<CatalogState>,
    cart: Rc<Cart>,
    form: Rc<OrderForm>,
    mediator: Mediator,
}

impl Storefront {
    pub fn new(view: Rc<RefCell<dyn ViewSurface>>, order_gateway: Rc<dyn OrderGateway>) -> Self {
        Self::with_bus(
            Rc::new(EventBus::with_journal(JOURNAL_CAPACITY)),
            view,
            order_gateway,
        )
    }

    /// Wire everything onto an existing bus (tests, embedding).
    pub fn with_bus(
        bus: Rc<EventBus>,
        view: Rc<RefCell<dyn ViewSurface>>,
        order_gateway: Rc<dyn OrderGateway>,
    ) -> Self {
        let catalog = Rc::new(CatalogState::new(Rc::clone(&bus)));
        let cart = Rc::new(Cart::new(Rc::clone(&bus)));
        let form = Rc::new(OrderForm::new(Rc::clone(&bus)));
        let submitter = Rc::new(OrderSubmitter::new(Rc::clone(&bus), order_gateway));

        let mediator = Mediator::attach(
            Rc::clone(&bus),
            Rc::clone(&catalog),
            Rc::clone(&cart),
            Rc::clone(&form),
            submitter,
            view,
        );

        Self {
            bus,
            catalog,
            cart,
            form,
            mediator,
        }
    }

    /// Fetch the catalog and announce it as `products:loaded`.
    ///
    /// Returns the number of products; fetch failures are logged here (the
    /// bootstrap boundary) and handed back for the host to decide.
    pub fn load_catalog(&self, gateway: &dyn CatalogGateway) -> Result<usize, CatalogError> {
        match gateway.fetch_products() {
            Ok(products) => {
                tracing::info!(products = products.len(), "catalog loaded");
                self.bus.emit_serialized(names::PRODUCTS_LOADED, &products);
                Ok(products.len())
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load catalog");
                Err(err)
            }
        }
    }

    pub fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn form(&self) -> &OrderForm {
        &self.form
    }

    pub fn mediator(&self) -> &Mediator {
        &self.mediator
    }
}
