//! Render contract between the core and the view layer.
//!
//! The core hands the view plain state snapshots; the view produces whatever
//! displayable unit it likes and talks back exclusively by emitting the
//! event-name vocabulary. Renderers must not mutate state directly.

use kiosk_catalog::{Category, Product};
use kiosk_checkout::{FieldErrors, FormData, OrderReceipt};
use kiosk_core::ProductId;

/// The part of a product every card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSnapshot {
    pub id: ProductId,
    pub title: String,
    pub category: Category,
    pub image: String,
    pub price: Option<u64>,
}

impl CardSnapshot {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            category: product.category,
            image: product.image.clone(),
            price: product.price,
        }
    }
}

/// Extension block for the preview rendition of a card.
///
/// Composed next to the base snapshot instead of subclassing the card
/// renderer; a preview is a card plus this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewExtras {
    pub description: String,
    /// Whether the previewed product is already in the cart.
    pub in_cart: bool,
    /// Whether the product can be bought at all (priceless items cannot).
    pub purchasable: bool,
}

/// One row of the cart listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// 1-based position, for display.
    pub index: usize,
    pub id: ProductId,
    pub title: String,
    pub price: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total: u64,
}

/// Form state for either checkout step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub data: FormData,
    pub errors: FieldErrors,
    /// Whether the step's submit control should be enabled.
    pub valid: bool,
}

/// Everything the mediator asks of the view layer.
///
/// Implementations are opaque to the core. All the core assumes is that
/// rendering is pure with respect to the snapshot passed in.
pub trait ViewSurface {
    fn render_gallery(&mut self, cards: &[CardSnapshot]);
    fn render_preview(&mut self, card: &CardSnapshot, extras: &PreviewExtras);
    fn render_cart(&mut self, cart: &CartSnapshot);
    fn render_order_step(&mut self, form: &FormSnapshot);
    fn render_contacts_step(&mut self, form: &FormSnapshot);
    fn render_success(&mut self, receipt: &OrderReceipt);
    fn render_order_failure(&mut self, message: &str);
    fn set_cart_counter(&mut self, count: usize);
    fn close_modal(&mut self);
}
