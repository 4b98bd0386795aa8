//! UI state as tracked by the mediator.

use kiosk_core::ProductId;

/// What is currently on screen.
///
/// The mediator needs this because several reactions branch on it: a cart
/// change re-renders the cart only while the cart is open, and refreshes an
/// open preview only when it shows the product in question.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    /// Nothing modal, nothing highlighted.
    Idle,
    /// The gallery is the active surface.
    #[default]
    ViewingCatalog,
    /// A product preview modal is open.
    PreviewOpen(ProductId),
    /// The cart modal is open.
    CartOpen,
    /// Checkout step 1 (payment + address).
    OrderFormOpen,
    /// Checkout step 2 (email + phone).
    ContactsFormOpen,
    /// The order confirmation panel.
    SuccessShown,
}

impl UiState {
    pub fn is_cart_open(&self) -> bool {
        matches!(self, Self::CartOpen)
    }

    /// The product whose preview is open, if any.
    pub fn preview_product(&self) -> Option<&ProductId> {
        match self {
            Self::PreviewOpen(id) => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_viewing_catalog() {
        assert_eq!(UiState::default(), UiState::ViewingCatalog);
    }

    #[test]
    fn preview_product_is_only_set_while_previewing() {
        let id = ProductId::new("p-1");
        assert_eq!(UiState::PreviewOpen(id.clone()).preview_product(), Some(&id));
        assert_eq!(UiState::CartOpen.preview_product(), None);
    }
}
