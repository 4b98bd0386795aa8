//! Event-name vocabulary.
//!
//! These names are the wire contract between the core and its collaborators
//! (views, gateways, bootstrap). Renaming any of them is a breaking change.

/// Bootstrap fetched the catalog and hands over the product list.
pub const PRODUCTS_LOADED: &str = "products:loaded";
/// The catalog holder committed a new product list.
pub const PRODUCTS_CHANGED: &str = "products:changed";

/// User selected a catalog card (payload: the product).
pub const CARD_SELECT: &str = "card:select";
/// The catalog holder committed a new selected product.
pub const PRODUCT_SELECTED: &str = "product:selected";

/// User asked to add a product to the cart (payload: the product).
pub const CART_ADD: &str = "cart:add";
/// User asked to remove a cart item (payload: the product id).
pub const CART_REMOVE: &str = "cart:remove";
/// The cart holder committed a membership change.
pub const CART_CHANGED: &str = "cart:changed";
/// User opened the cart panel.
pub const CART_OPEN: &str = "cart:open";

/// The form holder committed a field write or a reset.
pub const FORM_CHANGED: &str = "form:changed";

/// User started checkout (step 1).
pub const ORDER_OPEN: &str = "order:open";
/// User picked a payment method (payload: the method).
pub const ORDER_PAYMENT: &str = "order:payment";
/// User edited the delivery address (payload: the address).
pub const ORDER_ADDRESS: &str = "order:address";
/// User submitted checkout step 1.
pub const ORDER_SUBMIT: &str = "order:submit";

/// User edited the contact email (payload: the email).
pub const CONTACTS_EMAIL: &str = "contacts:email";
/// User edited the contact phone (payload: the phone).
pub const CONTACTS_PHONE: &str = "contacts:phone";
/// User submitted checkout step 2.
pub const CONTACTS_SUBMIT: &str = "contacts:submit";

/// The order service confirmed the order (payload: the receipt).
pub const ORDER_SUCCESS: &str = "order:success";
/// The order service rejected or failed the order (payload: `{"message"}`).
pub const ORDER_ERROR: &str = "order:error";

/// The modal surface opened.
pub const MODAL_OPEN: &str = "modal:open";
/// The modal surface closed.
pub const MODAL_CLOSE: &str = "modal:close";
