//! `kiosk-checkout` — order form state, validation and order submission.

pub mod form;
pub mod order;
pub mod validation;

pub use form::{FormData, OrderForm};
pub use order::{OrderGateway, OrderPayload, OrderReceipt, OrderServiceError, OrderSubmitter};
pub use validation::{FieldErrors, FormField, FormGroup, GroupValidation};
