//! `kiosk-app` — the mediation layer.
//!
//! Wires the state holders, the view surface and the order gateway together
//! through the event bus. The mediator is the only component allowed to
//! touch more than one holder or renderer in a single reaction; everything
//! else communicates through named events.

pub mod mediator;
pub mod storefront;
pub mod ui_state;
pub mod view;

pub use mediator::Mediator;
pub use storefront::Storefront;
pub use ui_state::UiState;
pub use view::{CardSnapshot, CartLine, CartSnapshot, FormSnapshot, PreviewExtras, ViewSurface};
