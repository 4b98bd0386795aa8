//! `kiosk-cart` — the shopping cart state holder.

pub mod cart;

pub use cart::Cart;
