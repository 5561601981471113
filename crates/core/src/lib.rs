//! Thali
//!
//! Core cart and order-total model for the Thali food-ordering storefront:
//! minor-unit money arithmetic, cart entries, and the cart store with its
//! quantity and identity rules.

pub mod cart;
pub mod entries;
pub mod prices;
pub mod pricing;
