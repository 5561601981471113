//! Carts

pub mod errors;
pub mod service;

pub use errors::CartSessionError;
pub use service::*;
