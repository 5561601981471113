//! Buyers

pub mod errors;
pub mod models;
pub mod repository;

pub use errors::BuyersRepositoryError;
pub use repository::*;
