//! Sellers

pub mod errors;
pub mod hours;
pub mod models;
pub mod repository;

pub use errors::SellersRepositoryError;
pub use repository::*;
