//! Sellers repository errors.

use thali::entries::SellerId;
use thiserror::Error;

use crate::documents::DocumentStoreError;

#[derive(Debug, Error)]
pub enum SellersRepositoryError {
    #[error("seller {0} not found")]
    NotFound(SellerId),

    #[error("no dish at menu position {0}")]
    UnknownDishIndex(usize),

    #[error("seller document is malformed")]
    Shape(#[source] serde_json::Error),

    #[error(transparent)]
    Store(#[from] DocumentStoreError),
}
