//! Buyers repository errors.

use thiserror::Error;

use crate::{documents::DocumentStoreError, identity::BuyerId};

#[derive(Debug, Error)]
pub enum BuyersRepositoryError {
    #[error("buyer profile {0} not found")]
    NotFound(BuyerId),

    #[error("buyer document is malformed")]
    Shape(#[source] serde_json::Error),

    #[error(transparent)]
    Store(#[from] DocumentStoreError),
}
