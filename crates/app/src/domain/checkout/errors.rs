//! Checkout errors.

use thali::{entries::DishName, pricing::TotalError};
use thiserror::Error;

use crate::{
    domain::{buyers::BuyersRepositoryError, sellers::SellersRepositoryError},
    identity::IdentityError,
    payment::PaymentError,
    storage::StorageError,
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("sign in to place an order")]
    NotSignedIn,

    #[error("the cart is empty")]
    EmptyCart,

    #[error("could not find a seller for {0}; try adding the dish to the cart again")]
    UnresolvedDish(DishName),

    #[error(transparent)]
    Totals(#[from] TotalError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Sellers(#[from] SellersRepositoryError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// An append failed after the commit fan-out started. There is no
    /// multi-document transaction behind it, so some records may already
    /// be written; the cart is left intact for a retry.
    #[error("order commit did not fully complete; records may be partially written")]
    CommitFailed(#[source] CommitSource),
}

/// The repository error behind a failed commit append.
#[derive(Debug, Error)]
pub enum CommitSource {
    #[error(transparent)]
    Sellers(#[from] SellersRepositoryError),

    #[error(transparent)]
    Buyers(#[from] BuyersRepositoryError),
}
