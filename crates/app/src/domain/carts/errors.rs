//! Cart session errors.

use thiserror::Error;

use crate::{identity::IdentityError, storage::StorageError};

#[derive(Debug, Error)]
pub enum CartSessionError {
    #[error("sign in to add items to the cart")]
    NotSignedIn,

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
