//! Menu administration errors.

use thali::prices::PriceParseError;
use thiserror::Error;

use crate::{
    domain::sellers::SellersRepositoryError, media::MediaError, storage::StorageError,
};

#[derive(Debug, Error)]
pub enum MenuAdminError {
    #[error("enter a valid 10-digit contact number")]
    InvalidContact,

    #[error("no seller is registered with this contact number")]
    UnknownContact,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("choose an image for the dish")]
    MissingImage,

    #[error(transparent)]
    InvalidPrice(#[from] PriceParseError),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Sellers(#[from] SellersRepositoryError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
