//! Buyers repository.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    documents::{DocumentStore, from_document, to_document},
    domain::orders::BuyerOrder,
    identity::BuyerId,
};

use super::{
    errors::BuyersRepositoryError,
    models::{BuyerProfile, NewBuyerProfile},
};

/// Collection holding one profile document per buyer.
pub const BUYERS_COLLECTION: &str = "users";

#[automock]
#[async_trait]
pub trait BuyersRepository: Send + Sync {
    /// Writes the initial profile document for a fresh account.
    async fn create_profile(&self, profile: NewBuyerProfile)
    -> Result<(), BuyersRepositoryError>;

    /// Retrieve a single buyer profile.
    async fn get_profile(&self, id: &BuyerId) -> Result<BuyerProfile, BuyersRepositoryError>;

    /// Appends order entries to the buyer's history in one batch.
    async fn append_orders(
        &self,
        id: &BuyerId,
        orders: &[BuyerOrder],
    ) -> Result<(), BuyersRepositoryError>;

    /// Retrieves the buyer's order history.
    async fn list_orders(&self, id: &BuyerId) -> Result<Vec<BuyerOrder>, BuyersRepositoryError>;
}

/// [`BuyersRepository`] over the hosted document store.
#[derive(Clone)]
pub struct DocBuyersRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocBuyersRepository {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        DocBuyersRepository { store }
    }
}

#[async_trait]
impl BuyersRepository for DocBuyersRepository {
    async fn create_profile(
        &self,
        profile: NewBuyerProfile,
    ) -> Result<(), BuyersRepositoryError> {
        let record = BuyerProfile {
            id: BuyerId::default(),
            name: profile.name,
            email: profile.email,
            account_type: "customer".to_owned(),
            created_at: Some(Timestamp::now()),
            orders: Vec::new(),
            favorites: Vec::new(),
        };

        let fields = to_document(&record).map_err(BuyersRepositoryError::Shape)?;

        self.store
            .set_document(BUYERS_COLLECTION, profile.id.as_str(), fields)
            .await?;

        Ok(())
    }

    async fn get_profile(&self, id: &BuyerId) -> Result<BuyerProfile, BuyersRepositoryError> {
        let fields = self
            .store
            .get_document(BUYERS_COLLECTION, id.as_str())
            .await?
            .ok_or_else(|| BuyersRepositoryError::NotFound(id.clone()))?;

        let mut profile: BuyerProfile =
            from_document(fields).map_err(BuyersRepositoryError::Shape)?;
        profile.id = id.clone();

        Ok(profile)
    }

    async fn append_orders(
        &self,
        id: &BuyerId,
        orders: &[BuyerOrder],
    ) -> Result<(), BuyersRepositoryError> {
        let values = orders
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(BuyersRepositoryError::Shape)?;

        self.store
            .append_to_array(BUYERS_COLLECTION, id.as_str(), "orders", values)
            .await?;

        Ok(())
    }

    async fn list_orders(&self, id: &BuyerId) -> Result<Vec<BuyerOrder>, BuyersRepositoryError> {
        Ok(self.get_profile(id).await?.orders)
    }
}
