//! Sellers repository.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use thali::entries::SellerId;

use crate::documents::{DocumentStore, from_document, to_document};
use crate::domain::orders::SellerOrder;

use super::{
    errors::SellersRepositoryError,
    models::{MenuDish, NewSeller, Seller},
};

/// Collection holding one document per seller.
pub const SELLERS_COLLECTION: &str = "restaurants";

#[automock]
#[async_trait]
pub trait SellersRepository: Send + Sync {
    /// Registers a seller and returns its store-assigned id.
    async fn create_seller(&self, seller: NewSeller) -> Result<SellerId, SellersRepositoryError>;

    /// Retrieve a single seller.
    async fn get_seller(&self, id: &SellerId) -> Result<Seller, SellersRepositoryError>;

    /// Retrieves all sellers, in stable id order.
    async fn list_sellers(&self) -> Result<Vec<Seller>, SellersRepositoryError>;

    /// Finds the seller registered under the given contact number.
    async fn find_by_contact(&self, contact: &str)
    -> Result<Option<Seller>, SellersRepositoryError>;

    /// Appends a dish to the seller's menu.
    async fn add_dish(&self, id: &SellerId, dish: MenuDish) -> Result<(), SellersRepositoryError>;

    /// Replaces the dish at the given menu position.
    async fn replace_dish(
        &self,
        id: &SellerId,
        index: usize,
        dish: MenuDish,
    ) -> Result<(), SellersRepositoryError>;

    /// Appends order entries to the seller's order collection.
    async fn append_orders(
        &self,
        id: &SellerId,
        orders: &[SellerOrder],
    ) -> Result<(), SellersRepositoryError>;
}

/// [`SellersRepository`] over the hosted document store.
#[derive(Clone)]
pub struct DocSellersRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocSellersRepository {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        DocSellersRepository { store }
    }

    fn decode(id: &str, fields: crate::documents::Document) -> Result<Seller, SellersRepositoryError> {
        let mut seller: Seller = from_document(fields).map_err(SellersRepositoryError::Shape)?;
        seller.id = SellerId::new(id);

        Ok(seller)
    }
}

#[async_trait]
impl SellersRepository for DocSellersRepository {
    async fn create_seller(&self, seller: NewSeller) -> Result<SellerId, SellersRepositoryError> {
        let record = Seller {
            id: SellerId::default(),
            name: seller.name,
            address: Some(seller.address),
            contact: Some(seller.contact),
            open: Some(seller.open),
            close: Some(seller.close),
            image_url: seller.image_url,
            rating: None,
            created_at: Some(Timestamp::now()),
            menu: Vec::new(),
            orders: Vec::new(),
        };

        let fields = to_document(&record).map_err(SellersRepositoryError::Shape)?;
        let id = self.store.add_document(SELLERS_COLLECTION, fields).await?;

        Ok(SellerId::new(id))
    }

    async fn get_seller(&self, id: &SellerId) -> Result<Seller, SellersRepositoryError> {
        let fields = self
            .store
            .get_document(SELLERS_COLLECTION, id.as_str())
            .await?
            .ok_or_else(|| SellersRepositoryError::NotFound(id.clone()))?;

        Self::decode(id.as_str(), fields)
    }

    async fn list_sellers(&self) -> Result<Vec<Seller>, SellersRepositoryError> {
        self.store
            .list_documents(SELLERS_COLLECTION)
            .await?
            .into_iter()
            .map(|(id, fields)| Self::decode(&id, fields))
            .collect()
    }

    async fn find_by_contact(
        &self,
        contact: &str,
    ) -> Result<Option<Seller>, SellersRepositoryError> {
        let sellers = self.list_sellers().await?;

        Ok(sellers
            .into_iter()
            .find(|seller| seller.contact.as_deref() == Some(contact)))
    }

    async fn add_dish(&self, id: &SellerId, dish: MenuDish) -> Result<(), SellersRepositoryError> {
        let value = serde_json::to_value(&dish).map_err(SellersRepositoryError::Shape)?;

        self.store
            .append_to_array(SELLERS_COLLECTION, id.as_str(), "menu", vec![value])
            .await?;

        Ok(())
    }

    async fn replace_dish(
        &self,
        id: &SellerId,
        index: usize,
        dish: MenuDish,
    ) -> Result<(), SellersRepositoryError> {
        let mut seller = self.get_seller(id).await?;

        let slot = seller
            .menu
            .get_mut(index)
            .ok_or(SellersRepositoryError::UnknownDishIndex(index))?;
        *slot = dish;

        let menu = serde_json::to_value(&seller.menu).map_err(SellersRepositoryError::Shape)?;
        let mut fields = crate::documents::Document::new();
        fields.insert("menu".to_owned(), menu);

        self.store
            .set_document(SELLERS_COLLECTION, id.as_str(), fields)
            .await?;

        Ok(())
    }

    async fn append_orders(
        &self,
        id: &SellerId,
        orders: &[SellerOrder],
    ) -> Result<(), SellersRepositoryError> {
        let values = orders
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(SellersRepositoryError::Shape)?;

        self.store
            .append_to_array(SELLERS_COLLECTION, id.as_str(), "orders", values)
            .await?;

        Ok(())
    }
}
