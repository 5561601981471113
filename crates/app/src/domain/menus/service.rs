//! Menu administration service.
//!
//! The seller-facing side of the storefront: dashboard entry by contact
//! number, onboarding, and menu CRUD with image upload. Validation happens
//! before any upload or write, so a rejected form mutates nothing.

use std::sync::Arc;

use jiff::Timestamp;
use thali::{
    entries::{DishName, SellerId},
    prices::Price,
};
use tracing::info;

use crate::{
    domain::{
        orders::SellerOrder,
        sellers::{
            SellersRepository, SellersRepositoryError,
            models::{MenuDish, NewSeller},
        },
    },
    media::MediaHost,
    storage::KeyValueStore,
};

use super::errors::MenuAdminError;

/// Durable-scope key remembering which seller's dashboard is active.
pub const ADMIN_SELLER_KEY: &str = "restaurantid";

/// An image file picked in a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Dish form input, exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DishForm {
    pub name: String,
    pub price: String,
    pub description: String,
    pub image: Option<ImageUpload>,
}

/// Seller onboarding form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerForm {
    pub name: String,
    pub address: String,
    pub contact: String,
    pub open: String,
    pub close: String,
    pub image: Option<ImageUpload>,
}

pub struct MenuAdminService {
    sellers: Arc<dyn SellersRepository>,
    media: Arc<dyn MediaHost>,
    durable: Arc<dyn KeyValueStore>,
}

impl MenuAdminService {
    #[must_use]
    pub fn new(
        sellers: Arc<dyn SellersRepository>,
        media: Arc<dyn MediaHost>,
        durable: Arc<dyn KeyValueStore>,
    ) -> Self {
        MenuAdminService {
            sellers,
            media,
            durable,
        }
    }

    /// Opens the dashboard for the seller registered under `contact` and
    /// remembers it in the durable scope.
    ///
    /// # Errors
    ///
    /// Returns [`MenuAdminError::InvalidContact`] unless the contact is
    /// exactly ten digits, and [`MenuAdminError::UnknownContact`] when no
    /// seller matches.
    pub async fn enter_dashboard(&self, contact: &str) -> Result<SellerId, MenuAdminError> {
        let contact = contact.trim();

        if contact.len() != 10 || !contact.chars().all(|c| c.is_ascii_digit()) {
            return Err(MenuAdminError::InvalidContact);
        }

        let seller = self
            .sellers
            .find_by_contact(contact)
            .await?
            .ok_or(MenuAdminError::UnknownContact)?;

        self.durable.set(ADMIN_SELLER_KEY, seller.id.as_str())?;

        Ok(seller.id)
    }

    /// The seller whose dashboard was last opened, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the durable scope cannot be read.
    pub fn current_seller(&self) -> Result<Option<SellerId>, MenuAdminError> {
        Ok(self.durable.get(ADMIN_SELLER_KEY)?.map(SellerId::new))
    }

    /// Registers a new seller: every field and the image are required.
    ///
    /// # Errors
    ///
    /// Returns a validation error before anything is uploaded or written.
    pub async fn register_seller(&self, form: SellerForm) -> Result<SellerId, MenuAdminError> {
        let name = required(&form.name, "name")?;
        let address = required(&form.address, "address")?;
        let contact = required(&form.contact, "contact")?;
        let open = required(&form.open, "opening time")?;
        let close = required(&form.close, "closing time")?;
        let image = form.image.ok_or(MenuAdminError::MissingImage)?;

        let uploaded = self.media.upload(&image.filename, image.bytes).await?;

        let id = self
            .sellers
            .create_seller(NewSeller {
                name,
                address,
                contact,
                open,
                close,
                image_url: Some(uploaded.secure_url),
            })
            .await?;

        info!(seller = %id, "registered seller");

        Ok(id)
    }

    /// Adds a dish to the seller's menu; the image is required for a new
    /// dish.
    ///
    /// # Errors
    ///
    /// Returns a validation error before anything is uploaded or written.
    pub async fn add_dish(
        &self,
        seller: &SellerId,
        form: DishForm,
    ) -> Result<MenuDish, MenuAdminError> {
        let (name, price, description) = validated_dish_fields(&form)?;
        let image = form.image.ok_or(MenuAdminError::MissingImage)?;

        let uploaded = self.media.upload(&image.filename, image.bytes).await?;

        let dish = MenuDish {
            name,
            price,
            description,
            image_url: Some(uploaded.secure_url),
            created_at: Some(Timestamp::now()),
        };

        self.sellers.add_dish(seller, dish.clone()).await?;

        info!(seller = %seller, dish = %dish.name, "added dish to menu");

        Ok(dish)
    }

    /// Replaces the dish at `index` on the seller's menu. A fresh image is
    /// optional; without one the existing image URL is kept.
    ///
    /// # Errors
    ///
    /// Returns a validation error before anything is uploaded or written.
    pub async fn update_dish(
        &self,
        seller: &SellerId,
        index: usize,
        form: DishForm,
    ) -> Result<MenuDish, MenuAdminError> {
        let (name, price, description) = validated_dish_fields(&form)?;

        let image_url = match form.image {
            Some(image) => Some(self.media.upload(&image.filename, image.bytes).await?.secure_url),
            None => {
                let existing = self.sellers.get_seller(seller).await?;

                existing
                    .menu
                    .get(index)
                    .ok_or(SellersRepositoryError::UnknownDishIndex(index))?
                    .image_url
                    .clone()
            }
        };

        let dish = MenuDish {
            name,
            price,
            description,
            image_url,
            created_at: Some(Timestamp::now()),
        };

        self.sellers.replace_dish(seller, index, dish.clone()).await?;

        info!(seller = %seller, dish = %dish.name, index, "updated menu dish");

        Ok(dish)
    }

    /// The seller's received orders, for the dashboard order view.
    ///
    /// # Errors
    ///
    /// Returns an error when the seller cannot be loaded.
    pub async fn seller_orders(
        &self,
        seller: &SellerId,
    ) -> Result<Vec<SellerOrder>, MenuAdminError> {
        Ok(self.sellers.get_seller(seller).await?.orders)
    }
}

fn required(value: &str, field: &'static str) -> Result<String, MenuAdminError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(MenuAdminError::MissingField(field));
    }

    Ok(trimmed.to_owned())
}

fn validated_dish_fields(
    form: &DishForm,
) -> Result<(DishName, Price, Option<String>), MenuAdminError> {
    let name = required(&form.name, "dish name")?;
    let price = Price::parse(&form.price)?;
    let description = Some(form.description.trim())
        .filter(|text| !text.is_empty())
        .map(str::to_owned);

    Ok((DishName::new(name), price, description))
}
