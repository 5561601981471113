//! Cart entries

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::prices::Price;

/// Image shown when a dish or entry carries no image of its own.
pub const PLACEHOLDER_IMAGE: &str = "images/placeholder.jpg";

/// A dish display name.
///
/// Within one cart this is the entry identity: exact, case-sensitive string
/// equality. Two sellers offering an identically named dish are therefore
/// indistinguishable to the cart itself; the seller association on each
/// entry is what separates them at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DishName(String);

impl DishName {
    /// Creates a dish name.
    pub fn new(name: impl Into<String>) -> Self {
        DishName(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DishName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<&str> for DishName {
    fn from(value: &str) -> Self {
        DishName::new(value)
    }
}

/// Identifier of the seller document that owns a menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SellerId(String);

impl SellerId {
    /// Creates a seller id.
    pub fn new(id: impl Into<String>) -> Self {
        SellerId(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SellerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<&str> for SellerId {
    fn from(value: &str) -> Self {
        SellerId::new(value)
    }
}

/// What a menu page hands to the cart when a dish is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    /// Dish display name.
    pub name: DishName,

    /// Unit price.
    pub price: Price,

    /// Dish image, when the menu has one.
    pub image_url: Option<String>,
}

/// One line item in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Dish display name; the entry identity within this cart.
    pub name: DishName,

    /// Unit price frozen at the moment the dish was added.
    pub price: Price,

    /// Number of units; always at least one.
    pub quantity: u32,

    /// Dish image, when the menu had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Owning seller; optional until checkout, mandatory by then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<SellerId>,
}

impl CartEntry {
    /// Returns the entry image, falling back to [`PLACEHOLDER_IMAGE`].
    pub fn image_or_placeholder(&self) -> &str {
        self.image_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }
}
