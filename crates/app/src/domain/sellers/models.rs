//! Seller Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thali::{
    entries::{DishName, NewEntry, SellerId},
    prices::Price,
};

use crate::domain::orders::SellerOrder;

/// One dish on a seller's menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDish {
    pub name: DishName,
    pub price: Price,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl MenuDish {
    /// What the cart receives when this dish is added.
    pub fn to_new_entry(&self) -> NewEntry {
        NewEntry {
            name: self.name.clone(),
            price: self.price,
            image_url: self.image_url.clone(),
        }
    }
}

/// Seller Model
///
/// The id is the store-assigned document id and is attached after a
/// document is read; every document field is optional-with-default so a
/// sparse seller document still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    #[serde(skip, default)]
    pub id: SellerId,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,

    #[serde(default)]
    pub menu: Vec<MenuDish>,

    #[serde(default)]
    pub orders: Vec<SellerOrder>,
}

/// New Seller Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSeller {
    pub name: String,
    pub address: String,
    pub contact: String,
    pub open: String,
    pub close: String,
    pub image_url: Option<String>,
}
