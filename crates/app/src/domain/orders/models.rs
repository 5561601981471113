//! Order record models.
//!
//! An order record is written once at commit time and never mutated here
//! afterwards; in particular `item_total` is frozen at commit and later
//! totals are recomputed from it, not written back.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thali::{
    entries::{DishName, SellerId},
    prices::Price,
};

/// Lifecycle label on an order record.
///
/// Orders start out [`OrderStatus::paid`]; later transitions belong to the
/// seller-facing fulfilment workflow and are carried opaquely here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderStatus(String);

impl OrderStatus {
    /// The status stamped onto a freshly committed order.
    #[must_use]
    pub fn paid() -> Self {
        OrderStatus("Paid".to_owned())
    }

    /// Returns the status as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Delivery metadata supplied at checkout; stored on the seller's copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_status: Option<String>,
}

/// An order entry as the seller receives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerOrder {
    pub order_id: String,
    pub name: DishName,
    pub price: Price,
    pub quantity: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(rename = "restaurantid")]
    pub seller_id: SellerId,

    pub item_total: Price,
    pub ordered_by: String,
    pub ordered_at: Timestamp,

    #[serde(rename = "userName")]
    pub buyer_display_name: String,

    #[serde(rename = "orderStatus")]
    pub status: OrderStatus,

    #[serde(
        rename = "deliveryInfo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub delivery: Option<DeliveryDetails>,
}

/// An order entry in the buyer's own history: the seller id is dropped and
/// the seller's display name attached instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerOrder {
    pub order_id: String,
    pub name: DishName,
    pub price: Price,
    pub quantity: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    pub item_total: Price,
    pub ordered_by: String,
    pub ordered_at: Timestamp,

    #[serde(rename = "userName")]
    pub buyer_display_name: String,

    #[serde(rename = "orderStatus")]
    pub status: OrderStatus,

    #[serde(rename = "restaurantName")]
    pub seller_name: String,
}

impl BuyerOrder {
    /// Derives the buyer-side copy of a seller order.
    pub fn from_seller_order(order: &SellerOrder, seller_name: impl Into<String>) -> Self {
        BuyerOrder {
            order_id: order.order_id.clone(),
            name: order.name.clone(),
            price: order.price,
            quantity: order.quantity,
            image_url: order.image_url.clone(),
            item_total: order.item_total,
            ordered_by: order.ordered_by.clone(),
            ordered_at: order.ordered_at,
            buyer_display_name: order.buyer_display_name.clone(),
            status: order.status.clone(),
            seller_name: seller_name.into(),
        }
    }
}
