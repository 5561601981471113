//! Buyer Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{domain::orders::BuyerOrder, identity::BuyerId};

fn customer() -> String {
    "customer".to_owned()
}

/// Buyer profile document: identity details plus the accumulated order
/// history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerProfile {
    #[serde(skip, default)]
    pub id: BuyerId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(rename = "type", default = "customer")]
    pub account_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,

    #[serde(default)]
    pub orders: Vec<BuyerOrder>,

    #[serde(default)]
    pub favorites: Vec<String>,
}

/// New Buyer Profile Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBuyerProfile {
    pub id: BuyerId,
    pub name: String,
    pub email: String,
}
