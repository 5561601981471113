//! Seller resolution and order finalization.
//!
//! A cart restored from stale storage can carry entries without a seller
//! association. Resolution is the repair pass that backfills those before
//! any order is written; it is not part of the routine add-to-cart path.

use jiff::Timestamp;
use thali::{entries::CartEntry, pricing::line_total};
use tracing::debug;
use uuid::Uuid;

use crate::{
    domain::{
        orders::{DeliveryDetails, OrderStatus, SellerOrder},
        sellers::models::Seller,
    },
    identity::UserAccount,
};

use super::errors::CheckoutError;

/// Backfills missing seller associations by menu lookup.
///
/// An entry that already names a seller is accepted as-is. For the rest,
/// the sellers are scanned in order for a dish matching the entry's name
/// and price exactly; the first match wins. Identically named-and-priced
/// dishes across sellers are therefore ambiguous, and the scan order
/// decides.
///
/// # Errors
///
/// Returns [`CheckoutError::UnresolvedDish`] naming the first entry no
/// seller's menu accounts for; no partial result is produced.
pub fn resolve_sellers(
    entries: Vec<CartEntry>,
    sellers: &[Seller],
) -> Result<Vec<CartEntry>, CheckoutError> {
    entries
        .into_iter()
        .map(|mut entry| {
            if entry.seller_id.is_some() {
                return Ok(entry);
            }

            let owner = sellers.iter().find(|seller| {
                seller
                    .menu
                    .iter()
                    .any(|dish| dish.name == entry.name && dish.price == entry.price)
            });

            match owner {
                Some(seller) => {
                    debug!(dish = %entry.name, seller = %seller.id, "backfilled seller for restored entry");
                    entry.seller_id = Some(seller.id.clone());
                    Ok(entry)
                }
                None => Err(CheckoutError::UnresolvedDish(entry.name.clone())),
            }
        })
        .collect()
}

/// Turns resolved entries into seller-side order records: per-entry totals
/// computed once, buyer identity and timestamp attached, status stamped.
///
/// # Errors
///
/// Returns an error when an entry still lacks a seller or a total does not
/// fit.
pub fn finalize_orders(
    entries: &[CartEntry],
    buyer: &UserAccount,
    placed_at: Timestamp,
    delivery: Option<&DeliveryDetails>,
) -> Result<Vec<SellerOrder>, CheckoutError> {
    entries
        .iter()
        .map(|entry| {
            let seller_id = entry
                .seller_id
                .clone()
                .ok_or_else(|| CheckoutError::UnresolvedDish(entry.name.clone()))?;

            Ok(SellerOrder {
                order_id: Uuid::now_v7().simple().to_string(),
                name: entry.name.clone(),
                price: entry.price,
                quantity: entry.quantity,
                image_url: entry.image_url.clone(),
                seller_id,
                item_total: line_total(entry)?,
                ordered_by: buyer.email.clone(),
                ordered_at: placed_at,
                buyer_display_name: buyer.display_label().to_owned(),
                status: OrderStatus::paid(),
                delivery: delivery.cloned(),
            })
        })
        .collect()
}
