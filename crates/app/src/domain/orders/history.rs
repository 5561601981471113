//! Buyer order history views.

use jiff::{Span, Timestamp, tz::TimeZone};
use thali::{
    prices::Price,
    pricing::{DELIVERY_FEE, TotalError},
};

use super::models::BuyerOrder;

/// Time window an order list is filtered to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderWindow {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl OrderWindow {
    fn includes(self, ordered_at: Timestamp, now: Timestamp) -> bool {
        match self {
            OrderWindow::All => true,
            OrderWindow::Today => {
                ordered_at.to_zoned(TimeZone::UTC).date() == now.to_zoned(TimeZone::UTC).date()
            }
            OrderWindow::Week => within_hours(ordered_at, now, 24 * 7),
            OrderWindow::Month => within_hours(ordered_at, now, 24 * 30),
        }
    }
}

fn within_hours(ordered_at: Timestamp, now: Timestamp, hours: i64) -> bool {
    now.checked_sub(Span::new().hours(hours))
        .is_ok_and(|cutoff| ordered_at >= cutoff)
}

/// Orders within the window, newest first.
pub fn recent_orders(orders: &[BuyerOrder], window: OrderWindow, now: Timestamp) -> Vec<BuyerOrder> {
    let mut filtered: Vec<BuyerOrder> = orders
        .iter()
        .filter(|order| window.includes(order.ordered_at, now))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| b.ordered_at.cmp(&a.ordered_at));

    filtered
}

/// The total shown on an order card: the frozen item total plus the
/// delivery fee, recomputed at display time.
///
/// # Errors
///
/// Returns an error when the amount does not fit.
pub fn display_total(order: &BuyerOrder) -> Result<Price, TotalError> {
    order
        .item_total
        .minor_units()
        .checked_add(DELIVERY_FEE.minor_units())
        .map(Price::from_minor)
        .ok_or(TotalError::Overflow)
}

/// Human label for when an order was placed, relative to `now`:
/// "Today at 3:05 PM", "July 14 at 3:05 PM" within the year, full date
/// otherwise. Both instants are read in UTC.
pub fn format_order_date(ordered_at: Timestamp, now: Timestamp) -> String {
    let placed = ordered_at.to_zoned(TimeZone::UTC);
    let current = now.to_zoned(TimeZone::UTC);
    let time = placed.strftime("%-I:%M %p");

    if placed.date() == current.date() {
        return format!("Today at {time}");
    }

    if placed.year() == current.year() {
        return format!("{} at {time}", placed.strftime("%B %-d"));
    }

    format!("{} at {time}", placed.strftime("%B %-d, %Y"))
}
