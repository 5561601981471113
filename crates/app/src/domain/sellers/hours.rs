//! Opening hours

use jiff::civil::Time;

use super::models::Seller;

/// Opening time assumed when a seller document has none.
pub const DEFAULT_OPEN: &str = "09:00";

/// Closing time assumed when a seller document has none.
pub const DEFAULT_CLOSE: &str = "22:00";

fn minutes(text: &str) -> Option<i32> {
    let (hours, minutes) = text.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;

    Some(hours * 60 + minutes)
}

/// Whether the seller is open at the given wall-clock time.
///
/// The window is inclusive on both ends; an unparseable time reads as
/// closed.
pub fn is_open_at(seller: &Seller, at: Time) -> bool {
    let open = seller.open.as_deref().unwrap_or(DEFAULT_OPEN);
    let close = seller.close.as_deref().unwrap_or(DEFAULT_CLOSE);

    let (Some(open), Some(close)) = (minutes(open), minutes(close)) else {
        return false;
    };

    let now = i32::from(at.hour()) * 60 + i32::from(at.minute());

    open <= now && now <= close
}
