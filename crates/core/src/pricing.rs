//! Order totals

use thiserror::Error;

use crate::{entries::CartEntry, prices::Price};

/// Flat delivery fee applied once per checkout, regardless of how many
/// sellers the cart spans.
pub const DELIVERY_FEE: Price = Price::from_minor(4_000);

/// Errors that can occur while accumulating order totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalError {
    /// The accumulated amount exceeded the representable range.
    #[error("order total exceeds the representable amount")]
    Overflow,
}

/// Calculates the total for one entry: unit price times quantity.
///
/// # Errors
///
/// Returns [`TotalError::Overflow`] when the amount does not fit.
pub fn line_total(entry: &CartEntry) -> Result<Price, TotalError> {
    entry
        .price
        .minor_units()
        .checked_mul(u64::from(entry.quantity))
        .map(Price::from_minor)
        .ok_or(TotalError::Overflow)
}

/// Calculates the sum of all line totals, in minor units throughout.
///
/// # Errors
///
/// Returns [`TotalError::Overflow`] when the amount does not fit.
pub fn subtotal(entries: &[CartEntry]) -> Result<Price, TotalError> {
    let total = entries.iter().try_fold(0_u64, |acc, entry| {
        acc.checked_add(line_total(entry)?.minor_units())
            .ok_or(TotalError::Overflow)
    })?;

    Ok(Price::from_minor(total))
}

/// Calculates the amount due at checkout: subtotal plus [`DELIVERY_FEE`].
///
/// # Errors
///
/// Returns [`TotalError::Overflow`] when the amount does not fit.
pub fn grand_total(entries: &[CartEntry]) -> Result<Price, TotalError> {
    subtotal(entries)?
        .minor_units()
        .checked_add(DELIVERY_FEE.minor_units())
        .map(Price::from_minor)
        .ok_or(TotalError::Overflow)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::entries::{DishName, SellerId};

    use super::*;

    fn entry(name: &str, major: u64, quantity: u32) -> CartEntry {
        CartEntry {
            name: DishName::from(name),
            price: Price::from_major(major),
            quantity,
            image_url: None,
            seller_id: Some(SellerId::from("R1")),
        }
    }

    #[test]
    fn line_total_is_price_times_quantity() -> TestResult {
        assert_eq!(
            line_total(&entry("Paneer Tikka", 180, 2))?,
            Price::from_major(360)
        );

        Ok(())
    }

    #[test]
    fn subtotal_sums_line_totals() -> TestResult {
        let cart = [entry("Paneer Tikka", 180, 2), entry("Lassi", 60, 1)];

        assert_eq!(subtotal(&cart)?, Price::from_major(420));

        Ok(())
    }

    #[test]
    fn grand_total_adds_delivery_fee_once() -> TestResult {
        let cart = [entry("Paneer Tikka", 180, 2), entry("Lassi", 60, 1)];

        assert_eq!(grand_total(&cart)?, Price::from_major(460));
        assert_eq!(
            grand_total(&cart)?.minor_units(),
            subtotal(&cart)?.minor_units() + DELIVERY_FEE.minor_units()
        );

        Ok(())
    }

    #[test]
    fn grand_total_of_empty_cart_is_the_fee() -> TestResult {
        assert_eq!(grand_total(&[])?, DELIVERY_FEE);

        Ok(())
    }

    #[test]
    fn overflowing_line_total_is_rejected() {
        let entry = CartEntry {
            name: DishName::from("Everything"),
            price: Price::from_minor(u64::MAX),
            quantity: 2,
            image_url: None,
            seller_id: None,
        };

        assert_eq!(line_total(&entry), Err(TotalError::Overflow));
    }
}
