//! Prices

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::Deref,
    str::FromStr,
};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported when parsing a price from user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceParseError {
    /// The input was not a decimal number.
    #[error("price {0:?} is not a number")]
    NotANumber(String),

    /// The input was negative.
    #[error("price {0:?} is negative")]
    Negative(String),

    /// The input carried more than two fraction digits.
    #[error("price {0:?} has sub-paisa precision")]
    TooPrecise(String),

    /// The input does not fit the representable amount range.
    #[error("price {0:?} is out of range")]
    OutOfRange(String),
}

/// A non-negative amount in minor currency units (paise).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    value: u64,
}

impl Price {
    /// Creates a price from minor units.
    pub const fn from_minor(value: u64) -> Self {
        Price { value }
    }

    /// Creates a price from whole currency units.
    pub const fn from_major(value: u64) -> Self {
        Price { value: value * 100 }
    }

    /// Returns the amount in minor units.
    pub const fn minor_units(self) -> u64 {
        self.value
    }

    /// Parses a decimal amount such as `"180"` or `"180.50"`.
    ///
    /// # Errors
    ///
    /// - [`PriceParseError::NotANumber`]: the input is not a decimal number.
    /// - [`PriceParseError::Negative`]: the amount is below zero.
    /// - [`PriceParseError::TooPrecise`]: more than two fraction digits.
    /// - [`PriceParseError::OutOfRange`]: the amount does not fit.
    pub fn parse(text: &str) -> Result<Self, PriceParseError> {
        let trimmed = text.trim();

        let amount = Decimal::from_str(trimmed)
            .map_err(|_| PriceParseError::NotANumber(trimmed.to_owned()))?;

        if amount.is_sign_negative() {
            return Err(PriceParseError::Negative(trimmed.to_owned()));
        }

        let minor = amount
            .checked_mul(Decimal::from(100))
            .ok_or_else(|| PriceParseError::OutOfRange(trimmed.to_owned()))?;

        if !minor.fract().is_zero() {
            return Err(PriceParseError::TooPrecise(trimmed.to_owned()));
        }

        minor
            .to_u64()
            .map(Price::from_minor)
            .ok_or_else(|| PriceParseError::OutOfRange(trimmed.to_owned()))
    }

    /// Returns the amount as [`Money`] in rupees, for display formatting.
    ///
    /// Amounts beyond the signed minor-unit range are clamped; the cart
    /// arithmetic rejects such totals before they reach display.
    pub fn to_money(self) -> Money<'static, iso::Currency> {
        let minor = i64::try_from(self.value).unwrap_or(i64::MAX);

        Money::from_minor(minor, iso::INR)
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.to_money(), f)
    }
}
