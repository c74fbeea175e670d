//! Promotions
//!
//! Pricing strategies applied at purchase time. A promotion is a pure function of the unit price
//! and the number of units bought; it never touches product state, so a single instance can be
//! shared between any number of products.

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::promotions::{
    percent_discount::PercentDiscount, second_half_price::SecondHalfPrice,
    third_one_free::ThirdOneFree,
};

pub mod percent_discount;
pub mod second_half_price;
pub mod third_one_free;

/// Errors raised while pricing units under a promotion.
#[derive(Debug, Error, PartialEq)]
pub enum PromotionError {
    /// Promotions only price a positive number of units.
    #[error("cannot price {0} units; quantity must be greater than 0")]
    InvalidQuantity(i64),

    /// A percentage discount outside of 0% to 100%.
    #[error("discount percentage must be between 0% and 100%")]
    PercentOutOfRange,

    /// The discounted total does not fit in minor units.
    #[error("discounted price overflowed")]
    PriceOverflow,
}

/// Promotion enum
#[derive(Debug, Clone, PartialEq)]
pub enum Promotion {
    /// Every second unit is sold at half price
    SecondHalfPrice(SecondHalfPrice),

    /// Every third unit is free
    ThirdOneFree(ThirdOneFree),

    /// A flat percentage off every unit
    PercentDiscount(PercentDiscount),
}

impl Promotion {
    /// Return the promotion display name.
    pub fn name(&self) -> &str {
        match self {
            Promotion::SecondHalfPrice(promotion) => promotion.name(),
            Promotion::ThirdOneFree(promotion) => promotion.name(),
            Promotion::PercentDiscount(promotion) => promotion.name(),
        }
    }

    /// Calculate the total price of `quantity` units sold at `unit_price`.
    ///
    /// # Errors
    ///
    /// - [`PromotionError::InvalidQuantity`]: `quantity` is zero or negative.
    /// - [`PromotionError::PriceOverflow`]: the total cannot be represented in minor units.
    pub fn apply<'a>(
        &self,
        unit_price: &Money<'a, Currency>,
        quantity: i64,
    ) -> Result<Money<'a, Currency>, PromotionError> {
        if quantity <= 0 {
            return Err(PromotionError::InvalidQuantity(quantity));
        }

        match self {
            Promotion::SecondHalfPrice(promotion) => promotion.apply(unit_price, quantity),
            Promotion::ThirdOneFree(promotion) => promotion.apply(unit_price, quantity),
            Promotion::PercentDiscount(promotion) => promotion.apply(unit_price, quantity),
        }
    }
}

impl From<SecondHalfPrice> for Promotion {
    fn from(promotion: SecondHalfPrice) -> Self {
        Promotion::SecondHalfPrice(promotion)
    }
}

impl From<ThirdOneFree> for Promotion {
    fn from(promotion: ThirdOneFree) -> Self {
        Promotion::ThirdOneFree(promotion)
    }
}

impl From<PercentDiscount> for Promotion {
    fn from(promotion: PercentDiscount) -> Self {
        Promotion::PercentDiscount(promotion)
    }
}

/// Price `paid_units` (possibly fractional) of a unit price, rounding half away from zero to the
/// nearest minor unit.
fn price_units<'a>(
    unit_price: &Money<'a, Currency>,
    paid_units: Decimal,
) -> Result<Money<'a, Currency>, PromotionError> {
    let unit_minor =
        Decimal::from_i64(unit_price.to_minor_units()).ok_or(PromotionError::PriceOverflow)?;

    let total_minor = unit_minor
        .checked_mul(paid_units)
        .ok_or(PromotionError::PriceOverflow)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PromotionError::PriceOverflow)?;

    Ok(Money::from_minor(total_minor, unit_price.currency()))
}
