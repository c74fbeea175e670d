//! Second Half Price
//!
//! Units are paired up in the order they are bought; the second unit of every pair costs half
//! price. An odd final unit is charged in full.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::promotions::{PromotionError, price_units};

/// Half price on every second unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondHalfPrice {
    name: String,
}

impl SecondHalfPrice {
    /// Create a new second-half-price promotion.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Return the promotion name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(super) fn apply<'a>(
        &self,
        unit_price: &Money<'a, Currency>,
        quantity: i64,
    ) -> Result<Money<'a, Currency>, PromotionError> {
        let half_units = quantity / 2;
        let full_units = quantity - half_units;

        let paid_units = Decimal::from(full_units) + Decimal::from(half_units) * Decimal::new(5, 1);

        price_units(unit_price, paid_units)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn even_quantity_pays_half_for_every_second_unit() -> TestResult {
        let promotion = SecondHalfPrice::new("Second Half price!");

        let total = promotion.apply(&Money::from_minor(1000, USD), 4)?;

        assert_eq!(total, Money::from_minor(3000, USD));

        Ok(())
    }

    #[test]
    fn odd_quantity_pays_the_last_unit_in_full() -> TestResult {
        let promotion = SecondHalfPrice::new("Second Half price!");

        let total = promotion.apply(&Money::from_minor(1000, USD), 3)?;

        assert_eq!(total, Money::from_minor(2500, USD));

        Ok(())
    }

    #[test]
    fn single_unit_is_full_price() -> TestResult {
        let promotion = SecondHalfPrice::new("Second Half price!");

        let total = promotion.apply(&Money::from_minor(145_000, USD), 1)?;

        assert_eq!(total, Money::from_minor(145_000, USD));

        Ok(())
    }
}
