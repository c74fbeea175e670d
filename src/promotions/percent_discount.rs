//! Percent Discount
//!
//! A flat percentage taken off the full price of every unit.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::promotions::{PromotionError, price_units};

/// A flat percentage off
#[derive(Debug, Clone, PartialEq)]
pub struct PercentDiscount {
    name: String,
    percent: Percentage,
}

impl PercentDiscount {
    /// Create a new percentage discount.
    ///
    /// # Errors
    ///
    /// Returns [`PromotionError::PercentOutOfRange`] unless `percent` is between 0% and 100%.
    pub fn new(name: impl Into<String>, percent: Percentage) -> Result<Self, PromotionError> {
        let fraction = fraction_of(percent);

        if fraction < Decimal::ZERO || fraction > Decimal::ONE {
            return Err(PromotionError::PercentOutOfRange);
        }

        Ok(Self {
            name: name.into(),
            percent,
        })
    }

    /// Return the promotion name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the discount percentage
    pub fn percent(&self) -> Percentage {
        self.percent
    }

    pub(super) fn apply<'a>(
        &self,
        unit_price: &Money<'a, Currency>,
        quantity: i64,
    ) -> Result<Money<'a, Currency>, PromotionError> {
        let paid_fraction = Decimal::ONE - fraction_of(self.percent);

        let paid_units = Decimal::from(quantity)
            .checked_mul(paid_fraction)
            .ok_or(PromotionError::PriceOverflow)?;

        price_units(unit_price, paid_units)
    }
}

fn fraction_of(percent: Percentage) -> Decimal {
    // decimal_percentage doesn't expose the underlying Decimal
    percent * Decimal::ONE
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn takes_percentage_off_every_unit() -> TestResult {
        let promotion = PercentDiscount::new("30% off!", Percentage::from(0.3))?;

        let total = promotion.apply(&Money::from_minor(10_000, USD), 2)?;

        assert_eq!(total, Money::from_minor(14_000, USD));

        Ok(())
    }

    #[test]
    fn bounds_are_inclusive() -> TestResult {
        let nothing_off = PercentDiscount::new("0% off", Percentage::from(0.0))?;
        let everything_off = PercentDiscount::new("Free!", Percentage::from(1.0))?;
        let price = Money::from_minor(12_500, USD);

        assert_eq!(nothing_off.apply(&price, 3)?, Money::from_minor(37_500, USD));
        assert_eq!(everything_off.apply(&price, 3)?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn rejects_out_of_range_percentages() {
        assert_eq!(
            PercentDiscount::new("Too much", Percentage::from(1.5)),
            Err(PromotionError::PercentOutOfRange)
        );
        assert_eq!(
            PercentDiscount::new("Surcharge", Percentage::from(-0.1)),
            Err(PromotionError::PercentOutOfRange)
        );
    }

    #[test]
    fn rounds_to_the_nearest_minor_unit() -> TestResult {
        let promotion = PercentDiscount::new("15% off", Percentage::from(0.15))?;

        // 0.99 * 0.85 = 0.8415
        let total = promotion.apply(&Money::from_minor(99, USD), 1)?;

        assert_eq!(total, Money::from_minor(84, USD));

        Ok(())
    }
}
