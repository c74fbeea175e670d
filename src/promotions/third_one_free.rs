//! Third One Free

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::promotions::{PromotionError, price_units};

/// One free unit for every complete group of three
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThirdOneFree {
    name: String,
}

impl ThirdOneFree {
    /// Create a new third-one-free promotion.
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
        let free_units = quantity / 3;

        price_units(unit_price, Decimal::from(quantity - free_units))
    }
}
