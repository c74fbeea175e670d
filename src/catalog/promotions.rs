//! Promotion Fixtures

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    catalog::CatalogError,
    promotions::{
        Promotion, percent_discount::PercentDiscount, second_half_price::SecondHalfPrice,
        third_one_free::ThirdOneFree,
    },
};

/// Promotion fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionFixture {
    /// Half price on every second unit
    SecondHalfPrice {
        /// Promotion name
        name: String,
    },

    /// Every third unit free
    ThirdOneFree {
        /// Promotion name
        name: String,
    },

    /// Flat percentage off
    PercentDiscount {
        /// Promotion name
        name: String,

        /// Percentage off (e.g., "30%" or "0.3")
        percent: String,
    },
}

impl TryFrom<PromotionFixture> for Promotion {
    type Error = CatalogError;

    fn try_from(fixture: PromotionFixture) -> Result<Self, Self::Error> {
        match fixture {
            PromotionFixture::SecondHalfPrice { name } => Ok(SecondHalfPrice::new(name).into()),
            PromotionFixture::ThirdOneFree { name } => Ok(ThirdOneFree::new(name).into()),
            PromotionFixture::PercentDiscount { name, percent } => {
                let percent = parse_percentage(&percent)?;

                PercentDiscount::new(name.clone(), percent)
                    .map(Promotion::from)
                    .map_err(|source| CatalogError::Promotion(name, source))
            }
        }
    }
}

/// Parse percentage string (e.g., "15%" or "0.15") into a `Percentage`
///
/// Accepts two formats:
/// - Percentage format: "15%" for 15%
/// - Decimal format: "0.15" for 15%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed.
pub fn parse_percentage(s: &str) -> Result<Percentage, CatalogError> {
    let trimmed = s.trim();

    let invalid = || CatalogError::InvalidPercentage(s.to_string());

    let value = match trimmed.strip_suffix('%') {
        Some(percent_str) => percent_str
            .trim()
            .parse::<Decimal>()
            .ok()
            .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
            .ok_or_else(invalid)?,
        None => trimmed.parse::<Decimal>().map_err(|_err| invalid())?,
    };

    Ok(Percentage::from(value))
}
