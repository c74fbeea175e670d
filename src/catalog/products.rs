//! Product Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{
    catalog::{CatalogError, parse_currency},
    products::{CappedProduct, Product, StandardProduct, UnlimitedProduct},
};

/// Product Fixture
///
/// The product type follows from the fields present: `unlimited: true` for an unlimited product,
/// `maximum` for a capped one, otherwise a standard product. Every product but an unlimited one
/// needs a `quantity`.
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Product price (e.g., "1450 USD")
    pub price: String,

    /// Stock on hand
    #[serde(default)]
    pub quantity: Option<i64>,

    /// Stock is not tracked
    #[serde(default)]
    pub unlimited: bool,

    /// Maximum units per order
    #[serde(default)]
    pub maximum: Option<i64>,

    /// Key of the promotion to attach
    #[serde(default)]
    pub promotion: Option<String>,
}

impl ProductFixture {
    /// Build the product described by this fixture, without its promotion.
    ///
    /// # Errors
    ///
    /// Returns an error if the price cannot be parsed, the fields do not describe exactly one
    /// product type, or the product rejects its parameters.
    pub fn try_into_product(self) -> Result<Product<'static>, CatalogError> {
        let (minor_units, currency) = parse_price(&self.price)?;
        let price = Money::from_minor(minor_units, currency);

        let product = match (self.unlimited, self.quantity, self.maximum) {
            (true, None, None) => {
                UnlimitedProduct::new(self.name.clone(), price).map(Product::from)
            }
            (true, _, _) => {
                return Err(CatalogError::InvalidProductData(
                    self.name,
                    "unlimited products take no quantity or maximum",
                ));
            }
            (false, None, _) => {
                return Err(CatalogError::InvalidProductData(
                    self.name,
                    "quantity is required",
                ));
            }
            (false, Some(quantity), None) => {
                StandardProduct::new(self.name.clone(), price, quantity).map(Product::from)
            }
            (false, Some(quantity), Some(maximum)) => {
                CappedProduct::new(self.name.clone(), price, quantity, maximum).map(Product::from)
            }
        };

        product.map_err(|source| CatalogError::Product(self.name, source))
    }
}

/// Parse price string (e.g., "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), CatalogError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let minor_units = amount
        .parse::<Decimal>()
        .ok()
        .and_then(|amount| amount.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, parse_currency(currency_code)?))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{EUR, USD};
    use testresult::TestResult;

    use crate::products::ProductError;

    use super::*;

    fn fixture(yaml: &str) -> Result<ProductFixture, serde_norway::Error> {
        serde_norway::from_str(yaml)
    }

    #[test]
    fn parse_price_accepts_whole_and_fractional_amounts() -> TestResult {
        assert_eq!(parse_price("1450 USD")?, (145_000, USD));
        assert_eq!(parse_price("2.50 EUR")?, (250, EUR));

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        assert!(matches!(
            parse_price("2.99USD"),
            Err(CatalogError::InvalidPrice(_))
        ));
        assert!(matches!(
            parse_price("2.99 USD extra"),
            Err(CatalogError::InvalidPrice(_))
        ));
        assert!(matches!(
            parse_price("lots USD"),
            Err(CatalogError::InvalidPrice(_))
        ));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(CatalogError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn fixture_fields_select_product_type() -> TestResult {
        let standard = fixture("{ name: Pixel, price: 500 USD, quantity: 250 }")?;
        let unlimited = fixture("{ name: Licence, price: 125 USD, unlimited: true }")?;
        let capped = fixture("{ name: Shipping, price: 10 USD, quantity: 250, maximum: 1 }")?;

        assert!(matches!(
            standard.try_into_product()?,
            Product::Standard(_)
        ));
        assert!(matches!(
            unlimited.try_into_product()?,
            Product::Unlimited(_)
        ));
        assert!(matches!(capped.try_into_product()?, Product::Capped(_)));

        Ok(())
    }

    #[test]
    fn fixture_without_quantity_is_rejected() -> TestResult {
        let product = fixture("{ name: Pixel, price: 500 USD }")?;

        assert!(matches!(
            product.try_into_product(),
            Err(CatalogError::InvalidProductData(name, _)) if name == "Pixel"
        ));

        Ok(())
    }

    #[test]
    fn unlimited_fixture_with_quantity_is_rejected() -> TestResult {
        let product = fixture("{ name: Licence, price: 125 USD, unlimited: true, quantity: 5 }")?;

        assert!(matches!(
            product.try_into_product(),
            Err(CatalogError::InvalidProductData(..))
        ));

        Ok(())
    }

    #[test]
    fn invalid_product_parameters_are_wrapped() -> TestResult {
        let product = fixture("{ name: Pixel, price: 500 USD, quantity: -1 }")?;

        assert!(matches!(
            product.try_into_product(),
            Err(CatalogError::Product(name, ProductError::InvalidInput(_))) if name == "Pixel"
        ));

        Ok(())
    }
}
