//! Catalog
//!
//! Loads a store definition (currency, promotions and products) from YAML. The built-in catalog
//! is compiled into the binary and used when no catalog file is configured.

use std::{fs, path::Path, rc::Rc};

use rustc_hash::FxHashMap;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::{
    catalog::{products::ProductFixture, promotions::PromotionFixture},
    products::ProductError,
    promotions::{Promotion, PromotionError},
    store::{Store, StoreError},
};

pub mod products;
pub mod promotions;

const BUILTIN_CATALOG: &str = include_str!("../fixtures/catalog.yml");

/// Catalog Parsing Errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A product references a promotion that is not defined
    #[error("Promotion not found: {0}")]
    UnknownPromotion(String),

    /// Product entry does not describe a valid product type
    #[error("Invalid product data for {0:?}: {1}")]
    InvalidProductData(String, &'static str),

    /// Promotion rejected its configuration
    #[error("Invalid promotion {0:?}: {1}")]
    Promotion(String, #[source] PromotionError),

    /// Product rejected its configuration
    #[error("Invalid product {0:?}: {1}")]
    Product(String, #[source] ProductError),

    /// Store rejected a product
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Catalog file layout
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Currency code every price must use
    pub currency: String,

    /// Map of promotion key -> promotion fixture
    #[serde(default)]
    pub promotions: FxHashMap<String, PromotionFixture>,

    /// Products in display order
    pub products: Vec<ProductFixture>,
}

/// A loaded catalog: a populated store plus the promotions wired into it.
#[derive(Debug)]
pub struct Catalog {
    store: Store<'static>,
    promotions: FxHashMap<String, Rc<Promotion>>,
}

impl Catalog {
    /// Load the catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in catalog is invalid.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    /// Load a catalog from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not describe a valid catalog.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        info!(path = %path.display(), "loading catalog");

        Self::from_yaml(&contents)
    }

    /// Load a catalog from YAML source.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed, a price, percentage or currency is invalid,
    /// a product references an unknown promotion, or the store rejects a product.
    pub fn from_yaml(contents: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;
        let currency = parse_currency(&fixture.currency)?;

        let mut promotions = FxHashMap::default();

        for (key, promotion_fixture) in fixture.promotions {
            let promotion = Promotion::try_from(promotion_fixture)?;

            promotions.insert(key, Rc::new(promotion));
        }

        let mut store = Store::new(currency);

        for product_fixture in fixture.products {
            let promotion = match product_fixture.promotion.as_deref() {
                Some(key) => Some(Rc::clone(
                    promotions
                        .get(key)
                        .ok_or_else(|| CatalogError::UnknownPromotion(key.to_string()))?,
                )),
                None => None,
            };

            let mut product = product_fixture.try_into_product()?;
            product.set_promotion(promotion);

            store.add_product(product)?;
        }

        info!(
            products = store.len(),
            promotions = promotions.len(),
            currency = currency.iso_alpha_code,
            "catalog loaded"
        );

        Ok(Catalog { store, promotions })
    }

    /// The populated store
    pub fn store(&self) -> &Store<'static> {
        &self.store
    }

    /// Look up a promotion by its catalog key
    pub fn promotion(&self, key: &str) -> Option<&Rc<Promotion>> {
        self.promotions.get(key)
    }

    /// Consume the catalog, keeping the store
    pub fn into_store(self) -> Store<'static> {
        self.store
    }
}

/// Parse a currency code.
///
/// # Errors
///
/// Returns [`CatalogError::UnknownCurrency`] for anything other than GBP, USD or EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, CatalogError> {
    match code.trim() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(CatalogError::UnknownCurrency(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::Money;
    use testresult::TestResult;

    use crate::products::Product;

    use super::*;

    fn promotion_of<'s>(store: &'s Store<'_>, name: &str) -> Option<&'s str> {
        store
            .product(name)
            .and_then(Product::promotion)
            .map(|promotion| promotion.name())
    }

    #[test]
    fn builtin_catalog_matches_demo_store() -> TestResult {
        let catalog = Catalog::builtin()?;
        let store = catalog.store();

        let names: Vec<&str> = store.products().iter().map(Product::name).collect();

        assert_eq!(
            names,
            [
                "MacBook Air M2",
                "Bose QuietComfort Earbuds",
                "Google Pixel 7",
                "Windows License",
                "Shipping"
            ]
        );
        assert_eq!(store.currency(), USD);
        assert_eq!(store.get_total_quantity(), 1100);

        assert!(matches!(
            store.product("Windows License"),
            Some(Product::Unlimited(_))
        ));
        assert!(matches!(
            store.product("Shipping"),
            Some(Product::Capped(capped)) if capped.maximum() == 1
        ));
        assert_eq!(
            store.product("MacBook Air M2").map(Product::price),
            Some(&Money::from_minor(145_000, USD))
        );

        Ok(())
    }

    #[test]
    fn builtin_catalog_wires_promotions() -> TestResult {
        let catalog = Catalog::builtin()?;
        let store = catalog.store();

        assert_eq!(
            promotion_of(store, "MacBook Air M2"),
            Some("Second Half price!")
        );
        assert_eq!(
            promotion_of(store, "Bose QuietComfort Earbuds"),
            Some("Third One Free!")
        );
        assert_eq!(promotion_of(store, "Google Pixel 7"), None);
        assert_eq!(promotion_of(store, "Windows License"), Some("30% off!"));
        assert_eq!(promotion_of(store, "Shipping"), None);

        assert!(catalog.promotion("thirty-percent").is_some());

        Ok(())
    }

    #[test]
    fn unknown_promotion_reference_is_rejected() {
        let yaml = r"
currency: USD
products:
  - name: Kettle
    price: 20 USD
    quantity: 3
    promotion: missing
";

        let result = Catalog::from_yaml(yaml);

        assert!(matches!(result, Err(CatalogError::UnknownPromotion(key)) if key == "missing"));
    }

    #[test]
    fn duplicate_products_are_rejected() {
        let yaml = r"
currency: USD
products:
  - name: Kettle
    price: 20 USD
    quantity: 3
  - name: Kettle
    price: 25 USD
    quantity: 1
";

        let result = Catalog::from_yaml(yaml);

        assert!(matches!(
            result,
            Err(CatalogError::Store(StoreError::DuplicateProduct(name))) if name == "Kettle"
        ));
    }

    #[test]
    fn mixed_currencies_are_rejected() {
        let yaml = r"
currency: GBP
products:
  - name: Kettle
    price: 20 USD
    quantity: 3
";

        let result = Catalog::from_yaml(yaml);

        assert!(matches!(
            result,
            Err(CatalogError::Store(StoreError::CurrencyMismatch(..)))
        ));
    }

    #[test]
    fn parse_currency_rejects_unknown_code() {
        let result = parse_currency("ABC");

        assert!(matches!(result, Err(CatalogError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Catalog::from_path("./does/not/exist.yml");

        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
