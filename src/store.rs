//! Store

use rustc_hash::FxHashMap;
use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    products::{Product, ProductError},
    store::transaction::Transaction,
};

pub mod transaction;

/// Errors raised while building the catalog.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// A product with the same name is already in the catalog.
    #[error("product {0:?} is already in the store")]
    DuplicateProduct(String),

    /// A product's currency differs from the store currency (product, product currency, store
    /// currency).
    #[error("product {0:?} is priced in {1}, but the store uses {2}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// Errors raised while placing an order. A failed order leaves the catalog untouched.
#[derive(Debug, Error)]
pub enum OrderError {
    /// An order line referenced a position outside the active product listing.
    #[error("product #{} does not exist; {available} products are available", .index + 1)]
    UnknownProduct {
        /// Zero-based position in the active listing
        index: usize,
        /// Number of active products
        available: usize,
    },

    /// Buying one of the order lines failed.
    #[error("{product}: {source}")]
    Line {
        /// Zero-based position of the failing line in the order
        line: usize,
        /// Name of the product being bought
        product: String,
        /// Underlying product error
        #[source]
        source: ProductError,
    },

    /// Wrapped money arithmetic error while summing line totals.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// One line of an order: a position in the active product listing and the number of units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    /// Zero-based position in [`Store::get_all_products`]
    pub index: usize,

    /// Units to buy
    pub quantity: i64,
}

impl OrderLine {
    /// Create a new order line.
    pub fn new(index: usize, quantity: i64) -> Self {
        Self { index, quantity }
    }
}

impl From<(usize, i64)> for OrderLine {
    fn from((index, quantity): (usize, i64)) -> Self {
        Self { index, quantity }
    }
}

/// Store
#[derive(Debug)]
pub struct Store<'a> {
    products: Vec<Product<'a>>,
    positions: FxHashMap<String, usize>,
    currency: &'static Currency,
}

impl<'a> Store<'a> {
    /// Create an empty store trading in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Store {
            products: Vec::new(),
            positions: FxHashMap::default(),
            currency,
        }
    }

    /// Create a store holding the given products, in order.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] for the first product [`Store::add_product`] rejects.
    pub fn with_products(
        products: impl IntoIterator<Item = Product<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, StoreError> {
        let mut store = Store::new(currency);

        for product in products {
            store.add_product(product)?;
        }

        Ok(store)
    }

    /// Append a product to the catalog.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateProduct`]: a product with the same name already exists.
    /// - [`StoreError::CurrencyMismatch`]: the product is not priced in the store currency.
    pub fn add_product(&mut self, product: Product<'a>) -> Result<(), StoreError> {
        let product_currency = product.price().currency();

        if product_currency != self.currency {
            return Err(StoreError::CurrencyMismatch(
                product.name().to_string(),
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if self.positions.contains_key(product.name()) {
            return Err(StoreError::DuplicateProduct(product.name().to_string()));
        }

        debug!(product = product.name(), "adding product");

        self.positions
            .insert(product.name().to_string(), self.products.len());
        self.products.push(product);

        Ok(())
    }

    /// Every product in the catalog, active or not, in insertion order.
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }

    /// Look up a product by name.
    pub fn product(&self, name: &str) -> Option<&Product<'a>> {
        self.positions
            .get(name)
            .and_then(|&position| self.products.get(position))
    }

    /// Active products, in insertion order.
    pub fn get_all_products(&self) -> Vec<&Product<'a>> {
        self.products
            .iter()
            .filter(|product| product.is_active())
            .collect()
    }

    /// Total stock across the catalog. Unlimited products contribute nothing.
    pub fn get_total_quantity(&self) -> i64 {
        self.products.iter().map(Product::quantity).sum()
    }

    /// Place an order.
    ///
    /// Line indexes refer to [`Store::get_all_products`] as it stands when the order is placed.
    /// Lines are bought in order; if any line fails every product touched by this order is rolled
    /// back, so either all lines are applied or none are.
    ///
    /// # Errors
    ///
    /// - [`OrderError::UnknownProduct`]: a line index is outside the active listing.
    /// - [`OrderError::Line`]: buying a line failed (invalid quantity, insufficient stock,
    ///   limit exceeded).
    /// - [`OrderError::Money`]: line totals could not be summed.
    pub fn order(&mut self, lines: &[OrderLine]) -> Result<Money<'a, Currency>, OrderError> {
        let positions = self.resolve(lines)?;

        let mut transaction = Transaction::begin();

        match self.apply(lines, &positions, &mut transaction) {
            Ok(total) => {
                transaction.commit();

                info!(lines = lines.len(), %total, "order placed");

                Ok(total)
            }
            Err(err) => {
                transaction.rollback(&mut self.products);

                warn!(error = %err, "order rolled back");

                Err(err)
            }
        }
    }

    /// Get the number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Get the currency of the store.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Map active-listing indexes to catalog positions before anything is mutated.
    fn resolve(&self, lines: &[OrderLine]) -> Result<SmallVec<[usize; 8]>, OrderError> {
        let active: SmallVec<[usize; 16]> = self
            .products
            .iter()
            .enumerate()
            .filter(|(_, product)| product.is_active())
            .map(|(position, _)| position)
            .collect();

        lines
            .iter()
            .map(|line| {
                active
                    .get(line.index)
                    .copied()
                    .ok_or(OrderError::UnknownProduct {
                        index: line.index,
                        available: active.len(),
                    })
            })
            .collect()
    }

    fn apply(
        &mut self,
        lines: &[OrderLine],
        positions: &[usize],
        transaction: &mut Transaction,
    ) -> Result<Money<'a, Currency>, OrderError> {
        let mut total = Money::from_minor(0, self.currency);
        let available = self.products.len();

        for (line, (order_line, &position)) in lines.iter().zip(positions).enumerate() {
            let Some(product) = self.products.get_mut(position) else {
                return Err(OrderError::UnknownProduct {
                    index: order_line.index,
                    available,
                });
            };

            transaction.touch(position, product);

            let line_total = product
                .buy(order_line.quantity)
                .map_err(|source| OrderError::Line {
                    line,
                    product: product.name().to_string(),
                    source,
                })?;

            debug!(
                product = product.name(),
                quantity = order_line.quantity,
                %line_total,
                "line bought"
            );

            total = total.add(line_total)?;
        }

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use std::{error::Error, rc::Rc};

    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use crate::{
        products::{CappedProduct, StandardProduct, UnlimitedProduct},
        promotions::{Promotion, second_half_price::SecondHalfPrice},
    };

    use super::*;

    fn test_store<'a>() -> Result<Store<'a>, Box<dyn Error>> {
        let mut laptop = Product::from(StandardProduct::new(
            "MacBook Air M2",
            Money::from_minor(145_000, USD),
            100,
        )?);
        laptop.set_promotion(Some(Rc::new(Promotion::from(SecondHalfPrice::new(
            "Second Half price!",
        )))));

        Ok(Store::with_products(
            [
                laptop,
                StandardProduct::new(
                    "Bose QuietComfort Earbuds",
                    Money::from_minor(25_000, USD),
                    500,
                )?
                .into(),
                StandardProduct::new("Google Pixel 7", Money::from_minor(50_000, USD), 250)?.into(),
                UnlimitedProduct::new("Windows License", Money::from_minor(12_500, USD))?.into(),
                CappedProduct::new("Shipping", Money::from_minor(1000, USD), 250, 1)?.into(),
            ],
            USD,
        )?)
    }

    fn quantities(store: &Store<'_>) -> Vec<i64> {
        store.products().iter().map(Product::quantity).collect()
    }

    #[test]
    fn add_product_rejects_duplicate_names() -> TestResult {
        let mut store = test_store()?;

        let result = store.add_product(
            StandardProduct::new("Google Pixel 7", Money::from_minor(1, USD), 1)?.into(),
        );

        assert_eq!(
            result,
            Err(StoreError::DuplicateProduct("Google Pixel 7".to_string()))
        );
        assert_eq!(store.len(), 5);

        Ok(())
    }

    #[test]
    fn add_product_rejects_currency_mismatch() -> TestResult {
        let mut store = Store::new(USD);

        let result =
            store.add_product(StandardProduct::new("Tea", Money::from_minor(300, GBP), 1)?.into());

        assert_eq!(
            result,
            Err(StoreError::CurrencyMismatch(
                "Tea".to_string(),
                GBP.iso_alpha_code,
                USD.iso_alpha_code
            ))
        );
        assert!(store.is_empty());

        Ok(())
    }

    #[test]
    fn product_looks_up_by_name() -> TestResult {
        let store = test_store()?;

        assert_eq!(
            store.product("Shipping").map(Product::quantity),
            Some(250)
        );
        assert!(store.product("Toaster").is_none());

        Ok(())
    }

    #[test]
    fn get_total_quantity_ignores_unlimited_products() -> TestResult {
        let store = test_store()?;

        assert_eq!(store.get_total_quantity(), 100 + 500 + 250 + 250);

        Ok(())
    }

    #[test]
    fn get_all_products_skips_inactive() -> TestResult {
        let mut store = test_store()?;

        store.order(&[OrderLine::new(2, 250)])?;

        let names: Vec<&str> = store.get_all_products().iter().map(|p| p.name()).collect();

        assert_eq!(
            names,
            [
                "MacBook Air M2",
                "Bose QuietComfort Earbuds",
                "Windows License",
                "Shipping"
            ]
        );

        Ok(())
    }

    #[test]
    fn order_sums_line_totals() -> TestResult {
        let mut store = test_store()?;

        let total = store.order(&[
            OrderLine::new(0, 2),
            OrderLine::new(3, 1),
            OrderLine::new(4, 1),
        ])?;

        // 1450 + 725 + 125 + 10
        assert_eq!(total, Money::from_minor(231_000, USD));
        assert_eq!(quantities(&store), [98, 500, 250, 0, 249]);

        Ok(())
    }

    #[test]
    fn empty_order_costs_nothing() -> TestResult {
        let mut store = test_store()?;

        assert_eq!(store.order(&[])?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn failing_line_rolls_back_earlier_lines() -> TestResult {
        let mut store = test_store()?;
        let before = quantities(&store);

        let result = store.order(&[
            OrderLine::new(0, 10),
            OrderLine::new(1, 20),
            OrderLine::new(4, 2),
        ]);

        assert!(matches!(
            result,
            Err(OrderError::Line {
                line: 2,
                source: ProductError::LimitExceeded { .. },
                ..
            })
        ));
        assert_eq!(quantities(&store), before);

        Ok(())
    }

    #[test]
    fn unknown_index_changes_nothing() -> TestResult {
        let mut store = test_store()?;
        let before = quantities(&store);

        let result = store.order(&[OrderLine::new(0, 1), OrderLine::new(5, 1)]);

        assert!(matches!(
            result,
            Err(OrderError::UnknownProduct {
                index: 5,
                available: 5
            })
        ));
        assert_eq!(quantities(&store), before);

        Ok(())
    }

    #[test]
    fn order_line_converts_from_tuple() {
        assert_eq!(OrderLine::from((1, 3)), OrderLine::new(1, 3));
    }

    #[test]
    fn line_error_names_product() -> TestResult {
        let mut store = test_store()?;

        let err = store.order(&[OrderLine::new(2, 251)]).err();

        assert!(err.is_some_and(|err| err.to_string().starts_with("Google Pixel 7: ")));

        Ok(())
    }
}
