//! Order Transactions
//!
//! Tracks which catalog positions an order has touched so a failed order can restore every one
//! of them. Each product is checkpointed the first time the order touches it; rolling back
//! restores that checkpoint, so a product bought twice in one order returns to its pre-order
//! stock.

use smallvec::SmallVec;
use tracing::debug;

use crate::products::Product;

/// An in-flight order
#[derive(Debug, Default)]
pub struct Transaction {
    touched: SmallVec<[usize; 8]>,
}

impl Transaction {
    /// Begin a new transaction.
    pub fn begin() -> Self {
        Self::default()
    }

    /// Record that the product at `position` is about to change, checkpointing it on first touch.
    pub fn touch(&mut self, position: usize, product: &mut Product<'_>) {
        if self.touched.contains(&position) {
            return;
        }

        product.checkpoint();
        self.touched.push(position);
    }

    /// Catalog positions touched so far, in first-touch order.
    pub fn touched(&self) -> &[usize] {
        &self.touched
    }

    /// Keep every change made under this transaction.
    pub fn commit(self) {}

    /// Restore every touched product to its checkpoint.
    pub fn rollback(self, products: &mut [Product<'_>]) {
        for &position in &self.touched {
            if let Some(product) = products.get_mut(position) {
                debug!(product = product.name(), "rolling back quantity");

                product.rollback_quantity();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::products::{ProductError, StandardProduct};

    use super::*;

    fn products<'a>() -> Result<[Product<'a>; 2], ProductError> {
        Ok([
            StandardProduct::new("Pixel 7", Money::from_minor(50_000, USD), 10)?.into(),
            StandardProduct::new("Earbuds", Money::from_minor(25_000, USD), 5)?.into(),
        ])
    }

    #[test]
    fn touch_records_each_position_once() -> TestResult {
        let mut products = products()?;
        let mut transaction = Transaction::begin();

        for position in [1, 0, 1] {
            if let Some(product) = products.get_mut(position) {
                transaction.touch(position, product);
            }
        }

        assert_eq!(transaction.touched(), [1, 0]);

        Ok(())
    }

    #[test]
    fn rollback_restores_first_touch_quantity() -> TestResult {
        let mut products = products()?;
        let mut transaction = Transaction::begin();

        let [pixel, _] = &mut products;

        transaction.touch(0, pixel);
        pixel.buy(3)?;

        transaction.touch(0, pixel);
        pixel.buy(7)?;

        assert!(!pixel.is_active());

        transaction.rollback(&mut products);

        let [pixel, earbuds] = &products;

        assert_eq!(pixel.quantity(), 10);
        assert!(pixel.is_active());
        assert_eq!(earbuds.quantity(), 5);

        Ok(())
    }

    #[test]
    fn commit_keeps_changes() -> TestResult {
        let mut products = products()?;
        let mut transaction = Transaction::begin();

        let [_, earbuds] = &mut products;

        transaction.touch(1, earbuds);
        earbuds.buy(2)?;
        transaction.commit();

        assert_eq!(earbuds.quantity(), 3);

        Ok(())
    }
}
