//! Capped Product
//!
//! Stock behaves like a [`StandardProduct`], but a single purchase may not exceed a fixed
//! maximum regardless of how much stock is available.

use std::{fmt, rc::Rc};

use rusty_money::{Money, iso::Currency};

use crate::{
    products::{ProductError, PromotionLabel, StandardProduct},
    promotions::Promotion,
};

/// A product with a per-order purchase limit
#[derive(Debug, Clone)]
pub struct CappedProduct<'a> {
    stock: StandardProduct<'a>,
    maximum: i64,
}

impl<'a> CappedProduct<'a> {
    /// Create a new capped product.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::InvalidInput`] for the same reasons as [`StandardProduct::new`], or
    /// when `maximum` is less than 1.
    pub fn new(
        name: impl Into<String>,
        price: Money<'a, Currency>,
        quantity: i64,
        maximum: i64,
    ) -> Result<Self, ProductError> {
        let stock = StandardProduct::new(name, price, quantity)?;

        if maximum < 1 {
            return Err(ProductError::InvalidInput(
                "maximum per order must be at least 1",
            ));
        }

        Ok(Self { stock, maximum })
    }

    /// Product name
    pub fn name(&self) -> &str {
        self.stock.name()
    }

    /// Unit price
    pub fn price(&self) -> &Money<'a, Currency> {
        self.stock.price()
    }

    /// Quantity on hand
    pub fn quantity(&self) -> i64 {
        self.stock.quantity()
    }

    /// Maximum units per order
    pub fn maximum(&self) -> i64 {
        self.maximum
    }

    /// See [`StandardProduct::set_quantity`].
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::InvalidInput`] if `quantity` is negative.
    pub fn set_quantity(&mut self, quantity: i64) -> Result<(), ProductError> {
        self.stock.set_quantity(quantity)
    }

    /// Whether there is stock left
    pub fn is_active(&self) -> bool {
        self.stock.is_active()
    }

    /// Attached promotion
    pub fn promotion(&self) -> Option<&Rc<Promotion>> {
        self.stock.promotion()
    }

    /// Attach or detach a promotion
    pub fn set_promotion(&mut self, promotion: Option<Rc<Promotion>>) {
        self.stock.set_promotion(promotion);
    }

    /// Buy `quantity` units, no more than the per-order maximum.
    ///
    /// # Errors
    ///
    /// - [`ProductError::InvalidQuantity`]: `quantity` is zero or negative.
    /// - [`ProductError::LimitExceeded`]: `quantity` is above the maximum. Checked before stock.
    /// - [`ProductError::InsufficientStock`]: `quantity` exceeds the stock on hand.
    /// - [`ProductError::PriceOverflow`] / [`ProductError::Promotion`]: pricing failed.
    pub fn buy(&mut self, quantity: i64) -> Result<Money<'a, Currency>, ProductError> {
        if quantity <= 0 {
            return Err(ProductError::InvalidQuantity {
                requested: quantity,
            });
        }

        if quantity > self.maximum {
            return Err(ProductError::LimitExceeded {
                requested: quantity,
                maximum: self.maximum,
            });
        }

        self.stock.buy(quantity)
    }

    /// See [`StandardProduct::checkpoint`].
    pub fn checkpoint(&mut self) {
        self.stock.checkpoint();
    }

    /// See [`StandardProduct::rollback_quantity`].
    pub fn rollback_quantity(&mut self) {
        self.stock.rollback_quantity();
    }
}

impl fmt::Display for CappedProduct<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, Price: {}, Quantity: {}, Limited to {} per order!, {}",
            self.name(),
            self.price(),
            self.quantity(),
            self.maximum,
            PromotionLabel(self.promotion())
        )
    }
}
