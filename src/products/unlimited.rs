//! Unlimited Product
//!
//! Intangible line items such as licences or services. They have no stock, so they can always be
//! bought and are always listed.

use std::{fmt, rc::Rc};

use rusty_money::{Money, iso::Currency};

use crate::{
    products::{ProductError, PromotionLabel, price_for, validate},
    promotions::Promotion,
};

/// A product without stock tracking
#[derive(Debug, Clone)]
pub struct UnlimitedProduct<'a> {
    name: String,
    price: Money<'a, Currency>,
    promotion: Option<Rc<Promotion>>,
}

impl<'a> UnlimitedProduct<'a> {
    /// Create a new unlimited product.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::InvalidInput`] when the name is empty or the price is not positive.
    pub fn new(name: impl Into<String>, price: Money<'a, Currency>) -> Result<Self, ProductError> {
        let name = name.into();

        validate(&name, &price, 0)?;

        Ok(Self {
            name,
            price,
            promotion: None,
        })
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Always 0
    pub fn quantity(&self) -> i64 {
        0
    }

    /// Stock is not tracked; writes are accepted and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::InvalidInput`] if `quantity` is negative.
    pub fn set_quantity(&mut self, quantity: i64) -> Result<(), ProductError> {
        if quantity < 0 {
            return Err(ProductError::InvalidInput("quantity must not be negative"));
        }

        Ok(())
    }

    /// Always active
    pub fn is_active(&self) -> bool {
        true
    }

    /// Attached promotion
    pub fn promotion(&self) -> Option<&Rc<Promotion>> {
        self.promotion.as_ref()
    }

    /// Attach or detach a promotion
    pub fn set_promotion(&mut self, promotion: Option<Rc<Promotion>>) {
        self.promotion = promotion;
    }

    /// Buy `quantity` units. There is no stock check.
    ///
    /// # Errors
    ///
    /// - [`ProductError::InvalidQuantity`]: `quantity` is zero or negative.
    /// - [`ProductError::PriceOverflow`] / [`ProductError::Promotion`]: pricing failed.
    pub fn buy(&mut self, quantity: i64) -> Result<Money<'a, Currency>, ProductError> {
        if quantity <= 0 {
            return Err(ProductError::InvalidQuantity {
                requested: quantity,
            });
        }

        price_for(&self.price, self.promotion.as_ref(), quantity)
    }
}

impl fmt::Display for UnlimitedProduct<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, Price: {}, Quantity: Unlimited, {}",
            self.name,
            self.price,
            PromotionLabel(self.promotion.as_ref())
        )
    }
}
