//! Standard Product

use std::{fmt, rc::Rc};

use rusty_money::{Money, iso::Currency};

use crate::{
    products::{ProductError, PromotionLabel, price_for, validate},
    promotions::Promotion,
};

/// A product with a finite stock, deactivated once the stock runs out.
#[derive(Debug, Clone)]
pub struct StandardProduct<'a> {
    name: String,
    price: Money<'a, Currency>,
    quantity: i64,
    active: bool,
    backup_quantity: i64,
    promotion: Option<Rc<Promotion>>,
}

impl<'a> StandardProduct<'a> {
    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::InvalidInput`] when the name is empty, the price is not positive or
    /// the quantity is negative.
    pub fn new(
        name: impl Into<String>,
        price: Money<'a, Currency>,
        quantity: i64,
    ) -> Result<Self, ProductError> {
        let name = name.into();

        validate(&name, &price, quantity)?;

        Ok(Self {
            name,
            price,
            quantity,
            active: quantity > 0,
            backup_quantity: quantity,
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

    /// Quantity on hand
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Overwrite the quantity on hand.
    ///
    /// Stock changes and rollbacks share one assignment that keeps `active` in step: a product is
    /// active exactly when it has stock.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::InvalidInput`] if `quantity` is negative.
    pub fn set_quantity(&mut self, quantity: i64) -> Result<(), ProductError> {
        if quantity < 0 {
            return Err(ProductError::InvalidInput("quantity must not be negative"));
        }

        self.assign_quantity(quantity);

        Ok(())
    }

    /// Whether there is stock left
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Attached promotion
    pub fn promotion(&self) -> Option<&Rc<Promotion>> {
        self.promotion.as_ref()
    }

    /// Attach or detach a promotion
    pub fn set_promotion(&mut self, promotion: Option<Rc<Promotion>>) {
        self.promotion = promotion;
    }

    /// Buy `quantity` units from stock.
    ///
    /// # Errors
    ///
    /// - [`ProductError::InvalidQuantity`]: `quantity` is zero or negative.
    /// - [`ProductError::InsufficientStock`]: `quantity` exceeds the stock on hand. Stock is left
    ///   untouched.
    /// - [`ProductError::PriceOverflow`] / [`ProductError::Promotion`]: pricing failed.
    pub fn buy(&mut self, quantity: i64) -> Result<Money<'a, Currency>, ProductError> {
        if quantity <= 0 {
            return Err(ProductError::InvalidQuantity {
                requested: quantity,
            });
        }

        if quantity > self.quantity {
            return Err(ProductError::InsufficientStock {
                requested: quantity,
                available: self.quantity,
            });
        }

        let total = price_for(&self.price, self.promotion.as_ref(), quantity)?;

        self.set_quantity(self.quantity - quantity)?;

        Ok(total)
    }

    /// Snapshot the current quantity for [`StandardProduct::rollback_quantity`].
    pub fn checkpoint(&mut self) {
        self.backup_quantity = self.quantity;
    }

    /// Restore the snapshot quantity and recompute the active flag.
    pub fn rollback_quantity(&mut self) {
        self.assign_quantity(self.backup_quantity);
    }

    // Every stock change lands here; `quantity` is never negative at this point.
    fn assign_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
        self.active = quantity > 0;
    }
}

impl fmt::Display for StandardProduct<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, Price: {}, Quantity: {}, {}",
            self.name,
            self.price,
            self.quantity,
            PromotionLabel(self.promotion.as_ref())
        )
    }
}
