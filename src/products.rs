//! Products
//!
//! A catalog entry comes in one of three flavours which differ only in how stock is tracked:
//!
//! - [`StandardProduct`]: a finite stock that is depleted by purchases.
//! - [`UnlimitedProduct`]: intangible line items (licences, services) with no stock at all.
//! - [`CappedProduct`]: a finite stock with a per-order purchase limit.

use std::{fmt, rc::Rc};

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::promotions::{Promotion, PromotionError};

pub mod capped;
pub mod standard;
pub mod unlimited;

pub use capped::CappedProduct;
pub use standard::StandardProduct;
pub use unlimited::UnlimitedProduct;

/// Errors raised when creating or buying products.
#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    /// Construction parameters were rejected.
    #[error("invalid product: {0}")]
    InvalidInput(&'static str),

    /// Purchases must be for at least one unit.
    #[error("invalid quantity {requested}; quantity must be greater than 0")]
    InvalidQuantity {
        /// Requested quantity
        requested: i64,
    },

    /// More units were requested than are in stock.
    #[error("quantity {requested} is larger than the {available} in stock")]
    InsufficientStock {
        /// Requested quantity
        requested: i64,
        /// Quantity on hand
        available: i64,
    },

    /// More units were requested than a single order may contain.
    #[error("only {maximum} allowed per order, requested {requested}")]
    LimitExceeded {
        /// Requested quantity
        requested: i64,
        /// Per-order maximum
        maximum: i64,
    },

    /// The undiscounted total does not fit in minor units.
    #[error("price overflowed")]
    PriceOverflow,

    /// Wrapped promotion pricing error.
    #[error(transparent)]
    Promotion(#[from] PromotionError),
}

/// Product
#[derive(Debug, Clone)]
pub enum Product<'a> {
    /// Finite stock
    Standard(StandardProduct<'a>),

    /// No stock tracking
    Unlimited(UnlimitedProduct<'a>),

    /// Finite stock with a per-order limit
    Capped(CappedProduct<'a>),
}

impl<'a> Product<'a> {
    /// Product name
    pub fn name(&self) -> &str {
        match self {
            Product::Standard(product) => product.name(),
            Product::Unlimited(product) => product.name(),
            Product::Capped(product) => product.name(),
        }
    }

    /// Unit price
    pub fn price(&self) -> &Money<'a, Currency> {
        match self {
            Product::Standard(product) => product.price(),
            Product::Unlimited(product) => product.price(),
            Product::Capped(product) => product.price(),
        }
    }

    /// Quantity on hand. Unlimited products always report 0.
    pub fn quantity(&self) -> i64 {
        match self {
            Product::Standard(product) => product.quantity(),
            Product::Unlimited(product) => product.quantity(),
            Product::Capped(product) => product.quantity(),
        }
    }

    /// Overwrite the quantity on hand, updating the active flag to match.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::InvalidInput`] if `quantity` is negative.
    pub fn set_quantity(&mut self, quantity: i64) -> Result<(), ProductError> {
        match self {
            Product::Standard(product) => product.set_quantity(quantity),
            Product::Unlimited(product) => product.set_quantity(quantity),
            Product::Capped(product) => product.set_quantity(quantity),
        }
    }

    /// Whether the product can currently be ordered.
    pub fn is_active(&self) -> bool {
        match self {
            Product::Standard(product) => product.is_active(),
            Product::Unlimited(product) => product.is_active(),
            Product::Capped(product) => product.is_active(),
        }
    }

    /// Attached promotion, if any
    pub fn promotion(&self) -> Option<&Rc<Promotion>> {
        match self {
            Product::Standard(product) => product.promotion(),
            Product::Unlimited(product) => product.promotion(),
            Product::Capped(product) => product.promotion(),
        }
    }

    /// Attach or detach a promotion.
    pub fn set_promotion(&mut self, promotion: Option<Rc<Promotion>>) {
        match self {
            Product::Standard(product) => product.set_promotion(promotion),
            Product::Unlimited(product) => product.set_promotion(promotion),
            Product::Capped(product) => product.set_promotion(promotion),
        }
    }

    /// Buy `quantity` units, returning the total price.
    ///
    /// # Errors
    ///
    /// - [`ProductError::InvalidQuantity`]: `quantity` is zero or negative.
    /// - [`ProductError::InsufficientStock`]: not enough stock (standard and capped products).
    /// - [`ProductError::LimitExceeded`]: more than the per-order maximum (capped products).
    /// - [`ProductError::PriceOverflow`] / [`ProductError::Promotion`]: the total could not be
    ///   calculated.
    pub fn buy(&mut self, quantity: i64) -> Result<Money<'a, Currency>, ProductError> {
        match self {
            Product::Standard(product) => product.buy(quantity),
            Product::Unlimited(product) => product.buy(quantity),
            Product::Capped(product) => product.buy(quantity),
        }
    }

    /// Record the current quantity as the rollback snapshot.
    pub fn checkpoint(&mut self) {
        match self {
            Product::Standard(product) => product.checkpoint(),
            Product::Unlimited(_) => {}
            Product::Capped(product) => product.checkpoint(),
        }
    }

    /// Restore the quantity recorded by the last [`Product::checkpoint`] (or at construction).
    pub fn rollback_quantity(&mut self) {
        match self {
            Product::Standard(product) => product.rollback_quantity(),
            Product::Unlimited(_) => {}
            Product::Capped(product) => product.rollback_quantity(),
        }
    }

    /// Human readable summary of the product.
    pub fn show(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Product<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Product::Standard(product) => fmt::Display::fmt(product, f),
            Product::Unlimited(product) => fmt::Display::fmt(product, f),
            Product::Capped(product) => fmt::Display::fmt(product, f),
        }
    }
}

impl<'a> From<StandardProduct<'a>> for Product<'a> {
    fn from(product: StandardProduct<'a>) -> Self {
        Product::Standard(product)
    }
}

impl<'a> From<UnlimitedProduct<'a>> for Product<'a> {
    fn from(product: UnlimitedProduct<'a>) -> Self {
        Product::Unlimited(product)
    }
}

impl<'a> From<CappedProduct<'a>> for Product<'a> {
    fn from(product: CappedProduct<'a>) -> Self {
        Product::Capped(product)
    }
}

/// Validate the construction parameters shared by every product type.
fn validate(name: &str, price: &Money<'_, Currency>, quantity: i64) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::InvalidInput("name must be non-empty"));
    }

    if price.to_minor_units() <= 0 {
        return Err(ProductError::InvalidInput("price must be greater than 0"));
    }

    if quantity < 0 {
        return Err(ProductError::InvalidInput("quantity must not be negative"));
    }

    Ok(())
}

/// Total price of `quantity` units, via the promotion when one is attached.
fn price_for<'a>(
    price: &Money<'a, Currency>,
    promotion: Option<&Rc<Promotion>>,
    quantity: i64,
) -> Result<Money<'a, Currency>, ProductError> {
    if let Some(promotion) = promotion {
        return Ok(promotion.apply(price, quantity)?);
    }

    let total = price
        .to_minor_units()
        .checked_mul(quantity)
        .ok_or(ProductError::PriceOverflow)?;

    Ok(Money::from_minor(total, price.currency()))
}

/// Promotion suffix used by every product summary.
struct PromotionLabel<'p>(Option<&'p Rc<Promotion>>);

impl fmt::Display for PromotionLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(promotion) => write!(f, "Promotion: {}", promotion.name()),
            None => write!(f, "Promotion: None"),
        }
    }
}
