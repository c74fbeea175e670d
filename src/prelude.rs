//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError},
    products::{
        Product, ProductError, capped::CappedProduct, standard::StandardProduct,
        unlimited::UnlimitedProduct,
    },
    promotions::{
        Promotion, PromotionError, percent_discount::PercentDiscount,
        second_half_price::SecondHalfPrice, third_one_free::ThirdOneFree,
    },
    shell::{MenuChoice, Shell, ShellError},
    store::{OrderError, OrderLine, Store, StoreError, transaction::Transaction},
};
