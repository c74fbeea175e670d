//! Menu

use std::{fmt, str::FromStr};

use thiserror::Error;

/// A top-level menu choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// List all active products
    ListProducts,

    /// Show the total stock in the store
    TotalQuantity,

    /// Build and place an order
    MakeOrder,

    /// Leave the shell
    Quit,
}

impl MenuChoice {
    /// Every choice, in menu order.
    pub const ALL: [MenuChoice; 4] = [
        MenuChoice::ListProducts,
        MenuChoice::TotalQuantity,
        MenuChoice::MakeOrder,
        MenuChoice::Quit,
    ];

    /// The number the user types to pick this choice.
    pub fn number(self) -> u8 {
        match self {
            MenuChoice::ListProducts => 1,
            MenuChoice::TotalQuantity => 2,
            MenuChoice::MakeOrder => 3,
            MenuChoice::Quit => 4,
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuChoice::ListProducts => "List all products in store",
            MenuChoice::TotalQuantity => "Show total amount in store",
            MenuChoice::MakeOrder => "Make an order",
            MenuChoice::Quit => "Quit",
        })
    }
}

/// The input did not name a menu choice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown menu choice {0:?}")]
pub struct UnknownChoice(pub String);

impl FromStr for MenuChoice {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s.trim().parse::<u8>().ok();

        MenuChoice::ALL
            .into_iter()
            .find(|choice| Some(choice.number()) == number)
            .ok_or_else(|| UnknownChoice(s.to_string()))
    }
}
