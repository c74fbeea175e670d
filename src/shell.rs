//! Interactive shell
//!
//! A line-oriented menu over a [`Store`]. Input and output are generic so sessions can be scripted.

use std::io::{self, BufRead, Write};

use tabled::{
    builder::Builder,
    settings::{
        Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;
use tracing::debug;

use crate::{
    products::Product,
    store::{OrderLine, Store},
};

pub mod menu;

pub use menu::MenuChoice;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Errors that end a shell session.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Reading input or writing output failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Interactive shell over a store.
#[derive(Debug)]
pub struct Shell<'s, 'a, R, W> {
    store: &'s mut Store<'a>,
    input: R,
    output: W,
    color: bool,
}

impl<'s, 'a, R: BufRead, W: Write> Shell<'s, 'a, R, W> {
    /// Create a shell reading from `input` and writing to `output`. Colour is off by default.
    pub fn new(store: &'s mut Store<'a>, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
            color: false,
        }
    }

    /// Enable or disable ANSI colours.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Run the menu loop until the user quits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            self.write_menu()?;

            let Some(line) = self.prompt("Please choose a number: ")? else {
                break;
            };

            let Ok(choice) = line.parse::<MenuChoice>() else {
                self.fail("Invalid input. Please enter a valid number.")?;
                continue;
            };

            debug!(?choice, "menu choice");

            match choice {
                MenuChoice::ListProducts => self.list_products()?,
                MenuChoice::TotalQuantity => self.total_quantity()?,
                MenuChoice::MakeOrder => self.make_order()?,
                MenuChoice::Quit => break,
            }
        }

        writeln!(self.output, "Bye!")?;

        Ok(())
    }

    fn write_menu(&mut self) -> Result<(), ShellError> {
        writeln!(self.output)?;
        writeln!(self.output, "   Store Menu")?;
        writeln!(self.output, "   ----------")?;

        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {choice}", choice.number())?;
        }

        Ok(())
    }

    /// Print a prompt and read one line. `None` means input has ended.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, ShellError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();

        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    fn list_products(&mut self) -> Result<(), ShellError> {
        let table = products_table(&self.store.get_all_products(), self.color);

        writeln!(self.output, "{table}")?;

        Ok(())
    }

    fn total_quantity(&mut self) -> Result<(), ShellError> {
        let total = self.store.get_total_quantity();

        writeln!(self.output, "Total of {total} items in the store")?;

        Ok(())
    }

    fn make_order(&mut self) -> Result<(), ShellError> {
        self.list_products()?;
        writeln!(
            self.output,
            "When you want to finish order, enter empty text."
        )?;

        let available = self.store.get_all_products().len();
        let mut lines: Vec<OrderLine> = Vec::new();

        loop {
            let Some(product) = self.prompt("Which product # do you want? ")? else {
                return self.cancel_order();
            };

            if product.is_empty() {
                break;
            }

            let Some(index) = parse_product_number(&product, available) else {
                self.fail(&format!(
                    "Invalid product number {product:?}. Choose 1 to {available}."
                ))?;
                continue;
            };

            let Some(amount) = self.prompt("What amount do you want? ")? else {
                return self.cancel_order();
            };

            let Some(quantity) = parse_quantity(&amount) else {
                self.fail("Invalid quantity. Please enter a positive number.")?;
                continue;
            };

            lines.push(OrderLine::new(index, quantity));
            writeln!(self.output, "Product added to list!")?;
        }

        if lines.is_empty() {
            writeln!(self.output, "No products selected; nothing was ordered.")?;

            return Ok(());
        }

        match self.store.order(&lines) {
            Ok(total) => self.succeed(&format!("Order made! Total payment: {total}")),
            Err(err) => {
                self.fail(&format!("Error while making order! {err}"))?;
                self.fail("Order failed. No payment was processed.")
            }
        }
    }

    fn cancel_order(&mut self) -> Result<(), ShellError> {
        debug!("input ended during order entry");

        writeln!(self.output)?;
        self.fail("Input ended before the order was finished. Nothing was ordered.")
    }

    fn succeed(&mut self, message: &str) -> Result<(), ShellError> {
        self.write_colored(GREEN, message)
    }

    fn fail(&mut self, message: &str) -> Result<(), ShellError> {
        self.write_colored(RED, message)
    }

    fn write_colored(&mut self, color: &str, message: &str) -> Result<(), ShellError> {
        if self.color {
            writeln!(self.output, "{color}{message}{RESET}")?;
        } else {
            writeln!(self.output, "{message}")?;
        }

        Ok(())
    }
}

/// Render the numbered product listing.
pub fn products_table(products: &[&Product<'_>], color: bool) -> String {
    let mut builder = Builder::default();

    builder.push_record(["#", "Product"]);

    for (number, product) in (1..).zip(products) {
        builder.push_record([number.to_string(), product.show()]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());

    if color {
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::first(), Color::FG_GREEN);
    }

    table.to_string()
}

/// Parse a 1-based product number into a 0-based index into a listing of `available` products.
fn parse_product_number(input: &str, available: usize) -> Option<usize> {
    let number = input.trim().parse::<usize>().ok()?;

    (1..=available).contains(&number).then(|| number - 1)
}

fn parse_quantity(input: &str) -> Option<i64> {
    input
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|&quantity| quantity > 0)
}
