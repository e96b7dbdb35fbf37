//! Prices

use rust_decimal::Decimal;
use rusty_money::{Money, iso};

/// Formats an amount as Philippine pesos, e.g. `"₱1,234.56"`.
///
/// The amount is rescaled to the currency's two minor-unit digits before
/// formatting.
#[must_use]
pub fn format_php(amount: Decimal) -> String {
    let mut amount = amount;
    amount.rescale(2);

    Money::from_decimal(amount, iso::PHP).to_string()
}
