//! Ingredient list parsing.
//!
//! Technical cards store their ingredients as a single comma-separated line
//! such as `"18 g coffee beans, 150 ml milk, ice"`. This module turns that line
//! into structured [`Ingredient`] values.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One ingredient of a technical card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name.
    pub name: String,
    /// Quantity in `unit`.
    pub amount: Decimal,
    /// Unit of measure; empty when the entry has none.
    pub unit: String,
}

/// Parses a comma-separated ingredient line.
///
/// Each entry is split on whitespace:
/// - three or more tokens: amount, unit, then the name (amount defaults to 0
///   when the first token has no numeric prefix),
/// - two tokens: amount and name (amount defaults to 1 when missing or zero),
/// - one token: the name alone, with amount 0.
///
/// Empty entries are skipped.
///
/// # Examples
///
/// ```
/// use cafe_payroll::techcard::parse_ingredients;
/// use rust_decimal::Decimal;
///
/// let ingredients = parse_ingredients("18 g coffee beans, 2 lemons, ice");
/// assert_eq!(ingredients.len(), 3);
/// assert_eq!(ingredients[0].name, "coffee beans");
/// assert_eq!(ingredients[0].unit, "g");
/// assert_eq!(ingredients[0].amount, Decimal::from(18));
/// assert_eq!(ingredients[1].amount, Decimal::from(2));
/// assert_eq!(ingredients[2].name, "ice");
/// ```
pub fn parse_ingredients(text: &str) -> Vec<Ingredient> {
    text.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_entry)
        .collect()
}

fn parse_entry(entry: &str) -> Ingredient {
    let parts: Vec<&str> = entry.split_whitespace().collect();

    match parts.as_slice() {
        [amount, unit, name @ ..] if !name.is_empty() => Ingredient {
            name: name.join(" "),
            amount: leading_number(amount).unwrap_or(Decimal::ZERO),
            unit: unit.to_string(),
        },
        [amount, name] => Ingredient {
            name: name.to_string(),
            amount: leading_number(amount)
                .filter(|a| !a.is_zero())
                .unwrap_or(Decimal::ONE),
            unit: String::new(),
        },
        _ => Ingredient {
            name: entry.to_string(),
            amount: Decimal::ZERO,
            unit: String::new(),
        },
    }
}

/// Reads the numeric prefix of a token, so `"30ml"` yields 30.
fn leading_number(token: &str) -> Option<Decimal> {
    let mut end = 0;
    let mut seen_dot = false;

    for (i, c) in token.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => {}
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }

    let prefix = token[..end].trim_end_matches('.');
    Decimal::from_str(prefix).ok()
}
