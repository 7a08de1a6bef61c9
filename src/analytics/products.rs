//! Product and category sales breakdowns.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::checked_sum;

/// Sales volume attributed to one menu category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    /// Category display name.
    pub name: String,
    /// Sales volume of the category.
    pub value: Decimal,
}

/// A category's share of total sales, in whole percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPercentage {
    /// Category display name.
    pub name: String,
    /// Share of the total, rounded to whole percent.
    pub percentage: Decimal,
}

/// Units sold of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSales {
    /// Product id.
    pub id: String,
    /// Product display name.
    pub name: String,
    /// Units sold.
    pub quantity: u32,
    /// Category display name.
    pub category: String,
}

/// Returns the `n` best-selling products, most sold first.
///
/// Products with equal quantities keep their input order.
///
/// # Example
///
/// ```
/// use cafe_payroll::analytics::{ProductSales, top_products};
///
/// let product = |id: &str, quantity| ProductSales {
///     id: id.to_string(),
///     name: id.to_string(),
///     quantity,
///     category: "coffee".to_string(),
/// };
/// let products = vec![product("espresso", 120), product("latte", 180), product("mocha", 120)];
///
/// let top = top_products(&products, 2);
/// assert_eq!(top[0].id, "latte");
/// assert_eq!(top[1].id, "espresso");
/// ```
pub fn top_products(products: &[ProductSales], n: usize) -> Vec<ProductSales> {
    let mut sorted = products.to_vec();
    sorted.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    sorted.truncate(n);
    sorted
}

/// Converts category volumes into whole-percent shares of the total.
///
/// When the total is zero every share is zero.
///
/// # Returns
///
/// Returns one percentage per share, in input order, or `InvalidRevenue` if a
/// volume is negative or the total leaves the `Decimal` range.
pub fn category_percentages(shares: &[CategoryShare]) -> EngineResult<Vec<CategoryPercentage>> {
    if let Some(share) = shares.iter().find(|s| s.value < Decimal::ZERO) {
        return Err(EngineError::invalid_revenue(
            share.value,
            format!("sales of category '{}' must not be negative", share.name),
        ));
    }

    let total = checked_sum(shares.iter().map(|s| s.value)).ok_or_else(|| {
        EngineError::invalid_revenue(Decimal::MAX, "category sales total is out of range")
    })?;

    shares
        .iter()
        .map(|share| {
            let percentage = if total.is_zero() {
                Decimal::ZERO
            } else {
                // value <= total, so the ratio stays within [0, 1].
                share
                    .value
                    .checked_div(total)
                    .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                    .ok_or_else(|| {
                        EngineError::invalid_revenue(
                            share.value,
                            format!("share of category '{}' is out of range", share.name),
                        )
                    })?
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            };
            Ok(CategoryPercentage {
                name: share.name.clone(),
                percentage,
            })
        })
        .collect()
}
