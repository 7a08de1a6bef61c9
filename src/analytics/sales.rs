//! Point-of-sale records and the daily revenue series built from them.

use chrono::{DateTime, Datelike, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::PayrollMonth;

/// Lifecycle state of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Paid and closed.
    Completed,
    /// Opened but not yet paid.
    Pending,
    /// Abandoned before payment.
    Cancelled,
    /// Paid and then returned.
    Refunded,
    /// Any status this crate does not know about.
    #[serde(other)]
    Unknown,
}

/// One line of a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItem {
    /// Product sold.
    pub product_id: String,
    /// Units sold.
    pub quantity: u32,
    /// Unit price.
    pub price: Decimal,
}

/// A sale recorded at the register during a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// Sale id.
    pub id: String,
    /// Register shift the sale belongs to.
    pub shift_id: String,
    /// Sold items.
    pub items: Vec<SaleItem>,
    /// Amount charged.
    pub total: Decimal,
    /// Payment method as recorded by the register.
    pub payment_method: String,
    /// Lifecycle state.
    pub status: SaleStatus,
    /// Loyalty bonus spent on the sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_applied: Option<Decimal>,
    /// Loyalty bonus earned by the customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_earned: Option<Decimal>,
    /// Customer phone for the loyalty program.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    /// When the sale was recorded, in the café's local offset.
    pub created_at: DateTime<FixedOffset>,
}

impl Sale {
    /// Whether the sale counts towards revenue.
    pub fn is_completed(&self) -> bool {
        self.status == SaleStatus::Completed
    }
}

/// Builds the daily revenue series of a month from register sales.
///
/// Index `i` of the result is the total of completed sales recorded on day
/// `i + 1`, by the local date of `created_at`. Sales in other states and
/// sales outside the month are ignored.
///
/// # Returns
///
/// Returns one entry per day of the month, or `InvalidRevenue` if a completed
/// sale has a negative total or a day's revenue leaves the `Decimal` range.
pub fn daily_revenue_series(sales: &[Sale], month: PayrollMonth) -> EngineResult<Vec<Decimal>> {
    let mut series = vec![Decimal::ZERO; month.days() as usize];
    let mut counted = 0usize;

    for sale in sales.iter().filter(|s| s.is_completed()) {
        if sale.total < Decimal::ZERO {
            return Err(EngineError::invalid_revenue(
                sale.total,
                format!("sale '{}' has a negative total", sale.id),
            ));
        }

        let date = sale.created_at.date_naive();
        if !month.contains(date) {
            continue;
        }

        let day = &mut series[date.day0() as usize];
        *day = day.checked_add(sale.total).ok_or_else(|| {
            EngineError::invalid_revenue(
                sale.total,
                format!("revenue of {} is out of range after sale '{}'", date, sale.id),
            )
        })?;
        counted += 1;
    }

    debug!(
        year = month.year(),
        month = month.month(),
        sales = sales.len(),
        counted,
        "Built daily revenue series"
    );

    Ok(series)
}
