//! Supplier invoice records.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line of a supplier invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// Item name as printed on the invoice.
    pub name: String,
    /// Stock category (coffee, milk, cups, syrups...).
    pub category: String,
    /// Units delivered.
    pub quantity: u32,
    /// Unit price.
    pub price: Decimal,
}

impl InvoiceItem {
    /// `quantity * price`, or `None` if it leaves the `Decimal` range.
    pub fn line_total(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.price)
    }
}

/// An invoice as read off a scan, before it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedInvoice {
    /// Supplier invoice number; unique within the store.
    pub number: String,
    /// Invoice date.
    pub date: NaiveDate,
    /// Amount printed on the invoice.
    pub amount: Decimal,
    /// Invoice lines.
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
}

impl ExtractedInvoice {
    /// Sum of all line totals, or `None` if any of them overflows.
    ///
    /// May differ from [`amount`](Self::amount) when the scan misread a line.
    pub fn items_total(&self) -> Option<Decimal> {
        self.items
            .iter()
            .map(InvoiceItem::line_total)
            .try_fold(Decimal::ZERO, |total, line| total.checked_add(line?))
    }
}

/// An invoice accepted into the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredInvoice {
    /// Store-assigned id.
    pub id: Uuid,
    /// Whether staff have checked the invoice against the delivery.
    pub verified: bool,
    /// When the invoice was stored.
    pub saved_at: DateTime<Utc>,
    /// The invoice data.
    #[serde(flatten)]
    pub invoice: ExtractedInvoice,
}

impl StoredInvoice {
    /// Wraps a freshly accepted invoice with a new id, unverified.
    pub fn new(invoice: ExtractedInvoice) -> Self {
        Self {
            id: Uuid::new_v4(),
            verified: false,
            saved_at: Utc::now(),
            invoice,
        }
    }

    /// The invoice number.
    pub fn number(&self) -> &str {
        &self.invoice.number
    }
}
