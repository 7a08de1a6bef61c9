//! Supplier invoice intake.
//!
//! Scanned invoices are turned into structured data by an
//! [`InvoiceRecognizer`] and kept in an [`InvoiceRepository`], where each
//! invoice number is stored at most once.

mod intake;
mod model;
mod recognition;
mod store;

pub use intake::InvoiceIntake;
pub use model::{ExtractedInvoice, InvoiceItem, StoredInvoice};
pub use recognition::{InvoiceRecognizer, RecognitionError};
pub use store::{InMemoryInvoiceStore, InvoiceRepository, JsonFileInvoiceStore};
