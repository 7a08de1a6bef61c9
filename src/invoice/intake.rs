//! Scan-to-store invoice pipeline.

use tracing::{info, warn};

use super::{InvoiceRecognizer, InvoiceRepository, RecognitionError, StoredInvoice};
use crate::error::{EngineError, EngineResult};

/// Recognizes scanned invoices and stores the ones not seen before.
#[derive(Debug)]
pub struct InvoiceIntake<R, S> {
    recognizer: R,
    store: S,
}

impl<R: InvoiceRecognizer, S: InvoiceRepository> InvoiceIntake<R, S> {
    /// Creates a pipeline over a recognizer and a store.
    pub fn new(recognizer: R, store: S) -> Self {
        Self { recognizer, store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Recognizes one image and stores the invoice.
    ///
    /// # Returns
    ///
    /// Returns the stored invoice, or an error if:
    /// - the image is empty or cannot be recognized (`Recognition`)
    /// - the invoice number is already stored (`DuplicateInvoice`)
    /// - the store fails (`InvoiceStorage`)
    pub fn intake(&self, image: &[u8]) -> EngineResult<StoredInvoice> {
        if image.is_empty() {
            return Err(RecognitionError::EmptyImage.into());
        }

        let invoice = self.recognizer.recognize(image)?;
        if self.store.exists(&invoice.number) {
            warn!(number = %invoice.number, "Recognized invoice is already stored");
            return Err(EngineError::DuplicateInvoice {
                number: invoice.number,
            });
        }

        let stored = self.store.save(invoice)?;
        info!(
            number = %stored.number(),
            amount = %stored.invoice.amount,
            items = stored.invoice.items.len(),
            "Took in invoice"
        );
        Ok(stored)
    }
}
