//! Invoice recognition capability.

use thiserror::Error;

use super::ExtractedInvoice;

/// Failure of an [`InvoiceRecognizer`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    /// No image data was supplied.
    #[error("Invoice image is empty")]
    EmptyImage,

    /// The image could not be turned into an invoice.
    #[error("Invoice could not be read: {message}")]
    Unreadable {
        /// What the recognizer could not make out.
        message: String,
    },

    /// The recognition backend could not be reached.
    #[error("Recognition service unavailable: {message}")]
    Unavailable {
        /// Backend error description.
        message: String,
    },
}

/// Turns a scanned invoice image into structured data.
///
/// Implementations wrap an OCR backend. They make a single attempt per call
/// and report failures instead of returning placeholder data.
pub trait InvoiceRecognizer: Send + Sync {
    /// Recognizes one invoice image.
    fn recognize(&self, image: &[u8]) -> Result<ExtractedInvoice, RecognitionError>;
}
