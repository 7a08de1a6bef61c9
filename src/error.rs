//! Error types for the café payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing payroll,
//! editing schedules, loading configuration and taking in invoices.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::invoice::RecognitionError;

/// Coarse classification of an [`EngineError`].
///
/// Callers use this to decide how to surface a failure without matching
/// on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input was rejected (bad revenue, out-of-range date, length mismatch).
    Validation,
    /// A referenced entity does not exist.
    NotFound,
    /// The input collides with something already stored.
    Conflict,
    /// Configuration files are missing or malformed.
    Configuration,
    /// The backing store failed.
    Storage,
    /// The external recognition service failed.
    Recognition,
}

/// The main error type for the café payroll engine.
///
/// Every failure is returned to the caller as a typed value; nothing in the
/// engine substitutes a silent default into totals.
///
/// # Example
///
/// ```
/// use cafe_payroll::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "anna".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: anna");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value is out of its allowed range.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A daily revenue figure was negative or not a finite number.
    #[error("Invalid revenue {value}: {message}")]
    InvalidRevenue {
        /// The rejected value, rendered as text so NaN and infinities survive.
        value: String,
        /// A description of what made the revenue invalid.
        message: String,
    },

    /// A shift carried inconsistent data.
    #[error("Invalid shift on {date}: {message}")]
    InvalidShift {
        /// The calendar day of the shift.
        date: NaiveDate,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// A date does not belong to the month being edited.
    #[error("Date {date} is outside {year}-{month:02}")]
    DateOutOfRange {
        /// The rejected date.
        date: NaiveDate,
        /// The year of the month being edited.
        year: i32,
        /// The month being edited (1-12).
        month: u32,
    },

    /// A per-day sequence does not have one entry per day of the month.
    #[error("Length mismatch for {subject}: expected {expected} entries, got {actual}")]
    LengthMismatch {
        /// What was being measured (e.g. "revenues" or "shifts of 'anna'").
        subject: String,
        /// The required length.
        expected: usize,
        /// The length actually supplied.
        actual: usize,
    },

    /// A batch edit was submitted without the required selection.
    #[error("Nothing to submit: {message}")]
    EmptySelection {
        /// What was missing from the selection.
        message: String,
    },

    /// The employee id is unknown.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        employee_id: String,
    },

    /// An invoice with the same number has already been stored.
    #[error("Invoice '{number}' already exists")]
    DuplicateInvoice {
        /// The invoice number.
        number: String,
    },

    /// The invoice store could not be read or written.
    #[error("Invoice storage error: {message}")]
    InvoiceStorage {
        /// A description of the storage failure.
        message: String,
    },

    /// The recognition capability failed to extract an invoice.
    #[error(transparent)]
    Recognition(#[from] RecognitionError),
}

impl EngineError {
    /// Returns the coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ErrorKind::Configuration,
            EngineError::InvalidRevenue { .. }
            | EngineError::InvalidShift { .. }
            | EngineError::DateOutOfRange { .. }
            | EngineError::LengthMismatch { .. }
            | EngineError::EmptySelection { .. } => ErrorKind::Validation,
            EngineError::EmployeeNotFound { .. } => ErrorKind::NotFound,
            EngineError::DuplicateInvoice { .. } => ErrorKind::Conflict,
            EngineError::InvoiceStorage { .. } => ErrorKind::Storage,
            EngineError::Recognition(_) => ErrorKind::Recognition,
        }
    }

    /// Builds an [`EngineError::InvalidRevenue`] for a decimal value.
    pub(crate) fn invalid_revenue(value: Decimal, message: impl Into<String>) -> Self {
        EngineError::InvalidRevenue {
            value: value.to_string(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
