//! Application state for the café payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::invoice::{InMemoryInvoiceStore, InvoiceRepository};

/// Shared application state.
///
/// Holds the loaded café configuration, read-only for the lifetime of the
/// server, and the invoice store, which guards its own mutations.
#[derive(Clone)]
pub struct AppState {
    /// The loaded café configuration.
    config: Arc<ConfigLoader>,
    /// Invoice storage.
    invoices: Arc<dyn InvoiceRepository>,
}

impl AppState {
    /// Creates a new application state over a configuration and an invoice store.
    pub fn new(config: ConfigLoader, invoices: impl InvoiceRepository + 'static) -> Self {
        Self {
            config: Arc::new(config),
            invoices: Arc::new(invoices),
        }
    }

    /// Creates a state whose invoices live only as long as the process.
    pub fn in_memory(config: ConfigLoader) -> Self {
        Self::new(config, InMemoryInvoiceStore::new())
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the invoice store.
    pub fn invoices(&self) -> &dyn InvoiceRepository {
        self.invoices.as_ref()
    }
}
