//! Invoice persistence.
//!
//! [`InvoiceRepository`] is the storage seam; [`InMemoryInvoiceStore`] backs
//! tests and short-lived servers, [`JsonFileInvoiceStore`] keeps the whole
//! collection in one JSON file rewritten on every save.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use super::{ExtractedInvoice, StoredInvoice};
use crate::error::{EngineError, EngineResult};

/// Storage for accepted invoices, keyed by invoice number.
pub trait InvoiceRepository: Send + Sync {
    /// Stores a new invoice.
    ///
    /// Returns `DuplicateInvoice` if the number is already stored; a number
    /// is stored at most once.
    fn save(&self, invoice: ExtractedInvoice) -> EngineResult<StoredInvoice>;

    /// Whether an invoice with this number is stored.
    fn exists(&self, number: &str) -> bool;

    /// All stored invoices, in the order they were saved.
    fn list(&self) -> Vec<StoredInvoice>;
}

fn lock(invoices: &Mutex<Vec<StoredInvoice>>) -> MutexGuard<'_, Vec<StoredInvoice>> {
    invoices.lock().unwrap_or_else(PoisonError::into_inner)
}

fn ensure_new(invoices: &[StoredInvoice], number: &str) -> EngineResult<()> {
    if invoices.iter().any(|i| i.number() == number) {
        return Err(EngineError::DuplicateInvoice {
            number: number.to_string(),
        });
    }
    Ok(())
}

/// Process-local invoice store.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceStore {
    invoices: Mutex<Vec<StoredInvoice>>,
}

impl InMemoryInvoiceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl InvoiceRepository for InMemoryInvoiceStore {
    fn save(&self, invoice: ExtractedInvoice) -> EngineResult<StoredInvoice> {
        let mut invoices = lock(&self.invoices);
        ensure_new(&invoices, &invoice.number)?;

        let stored = StoredInvoice::new(invoice);
        invoices.push(stored.clone());
        debug!(number = %stored.number(), id = %stored.id, "Stored invoice");
        Ok(stored)
    }

    fn exists(&self, number: &str) -> bool {
        lock(&self.invoices).iter().any(|i| i.number() == number)
    }

    fn list(&self) -> Vec<StoredInvoice> {
        lock(&self.invoices).clone()
    }
}

/// Invoice store persisted as a single JSON array on disk.
#[derive(Debug)]
pub struct JsonFileInvoiceStore {
    path: PathBuf,
    invoices: Mutex<Vec<StoredInvoice>>,
}

impl JsonFileInvoiceStore {
    /// Opens the store at `path`, starting empty if the file does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref().to_path_buf();

        let invoices = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| storage_error(&path, e))?;
            serde_json::from_str(&content).map_err(|e| storage_error(&path, e))?
        } else {
            Vec::new()
        };

        info!(
            path = %path.display(),
            invoices = invoices.len(),
            "Opened invoice store"
        );

        Ok(Self {
            path,
            invoices: Mutex::new(invoices),
        })
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, invoices: &[StoredInvoice]) -> EngineResult<()> {
        let json =
            serde_json::to_vec_pretty(invoices).map_err(|e| storage_error(&self.path, e))?;
        fs::write(&self.path, json).map_err(|e| storage_error(&self.path, e))
    }
}

impl InvoiceRepository for JsonFileInvoiceStore {
    fn save(&self, invoice: ExtractedInvoice) -> EngineResult<StoredInvoice> {
        let mut invoices = lock(&self.invoices);
        ensure_new(&invoices, &invoice.number)?;

        let stored = StoredInvoice::new(invoice);
        invoices.push(stored.clone());
        if let Err(e) = self.write(&invoices) {
            invoices.pop();
            return Err(e);
        }

        debug!(
            number = %stored.number(),
            id = %stored.id,
            path = %self.path.display(),
            "Stored invoice"
        );
        Ok(stored)
    }

    fn exists(&self, number: &str) -> bool {
        lock(&self.invoices).iter().any(|i| i.number() == number)
    }

    fn list(&self) -> Vec<StoredInvoice> {
        lock(&self.invoices).clone()
    }
}

fn storage_error(path: &Path, error: impl std::fmt::Display) -> EngineError {
    EngineError::InvoiceStorage {
        message: format!("{}: {}", path.display(), error),
    }
}
