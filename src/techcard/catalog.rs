//! Technical card catalog.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::category::{CategoryTable, RecipeCategory};
use super::parser::{Ingredient, parse_ingredients};
use crate::error::{EngineError, EngineResult};

/// A recipe specification as stored in the technical card file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechCard {
    /// Drink type as written on the card (e.g. "Classic coffee").
    pub drink_type: String,
    /// Name of the drink or product.
    pub name: String,
    /// Comma-separated ingredient line.
    pub ingredients: String,
    /// Preparation steps, one per line.
    pub preparation: String,
}

/// A technical card with its category and ingredients resolved at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// The card as loaded.
    #[serde(flatten)]
    pub card: TechCard,
    /// Menu category resolved from the drink type.
    pub category: RecipeCategory,
    /// Parsed ingredient list.
    pub parsed_ingredients: Vec<Ingredient>,
}

/// The set of technical cards available to the menu views.
///
/// # Example
///
/// ```
/// use cafe_payroll::techcard::{CategoryTable, RecipeCategory, TechCard, TechCardCatalog};
///
/// let table = CategoryTable::from_entries([("Tea", RecipeCategory::Tea)]);
/// let catalog = TechCardCatalog::ingest(
///     vec![TechCard {
///         drink_type: "Tea".to_string(),
///         name: "Green tea".to_string(),
///         ingredients: "5 g sencha, 300 ml water".to_string(),
///         preparation: "Brew at 80 C.".to_string(),
///     }],
///     &table,
/// );
/// assert_eq!(catalog.by_category(RecipeCategory::Tea).count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TechCardCatalog {
    entries: Vec<CatalogEntry>,
}

impl TechCardCatalog {
    /// Resolves categories and ingredients for every card.
    pub fn ingest(cards: Vec<TechCard>, table: &CategoryTable) -> Self {
        let entries = cards
            .into_iter()
            .map(|card| CatalogEntry {
                category: table.resolve(&card.drink_type),
                parsed_ingredients: parse_ingredients(&card.ingredients),
                card,
            })
            .collect::<Vec<_>>();

        debug!(cards = entries.len(), "Ingested technical cards");
        Self { entries }
    }

    /// Loads cards from a JSON array file and ingests them.
    pub fn load_json<P: AsRef<Path>>(path: P, table: &CategoryTable) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;
        let cards: Vec<TechCard> =
            serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self::ingest(cards, table))
    }

    /// All entries in file order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entries of one category.
    pub fn by_category(&self, category: RecipeCategory) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    /// Entries shown on the drinks menu (everything except desserts).
    pub fn drinks(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(|e| e.category.is_drink())
    }
}
