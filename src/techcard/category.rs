//! Menu categories for technical cards.
//!
//! Categories are resolved once, when cards are ingested, from a lookup table
//! keyed by the card's drink type. Nothing downstream re-derives a category
//! from free text.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The menu category a technical card belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeCategory {
    /// Espresso-based and brewed coffee.
    Coffee,
    /// Teas and infusions.
    Tea,
    /// House signature drinks.
    Author,
    /// Lemonades.
    Lemonade,
    /// Desserts and pastries.
    Dessert,
    /// Anything the table does not know about.
    Other,
}

impl RecipeCategory {
    /// Returns true for categories shown on the drinks menu.
    pub fn is_drink(self) -> bool {
        self != RecipeCategory::Dessert
    }
}

/// Lookup table from canonical drink type to [`RecipeCategory`].
///
/// Keys are canonicalized (trimmed, lowercased) both when the table is built
/// and when it is queried.
///
/// # Example
///
/// ```
/// use cafe_payroll::techcard::{CategoryTable, RecipeCategory};
///
/// let table = CategoryTable::from_entries([("Classic coffee", RecipeCategory::Coffee)]);
/// assert_eq!(table.resolve("  classic COFFEE "), RecipeCategory::Coffee);
/// assert_eq!(table.resolve("Smoothie"), RecipeCategory::Other);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTable {
    entries: HashMap<String, RecipeCategory>,
}

impl CategoryTable {
    /// Builds a table from `(drink type, category)` pairs.
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, RecipeCategory)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, category)| (canonical(key.as_ref()), category))
                .collect(),
        }
    }

    /// Resolves a drink type to its category; unknown types are `Other`.
    pub fn resolve(&self, drink_type: &str) -> RecipeCategory {
        self.entries
            .get(&canonical(drink_type))
            .copied()
            .unwrap_or(RecipeCategory::Other)
    }

    /// Number of known drink types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn canonical(drink_type: &str) -> String {
    drink_type.trim().to_lowercase()
}
