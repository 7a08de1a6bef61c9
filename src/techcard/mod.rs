//! Technical cards (recipe specifications) for the menu views.
//!
//! Cards are ingested once: ingredients are parsed and the menu category is
//! resolved from a [`CategoryTable`] at that point.

mod catalog;
mod category;
mod parser;

pub use catalog::{CatalogEntry, TechCard, TechCardCatalog};
pub use category::{CategoryTable, RecipeCategory};
pub use parser::{Ingredient, parse_ingredients};
