pub mod aggregator;
pub mod builder;
pub mod checklist;
pub mod config;
pub mod error;
pub mod extractors;
pub mod model;
pub mod session;
pub mod sources;
pub mod transliterate;
pub mod units;

// Re-export commonly used types
pub use crate::builder::{InputSource, ShoppingList, ShoppingListBuilder};
pub use crate::checklist::ChecklistDocument;
pub use crate::config::AppConfig;
pub use crate::error::ShoppingListError;
pub use crate::model::{AggregatedTable, DisplayRow, RawIngredientLine};
pub use crate::session::ShoppingSession;

use log::debug;
use std::path::Path;

use crate::extractors::{default_extractors, extract_all};
use crate::sources::load_documents;

/// Aggregate the given recipe files for `servings`, using the default configuration
///
/// # Example
/// ```no_run
/// # fn main() -> Result<(), tinychefs_shopping::ShoppingListError> {
/// let table = tinychefs_shopping::generate_shopping_list(&["html_files/chili.html"], 12)?;
/// println!("{}", table.to_json().unwrap());
/// # Ok(())
/// # }
/// ```
pub fn generate_shopping_list<P: AsRef<Path>>(
    paths: &[P],
    servings: u32,
) -> Result<AggregatedTable, ShoppingListError> {
    let mut session = ShoppingSession::new(AppConfig::default())?;
    let table = session.generate(paths, servings)?.clone();
    Ok(table)
}

/// Parse the given files into raw ingredient records without aggregating them
pub fn extract_records<P: AsRef<Path>>(
    paths: &[P],
    config: &AppConfig,
) -> Result<Vec<RawIngredientLine>, ShoppingListError> {
    let documents = load_documents(paths)?;
    let extractors = default_extractors(config)?;
    let records = extract_all(&documents, &extractors);
    debug!("Extracted {} records from {} documents", records.len(), documents.len());
    Ok(records)
}
