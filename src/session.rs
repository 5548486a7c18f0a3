use crate::aggregator::Aggregator;
use crate::checklist::ChecklistDocument;
use crate::config::{scale_factor, AppConfig};
use crate::error::ShoppingListError;
use crate::extractors::{default_extractors, extract_all, Extractor, SourceDocument};
use crate::model::AggregatedTable;
use crate::sources::load_documents;
use log::info;
use std::path::Path;

/// Holds the most recently generated table between a generate and a render.
///
/// Regenerating replaces the table; a failed generate keeps the previous one.
pub struct ShoppingSession {
    config: AppConfig,
    extractors: Vec<Box<dyn Extractor>>,
    table: Option<AggregatedTable>,
}

impl ShoppingSession {
    pub fn new(config: AppConfig) -> Result<Self, ShoppingListError> {
        config.validate()?;
        let extractors = default_extractors(&config)?;

        Ok(Self {
            config,
            extractors,
            table: None,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Last generated table, if any
    pub fn table(&self) -> Option<&AggregatedTable> {
        self.table.as_ref()
    }

    /// Load the selected files in order and aggregate them for `servings`
    pub fn generate<P: AsRef<Path>>(
        &mut self,
        paths: &[P],
        servings: u32,
    ) -> Result<&AggregatedTable, ShoppingListError> {
        let documents = load_documents(paths)?;
        self.generate_from_documents(&documents, servings)
    }

    /// Aggregate already loaded documents for `servings`
    pub fn generate_from_documents(
        &mut self,
        documents: &[SourceDocument],
        servings: u32,
    ) -> Result<&AggregatedTable, ShoppingListError> {
        if servings == 0 {
            return Err(ShoppingListError::InvalidServings(servings));
        }

        let records = extract_all(documents, &self.extractors);
        let mut aggregator = Aggregator::new(scale_factor(servings, self.config.baseline_servings));
        aggregator.extend(&records);

        let table = AggregatedTable {
            servings,
            rows: aggregator.into_rows(),
        };
        info!(
            "Generated shopping list for {} servings: {} ingredients from {} documents",
            servings,
            table.len(),
            documents.len()
        );

        Ok(&*self.table.insert(table))
    }

    /// Lay out the last generated table as a checklist.
    ///
    /// Fails with [`ShoppingListError::NotGenerated`] when nothing has been
    /// generated yet.
    pub fn render(&self, title: &str) -> Result<ChecklistDocument, ShoppingListError> {
        let table = self.table.as_ref().ok_or(ShoppingListError::NotGenerated)?;

        Ok(ChecklistDocument::build(
            &table.rows,
            title,
            &self.config.title,
            &self.config.checklist,
        ))
    }
}
