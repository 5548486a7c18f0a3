use std::path::PathBuf;

use crate::{
    config::AppConfig, error::ShoppingListError, extractors::SourceDocument,
    model::AggregatedTable, session::ShoppingSession, sources::load_document,
};

/// Represents one selected recipe document
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Load from a file; the extension decides how it is read
    File(PathBuf),
    /// Use a document that is already in memory
    Document(SourceDocument),
}

/// Builder for configuring and running a generate operation
#[derive(Debug, Default)]
pub struct ShoppingListBuilder {
    sources: Vec<InputSource>,
    servings: Option<u32>,
    config: Option<AppConfig>,
}

impl ShoppingListBuilder {
    /// Add a recipe file (HTML, PDF or pre-extracted PDF text)
    ///
    /// Files are processed in the order they are added.
    ///
    /// # Example
    /// ```
    /// use tinychefs_shopping::ShoppingList;
    ///
    /// let builder = ShoppingList::builder()
    ///     .file("html_files/lasagna.html")
    ///     .file("html_files/salad.pdf");
    /// ```
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(InputSource::File(path.into()));
        self
    }

    /// Add several recipe files at once
    pub fn files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.sources
            .extend(paths.into_iter().map(|p| InputSource::File(p.into())));
        self
    }

    /// Add HTML markup that is already in memory
    ///
    /// # Example
    /// ```
    /// use tinychefs_shopping::ShoppingList;
    ///
    /// let html = r#"<div class="x241"><div class="x242">Eggs</div><div class="x242">6</div></div>"#;
    /// let builder = ShoppingList::builder().html("inline", html);
    /// ```
    pub fn html(mut self, source: impl Into<String>, markup: impl Into<String>) -> Self {
        self.sources
            .push(InputSource::Document(SourceDocument::html(source, markup)));
        self
    }

    /// Add the per-page text of a PDF that is already in memory
    pub fn pdf_pages(mut self, source: impl Into<String>, pages: Vec<String>) -> Self {
        self.sources
            .push(InputSource::Document(SourceDocument::pdf_pages(source, pages)));
        self
    }

    /// Set the target serving size (defaults to the configured one)
    pub fn servings(mut self, servings: u32) -> Self {
        self.servings = Some(servings);
        self
    }

    /// Use an explicit configuration instead of the default one
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load every source and aggregate them into one table
    ///
    /// # Errors
    /// Returns `ShoppingListError` if:
    /// - A selected file cannot be read
    /// - A PDF has no readable text layer
    /// - The serving size is zero
    /// - The configured markup schema or ignore patterns are invalid
    ///
    /// Selecting no sources is not an error and yields an empty table.
    ///
    /// # Example
    /// ```
    /// use tinychefs_shopping::ShoppingList;
    ///
    /// let table = ShoppingList::builder()
    ///     .pdf_pages("list.pdf", vec!["PRODUCE\n4 lemons".to_string()])
    ///     .servings(20)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(table.rows[0].quantity_display, "8");
    /// ```
    pub fn build(self) -> Result<AggregatedTable, ShoppingListError> {
        let config = self.config.unwrap_or_default();
        let servings = self.servings.unwrap_or(config.servings);

        // Read everything up front so a bad file aborts before aggregation
        let documents = self
            .sources
            .into_iter()
            .map(|source| match source {
                InputSource::File(path) => load_document(&path),
                InputSource::Document(document) => Ok(document),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut session = ShoppingSession::new(config)?;
        let table = session.generate_from_documents(&documents, servings)?.clone();
        Ok(table)
    }
}

/// Main entry point for the builder API
pub struct ShoppingList;

impl ShoppingList {
    /// Creates a new builder for a shopping list
    ///
    /// # Example
    /// ```
    /// use tinychefs_shopping::ShoppingList;
    ///
    /// let builder = ShoppingList::builder();
    /// ```
    pub fn builder() -> ShoppingListBuilder {
        ShoppingListBuilder::default()
    }
}
