use crate::config::AppConfig;
use crate::error::ShoppingListError;
use crate::model::RawIngredientLine;
use log::{debug, warn};

pub mod grammar;
mod html_class;
mod pdf_text;

pub use grammar::{AmountGrammar, AmountRule, ParsedAmount};
pub use html_class::HtmlClassExtractor;
pub use pdf_text::{
    is_category_line, starts_with_quantity, BufferedLine, LineEvent, LineReducer,
    PdfTextExtractor,
};

/// Content of a loaded source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentBody {
    /// Full HTML markup of a recipe export
    Html(String),
    /// Plain text of each PDF page, in page order
    PdfPages(Vec<String>),
}

/// A source document and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub source: String,
    pub body: DocumentBody,
}

impl SourceDocument {
    pub fn html(source: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            body: DocumentBody::Html(markup.into()),
        }
    }

    pub fn pdf_pages(source: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            source: source.into(),
            body: DocumentBody::PdfPages(pages),
        }
    }
}

pub trait Extractor {
    fn can_parse(&self, document: &SourceDocument) -> bool;
    fn extract(&self, document: &SourceDocument) -> Vec<RawIngredientLine>;
}

/// Build the extractor chain described by the configuration
pub fn default_extractors(
    config: &AppConfig,
) -> Result<Vec<Box<dyn Extractor>>, ShoppingListError> {
    Ok(vec![
        Box::new(HtmlClassExtractor::new(config.markup.clone())?),
        Box::new(PdfTextExtractor::new(&config.pdf.ignore_patterns)?),
    ])
}

/// Run every document through the first extractor that accepts it.
///
/// Records keep the document order given by the caller, which matters for
/// last-write-wins category assignment downstream.
pub fn extract_all(
    documents: &[SourceDocument],
    extractors: &[Box<dyn Extractor>],
) -> Vec<RawIngredientLine> {
    let mut records = Vec::new();

    for document in documents {
        match extractors.iter().find(|e| e.can_parse(document)) {
            Some(extractor) => {
                let extracted = extractor.extract(document);
                debug!(
                    "Extracted {} ingredient lines from {}",
                    extracted.len(),
                    document.source
                );
                records.extend(extracted);
            }
            None => warn!("No extractor accepts {}, skipping", document.source),
        }
    }

    records
}
