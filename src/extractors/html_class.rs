use crate::config::MarkupSchema;
use crate::error::ShoppingListError;
use crate::extractors::{DocumentBody, Extractor, SourceDocument};
use crate::model::RawIngredientLine;
use crate::units::normalize;
use log::{debug, trace};
use scraper::{ElementRef, Html, Selector};

/// Pulls ingredient rows out of HTML exports whose structure is only given by
/// class names.
///
/// Blocks are walked in document order. A category block sets the category for
/// everything after it, a row block yields one record from its field blocks,
/// and a block whose text equals the stop text ends the walk.
pub struct HtmlClassExtractor {
    schema: MarkupSchema,
    block_selector: Selector,
    field_selector: Selector,
}

impl HtmlClassExtractor {
    pub fn new(schema: MarkupSchema) -> Result<Self, ShoppingListError> {
        let block_selector = parse_selector(&schema.block_tag)?;
        let field_selector =
            parse_selector(&format!("{}.{}", schema.block_tag, schema.field_class))?;

        Ok(Self {
            schema,
            block_selector,
            field_selector,
        })
    }

    pub fn schema(&self) -> &MarkupSchema {
        &self.schema
    }

    /// Extract ingredient records from parsed markup
    pub fn extract_document(&self, document: &Html) -> Vec<RawIngredientLine> {
        let mut records = Vec::new();
        let mut current_category = String::new();
        let stop_text = self.schema.stop_text.to_lowercase();

        for block in document.select(&self.block_selector) {
            let text = visible_text(block);

            if text.to_lowercase() == stop_text {
                debug!("Reached '{}' block, ending ingredient section", text);
                break;
            }

            if has_class(block, &self.schema.category_class) {
                current_category = text.trim().to_uppercase();
                trace!("Category heading: {}", current_category);
                continue;
            }

            if has_class(block, &self.schema.row_class) {
                if let Some(record) = self.parse_row(block, &current_category) {
                    records.push(record);
                }
            }
        }

        records
    }

    fn parse_row(&self, row: ElementRef, category: &str) -> Option<RawIngredientLine> {
        let fields: Vec<String> = row.select(&self.field_selector).map(visible_text).collect();
        let field = |index: usize| fields.get(index).cloned().unwrap_or_default();

        let name = field(0);
        if name.is_empty() {
            trace!("Skipping ingredient row without a name");
            return None;
        }

        Some(RawIngredientLine {
            name,
            quantity_text: field(1),
            unit_text: normalize(&field(2)),
            category: category.to_string(),
        })
    }
}

impl Extractor for HtmlClassExtractor {
    fn can_parse(&self, document: &SourceDocument) -> bool {
        matches!(document.body, DocumentBody::Html(_))
    }

    fn extract(&self, document: &SourceDocument) -> Vec<RawIngredientLine> {
        debug!("Extracting ingredients from {} using HTML class markup", document.source);

        match &document.body {
            DocumentBody::Html(markup) => self.extract_document(&Html::parse_document(markup)),
            DocumentBody::PdfPages(_) => Vec::new(),
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ShoppingListError> {
    Selector::parse(selector).map_err(|e| {
        ShoppingListError::InvalidMarkupSchema(format!("'{selector}' is not a valid selector: {e:?}"))
    })
}

fn has_class(element: ElementRef, class_name: &str) -> bool {
    element.value().classes().any(|class| class == class_name)
}

/// Descendant text nodes, each trimmed, concatenated without separators
fn visible_text(element: ElementRef) -> String {
    element.text().map(str::trim).collect()
}
