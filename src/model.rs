use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One ingredient line as it came out of an extractor.
///
/// `quantity_text` is passed through untouched; deciding whether it is a number
/// is left to the aggregator. PDF records leave `unit_text` empty because the
/// unit is embedded in the amount text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIngredientLine {
    pub name: String,
    pub quantity_text: String,
    pub unit_text: String,
    pub category: String,
}

impl RawIngredientLine {
    pub fn new(
        name: impl Into<String>,
        quantity_text: impl Into<String>,
        unit_text: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity_text: quantity_text.into(),
            unit_text: unit_text.into(),
            category: category.into(),
        }
    }
}

/// Running totals for a single ingredient across every processed document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedIngredient {
    /// Category of the most recently processed occurrence
    pub category: String,
    /// Scaled numeric totals per canonical unit, in first-insertion order
    pub units: IndexMap<String, f64>,
    /// Quantity phrases that did not parse as numbers, in insertion order
    pub raw_phrases: Vec<String>,
}

/// A finished row of the shopping list, ready for display or export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Ingredient")]
    pub ingredient: String,
    #[serde(rename = "Quantity")]
    pub quantity_display: String,
}

/// The result of one generate operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregatedTable {
    /// Serving size the quantities were scaled to
    pub servings: u32,
    pub rows: Vec<DisplayRow>,
}

impl AggregatedTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Serialize the rows as a JSON array of `{Category, Ingredient, Quantity}` objects
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.rows)
    }
}
