use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::ShoppingListError;

/// Top-level application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Serving size the shopping list is scaled to
    #[serde(default = "default_servings")]
    pub servings: u32,
    /// Serving size the source recipes are written for
    #[serde(default = "default_servings")]
    pub baseline_servings: u32,
    /// Title printed at the top of every checklist page
    #[serde(default = "default_title")]
    pub title: String,
    /// Directory scanned for selectable recipe documents
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    /// Class names that mark up the HTML recipe exports
    #[serde(default)]
    pub markup: MarkupSchema,
    /// PDF text extraction settings
    #[serde(default)]
    pub pdf: PdfConfig,
    /// Checklist layout settings
    #[serde(default)]
    pub checklist: ChecklistConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            servings: default_servings(),
            baseline_servings: default_servings(),
            title: default_title(),
            source_dir: default_source_dir(),
            markup: MarkupSchema::default(),
            pdf: PdfConfig::default(),
            checklist: ChecklistConfig::default(),
        }
    }
}

/// Declarative description of an HTML export dialect.
///
/// The exports this was written against use generated class names: one class
/// on category headings, one on ingredient rows, and one on each of the three
/// fields (name, quantity, unit) inside a row.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct MarkupSchema {
    /// Element tag of the blocks that are walked in document order
    #[serde(default = "default_block_tag")]
    pub block_tag: String,
    #[serde(default = "default_category_class")]
    pub category_class: String,
    #[serde(default = "default_row_class")]
    pub row_class: String,
    #[serde(default = "default_field_class")]
    pub field_class: String,
    /// Block text (case-insensitive) that ends the ingredient section
    #[serde(default = "default_stop_text")]
    pub stop_text: String,
}

impl Default for MarkupSchema {
    fn default() -> Self {
        Self {
            block_tag: default_block_tag(),
            category_class: default_category_class(),
            row_class: default_row_class(),
            field_class: default_field_class(),
            stop_text: default_stop_text(),
        }
    }
}

/// Configuration for PDF text extraction
#[derive(Debug, Deserialize, Clone)]
pub struct PdfConfig {
    /// Regexes for boilerplate lines dropped before classification
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            ignore_patterns: default_ignore_patterns(),
        }
    }
}

/// Configuration for checklist rendering
#[derive(Debug, Deserialize, Clone)]
pub struct ChecklistConfig {
    /// Lines per page, counting the title and category headers
    #[serde(default = "default_lines_per_page")]
    pub lines_per_page: usize,
    /// Header used for rows without a category
    #[serde(default = "default_uncategorized_label")]
    pub uncategorized_label: String,
}

impl Default for ChecklistConfig {
    fn default() -> Self {
        Self {
            lines_per_page: default_lines_per_page(),
            uncategorized_label: default_uncategorized_label(),
        }
    }
}

// Default value functions
fn default_servings() -> u32 {
    10
}

fn default_title() -> String {
    "Tiny Chefs Shopping List".to_string()
}

fn default_source_dir() -> String {
    "./html_files".to_string()
}

fn default_block_tag() -> String {
    "div".to_string()
}

fn default_category_class() -> String {
    "x245".to_string()
}

fn default_row_class() -> String {
    "x241".to_string()
}

fn default_field_class() -> String {
    "x242".to_string()
}

fn default_stop_text() -> String {
    "recipes".to_string()
}

fn default_ignore_patterns() -> Vec<String> {
    vec![
        "Created with SamsungFood.com".to_string(),
        r"Food fact:.*?\.".to_string(),
    ]
}

fn default_lines_per_page() -> usize {
    30
}

fn default_uncategorized_label() -> String {
    "Uncategorized".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with TINYCHEFS__ prefix
    /// 2. tinychefs.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: TINYCHEFS__MARKUP__ROW_CLASS
    pub fn load() -> Result<Self, ShoppingListError> {
        let config = load_config()?;
        config.validate()?;
        Ok(config)
    }

    /// Ratio of the requested serving size to the recipes' baseline
    pub fn scale_factor(&self) -> f64 {
        scale_factor(self.servings, self.baseline_servings)
    }

    /// Reject serving sizes that would make the scale factor zero or undefined
    pub fn validate(&self) -> Result<(), ShoppingListError> {
        if self.servings == 0 {
            return Err(ShoppingListError::InvalidServings(self.servings));
        }
        if self.baseline_servings == 0 {
            return Err(ShoppingListError::InvalidServings(self.baseline_servings));
        }
        Ok(())
    }
}

/// Scale factor for `servings` relative to `baseline` servings
pub fn scale_factor(servings: u32, baseline: u32) -> f64 {
    f64::from(servings) / f64::from(baseline)
}

/// Load configuration from file and environment variables
///
/// Environment variable format: TINYCHEFS__CHECKLIST__LINES_PER_PAGE
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("tinychefs").required(false))
        // Use double underscore for nested: TINYCHEFS__PDF__IGNORE_PATTERNS
        .add_source(
            Environment::with_prefix("TINYCHEFS")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
