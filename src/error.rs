use thiserror::Error;

/// Errors that can occur while building or rendering a shopping list
#[derive(Error, Debug)]
pub enum ShoppingListError {
    /// Failed to open or read a selected source document
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The PDF text layer could not be extracted
    #[error("Failed to extract text from PDF {path}: {message}")]
    PdfExtraction { path: String, message: String },

    /// File type is neither HTML, PDF nor pre-extracted text
    #[error("Unsupported source document: {0}")]
    UnsupportedSource(String),

    /// The checklist PDF could not be written
    #[error("Failed to write checklist PDF: {0}")]
    PdfRender(#[from] pdf_oxide::Error),

    /// Render was requested before any shopping list was generated
    #[error("Please generate the shopping list first")]
    NotGenerated,

    /// Serving sizes must be positive
    #[error("Serving size must be a positive number, got {0}")]
    InvalidServings(u32),

    /// Configured markup classes or tag cannot be turned into a selector
    #[error("Invalid markup schema: {0}")]
    InvalidMarkupSchema(String),

    /// A configured boilerplate pattern is not a valid regex
    #[error("Invalid ignore pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl ShoppingListError {
    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        ShoppingListError::Io {
            path: path.into(),
            source,
        }
    }
}
