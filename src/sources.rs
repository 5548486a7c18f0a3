use crate::error::ShoppingListError;
use crate::extractors::SourceDocument;
use log::{debug, info};
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

/// Kinds of documents that can be selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Html,
    Pdf,
    /// Text already extracted from a PDF, pages separated by form feeds
    PdfText,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "html" | "htm" => Some(SourceKind::Html),
            "pdf" => Some(SourceKind::Pdf),
            "txt" => Some(SourceKind::PdfText),
            _ => None,
        }
    }
}

/// Read a single document from disk
pub fn load_document(path: &Path) -> Result<SourceDocument, ShoppingListError> {
    let source = path.display().to_string();
    let kind = SourceKind::from_path(path)
        .ok_or_else(|| ShoppingListError::UnsupportedSource(source.clone()))?;

    debug!("Loading {:?} document {}", kind, source);

    let document = match kind {
        SourceKind::Html => {
            let markup =
                fs::read_to_string(path).map_err(|e| ShoppingListError::io(&source, e))?;
            SourceDocument::html(source, markup)
        }
        SourceKind::Pdf => {
            let bytes = fs::read(path).map_err(|e| ShoppingListError::io(&source, e))?;
            let pages = extract_pdf_pages(&source, &bytes)?;
            SourceDocument::pdf_pages(source, pages)
        }
        SourceKind::PdfText => {
            let text = fs::read_to_string(path).map_err(|e| ShoppingListError::io(&source, e))?;
            SourceDocument::pdf_pages(source, split_pages(&text))
        }
    };

    Ok(document)
}

/// Read every document, stopping at the first failure.
///
/// Nothing is extracted until all documents are read, so a bad file leaves no
/// partially processed input behind.
pub fn load_documents<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<SourceDocument>, ShoppingListError> {
    paths.iter().map(|path| load_document(path.as_ref())).collect()
}

/// Selectable documents in `dir`, sorted by file name
pub fn list_sources(dir: &Path) -> Result<Vec<PathBuf>, ShoppingListError> {
    let source = dir.display().to_string();
    let entries = fs::read_dir(dir).map_err(|e| ShoppingListError::io(&source, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ShoppingListError::io(&source, e))?.path();
        if path.is_file() && SourceKind::from_path(&path).is_some() {
            paths.push(path);
        }
    }
    paths.sort();

    info!("Found {} recipe documents in {}", paths.len(), source);
    Ok(paths)
}

/// Split pre-extracted PDF text on form feeds
pub fn split_pages(text: &str) -> Vec<String> {
    text.split('\x0c').map(str::to_string).collect()
}

/// Per-page text of a PDF.
///
/// `pdf_extract` can panic on malformed input, so the call is isolated and a
/// panic is reported as an extraction error.
fn extract_pdf_pages(source: &str, bytes: &[u8]) -> Result<Vec<String>, ShoppingListError> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));

    match result {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(ShoppingListError::PdfExtraction {
            path: source.to_string(),
            message: e.to_string(),
        }),
        Err(_) => Err(ShoppingListError::PdfExtraction {
            path: source.to_string(),
            message: "PDF extraction panicked (malformed document)".to_string(),
        }),
    }
}
