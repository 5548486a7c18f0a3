use crate::config::ChecklistConfig;
use crate::error::ShoppingListError;
use crate::model::DisplayRow;
use crate::transliterate::{encode_latin1, to_latin1_text};
use log::debug;
use pdf_oxide::writer::{DocumentBuilder, DocumentMetadata, PageSize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const PAGE_BREAK: char = '\x0c';

// PDF layout, in points
const PDF_MARGIN: f32 = 42.5;
const PDF_ROW_HEIGHT: f32 = 22.7;
const PDF_CHECKBOX_WIDTH: f32 = 28.3;
const PDF_INGREDIENT_WIDTH: f32 = 255.0;
const PDF_HEADER_SHADE: (f32, f32, f32) = (0.9, 0.9, 0.9);
const REGULAR_FONT: &str = "Helvetica";
const BOLD_FONT: &str = "Helvetica-Bold";

/// Rows sharing one category header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub label: String,
    /// (ingredient, quantity) pairs in aggregation order
    pub items: Vec<(String, String)>,
}

/// Group rows by category, sorted by label; empty categories use `uncategorized_label`
pub fn group_by_category(rows: &[DisplayRow], uncategorized_label: &str) -> Vec<CategoryGroup> {
    let mut groups: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();

    for row in rows {
        let label = if row.category.trim().is_empty() {
            uncategorized_label.to_string()
        } else {
            row.category.clone()
        };
        groups
            .entry(label)
            .or_default()
            .push((row.ingredient.clone(), row.quantity_display.clone()));
    }

    groups
        .into_iter()
        .map(|(label, items)| CategoryGroup { label, items })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecklistLine {
    Header(String),
    Entry { ingredient: String, quantity: String },
}

impl ChecklistLine {
    fn render(&self) -> String {
        match self {
            ChecklistLine::Header(label) => label.clone(),
            ChecklistLine::Entry {
                ingredient,
                quantity,
            } => format!("[ ] {ingredient}  {quantity}").trim_end().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistPage {
    pub lines: Vec<ChecklistLine>,
}

/// A paginated checklist, text already transliterated to Latin-1.
///
/// Rows are grouped under their category, categories sorted by label, and the
/// rows of each category kept in aggregation order. Every page starts with
/// the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistDocument {
    pub title: String,
    pub pages: Vec<ChecklistPage>,
}

impl ChecklistDocument {
    /// Lay out `rows` under `title`; a blank title falls back to `default_title`
    pub fn build(
        rows: &[DisplayRow],
        title: &str,
        default_title: &str,
        config: &ChecklistConfig,
    ) -> Self {
        let title = if title.trim().is_empty() {
            default_title.trim()
        } else {
            title.trim()
        };

        // The title and the blank line after it take two lines on every page
        let body_lines = config.lines_per_page.saturating_sub(2).max(1);

        let mut pages = Vec::new();
        let mut page = ChecklistPage::default();

        for group in group_by_category(rows, &config.uncategorized_label) {
            let lines = std::iter::once(ChecklistLine::Header(to_latin1_text(&group.label)))
                .chain(group.items.iter().map(|(ingredient, quantity)| {
                    ChecklistLine::Entry {
                        ingredient: to_latin1_text(ingredient),
                        quantity: to_latin1_text(quantity),
                    }
                }));

            for line in lines {
                // Never leave a header alone at the bottom of a page
                let needed = if matches!(line, ChecklistLine::Header(_)) { 2 } else { 1 };
                if !page.lines.is_empty() && page.lines.len() + needed > body_lines {
                    pages.push(std::mem::take(&mut page));
                }
                page.lines.push(line);
            }
        }

        if !page.lines.is_empty() || pages.is_empty() {
            pages.push(page);
        }

        debug!("Laid out checklist '{}' on {} page(s)", title, pages.len());

        Self {
            title: to_latin1_text(title),
            pages,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Plain-text rendering, pages separated by form feeds
    pub fn to_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| {
                let mut text = format!("{}\n\n", self.title);
                for line in &page.lines {
                    text.push_str(&line.render());
                    text.push('\n');
                }
                text
            })
            .collect::<Vec<_>>()
            .join(&PAGE_BREAK.to_string())
    }

    /// Plain-text rendering encoded as Latin-1
    pub fn to_latin1_bytes(&self) -> Vec<u8> {
        encode_latin1(&self.to_text())
    }

    /// A4 PDF rendering with a bold title on every page and bold, shaded
    /// category headers
    pub fn to_pdf_bytes(&self) -> Result<Vec<u8>, ShoppingListError> {
        let mut builder =
            DocumentBuilder::new().metadata(DocumentMetadata::new().title(self.title.as_str()));
        let (_, page_height) = PageSize::A4.dimensions();
        let quantity_x = PDF_MARGIN + PDF_CHECKBOX_WIDTH + PDF_INGREDIENT_WIDTH;

        for checklist_page in &self.pages {
            let mut y = page_height - PDF_MARGIN;
            let mut page = builder
                .page(PageSize::A4)
                .font(BOLD_FONT, 14.0)
                .at(PDF_MARGIN, y)
                .text(&self.title);
            y -= PDF_ROW_HEIGHT * 1.5;

            for line in &checklist_page.lines {
                page = match line {
                    ChecklistLine::Header(label) => page
                        .font(BOLD_FONT, 12.0)
                        .at(PDF_MARGIN, y)
                        .text(label)
                        .highlight(PDF_HEADER_SHADE),
                    ChecklistLine::Entry {
                        ingredient,
                        quantity,
                    } => {
                        let row = page
                            .font(REGULAR_FONT, 11.0)
                            .at(PDF_MARGIN, y)
                            .text("[ ]")
                            .at(PDF_MARGIN + PDF_CHECKBOX_WIDTH, y)
                            .text(ingredient);
                        if quantity.is_empty() {
                            row
                        } else {
                            row.at(quantity_x, y).text(quantity)
                        }
                    }
                };
                y -= PDF_ROW_HEIGHT;
            }

            page.done();
        }

        let bytes = builder.build()?;
        debug!("Rendered {} PDF page(s), {} bytes", self.pages.len(), bytes.len());
        Ok(bytes)
    }

    /// Write the checklist to `path`: a PDF for `.pdf` paths, Latin-1 text otherwise
    pub fn write_to(&self, path: &Path) -> Result<(), ShoppingListError> {
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

        let bytes = if is_pdf {
            self.to_pdf_bytes()?
        } else {
            self.to_latin1_bytes()
        };

        fs::write(path, bytes).map_err(|e| ShoppingListError::io(path.display().to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str, ingredient: &str, quantity: &str) -> DisplayRow {
        DisplayRow {
            category: category.to_string(),
            ingredient: ingredient.to_string(),
            quantity_display: quantity.to_string(),
        }
    }

    fn config(lines_per_page: usize) -> ChecklistConfig {
        ChecklistConfig {
            lines_per_page,
            ..ChecklistConfig::default()
        }
    }

    #[test]
    fn test_groups_sorted_with_rows_in_order() {
        let rows = vec![
            row("PRODUCE", "spinach", "2 cups"),
            row("", "salt", "to taste"),
            row("DAIRY", "milk", "1 cup"),
            row("PRODUCE", "carrots", "1 lb"),
        ];

        let groups = group_by_category(&rows, "Uncategorized");
        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["DAIRY", "PRODUCE", "Uncategorized"]);
        assert_eq!(
            groups[1].items,
            vec![
                ("spinach".to_string(), "2 cups".to_string()),
                ("carrots".to_string(), "1 lb".to_string()),
            ]
        );
    }

    #[test]
    fn test_text_rendering() {
        let rows = vec![row("PRODUCE", "spinach", "2 cups"), row("PRODUCE", "kale", "")];
        let document = ChecklistDocument::build(&rows, "  ", "Shopping", &config(30));

        assert_eq!(document.title, "Shopping");
        assert_eq!(
            document.to_text(),
            "Shopping\n\nPRODUCE\n[ ] spinach  2 cups\n[ ] kale\n"
        );
    }

    #[test]
    fn test_pagination_repeats_title() {
        let rows: Vec<_> = (0..6)
            .map(|i| row("PANTRY", &format!("item {i}"), "1"))
            .collect();
        let document = ChecklistDocument::build(&rows, "Week 1", "Shopping", &config(5));

        // 3 body lines per page: header + 2 entries, then 3 + 1 entries
        assert_eq!(document.page_count(), 3);
        let text = document.to_text();
        assert_eq!(text.matches("Week 1").count(), 3);
        assert_eq!(text.matches(PAGE_BREAK).count(), 2);
    }

    #[test]
    fn test_header_is_not_orphaned() {
        // 3 body lines: "B" would land on the last line of page one
        let rows = vec![row("A", "one", "1"), row("B", "two", "2")];
        let document = ChecklistDocument::build(&rows, "T", "T", &config(5));

        assert_eq!(document.pages.len(), 2);
        assert_eq!(
            document.pages[0].lines,
            vec![
                ChecklistLine::Header("A".to_string()),
                ChecklistLine::Entry {
                    ingredient: "one".to_string(),
                    quantity: "1".to_string(),
                },
            ]
        );
        assert_eq!(document.pages[1].lines[0], ChecklistLine::Header("B".to_string()));
    }

    #[test]
    fn test_full_category_moves_next_header() {
        let rows = vec![
            row("A", "one", "1"),
            row("A", "two", "2"),
            row("B", "three", "3"),
        ];
        let document = ChecklistDocument::build(&rows, "T", "T", &config(5));

        assert_eq!(document.pages.len(), 2);
        assert_eq!(document.pages[1].lines[0], ChecklistLine::Header("B".to_string()));
    }

    #[test]
    fn test_pdf_rendering() {
        let rows = vec![
            row("DAIRY", "milk", "1 cup"),
            row("PRODUCE", "kale", ""),
            row("PRODUCE", "lemons", "2"),
        ];
        let document = ChecklistDocument::build(&rows, "Week 1", "Shopping", &config(5));
        assert_eq!(document.page_count(), 2);

        let bytes = document.to_pdf_bytes().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.starts_with("%PDF-"));
        assert!(content.contains("/BaseFont /Helvetica-Bold"));
        assert!(content.contains("/BaseFont /Helvetica"));
        assert!(content.contains("/Count 2"));
    }

    #[test]
    fn test_write_to_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let rows = vec![row("PRODUCE", "kale", "1 bunch")];
        let document = ChecklistDocument::build(&rows, "Greens", "Shopping", &config(30));

        let pdf_path = dir.path().join("list.PDF");
        document.write_to(&pdf_path).unwrap();
        assert!(fs::read(&pdf_path).unwrap().starts_with(b"%PDF-"));

        let text_path = dir.path().join("list.txt");
        document.write_to(&text_path).unwrap();
        assert_eq!(
            fs::read(&text_path).unwrap(),
            b"Greens\n\nPRODUCE\n[ ] kale  1 bunch\n".to_vec()
        );
    }

    #[test]
    fn test_empty_table_is_a_single_empty_page() {
        let document = ChecklistDocument::build(&[], "", "Shopping", &config(30));
        assert_eq!(document.page_count(), 1);
        assert_eq!(document.to_text(), "Shopping\n\n");
    }

    #[test]
    fn test_text_is_transliterated() {
        let rows = vec![row("BAKING", "baker\u{2019}s sugar", "½ cup")];
        let document = ChecklistDocument::build(&rows, "Mom\u{2019}s list", "Shopping", &config(30));

        let bytes = document.to_latin1_bytes();
        assert!(bytes.iter().all(|b| *b < 0x80));
        assert!(document.to_text().contains("[ ] baker's sugar  1/2 cup"));
        assert_eq!(document.title, "Mom's list");
    }
}
