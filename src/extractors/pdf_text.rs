use crate::error::ShoppingListError;
use crate::extractors::grammar::AmountGrammar;
use crate::extractors::{DocumentBody, Extractor, SourceDocument};
use crate::model::RawIngredientLine;
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

const FRACTION_CHARS: &str = "¼½¾⅐⅑⅒⅓⅔⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞";

const MAX_CATEGORY_WORDS: usize = 5;

lazy_static! {
    static ref ANY_DIGIT: Regex = Regex::new(r"\d").expect("digit pattern should be valid");
}

/// True when the line opens with a digit or a vulgar fraction
pub fn starts_with_quantity(line: &str) -> bool {
    line.trim_start()
        .chars()
        .next()
        .is_some_and(|c| is_digit(c) || FRACTION_CHARS.contains(c))
}

/// Short, digit-free lines starting with a capital letter are section headings
pub fn is_category_line(line: &str) -> bool {
    let Some(first) = line.chars().next() else {
        return false;
    };

    first.is_uppercase()
        && !starts_with_quantity(line)
        && !ANY_DIGIT.is_match(line)
        && line.split_whitespace().count() <= MAX_CATEGORY_WORDS
}

fn is_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    ANY_DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Input to the line reducer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent<'a> {
    /// A trimmed, non-empty, non-boilerplate line
    Line(&'a str),
    /// End of a page's line list
    PageBreak,
}

/// A logical ingredient line, ready for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferedLine {
    pub text: String,
    pub category: Option<String>,
}

/// Line buffering and category tracking as an explicit state machine.
///
/// Every event may flush at most one buffered line. A category line flushes
/// under the category that was active before it, a quantity-leading line
/// flushes and starts a new buffer, anything else is appended to the buffer,
/// and a page break flushes whatever is pending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineReducer {
    current_category: Option<String>,
    pending: Option<String>,
}

impl LineReducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_category(&self) -> Option<&str> {
        self.current_category.as_deref()
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn step(&mut self, event: LineEvent) -> Option<BufferedLine> {
        match event {
            LineEvent::PageBreak => self.flush(),
            LineEvent::Line(line) if is_category_line(line) => {
                let flushed = self.flush();
                trace!("Category heading: {}", line);
                self.current_category = Some(line.to_string());
                flushed
            }
            LineEvent::Line(line) if starts_with_quantity(line) => {
                let flushed = self.flush();
                self.pending = Some(line.to_string());
                flushed
            }
            LineEvent::Line(line) => {
                match self.pending.as_mut() {
                    Some(buffer) => {
                        buffer.push(' ');
                        buffer.push_str(line);
                    }
                    None => self.pending = Some(line.to_string()),
                }
                None
            }
        }
    }

    fn flush(&mut self) -> Option<BufferedLine> {
        self.pending.take().map(|text| BufferedLine {
            text,
            category: self.current_category.clone(),
        })
    }
}

/// Recovers ingredient records from the plain text of PDF exports, where the
/// only structure left is line order
pub struct PdfTextExtractor {
    ignore_patterns: Vec<Regex>,
    grammar: AmountGrammar,
}

impl PdfTextExtractor {
    pub fn new<S: AsRef<str>>(ignore_patterns: &[S]) -> Result<Self, ShoppingListError> {
        let ignore_patterns = ignore_patterns
            .iter()
            .map(|pattern| Regex::new(pattern.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            ignore_patterns,
            grammar: AmountGrammar::default(),
        })
    }

    pub fn with_grammar(mut self, grammar: AmountGrammar) -> Self {
        self.grammar = grammar;
        self
    }

    fn is_boilerplate(&self, line: &str) -> bool {
        self.ignore_patterns.iter().any(|pattern| pattern.is_match(line))
    }

    /// Extract records from the text of each page, in page order
    pub fn extract_pages<S: AsRef<str>>(&self, pages: &[S]) -> Vec<RawIngredientLine> {
        let mut reducer = LineReducer::new();
        let mut records = Vec::new();

        for page in pages {
            let lines = page
                .as_ref()
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .filter(|line| {
                    let skip = self.is_boilerplate(line);
                    if skip {
                        trace!("Dropping boilerplate line: {}", line);
                    }
                    !skip
                });

            let events = lines
                .map(LineEvent::Line)
                .chain(std::iter::once(LineEvent::PageBreak));

            for event in events {
                if let Some(buffered) = reducer.step(event) {
                    records.extend(self.parse_buffered(buffered));
                }
            }
        }

        records
    }

    fn parse_buffered(&self, buffered: BufferedLine) -> Option<RawIngredientLine> {
        match self.grammar.parse(&buffered.text) {
            Some(parsed) => Some(RawIngredientLine {
                name: parsed.ingredient,
                quantity_text: parsed.amount,
                unit_text: String::new(),
                category: buffered.category.unwrap_or_default(),
            }),
            None => {
                debug!("No amount pattern matched, discarding: {}", buffered.text);
                None
            }
        }
    }
}

impl Extractor for PdfTextExtractor {
    fn can_parse(&self, document: &SourceDocument) -> bool {
        matches!(document.body, DocumentBody::PdfPages(_))
    }

    fn extract(&self, document: &SourceDocument) -> Vec<RawIngredientLine> {
        debug!("Extracting ingredients from {} using PDF line grammar", document.source);

        match &document.body {
            DocumentBody::PdfPages(pages) => self.extract_pages(pages),
            DocumentBody::Html(_) => Vec::new(),
        }
    }
}
