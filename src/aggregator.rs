use crate::model::{AggregatedIngredient, DisplayRow, RawIngredientLine};
use indexmap::IndexMap;
use log::{debug, trace};

const SEPARATOR: &str = " and ";

/// Accumulates ingredient lines across documents.
///
/// Ingredients are keyed by their trimmed, lower-cased name. Numeric
/// quantities are scaled and summed per unit; anything else is kept verbatim
/// as a raw phrase so no ingredient is ever dropped.
#[derive(Debug, Clone)]
pub struct Aggregator {
    scale_factor: f64,
    ingredients: IndexMap<String, AggregatedIngredient>,
}

impl Aggregator {
    pub fn new(scale_factor: f64) -> Self {
        Self {
            scale_factor,
            ingredients: IndexMap::new(),
        }
    }

    pub fn add(&mut self, line: &RawIngredientLine) {
        let key = ingredient_key(&line.name);
        let entry = self.ingredients.entry(key).or_default();

        match parse_quantity(&line.quantity_text) {
            Some(quantity) => {
                // A unit with no amount means one of that unit
                let quantity = if quantity == 0.0 && !line.unit_text.is_empty() {
                    1.0
                } else {
                    quantity
                };
                *entry.units.entry(line.unit_text.clone()).or_insert(0.0) +=
                    quantity * self.scale_factor;
            }
            None => {
                let phrase = format!("{} {}", line.quantity_text, line.unit_text)
                    .trim()
                    .to_string();
                trace!("Keeping '{}' for {} as a raw phrase", phrase, line.name);
                entry.raw_phrases.push(phrase);
            }
        }

        entry.category = line.category.clone();
    }

    pub fn extend<'a>(&mut self, lines: impl IntoIterator<Item = &'a RawIngredientLine>) {
        for line in lines {
            self.add(line);
        }
    }

    /// Aggregated state per ingredient key, in first-seen order
    pub fn ingredients(&self) -> &IndexMap<String, AggregatedIngredient> {
        &self.ingredients
    }

    pub fn into_rows(self) -> Vec<DisplayRow> {
        debug!("Aggregated {} distinct ingredients", self.ingredients.len());

        self.ingredients
            .into_iter()
            .map(|(ingredient, aggregated)| DisplayRow {
                quantity_display: quantity_display(&aggregated),
                category: aggregated.category,
                ingredient,
            })
            .collect()
    }
}

/// Merge `lines` into display rows, scaling every numeric quantity by `scale_factor`
pub fn aggregate(lines: &[RawIngredientLine], scale_factor: f64) -> Vec<DisplayRow> {
    let mut aggregator = Aggregator::new(scale_factor);
    aggregator.extend(lines);
    aggregator.into_rows()
}

pub fn ingredient_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Numeric value of a quantity, or `None` when it has to stay a raw phrase
fn parse_quantity(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Two decimals, then trailing zeros and a dangling point removed
pub fn format_quantity(total: f64) -> String {
    if total == 0.0 {
        return String::new();
    }

    let formatted = format!("{total:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn quantity_display(aggregated: &AggregatedIngredient) -> String {
    let unit_segments = aggregated
        .units
        .iter()
        .map(|(unit, total)| format!("{} {}", format_quantity(*total), unit).trim().to_string());

    unit_segments
        .chain(aggregated.raw_phrases.iter().cloned())
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, quantity: &str, unit: &str, category: &str) -> RawIngredientLine {
        RawIngredientLine::new(name, quantity, unit, category)
    }

    fn row(category: &str, ingredient: &str, quantity: &str) -> DisplayRow {
        DisplayRow {
            category: category.to_string(),
            ingredient: ingredient.to_string(),
            quantity_display: quantity.to_string(),
        }
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(3.0), "3");
        assert_eq!(format_quantity(3.5), "3.5");
        assert_eq!(format_quantity(0.25), "0.25");
        assert_eq!(format_quantity(10.0), "10");
        assert_eq!(format_quantity(1.0 / 3.0), "0.33");
        assert_eq!(format_quantity(0.0), "");
    }

    #[test]
    fn test_names_merge_case_and_whitespace_insensitively() {
        let rows = aggregate(
            &[
                line("Carrots", "2", "lb", "PRODUCE"),
                line("  carrots ", "1.5", "lb", "PRODUCE"),
            ],
            1.0,
        );

        assert_eq!(rows, vec![row("PRODUCE", "carrots", "3.5 lb")]);
    }

    #[test]
    fn test_quantities_are_scaled() {
        let rows = aggregate(
            &[line("rice", "1", "cup", ""), line("rice", "2", "cup", "")],
            1.5,
        );
        assert_eq!(rows[0].quantity_display, "4.5 cup");
    }

    #[test]
    fn test_units_are_summed_separately_in_first_seen_order() {
        let rows = aggregate(
            &[
                line("butter", "2", "tbsp", "DAIRY"),
                line("butter", "100", "g", "DAIRY"),
                line("butter", "1", "tbsp", "DAIRY"),
            ],
            1.0,
        );
        assert_eq!(rows[0].quantity_display, "3 tbsp and 100 g");
    }

    #[test]
    fn test_zero_with_unit_counts_as_one() {
        let rows = aggregate(&[line("garlic", "0", "clove", "PRODUCE")], 2.0);
        assert_eq!(rows[0].quantity_display, "2 clove");

        let rows = aggregate(&[line("water", "0", "", "")], 2.0);
        assert_eq!(rows[0].quantity_display, "");
    }

    #[test]
    fn test_zero_total_shows_unit_only() {
        let mut aggregator = Aggregator::new(0.0);
        aggregator.add(&line("vanilla", "1", "tsp", ""));
        let rows = aggregator.into_rows();
        assert_eq!(rows[0].quantity_display, "tsp");
    }

    #[test]
    fn test_non_numeric_quantities_become_raw_phrases() {
        let rows = aggregate(
            &[
                line("salt", "to taste", "pinch", "SPICES"),
                line("parsley", "", "", "PRODUCE"),
                line("flour", "1 1/2", "cup", "PANTRY"),
            ],
            3.0,
        );

        assert_eq!(rows[0].quantity_display, "to taste pinch");
        assert_eq!(rows[1].quantity_display, "");
        // Raw phrases are never scaled
        assert_eq!(rows[2].quantity_display, "1 1/2 cup");
    }

    #[test]
    fn test_numeric_and_raw_segments_are_joined() {
        let rows = aggregate(
            &[
                line("pepper", "1", "tsp", "SPICES"),
                line("pepper", "a pinch", "", "SPICES"),
                line("pepper", "to taste", "", "SPICES"),
            ],
            1.0,
        );
        assert_eq!(rows[0].quantity_display, "1 tsp and a pinch and to taste");
    }

    #[test]
    fn test_state_keeps_units_and_phrases_apart() {
        let mut aggregator = Aggregator::new(2.0);
        aggregator.add(&line("Flour", "1", "cup", "BAKING"));
        aggregator.add(&line("flour", "a handful", "", "BAKING"));

        let flour = &aggregator.ingredients()["flour"];
        assert_eq!(flour.units.get("cup"), Some(&2.0));
        assert_eq!(flour.raw_phrases, vec!["a handful".to_string()]);
        assert_eq!(aggregator.ingredients().len(), 1);
    }

    #[test]
    fn test_last_category_wins() {
        let rows = aggregate(
            &[
                line("lemons", "2", "", "PRODUCE"),
                line("lemons", "1", "", "CITRUS"),
            ],
            1.0,
        );
        assert_eq!(rows, vec![row("CITRUS", "lemons", "3")]);
    }

    #[test]
    fn test_non_finite_text_is_a_raw_phrase() {
        let rows = aggregate(&[line("mystery", "NaN", "cup", "")], 1.0);
        assert_eq!(rows[0].quantity_display, "NaN cup");
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        assert!(aggregate(&[], 1.0).is_empty());
    }
}
