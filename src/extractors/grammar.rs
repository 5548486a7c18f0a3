use lazy_static::lazy_static;
use regex::Regex;

/// Characters an amount may be made of, vulgar fractions included
const AMOUNT_CHARS: &str = r"[\d\s/.\u{00BC}-\u{00BE}\u{2150}-\u{215E}]+";

const UNIT_WORDS: &str = r"cups?|cup|tbsp|tablespoons?|tsp|teaspoons?|oz|grams?|g|ml|l|stalks?|pieces?|slices?|lbs?|pinch|dash|handfuls?";

lazy_static! {
    static ref WITH_UNIT: Regex = Regex::new(&format!(
        r"(?i)^(?P<amount>{AMOUNT_CHARS})\s+(?P<unit>{UNIT_WORDS})\s+(?P<ingredient>.+)"
    ))
    .expect("unit amount pattern should be valid");
    static ref AMOUNT_ONLY: Regex = Regex::new(&format!(
        r"(?i)^(?P<amount>{AMOUNT_CHARS})\s+(?P<ingredient>.+)"
    ))
    .expect("bare amount pattern should be valid");
}

/// Ingredient and amount recovered from one logical line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAmount {
    pub ingredient: String,
    /// Amount as displayed, with the unit appended when one was recognised
    pub amount: String,
}

/// One candidate grammar: a pattern with `amount` and `ingredient` groups and
/// an optional `unit` group
#[derive(Debug, Clone)]
pub struct AmountRule {
    pub name: &'static str,
    pattern: Regex,
}

impl AmountRule {
    pub fn new(name: &'static str, pattern: Regex) -> Self {
        Self { name, pattern }
    }

    /// Leading amount followed by a known unit word, then the ingredient
    pub fn with_unit() -> Self {
        Self::new("amount-unit-ingredient", WITH_UNIT.clone())
    }

    /// Leading amount, then the ingredient
    pub fn amount_only() -> Self {
        Self::new("amount-ingredient", AMOUNT_ONLY.clone())
    }

    pub fn apply(&self, line: &str) -> Option<ParsedAmount> {
        let captures = self.pattern.captures(line)?;

        let amount = captures.name("amount")?.as_str().trim();
        let ingredient = captures.name("ingredient")?.as_str().trim();
        if amount.is_empty() || ingredient.is_empty() {
            return None;
        }

        let amount = match captures.name("unit") {
            Some(unit) => format!("{} {}", amount, unit.as_str().trim()),
            None => amount.to_string(),
        };

        Some(ParsedAmount {
            ingredient: ingredient.to_string(),
            amount,
        })
    }
}

/// Ordered list of rules, tried first to last.
///
/// `2 cups spinach (fresh)` is split by a strict rule that needs a known unit
/// word after the amount; failing that, a loose rule takes any amount
/// followed by a name.
#[derive(Debug, Clone)]
pub struct AmountGrammar {
    rules: Vec<AmountRule>,
}

impl Default for AmountGrammar {
    fn default() -> Self {
        Self::new(vec![AmountRule::with_unit(), AmountRule::amount_only()])
    }
}

impl AmountGrammar {
    pub fn new(rules: Vec<AmountRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[AmountRule] {
        &self.rules
    }

    /// Parse a buffered line; `None` means no rule matched and the line is dropped
    pub fn parse(&self, line: &str) -> Option<ParsedAmount> {
        self.rules.iter().find_map(|rule| rule.apply(line))
    }
}
