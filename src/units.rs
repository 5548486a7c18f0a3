use lazy_static::lazy_static;
use std::collections::HashMap;

const UNIT_GROUPS: &[(&str, &[&str])] = &[
    ("tsp", &["teaspoon", "teaspoons", "tsp", "tsps", "tspn"]),
    (
        "tbsp",
        &["tablespoon", "tablespoons", "tbsp", "tbsps", "tbs", "tbl", "tbls"],
    ),
    ("cup", &["cup", "cups", "c"]),
    ("fl oz", &["fluid ounce", "fluid ounces", "fl oz", "fl. oz"]),
    ("oz", &["ounce", "ounces", "oz", "ozs"]),
    ("lb", &["pound", "pounds", "lb", "lbs"]),
    ("g", &["gram", "grams", "gramme", "grammes", "g", "gr", "grs"]),
    ("kg", &["kilogram", "kilograms", "kilo", "kilos", "kg", "kgs"]),
    ("mg", &["milligram", "milligrams", "mg"]),
    (
        "ml",
        &["milliliter", "milliliters", "millilitre", "millilitres", "ml", "mls"],
    ),
    ("l", &["liter", "liters", "litre", "litres", "l"]),
    ("pt", &["pint", "pints", "pt", "pts"]),
    ("qt", &["quart", "quarts", "qt", "qts"]),
    ("gal", &["gallon", "gallons", "gal"]),
    ("clove", &["clove", "cloves"]),
    ("pinch", &["pinch", "pinches"]),
    ("dash", &["dash", "dashes"]),
    ("piece", &["piece", "pieces", "pc", "pcs"]),
    ("slice", &["slice", "slices"]),
    ("stalk", &["stalk", "stalks"]),
    ("handful", &["handful", "handfuls"]),
    ("can", &["can", "cans"]),
    ("pkg", &["package", "packages", "pkg", "pkgs", "packet", "packets"]),
    ("bunch", &["bunch", "bunches"]),
    ("head", &["head", "heads"]),
];

lazy_static! {
    static ref UNIT_SYNONYMS: HashMap<&'static str, &'static str> = {
        let mut table = HashMap::new();
        for (canonical, spellings) in UNIT_GROUPS {
            for spelling in spellings.iter() {
                table.insert(*spelling, *canonical);
            }
        }
        table
    };
}

/// Map a raw unit spelling to its canonical abbreviation.
///
/// Exports spell the same unit many ways ("Teaspoons", "tsp.", "tsps").
/// Surrounding whitespace and trailing punctuation are dropped before the
/// lookup, and anything not in the table comes back lower-cased.
pub fn normalize(raw_unit: &str) -> String {
    let lowered = raw_unit.trim().to_lowercase();
    let stripped = lowered
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .trim_end();

    match UNIT_SYNONYMS.get(stripped) {
        Some(canonical) => (*canonical).to_string(),
        None => lowered,
    }
}
