fn fraction_text(c: char) -> Option<&'static str> {
    let text = match c {
        '¼' => "1/4",
        '½' => "1/2",
        '¾' => "3/4",
        '⅐' => "1/7",
        '⅑' => "1/9",
        '⅒' => "1/10",
        '⅓' => "1/3",
        '⅔' => "2/3",
        '⅕' => "1/5",
        '⅖' => "2/5",
        '⅗' => "3/5",
        '⅘' => "4/5",
        '⅙' => "1/6",
        '⅚' => "5/6",
        '⅛' => "1/8",
        '⅜' => "3/8",
        '⅝' => "5/8",
        '⅞' => "7/8",
        _ => return None,
    };
    Some(text)
}

fn punctuation_text(c: char) -> Option<&'static str> {
    let text = match c {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => "'",
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => "\"",
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => "-",
        '\u{2026}' => "...",
        '\u{00A0}' | '\u{2009}' | '\u{202F}' => " ",
        '\u{2022}' => "*",
        _ => return None,
    };
    Some(text)
}

/// Rewrite `text` so that every character fits in Latin-1.
///
/// Typographic quotes, dashes and vulgar fractions are spelled out in ASCII;
/// anything else outside Latin-1 becomes `?`.
pub fn to_latin1_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous: Option<char> = None;

    for c in text.chars() {
        if let Some(fraction) = fraction_text(c) {
            // "1½" reads as "1 1/2", not "11/2"
            if previous.is_some_and(|p| p.is_ascii_digit()) {
                out.push(' ');
            }
            out.push_str(fraction);
        } else if let Some(replacement) = punctuation_text(c) {
            out.push_str(replacement);
        } else if u32::from(c) <= 0xFF {
            out.push(c);
        } else {
            out.push('?');
        }
        previous = Some(c);
    }

    out
}

/// Transliterate and encode as Latin-1 bytes
pub fn encode_latin1(text: &str) -> Vec<u8> {
    to_latin1_text(text)
        .chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
