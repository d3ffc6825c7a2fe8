use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

const ORDINAL_WORDS: [(&str, &str); 9] = [
    ("episode one", "episode 1"),
    ("episode two", "episode 2"),
    ("episode three", "episode 3"),
    ("episode four", "episode 4"),
    ("episode five", "episode 5"),
    ("episode six", "episode 6"),
    ("episode seven", "episode 7"),
    ("episode eight", "episode 8"),
    ("episode nine", "episode 9"),
];

// Longest numerals first so "episode ix" is not eaten by "episode i".
const ORDINAL_ROMANS: [(&str, &str); 9] = [
    ("episode ix", "episode 9"),
    ("episode viii", "episode 8"),
    ("episode vii", "episode 7"),
    ("episode vi", "episode 6"),
    ("episode v", "episode 5"),
    ("episode iv", "episode 4"),
    ("episode iii", "episode 3"),
    ("episode ii", "episode 2"),
    ("episode i", "episode 1"),
];

/// Canonical form used for every comparison: accent-free, lower-case,
/// `[a-z0-9 ]` only, single-spaced, with episode ordinals as digits.
///
/// `None` and empty input both yield an empty string.
pub fn normalize<'a>(raw: impl Into<Option<&'a str>>) -> String {
    let Some(raw) = raw.into() else {
        return String::new();
    };
    if raw.is_empty() {
        return String::new();
    }

    let folded = raw
        .nfd()
        .flat_map(char::to_lowercase)
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>();

    let mut out = String::with_capacity(folded.len());
    let mut pending_space = false;
    for c in folded.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }

    episode_ordinals_to_digits(out)
}

/// Rewrites "episode five" / "episode v" into "episode 5".
///
/// Runs after punctuation stripping so that "Episode-V" and "episode  v"
/// convert the same way on the first pass as they would on a second one.
fn episode_ordinals_to_digits(input: String) -> String {
    if !input.contains("episode ") {
        return input;
    }
    ORDINAL_WORDS
        .iter()
        .chain(ORDINAL_ROMANS.iter())
        .fold(input, |acc, &(from, to)| acc.replace(from, to))
}

/// Maps `I`..`IX` (any case) to its digit. Anything else is returned as-is.
pub fn roman_to_arabic(roman: &str) -> String {
    let digit = match roman.trim().to_ascii_uppercase().as_str() {
        "I" => "1",
        "II" => "2",
        "III" => "3",
        "IV" => "4",
        "V" => "5",
        "VI" => "6",
        "VII" => "7",
        "VIII" => "8",
        "IX" => "9",
        _ => return roman.to_string(),
    };
    digit.to_string()
}
