//! Default-on-absence value extraction for scraped text.
//!
//! Scraped markup is fragile, so every conversion here is total: a missing
//! or unparseable value becomes the type's zero value (`""`, `0`, `0.0`)
//! instead of an error. Callers that need to tell "absent" from "zero" must
//! check the raw text themselves.

/// Text as found, or `""` when the selector matched nothing.
pub fn text_or_default(text: Option<&str>) -> String {
    text.map(str::trim).unwrap_or_default().to_string()
}

/// Keep only ASCII digits and parse them; no digits yields `0`.
///
/// `"12,450"` becomes `12450`, `"Lv. 45"` becomes `45`. Values that overflow
/// `u64` also yield `0`.
pub fn number_or_zero(text: &str) -> u64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(0)
}

/// Strip one trailing `%` and parse as a float; failure yields `0.0`.
pub fn percentage_or_zero(text: &str) -> f64 {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn number_strips_separators() {
        assert_eq!(number_or_zero("12,450"), 12450);
        assert_eq!(number_or_zero("Lv. 45"), 45);
        assert_eq!(number_or_zero(""), 0);
        assert_eq!(number_or_zero("none"), 0);
    }

    #[test]
    fn percentage_strips_suffix() {
        assert_eq!(percentage_or_zero("42.5%"), 42.5);
        assert_eq!(percentage_or_zero(" 178.3 % "), 178.3);
        assert_eq!(percentage_or_zero("68"), 68.0);
        assert_eq!(percentage_or_zero(""), 0.0);
        assert_eq!(percentage_or_zero("n/a%"), 0.0);
    }

    #[test]
    fn text_defaults_to_empty() {
        assert_eq!(text_or_default(None), "");
        assert_eq!(text_or_default(Some("  Gladiator ")), "Gladiator");
    }

    proptest! {
        #[test]
        fn grouped_numbers_round_trip(value in 0u64..1_000_000_000) {
            let s = value.to_string();
            let mut grouped = String::new();
            for (i, ch) in s.chars().enumerate() {
                if i > 0 && (s.len() - i) % 3 == 0 {
                    grouped.push(',');
                }
                grouped.push(ch);
            }
            prop_assert_eq!(number_or_zero(&grouped), value);
        }

        #[test]
        fn number_never_panics(text in ".*") {
            let _ = number_or_zero(&text);
            let _ = percentage_or_zero(&text);
        }
    }
}
