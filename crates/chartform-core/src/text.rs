// crates/chartform-core/src/text.rs

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Łódź` -> `Lodz`)
/// 2\) Normalize to lowercase
///
/// The implementation uses the `deunicode` crate for a best-effort
/// transliteration, which strips diacritics and expands ligatures.
///
/// # Examples
///
/// ```rust
/// use chartform_core::text::fold_key;
///
/// assert_eq!(fold_key("Łódź"), "lodz");
/// assert_eq!(fold_key("Straße"), "strasse");
/// assert_eq!(fold_key("SÃO PAULO"), "sao paulo");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Compares two strings for equality after [`fold_key`] normalization.
///
/// ```rust
/// use chartform_core::text::equals_folded;
///
/// assert!(equals_folded("MÜNCHEN", "munchen"));
/// assert!(!equals_folded("Berlin", "Paris"));
/// ```
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// The part of a location text that names the city: everything before the
/// first comma, trimmed.
///
/// ```rust
/// use chartform_core::text::city_part;
///
/// assert_eq!(city_part("London, England, United Kingdom"), "London");
/// assert_eq!(city_part("  Paris "), "Paris");
/// ```
pub fn city_part(text: &str) -> &str {
    text.split(',').next().unwrap_or("").trim()
}

/// Number of characters in the trimmed query, as counted for the minimum
/// query length.
pub fn query_len(query: &str) -> usize {
    query.trim().chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_strips_accents_and_case() {
        assert_eq!(fold_key("Zürich"), "zurich");
        assert_eq!(fold_key("Genève"), "geneve");
        assert_eq!(fold_key("ÅLESUND"), "alesund");
    }

    #[test]
    fn city_part_without_comma_is_whole_text() {
        assert_eq!(city_part("Londonderry"), "Londonderry");
        assert_eq!(city_part(""), "");
        assert_eq!(city_part(", England"), "");
    }

    #[test]
    fn query_len_counts_chars_not_bytes() {
        assert_eq!(query_len(" é "), 1);
        assert_eq!(query_len("Łó"), 2);
    }
}
