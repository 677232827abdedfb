//! Text canonicalization used for every name comparison

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize free text for comparison.
///
/// Lowercases, strips combining diacritics, maps every character outside
/// `[a-z0-9 ]` to a space, collapses whitespace runs and trims. Catalog
/// names and queries go through the same function so comparisons are
/// symmetric.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive sort key used to order catalog rows and browse lists
pub fn sort_key(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_trims() {
        assert_eq!(normalize("  Banana Bread "), "banana bread");
    }

    #[test]
    fn test_normalize_strips_diacritics() {
        assert_eq!(normalize("Crème Brûlée"), "creme brulee");
        assert_eq!(normalize("Jalapeño"), "jalapeno");
    }

    #[test]
    fn test_normalize_folds_punctuation() {
        assert_eq!(normalize("Ben & Jerry's (Pint)"), "ben jerry s pint");
        assert_eq!(normalize("oat-milk/latte"), "oat milk latte");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("greek\t\tyogurt \n plain"), "greek yogurt plain");
    }

    #[test]
    fn test_normalize_empty_and_symbol_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!!! ---"), "");
    }

    #[test]
    fn test_normalize_keeps_digits() {
        assert_eq!(normalize("Vitamin D3 5000IU"), "vitamin d3 5000iu");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("Café  Américano!");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_sort_key_is_case_insensitive() {
        assert_eq!(sort_key("  Apple "), sort_key("apple"));
        assert_ne!(sort_key("apple pie"), sort_key("applepie"));
    }
}
