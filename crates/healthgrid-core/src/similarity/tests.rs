use super::*;

#[test]
fn test_levenshtein_classic_cases() {
    assert_eq!(levenshtein("kitten", "sitting"), 3);
    assert_eq!(levenshtein("flaw", "lawn"), 2);
    assert_eq!(levenshtein("banana", "bandana"), 1);
    assert_eq!(levenshtein("", "abc"), 3);
    assert_eq!(levenshtein("abc", ""), 3);
    assert_eq!(levenshtein("same", "same"), 0);
}

#[test]
fn test_levenshtein_is_symmetric() {
    let pairs = [
        ("oatmeal", "oat milk"),
        ("greek yogurt", "yogurt"),
        ("a", "abcdef"),
        ("chicken breast", "chickpea"),
        ("", "water"),
    ];
    for (a, b) in pairs {
        assert_eq!(levenshtein(a, b), levenshtein(b, a), "{a:?} vs {b:?}");
    }
}

#[test]
fn test_levenshtein_counts_chars_not_bytes() {
    assert_eq!(levenshtein("café", "cafe"), 1);
}

#[test]
fn test_similarity_identity() {
    for s in ["", "x", "banana", "vitamin d3"] {
        assert_eq!(similarity(s, s), 1.0, "similarity({s:?}, {s:?})");
    }
}

#[test]
fn test_similarity_empty_edges() {
    assert_eq!(similarity("", ""), 1.0);
    assert_eq!(similarity("", "x"), 0.0);
    assert_eq!(similarity("x", ""), 0.0);
}

#[test]
fn test_similarity_known_values() {
    assert!((similarity("ban", "banana") - 0.5).abs() < 1e-12);
    assert!((similarity("kitten", "sitting") - (1.0 - 3.0 / 7.0)).abs() < 1e-12);
    assert_eq!(similarity("abc", "xyz"), 0.0);
}

#[test]
fn test_similarity_in_unit_interval_and_deterministic() {
    let words = ["apple", "apricot", "grape", "", "a", "pineapple"];
    for a in words {
        for b in words {
            let s = similarity(a, b);
            assert!((0.0..=1.0).contains(&s));
            assert_eq!(s.to_bits(), similarity(a, b).to_bits());
        }
    }
}
