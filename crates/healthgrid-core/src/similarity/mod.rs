//! Edit-distance similarity between normalized strings

/// Levenshtein distance with unit insert/delete/substitute costs.
///
/// Keeps two rows of the dynamic-programming table, sized by the shorter
/// input, so memory is O(min(m, n)).
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            curr[j + 1] = (curr[j] + 1).min(prev[j + 1] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

/// Similarity in `[0, 1]`: `1 - levenshtein / max(len)`.
///
/// Two empty strings are identical (1.0); exactly one empty string scores 0.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();

    match (len_a, len_b) {
        (0, 0) => 1.0,
        (0, _) | (_, 0) => 0.0,
        _ => {
            let max_len = len_a.max(len_b) as f64;
            1.0 - levenshtein(a, b) as f64 / max_len
        }
    }
}

#[cfg(test)]
mod tests;
