//! Suggestion ranking over catalog names
//!
//! Search mode scores every candidate against the query; browse mode
//! (empty query) returns the full alphabetical list, uncapped.

mod autocomplete;

pub use autocomplete::AutocompleteBlocks;

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::similarity::similarity;
use crate::text::{normalize, sort_key};

/// Default cap on search-mode results
pub const DEFAULT_LIMIT: usize = 300;

const PREFIX_WEIGHT: f64 = 3.0;
const CONTAINS_WEIGHT: f64 = 2.0;

/// A candidate name with its search score
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub name: String,
    pub score: f64,
}

/// Ranks candidate names against partial user input
#[derive(Debug, Clone, Copy)]
pub struct SuggestionRanker {
    limit: usize,
}

impl Default for SuggestionRanker {
    fn default() -> Self {
        SuggestionRanker {
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SuggestionRanker {
    pub fn new(limit: usize) -> Self {
        SuggestionRanker { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Ranked names for `query`; browse list when the query normalizes to nothing
    pub fn rank<S: AsRef<str>>(&self, query: &str, candidates: &[S]) -> Vec<String> {
        if normalize(query).is_empty() {
            return browse(candidates);
        }
        self.rank_scored(query, candidates)
            .into_iter()
            .map(|s| s.name)
            .collect()
    }

    /// Search-mode ranking with scores kept
    pub fn rank_scored<S: AsRef<str>>(&self, query: &str, candidates: &[S]) -> Vec<Suggestion> {
        let q = normalize(query);
        let mut scored: Vec<Suggestion> = dedup(candidates)
            .into_iter()
            .map(|name| {
                let score = score(&q, &normalize(&name));
                Suggestion { name, score }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| alphabetical(&a.name, &b.name))
        });
        scored.truncate(self.limit);
        scored
    }
}

/// `3·prefix + 2·contains + similarity` over normalized strings
pub fn score(query: &str, candidate: &str) -> f64 {
    let mut total = similarity(query, candidate);
    if candidate.starts_with(query) {
        total += PREFIX_WEIGHT;
    }
    if candidate.contains(query) {
        total += CONTAINS_WEIGHT;
    }
    total
}

/// Every distinct candidate sorted case-insensitively
pub fn browse<S: AsRef<str>>(candidates: &[S]) -> Vec<String> {
    let mut names = dedup(candidates);
    names.sort_by(|a, b| alphabetical(a, b));
    names
}

fn alphabetical(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

fn dedup<S: AsRef<str>>(candidates: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .map(|c| c.as_ref().trim())
        .filter(|c| !c.is_empty() && seen.insert(c.to_string()))
        .map(str::to_string)
        .collect()
}
