//! Pattern classification: subject-matter category and complexity score.
//!
//! Categories come from an ordered keyword table; the first keyword found
//! (case-sensitive substring) wins, so a pattern mentioning both `Filament`
//! and `Eloquent` is always `eloquent`.
//!
//! The complexity score tallies regex metacharacters. It is a syntactic
//! heuristic, not a measurement of matching cost.

use crate::models::rule::{Category, NormalizedRule};

const CATEGORY_KEYWORDS: &[(&str, Category)] = &[
    ("Eloquent", Category::Eloquent),
    ("Builder", Category::Eloquent),
    ("Filament", Category::Filament),
    ("Livewire", Category::Livewire),
    ("Request", Category::Http),
    ("Http", Category::Http),
    ("Collection", Category::Collection),
    ("Facade", Category::Facade),
];

const COMPLEXITY_CHARS: &[char] = &['+', '*', '?', '[', '(', '|', '\\'];

pub fn categorize(pattern: &str) -> Category {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(kw, _)| pattern.contains(kw))
        .map(|(_, cat)| *cat)
        .unwrap_or(Category::Other)
}

pub fn complexity_score(pattern: &str) -> usize {
    pattern.chars().filter(|c| COMPLEXITY_CHARS.contains(c)).count()
}

/// Return `rule` with category and complexity assigned.
pub fn classify(rule: NormalizedRule) -> NormalizedRule {
    let category = categorize(&rule.pattern);
    let complexity = complexity_score(&rule.pattern);
    NormalizedRule {
        category,
        complexity,
        ..rule
    }
}
