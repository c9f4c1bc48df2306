//! Advisory near-duplicate pass.
//!
//! Scores pairs of distinct patterns by character overlap: the longest
//! common substring is taken, then the pieces left and right of it are
//! scored recursively. `similarity = 2 * common / (len_a + len_b) * 100`.
//! Results are warnings only and never affect the exit code.

use crate::detect::group_patterns;
use crate::models::rule::NormalizedRule;
use crate::models::SimilarPair;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Character-overlap percentage of `a` and `b`, in `0.0..=100.0`.
pub fn similarity_percent(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    (common_chars(&a, &b) * 2) as f64 * 100.0 / total as f64
}

fn common_chars(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (pos_a, pos_b, len) = longest_common_substring(a, b);
    if len == 0 {
        return 0;
    }
    len + common_chars(&a[..pos_a], &b[..pos_b])
        + common_chars(&a[pos_a + len..], &b[pos_b + len..])
}

/// Start in `a`, start in `b`, and length of the first longest common run.
fn longest_common_substring(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    let mut best = (0, 0, 0);
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            cur[j] = if a[i - 1] == b[j - 1] { prev[j - 1] + 1 } else { 0 };
            if cur[j] > best.2 {
                best = (i - cur[j], j - cur[j], cur[j]);
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    best
}

/// Per-character occurrence counts, ordered by character.
fn char_counts(s: &str) -> Vec<(char, usize)> {
    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    for c in s.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Size of the multiset intersection of two `char_counts` tables. Never
/// less than `common_chars` of the same strings.
fn shared_chars(a: &[(char, usize)], b: &[(char, usize)]) -> usize {
    let (mut i, mut j, mut shared) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                shared += a[i].1.min(b[j].1);
                i += 1;
                j += 1;
            }
        }
    }
    shared
}

fn percent(common: usize, len_a: usize, len_b: usize) -> f64 {
    (common * 2) as f64 * 100.0 / (len_a + len_b).max(1) as f64
}

/// Pairs of distinct patterns scoring at least `threshold` percent.
///
/// Pairs are ordered by the first-seen position of the left pattern, then
/// the right one.
pub fn find_similar(rules: &[NormalizedRule], threshold: f64) -> Vec<SimilarPair> {
    let patterns: Vec<String> = group_patterns(rules).into_iter().map(|(p, _)| p).collect();
    let lens: Vec<usize> = patterns.iter().map(|p| p.chars().count()).collect();
    let counts: Vec<Vec<(char, usize)>> = patterns.iter().map(|p| char_counts(p)).collect();
    let (patterns, lens, counts) = (&patterns, &lens, &counts);
    (0..patterns.len())
        .into_par_iter()
        .flat_map_iter(move |i| {
            ((i + 1)..patterns.len()).filter_map(move |j| {
                // Upper bounds, cheapest first: every char of the shorter
                // string matched, then every shared char matched.
                if percent(lens[i].min(lens[j]), lens[i], lens[j]) < threshold {
                    return None;
                }
                if percent(shared_chars(&counts[i], &counts[j]), lens[i], lens[j]) < threshold {
                    return None;
                }
                let score = similarity_percent(&patterns[i], &patterns[j]);
                if score >= threshold && score < 100.0 {
                    Some(SimilarPair {
                        left: patterns[i].clone(),
                        right: patterns[j].clone(),
                        similarity: (score * 100.0).round() / 100.0,
                    })
                } else {
                    None
                }
            })
        })
        .collect()
}
