//! Duplicate and cross-document conflict detection.
//!
//! Grouping is by exact (already trimmed) pattern string. Groups keep the
//! order in which their pattern was first seen: document load order, then
//! entry order inside a document.

use crate::models::rule::NormalizedRule;
use crate::models::{DuplicateGroup, DuplicateKind};
use std::collections::{HashMap, HashSet};

/// Every distinct pattern with its occurrence list, in first-seen order.
pub fn group_patterns(rules: &[NormalizedRule]) -> Vec<(String, Vec<String>)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for r in rules {
        let slot = *slots.entry(r.pattern.as_str()).or_insert_with(|| {
            groups.push((r.pattern.clone(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(r.source_document.clone());
    }
    groups
}

/// Patterns that occur at least twice, labeled intra- or cross-document.
pub fn detect_duplicates(rules: &[NormalizedRule]) -> Vec<DuplicateGroup> {
    group_patterns(rules)
        .into_iter()
        .enumerate()
        .filter(|(_, (_, docs))| docs.len() >= 2)
        .map(|(first_seen, (pattern, documents))| {
            let distinct: HashSet<&str> = documents.iter().map(String::as_str).collect();
            let kind = if distinct.len() >= 2 {
                DuplicateKind::CrossDocument
            } else {
                DuplicateKind::IntraDocument
            };
            DuplicateGroup {
                pattern,
                documents,
                first_seen,
                kind,
            }
        })
        .collect()
}
