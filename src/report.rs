//! Report generation: aggregates rules, duplicate groups and diagnostics
//! into an immutable `AnalysisReport`. Rendering lives in `output`.

use crate::error::RuleError;
use crate::models::rule::{Category, ComplexityBucket, NormalizedRule};
use crate::models::{
    AnalysisReport, Diagnostic, DocumentDiagnostics, DuplicateEntry, DuplicateGroup, SimilarPair,
};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};

/// Everything the generator needs for one run.
pub struct ReportInput<'a> {
    pub files_count: usize,
    pub documents_with_errors: usize,
    pub rules: &'a [NormalizedRule],
    pub duplicates: &'a [DuplicateGroup],
    pub diagnostics: Vec<DocumentDiagnostics>,
    pub similar: Option<Vec<SimilarPair>>,
    pub top_n: usize,
}

pub fn build_report(input: ReportInput<'_>) -> AnalysisReport {
    let unique: HashSet<&str> = input.rules.iter().map(|r| r.pattern.as_str()).collect();
    let unique_patterns = unique.len();
    let duplicate_patterns = input.duplicates.len();

    let mut categories: BTreeMap<Category, usize> =
        Category::ALL.iter().map(|c| (*c, 0)).collect();
    let mut complexity: BTreeMap<ComplexityBucket, usize> =
        ComplexityBucket::ALL.iter().map(|b| (*b, 0)).collect();
    for r in input.rules {
        *categories.entry(r.category).or_insert(0) += 1;
        *complexity
            .entry(ComplexityBucket::from_score(r.complexity))
            .or_insert(0) += 1;
    }

    AnalysisReport {
        files_count: input.files_count,
        documents_with_errors: input.documents_with_errors,
        total_patterns: input.rules.len(),
        unique_patterns,
        duplicate_patterns,
        duplicate_percentage: duplicate_percentage(duplicate_patterns, unique_patterns),
        categories,
        complexity,
        most_duplicated: top_duplicates(input.duplicates, input.top_n),
        diagnostics: input.diagnostics,
        similar_patterns: input.similar,
    }
}

/// `duplicate / unique * 100`, rounded to two decimals; 0 when nothing is unique.
pub fn duplicate_percentage(duplicate: usize, unique: usize) -> f64 {
    if unique == 0 {
        return 0.0;
    }
    let pct = duplicate as f64 / unique as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Top `n` groups by occurrence count; ties keep first-seen order.
pub fn top_duplicates(groups: &[DuplicateGroup], n: usize) -> Vec<DuplicateEntry> {
    let mut sorted: Vec<&DuplicateGroup> = groups.iter().collect();
    sorted.sort_by_key(|g| (Reverse(g.count()), g.first_seen));
    sorted.into_iter().take(n).map(DuplicateEntry::from).collect()
}

/// Report diagnostic for a load or validation error.
pub fn error_diagnostic(err: &RuleError) -> Diagnostic {
    Diagnostic {
        kind: err.kind().to_string(),
        entry: err.entry(),
        pattern: None,
        message: err.detail().to_string(),
    }
}

/// Report diagnostic for a pattern that failed regex evaluation.
pub fn regex_warning(rule: &NormalizedRule, message: String) -> Diagnostic {
    Diagnostic {
        kind: "regex_warning".into(),
        entry: Some(rule.index),
        pattern: Some(rule.pattern.clone()),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DuplicateKind;
    use std::collections::BTreeSet;

    fn group(p: &str, count: usize, first_seen: usize) -> DuplicateGroup {
        DuplicateGroup {
            pattern: p.into(),
            documents: vec!["A".to_string(); count],
            first_seen,
            kind: DuplicateKind::IntraDocument,
        }
    }

    fn rule(p: &str, category: Category, complexity: usize) -> NormalizedRule {
        NormalizedRule {
            pattern: p.into(),
            paths: BTreeSet::new(),
            source_document: "A".into(),
            index: 0,
            count: None,
            category,
            complexity,
        }
    }

    #[test]
    fn test_top_n_orders_by_count_then_first_seen() {
        let groups = vec![group("#b#", 3, 0), group("#a#", 5, 2), group("#c#", 3, 1)];
        let top = top_duplicates(&groups, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].pattern, "#a#");
        assert_eq!(top[0].count, 5);
        let all = top_duplicates(&groups, 10);
        let order: Vec<&str> = all.iter().map(|e| e.pattern.as_str()).collect();
        assert_eq!(order, vec!["#a#", "#b#", "#c#"]);
    }

    #[test]
    fn test_duplicate_percentage_rounding_and_zero() {
        assert_eq!(duplicate_percentage(0, 0), 0.0);
        assert_eq!(duplicate_percentage(1, 3), 33.33);
        assert_eq!(duplicate_percentage(2, 3), 66.67);
        assert_eq!(duplicate_percentage(1, 1), 100.0);
    }

    #[test]
    fn test_histograms_include_every_key() {
        let rules = vec![
            rule("#a#", Category::Eloquent, 2),
            rule("#b#", Category::Eloquent, 10),
            rule("#c#", Category::Other, 40),
        ];
        let report = build_report(ReportInput {
            files_count: 1,
            documents_with_errors: 0,
            rules: &rules,
            duplicates: &[],
            diagnostics: Vec::new(),
            similar: None,
            top_n: 10,
        });
        assert_eq!(report.categories.len(), Category::ALL.len());
        assert_eq!(report.categories[&Category::Eloquent], 2);
        assert_eq!(report.categories[&Category::Filament], 0);
        assert_eq!(report.complexity[&ComplexityBucket::Simple], 1);
        assert_eq!(report.complexity[&ComplexityBucket::Moderate], 1);
        assert_eq!(report.complexity[&ComplexityBucket::Complex], 0);
        assert_eq!(report.complexity[&ComplexityBucket::VeryComplex], 1);
        assert_eq!(report.total_patterns, 3);
        assert_eq!(report.unique_patterns, 3);
        assert_eq!(report.duplicate_percentage, 0.0);
    }
}
