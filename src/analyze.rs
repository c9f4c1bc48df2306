//! Analysis pipeline: load → normalize → classify → detect → report.
//!
//! Per-document stages run on the rayon pool and are collected back in
//! document order, so the report is identical to a sequential run. The
//! duplicate detector is the single merge point.

use crate::classify::classify;
use crate::detect::detect_duplicates;
use crate::error::RuleError;
use crate::loader::{discover_documents, document_name, load_document, read_document};
use crate::models::rule::NormalizedRule;
use crate::models::{AnalysisReport, Diagnostic, DocumentDiagnostics};
use crate::normalize::normalize_document;
use crate::regex_check::evaluate_pattern;
use crate::report::{build_report, error_diagnostic, regex_warning, ReportInput};
use crate::similarity::find_similar;
use rayon::prelude::*;
use std::path::Path;

/// A named document whose text may have failed to read.
pub struct SourceDocument {
    pub name: String,
    pub content: Result<String, RuleError>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        SourceDocument {
            name: name.into(),
            content: Ok(text.into()),
        }
    }
}

#[derive(Debug, Clone)]
/// Explicit knobs for one run. Nothing here is read from the environment.
pub struct AnalysisOptions {
    pub top_n: usize,
    /// Sample text each pattern's regex is run against.
    pub sample: String,
    /// Enables the similarity pass at this percentage threshold.
    pub similarity_threshold: Option<f64>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            top_n: 10,
            sample: String::new(),
            similarity_threshold: None,
        }
    }
}

struct DocumentOutcome {
    name: String,
    loaded: bool,
    rules: Vec<NormalizedRule>,
    errors: Vec<RuleError>,
    warnings: Vec<Diagnostic>,
}

fn process_document(src: &SourceDocument, sample: &str) -> DocumentOutcome {
    let failed = |e: RuleError| DocumentOutcome {
        name: src.name.clone(),
        loaded: false,
        rules: Vec::new(),
        errors: vec![e],
        warnings: Vec::new(),
    };
    let text = match &src.content {
        Ok(t) => t,
        Err(e) => return failed(e.clone()),
    };
    let doc = match load_document(&src.name, text) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(document = %src.name, error = %e, "document rejected");
            return failed(e);
        }
    };
    let normalized = normalize_document(&doc);
    let rules: Vec<NormalizedRule> = normalized.rules.into_iter().map(classify).collect();
    let mut warnings = normalized.warnings;
    warnings.extend(
        rules
            .iter()
            .filter_map(|r| evaluate_pattern(&r.pattern, sample).map(|msg| regex_warning(r, msg))),
    );
    // stable: count warnings stay ahead of regex warnings for the same entry
    warnings.sort_by_key(|w| w.entry);
    DocumentOutcome {
        name: doc.name,
        loaded: true,
        rules,
        errors: normalized.errors,
        warnings,
    }
}

/// Analyze an explicit document set. Pure: same input, same report.
pub fn analyze_sources(sources: &[SourceDocument], opts: &AnalysisOptions) -> AnalysisReport {
    let outcomes: Vec<DocumentOutcome> = sources
        .par_iter()
        .map(|s| process_document(s, &opts.sample))
        .collect();

    let files_count = outcomes.iter().filter(|o| o.loaded).count();
    let documents_with_errors = outcomes.iter().filter(|o| !o.loaded).count();
    let mut rules: Vec<NormalizedRule> = Vec::new();
    let mut diagnostics: Vec<DocumentDiagnostics> = Vec::new();
    for o in outcomes {
        if !o.errors.is_empty() || !o.warnings.is_empty() {
            diagnostics.push(DocumentDiagnostics {
                document: o.name,
                errors: o.errors.iter().map(error_diagnostic).collect(),
                warnings: o.warnings,
            });
        }
        rules.extend(o.rules);
    }

    let duplicates = detect_duplicates(&rules);
    let similar = opts
        .similarity_threshold
        .map(|threshold| find_similar(&rules, threshold));
    tracing::info!(
        documents = files_count,
        rules = rules.len(),
        duplicates = duplicates.len(),
        "analysis complete"
    );
    build_report(ReportInput {
        files_count,
        documents_with_errors,
        rules: &rules,
        duplicates: &duplicates,
        diagnostics,
        similar,
        top_n: opts.top_n,
    })
}

/// Read every document under `dir` matching `include` and analyze them.
///
/// Fails only when discovery itself fails (missing directory, bad glob);
/// per-document problems end up in the report.
pub fn analyze_dir(
    dir: &Path,
    include: &[String],
    opts: &AnalysisOptions,
) -> Result<AnalysisReport, RuleError> {
    let paths = discover_documents(dir, include)?;
    tracing::debug!(dir = %dir.display(), files = paths.len(), "discovered rule documents");
    let sources: Vec<SourceDocument> = paths
        .iter()
        .map(|p| {
            let name = document_name(dir, p);
            let content = read_document(&name, p);
            SourceDocument { name, content }
        })
        .collect();
    Ok(analyze_sources(&sources, opts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rule::Category;
    use crate::models::DuplicateKind;
    use std::fs;
    use tempfile::tempdir;

    const DOC_A: &str = r#"
parameters:
  ignoreErrors:
    - '#Call to an undefined method .+::whereEmail\(\)#'
    - '#Livewire\\Component::\$foo#'
    - '#Livewire\\Component::\$foo#'
"#;

    const DOC_B: &str = r#"
parameters:
  ignoreErrors:
    - message: '#Call to an undefined method .+::whereEmail\(\)#'
      paths: ['app/*.php']
    - paths: ['app/*.php']
    - '#Filament resource#'
"#;

    #[test]
    fn test_cross_and_intra_duplicates_with_validation_error() {
        let sources = vec![SourceDocument::new("A", DOC_A), SourceDocument::new("B", DOC_B)];
        let report = analyze_sources(&sources, &AnalysisOptions::default());
        assert_eq!(report.files_count, 2);
        assert_eq!(report.total_patterns, 5);
        assert_eq!(report.unique_patterns, 3);
        assert_eq!(report.duplicate_patterns, 2);
        assert_eq!(report.duplicate_percentage, 66.67);
        assert_eq!(report.categories[&Category::Livewire], 2);
        assert_eq!(report.categories[&Category::Filament], 1);

        let first = &report.most_duplicated[0];
        assert_eq!(first.documents, vec!["A", "B"]);
        assert_eq!(first.kind, DuplicateKind::CrossDocument);
        let second = &report.most_duplicated[1];
        assert_eq!(second.documents, vec!["A", "A"]);
        assert_eq!(second.kind, DuplicateKind::IntraDocument);

        assert_eq!(report.error_count(), 1);
        let b = report
            .diagnostics
            .iter()
            .find(|d| d.document == "B")
            .unwrap();
        assert_eq!(b.errors[0].kind, "validation_error");
        assert_eq!(b.errors[0].entry, Some(1));
    }

    #[test]
    fn test_broken_document_does_not_stop_the_run() {
        let sources = vec![
            SourceDocument::new("bad", "parameters: [oops\n"),
            SourceDocument::new("shape", "parameters:\n  level: 8\n"),
            SourceDocument::new("A", DOC_A),
        ];
        let report = analyze_sources(&sources, &AnalysisOptions::default());
        assert_eq!(report.files_count, 1);
        assert_eq!(report.documents_with_errors, 2);
        assert_eq!(report.total_patterns, 3);
        let kinds: Vec<&str> = report
            .diagnostics
            .iter()
            .flat_map(|d| d.errors.iter().map(|e| e.kind.as_str()))
            .collect();
        assert_eq!(kinds, vec!["syntax_error", "structure_error"]);
        assert_eq!(report.diagnostics[0].document, "bad");
    }

    #[test]
    fn test_empty_document_contributes_nothing() {
        let sources = vec![SourceDocument::new("e", "parameters:\n  ignoreErrors: []\n")];
        let report = analyze_sources(&sources, &AnalysisOptions::default());
        assert_eq!(report.files_count, 1);
        assert_eq!(report.total_patterns, 0);
        assert_eq!(report.unique_patterns, 0);
        assert_eq!(report.duplicate_percentage, 0.0);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_regex_warnings_are_attached_to_document() {
        let text = "parameters:\n  ignoreErrors:\n    - '#broken (group#'\n    - '#ok#'\n";
        let report = analyze_sources(
            &[SourceDocument::new("w", text)],
            &AnalysisOptions::default(),
        );
        assert!(!report.has_errors());
        assert_eq!(report.warning_count(), 1);
        let w = &report.diagnostics[0].warnings[0];
        assert_eq!(w.kind, "regex_warning");
        assert_eq!(w.entry, Some(0));
        assert_eq!(w.pattern.as_deref(), Some("#broken (group#"));
    }

    #[test]
    fn test_malformed_count_still_counts_towards_totals() {
        let text = r#"
parameters:
  ignoreErrors:
    - message: '#Pattern one#'
      count: 'two'
    - message: '#Pattern two#'
      count: -1
    - message: '#Pattern three#'
      count: 1.5
"#;
        let report = analyze_sources(
            &[SourceDocument::new("counts", text)],
            &AnalysisOptions::default(),
        );
        assert_eq!(report.files_count, 1);
        assert_eq!(report.total_patterns, 3);
        assert_eq!(report.error_count(), 0);
        assert!(!report.has_errors());
        let warnings = &report.diagnostics[0].warnings;
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().all(|w| w.kind == "count_warning"));
        let entries: Vec<Option<usize>> = warnings.iter().map(|w| w.entry).collect();
        assert_eq!(entries, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_analyze_dir_with_glob_metacharacters_in_path() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("rules[v1]");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("eloquent.neon"), DOC_A).unwrap();
        let report = analyze_dir(
            &root,
            &["**/*.neon".to_string()],
            &AnalysisOptions::default(),
        )
        .unwrap();
        assert_eq!(report.files_count, 1);
        assert_eq!(report.total_patterns, 3);
    }

    #[test]
    fn test_similarity_only_when_enabled() {
        let sources = vec![SourceDocument::new("A", DOC_A)];
        let off = analyze_sources(&sources, &AnalysisOptions::default());
        assert!(off.similar_patterns.is_none());
        let opts = AnalysisOptions {
            similarity_threshold: Some(10.0),
            ..AnalysisOptions::default()
        };
        let on = analyze_sources(&sources, &opts);
        assert!(on.similar_patterns.is_some());
        assert!(!on.has_errors());
    }

    #[test]
    fn test_analyze_dir_names_documents_relative_to_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("laravel")).unwrap();
        fs::write(root.join("laravel/eloquent.neon"), DOC_A).unwrap();
        fs::write(root.join("filament.neon"), DOC_B).unwrap();
        let report = analyze_dir(
            root,
            &["**/*.neon".to_string()],
            &AnalysisOptions::default(),
        )
        .unwrap();
        assert_eq!(report.files_count, 2);
        let cross = &report.most_duplicated[0];
        assert_eq!(cross.documents, vec!["filament.neon", "laravel/eloquent.neon"]);
    }
}
