//! Shared data models for analysis outputs and rule documents.

pub mod rule;

use rule::{Category, ComplexityBucket};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Whether a duplicated pattern stays inside one document or spans several.
pub enum DuplicateKind {
    IntraDocument,
    CrossDocument,
}

impl DuplicateKind {
    pub fn label(self) -> &'static str {
        match self {
            DuplicateKind::IntraDocument => "intra-document duplicate",
            DuplicateKind::CrossDocument => "cross-document conflict",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A pattern that occurs at least twice, with every occurrence's document.
pub struct DuplicateGroup {
    pub pattern: String,
    /// Occurrence list in first-seen order; repeats for intra-document hits.
    pub documents: Vec<String>,
    /// Position of the first occurrence across the whole load.
    pub first_seen: usize,
    pub kind: DuplicateKind,
}

impl DuplicateGroup {
    pub fn count(&self) -> usize {
        self.documents.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Duplicate group as it appears in the report.
pub struct DuplicateEntry {
    pub pattern: String,
    pub documents: Vec<String>,
    pub count: usize,
    pub kind: DuplicateKind,
}

impl From<&DuplicateGroup> for DuplicateEntry {
    fn from(g: &DuplicateGroup) -> Self {
        DuplicateEntry {
            pattern: g.pattern.clone(),
            documents: g.documents.clone(),
            count: g.count(),
            kind: g.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// A single error or warning attached to a document.
pub struct Diagnostic {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Errors and warnings collected for one document.
pub struct DocumentDiagnostics {
    pub document: String,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Two distinct patterns whose character overlap meets the threshold.
pub struct SimilarPair {
    pub left: String,
    pub right: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Immutable result of one analysis run.
pub struct AnalysisReport {
    pub files_count: usize,
    pub documents_with_errors: usize,
    pub total_patterns: usize,
    pub unique_patterns: usize,
    pub duplicate_patterns: usize,
    pub duplicate_percentage: f64,
    pub categories: BTreeMap<Category, usize>,
    pub complexity: BTreeMap<ComplexityBucket, usize>,
    pub most_duplicated: Vec<DuplicateEntry>,
    pub diagnostics: Vec<DocumentDiagnostics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similar_patterns: Option<Vec<SimilarPair>>,
}

impl AnalysisReport {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().map(|d| d.errors.len()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().map(|d| d.warnings.len()).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}
