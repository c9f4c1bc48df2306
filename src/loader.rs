//! Rule document loading and discovery.
//!
//! Parsing is two-step: raw text to a YAML value (syntax), then the value
//! into `DocumentSchema` (structure). Each step maps to its own error kind.

use crate::error::RuleError;
use crate::models::rule::{DocumentSchema, RawRuleEntry, RuleDocument};
use glob::{glob, Pattern};
use serde_yaml::Value as Yaml;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Parse `text` into a `RuleDocument` named `name`.
pub fn load_document(name: &str, text: &str) -> Result<RuleDocument, RuleError> {
    if text.trim().is_empty() {
        return Err(RuleError::Structure {
            document: name.to_string(),
            message: "document is empty; expected parameters.ignoreErrors".into(),
        });
    }
    let value: Yaml = serde_yaml::from_str(text).map_err(|e| RuleError::Syntax {
        document: name.to_string(),
        message: e.to_string(),
    })?;
    if !value.is_mapping() {
        return Err(RuleError::Structure {
            document: name.to_string(),
            message: "document root must be a mapping with parameters.ignoreErrors".into(),
        });
    }
    let schema: DocumentSchema =
        serde_yaml::from_value(value).map_err(|e| RuleError::Structure {
            document: name.to_string(),
            message: format!("expected parameters.ignoreErrors sequence: {}", e),
        })?;
    let entries: Vec<RawRuleEntry> = schema
        .parameters
        .ignore_errors
        .into_iter()
        .map(RawRuleEntry::from)
        .collect();
    tracing::debug!(document = name, entries = entries.len(), "loaded rule document");
    Ok(RuleDocument {
        name: name.to_string(),
        entries,
    })
}

/// Read a file as UTF-8 text, mapping failures to `RuleError::Read`.
pub fn read_document(name: &str, path: &Path) -> Result<String, RuleError> {
    fs::read_to_string(path).map_err(|e| RuleError::Read {
        document: name.to_string(),
        message: e.to_string(),
    })
}

/// Expand `include` globs under `dir` into a sorted, de-duplicated list of
/// files. Order of the result is the load order of the run.
pub fn discover_documents(dir: &Path, include: &[String]) -> Result<Vec<PathBuf>, RuleError> {
    if !dir.is_dir() {
        return Err(RuleError::Read {
            document: dir.to_string_lossy().to_string(),
            message: "directory not found".into(),
        });
    }
    let mut found: BTreeSet<PathBuf> = BTreeSet::new();
    // `dir` is a literal path; only `include` carries glob syntax.
    let base = PathBuf::from(Pattern::escape(&dir.to_string_lossy()));
    for pat in include {
        let pattern = base.join(pat).to_string_lossy().to_string();
        let paths = glob(&pattern).map_err(|e| RuleError::Pattern {
            pattern: pat.clone(),
            message: e.to_string(),
        })?;
        for p in paths.flatten() {
            if p.is_file() {
                found.insert(p);
            }
        }
    }
    Ok(found.into_iter().collect())
}

/// Name a document by its path relative to the analyzed directory.
pub fn document_name(dir: &Path, path: &Path) -> String {
    pathdiff::diff_paths(path, dir)
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .replace('\\', "/")
}
