//! Converts raw `ignoreErrors` entries into `NormalizedRule` records.
//!
//! Normalized rules start out as `Category::Other` with zero complexity;
//! the classifier fills both in. `count` is opaque metadata: a malformed
//! value is dropped with a warning and the entry still counts.

use crate::error::RuleError;
use crate::models::rule::{Category, NormalizedRule, RawRuleEntry, RuleDocument};
use crate::models::Diagnostic;
use serde_yaml::{Mapping, Value as Yaml};
use std::collections::BTreeSet;

/// Rules, entry errors and non-fatal warnings of one document.
pub struct NormalizedDocument {
    pub rules: Vec<NormalizedRule>,
    pub errors: Vec<RuleError>,
    pub warnings: Vec<Diagnostic>,
}

/// Normalize one entry of `document` at position `index`.
///
/// The second value is a warning about metadata that was ignored.
pub fn normalize_entry(
    entry: &RawRuleEntry,
    document: &str,
    index: usize,
) -> Result<(NormalizedRule, Option<String>), RuleError> {
    let invalid = |message: String| RuleError::Validation {
        document: document.to_string(),
        index,
        message,
    };
    let (raw_pattern, paths, (count, warning)) = match entry {
        RawRuleEntry::Plain(s) => (s.as_str(), BTreeSet::new(), (None, None)),
        RawRuleEntry::Structured(map) => {
            let message = match map.get("message") {
                None => return Err(invalid("structured entry is missing `message`".into())),
                Some(Yaml::String(s)) => s.as_str(),
                Some(_) => return Err(invalid("`message` must be a string".into())),
            };
            let paths = read_paths(map).map_err(invalid)?;
            let count = read_count(map);
            (message, paths, count)
        }
        RawRuleEntry::Unsupported(v) => {
            return Err(invalid(format!(
                "entry must be a pattern string or a mapping, found {}",
                yaml_kind(v)
            )))
        }
    };
    let pattern = raw_pattern.trim();
    if pattern.is_empty() {
        return Err(invalid("pattern is empty".into()));
    }
    let rule = NormalizedRule {
        pattern: pattern.to_string(),
        paths,
        source_document: document.to_string(),
        index,
        count,
        category: Category::Other,
        complexity: 0,
    };
    Ok((rule, warning))
}

/// Normalize every entry in `doc`, keeping entry order. Invalid entries are
/// returned separately so the rest of the document still counts.
pub fn normalize_document(doc: &RuleDocument) -> NormalizedDocument {
    let mut out = NormalizedDocument {
        rules: Vec::with_capacity(doc.entries.len()),
        errors: Vec::new(),
        warnings: Vec::new(),
    };
    for (i, entry) in doc.entries.iter().enumerate() {
        match normalize_entry(entry, &doc.name, i) {
            Ok((rule, warning)) => {
                if let Some(message) = warning {
                    out.warnings.push(Diagnostic {
                        kind: "count_warning".into(),
                        entry: Some(i),
                        pattern: Some(rule.pattern.clone()),
                        message,
                    });
                }
                out.rules.push(rule);
            }
            Err(e) => out.errors.push(e),
        }
    }
    out
}

fn read_paths(map: &Mapping) -> Result<BTreeSet<String>, String> {
    let mut out = BTreeSet::new();
    match map.get("paths") {
        None => {}
        Some(Yaml::Sequence(items)) => {
            for (i, item) in items.iter().enumerate() {
                match item {
                    Yaml::String(s) => {
                        out.insert(s.trim().to_string());
                    }
                    other => {
                        return Err(format!(
                            "`paths[{}]` must be a string, found {}",
                            i,
                            yaml_kind(other)
                        ))
                    }
                }
            }
        }
        Some(other) => {
            return Err(format!(
                "`paths` must be a sequence, found {}",
                yaml_kind(other)
            ))
        }
    }
    match map.get("path") {
        None => {}
        Some(Yaml::String(s)) => {
            out.insert(s.trim().to_string());
        }
        Some(other) => return Err(format!("`path` must be a string, found {}", yaml_kind(other))),
    }
    Ok(out)
}

/// Read `count`; a value that is not a non-negative integer is ignored
/// and reported back as a warning message.
fn read_count(map: &Mapping) -> (Option<u64>, Option<String>) {
    match map.get("count") {
        None => (None, None),
        Some(Yaml::Number(n)) => match n.as_u64() {
            Some(c) => (Some(c), None),
            None => (
                None,
                Some(format!("`count` ignored: expected a non-negative integer, found {}", n)),
            ),
        },
        Some(other) => (
            None,
            Some(format!(
                "`count` ignored: expected a non-negative integer, found {}",
                yaml_kind(other)
            )),
        ),
    }
}

fn yaml_kind(v: &Yaml) -> &'static str {
    match v {
        Yaml::Null => "null",
        Yaml::Bool(_) => "boolean",
        Yaml::Number(_) => "number",
        Yaml::String(_) => "string",
        Yaml::Sequence(_) => "sequence",
        Yaml::Mapping(_) => "mapping",
        Yaml::Tagged(_) => "tagged value",
    }
}
