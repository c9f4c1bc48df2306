//! Rule document schema and the per-rule records derived from it.
//!
//! A rule document is a YAML-compatible mapping with a
//! `parameters.ignoreErrors` sequence. Each entry is either a plain pattern
//! string or a mapping with `message`, optional `paths`/`path`, and an
//! optional `count`.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value as Yaml};
use std::collections::BTreeSet;

#[derive(Deserialize)]
/// Top-level shape every rule document must have.
pub struct DocumentSchema {
    pub parameters: ParametersSchema,
}

#[derive(Deserialize)]
/// The `parameters` section; only `ignoreErrors` is required.
pub struct ParametersSchema {
    #[serde(rename = "ignoreErrors")]
    pub ignore_errors: Vec<Yaml>,
}

#[derive(Debug, Clone, PartialEq)]
/// One `ignoreErrors` entry as it appears in the source.
pub enum RawRuleEntry {
    Plain(String),
    Structured(Mapping),
    /// Any other YAML node; rejected during normalization.
    Unsupported(Yaml),
}

impl From<Yaml> for RawRuleEntry {
    fn from(v: Yaml) -> Self {
        match v {
            Yaml::String(s) => RawRuleEntry::Plain(s),
            Yaml::Mapping(m) => RawRuleEntry::Structured(m),
            other => RawRuleEntry::Unsupported(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A loaded rule document. Immutable once built.
pub struct RuleDocument {
    pub name: String,
    pub entries: Vec<RawRuleEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Subject-matter tag assigned by the classifier.
pub enum Category {
    Eloquent,
    Filament,
    Livewire,
    Http,
    Collection,
    Facade,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Eloquent,
        Category::Filament,
        Category::Livewire,
        Category::Http,
        Category::Collection,
        Category::Facade,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Eloquent => "eloquent",
            Category::Filament => "filament",
            Category::Livewire => "livewire",
            Category::Http => "http",
            Category::Collection => "collection",
            Category::Facade => "facade",
            Category::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Reporting bucket for a complexity score. Upper bounds are inclusive.
pub enum ComplexityBucket {
    Simple,
    Moderate,
    Complex,
    VeryComplex,
}

impl ComplexityBucket {
    pub const ALL: [ComplexityBucket; 4] = [
        ComplexityBucket::Simple,
        ComplexityBucket::Moderate,
        ComplexityBucket::Complex,
        ComplexityBucket::VeryComplex,
    ];

    pub fn from_score(score: usize) -> Self {
        match score {
            0..=5 => ComplexityBucket::Simple,
            6..=15 => ComplexityBucket::Moderate,
            16..=30 => ComplexityBucket::Complex,
            _ => ComplexityBucket::VeryComplex,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ComplexityBucket::Simple => "simple",
            ComplexityBucket::Moderate => "moderate",
            ComplexityBucket::Complex => "complex",
            ComplexityBucket::VeryComplex => "very_complex",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Canonical form of one entry. Empty `paths` means "applies everywhere".
pub struct NormalizedRule {
    pub pattern: String,
    pub paths: BTreeSet<String>,
    pub source_document: String,
    /// Position of the entry inside its document.
    pub index: usize,
    /// Expected occurrence count; passed through, never checked.
    pub count: Option<u64>,
    pub category: Category,
    pub complexity: usize,
}
