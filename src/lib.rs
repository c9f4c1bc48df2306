//! baselint core library.
//!
//! This crate exposes programmatic APIs for analyzing static-analysis
//! baseline rule documents (`parameters.ignoreErrors` lists): loading,
//! normalization, classification, duplicate detection, and reporting.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `loader`: Rule document discovery and parsing.
//! - `normalize`: Raw entries to canonical rules, with validation.
//! - `classify`: Category tagging and complexity scoring.
//! - `detect`: Duplicate and cross-document conflict grouping.
//! - `similarity`: Advisory near-duplicate scoring.
//! - `regex_check`: Regex evaluation of delimited patterns.
//! - `report`: Aggregation into an immutable `AnalysisReport`.
//! - `analyze`: The end-to-end pipeline.
//! - `models`: Data models for documents, rules, and reports.
//! - `output`: Text/Markdown/JSON renderers.
//! - `error`: Error taxonomy.
//! - `utils`: Supporting helpers.
pub mod analyze;
pub mod classify;
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod output;
pub mod regex_check;
pub mod report;
pub mod similarity;
pub mod utils;
