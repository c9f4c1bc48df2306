//! Error taxonomy for rule-document analysis.
//!
//! Load-time errors (`Read`, `Syntax`, `Structure`) abort one document.
//! `Validation` aborts a single entry. None of them abort the whole run;
//! the pipeline collects them into the report instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("{document}: cannot read document: {message}")]
    Read { document: String, message: String },
    #[error("{document}: invalid syntax: {message}")]
    Syntax { document: String, message: String },
    #[error("{document}: {message}")]
    Structure { document: String, message: String },
    #[error("{document}: entry #{index}: {message}")]
    Validation {
        document: String,
        index: usize,
        message: String,
    },
    #[error("invalid include pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
}

impl RuleError {
    /// Short machine-readable kind used in report diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            RuleError::Read { .. } => "read_error",
            RuleError::Syntax { .. } => "syntax_error",
            RuleError::Structure { .. } => "structure_error",
            RuleError::Validation { .. } => "validation_error",
            RuleError::Pattern { .. } => "pattern_error",
        }
    }

    /// Entry index for per-entry errors.
    pub fn entry(&self) -> Option<usize> {
        match self {
            RuleError::Validation { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Message without the document prefix.
    pub fn detail(&self) -> &str {
        match self {
            RuleError::Read { message, .. }
            | RuleError::Syntax { message, .. }
            | RuleError::Structure { message, .. }
            | RuleError::Validation { message, .. }
            | RuleError::Pattern { message, .. } => message,
        }
    }
}
