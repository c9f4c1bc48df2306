//! Regex evaluation of delimited patterns.
//!
//! Patterns are written as delimited regexes (`#...#`, `/.../`, `~...~`,
//! or bracket pairs such as `{...}`) with optional trailing modifiers.
//! Each pattern is compiled; when a non-empty sample is given it must also
//! match it. Any failure becomes a warning message. Evaluation never fails
//! the run.

use regex::Regex;

/// Split a delimited pattern into its body and modifier letters.
pub fn split_delimited(pattern: &str) -> Result<(&str, &str), String> {
    let mut chars = pattern.chars();
    let open = chars
        .next()
        .ok_or_else(|| "pattern is empty".to_string())?;
    if open.is_alphanumeric() || open == '\\' || open.is_whitespace() {
        return Err(format!("missing regex delimiter (pattern starts with '{}')", open));
    }
    let close = match open {
        '(' => ')',
        '{' => '}',
        '[' => ']',
        '<' => '>',
        other => other,
    };
    let rest = &pattern[open.len_utf8()..];
    let end = rest
        .rfind(close)
        .ok_or_else(|| format!("unbalanced delimiter: no closing '{}'", close))?;
    Ok((&rest[..end], &rest[end + close.len_utf8()..]))
}

/// Build a `regex`-crate pattern from a delimited one.
pub fn to_regex(pattern: &str) -> Result<String, String> {
    let (body, modifiers) = split_delimited(pattern)?;
    let mut flags = String::new();
    for m in modifiers.chars() {
        match m {
            'i' | 'm' | 's' | 'x' | 'U' => flags.push(m),
            'u' | 'D' => {}
            other => return Err(format!("unsupported modifier '{}'", other)),
        }
    }
    if flags.is_empty() {
        Ok(body.to_string())
    } else {
        Ok(format!("(?{}){}", flags, body))
    }
}

/// Compile `pattern` and, for a non-empty `sample`, check that it matches.
/// Returns a warning message when either step fails.
pub fn evaluate_pattern(pattern: &str, sample: &str) -> Option<String> {
    let source = match to_regex(pattern) {
        Ok(s) => s,
        Err(msg) => return Some(msg),
    };
    let re = match Regex::new(&source) {
        Ok(re) => re,
        Err(e) => return Some(format!("regex does not compile: {}", e)),
    };
    if sample.is_empty() || re.is_match(sample) {
        None
    } else {
        Some(format!("pattern does not match sample '{}'", sample))
    }
}
