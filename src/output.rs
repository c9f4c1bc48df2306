//! Output rendering for analysis reports.
//!
//! Supports `text` (default), `markdown`, and `json`. Every renderer is a
//! pure function of the `AnalysisReport`; printing is a thin wrapper.

use crate::models::{AnalysisReport, Diagnostic};
use owo_colors::OwoColorize;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
/// Report output format.
pub enum ReportFormat {
    Text,
    Markdown,
    Json,
}

fn use_colors(format: ReportFormat) -> bool {
    format == ReportFormat::Text && std::env::var_os("NO_COLOR").is_none()
}

/// Print the full report in the requested format.
pub fn print_report(report: &AnalysisReport, format: ReportFormat) -> Result<(), serde_json::Error> {
    let out = match format {
        ReportFormat::Json => compose_json(report)?,
        ReportFormat::Markdown => compose_markdown(report),
        ReportFormat::Text => compose_text(report, use_colors(format)),
    };
    println!("{}", out);
    Ok(())
}

/// Print only diagnostics and a one-line summary (used by `validate`).
pub fn print_diagnostics(
    report: &AnalysisReport,
    format: ReportFormat,
) -> Result<(), serde_json::Error> {
    let out = match format {
        ReportFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
            "diagnostics": report.diagnostics,
            "summary": {
                "files": report.files_count,
                "errors": report.error_count(),
                "warnings": report.warning_count(),
            },
        }))?,
        _ => {
            let color = use_colors(format);
            let mut s = compose_diagnostics_text(report, color);
            let summary = format!(
                "— Summary — files={} errors={} warnings={}",
                report.files_count,
                report.error_count(),
                report.warning_count()
            );
            if color {
                let _ = write!(s, "{}", summary.bold());
            } else {
                s.push_str(&summary);
            }
            s
        }
    };
    println!("{}", out);
    Ok(())
}

/// Compose the JSON report (pretty-printed).
pub fn compose_json(report: &AnalysisReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Compose the human-readable text report.
pub fn compose_text(report: &AnalysisReport, color: bool) -> String {
    let mut s = String::new();
    let heading = |title: &str| {
        if color {
            title.bold().to_string()
        } else {
            title.to_string()
        }
    };
    let _ = writeln!(s, "{}", heading("Pattern analysis"));
    let _ = writeln!(s, "  files:              {}", report.files_count);
    let _ = writeln!(s, "  failed documents:   {}", report.documents_with_errors);
    let _ = writeln!(s, "  total patterns:     {}", report.total_patterns);
    let _ = writeln!(s, "  unique patterns:    {}", report.unique_patterns);
    let _ = writeln!(
        s,
        "  duplicate patterns: {} ({:.2}%)",
        report.duplicate_patterns, report.duplicate_percentage
    );
    let _ = writeln!(s, "{}", heading("Categories"));
    for (cat, n) in &report.categories {
        let _ = writeln!(s, "  {:<12} {}", cat.as_str(), n);
    }
    let _ = writeln!(s, "{}", heading("Complexity"));
    for (bucket, n) in &report.complexity {
        let _ = writeln!(s, "  {:<12} {}", bucket.as_str(), n);
    }
    if !report.most_duplicated.is_empty() {
        let _ = writeln!(s, "{}", heading("Most duplicated"));
        for d in &report.most_duplicated {
            let label = if color {
                d.kind.label().yellow().to_string()
            } else {
                d.kind.label().to_string()
            };
            let _ = writeln!(
                s,
                "  {}× {} ❲{}❳ in {}",
                d.count,
                d.pattern,
                label,
                d.documents.join(", ")
            );
        }
    }
    if let Some(pairs) = &report.similar_patterns {
        if !pairs.is_empty() {
            let _ = writeln!(s, "{}", heading("Similar patterns (advisory)"));
            for p in pairs {
                let icon = if color {
                    "▲".yellow().to_string()
                } else {
                    "▲".to_string()
                };
                let _ = writeln!(
                    s,
                    "  {} {:.2}% {} ~ {}",
                    icon, p.similarity, p.left, p.right
                );
            }
        }
    }
    if !report.diagnostics.is_empty() {
        let _ = writeln!(s, "{}", heading("Diagnostics"));
        s.push_str(&compose_diagnostics_text(report, color));
    }
    s.trim_end().to_string()
}

/// Compose the diagnostics block, grouped by document.
pub fn compose_diagnostics_text(report: &AnalysisReport, color: bool) -> String {
    let mut s = String::new();
    for doc in &report.diagnostics {
        let file = if color {
            doc.document.clone().bold().to_string()
        } else {
            doc.document.clone()
        };
        for e in &doc.errors {
            let (icon, sev) = if color {
                ("✖".red().to_string(), "⟦error⟧".red().bold().to_string())
            } else {
                ("✖".to_string(), "⟦error⟧".to_string())
            };
            let _ = writeln!(s, "{} {} {} {}", icon, sev, file, describe(e));
        }
        for w in &doc.warnings {
            let (icon, sev) = if color {
                ("▲".yellow().to_string(), "⟦warn⟧".yellow().bold().to_string())
            } else {
                ("▲".to_string(), "⟦warn⟧".to_string())
            };
            let _ = writeln!(s, "{} {} {} {}", icon, sev, file, describe(w));
        }
    }
    s
}

fn describe(d: &Diagnostic) -> String {
    let mut out = format!("❲{}❳", d.kind);
    if let Some(i) = d.entry {
        let _ = write!(out, " entry #{}", i);
    }
    let _ = write!(out, " — {}", d.message);
    if let Some(p) = &d.pattern {
        let _ = write!(out, " ({})", p);
    }
    out
}

/// Compose a Markdown report with tables.
pub fn compose_markdown(report: &AnalysisReport) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "# Pattern analysis\n");
    let _ = writeln!(s, "| Metric | Value |");
    let _ = writeln!(s, "| --- | --- |");
    let _ = writeln!(s, "| Files | {} |", report.files_count);
    let _ = writeln!(s, "| Failed documents | {} |", report.documents_with_errors);
    let _ = writeln!(s, "| Total patterns | {} |", report.total_patterns);
    let _ = writeln!(s, "| Unique patterns | {} |", report.unique_patterns);
    let _ = writeln!(s, "| Duplicate patterns | {} |", report.duplicate_patterns);
    let _ = writeln!(s, "| Duplicate percentage | {:.2}% |", report.duplicate_percentage);

    let _ = writeln!(s, "\n## Categories\n");
    let _ = writeln!(s, "| Category | Count |");
    let _ = writeln!(s, "| --- | --- |");
    for (cat, n) in &report.categories {
        let _ = writeln!(s, "| {} | {} |", cat.as_str(), n);
    }

    let _ = writeln!(s, "\n## Complexity\n");
    let _ = writeln!(s, "| Bucket | Count |");
    let _ = writeln!(s, "| --- | --- |");
    for (bucket, n) in &report.complexity {
        let _ = writeln!(s, "| {} | {} |", bucket.as_str(), n);
    }

    if !report.most_duplicated.is_empty() {
        let _ = writeln!(s, "\n## Most duplicated\n");
        let _ = writeln!(s, "| Pattern | Count | Kind | Documents |");
        let _ = writeln!(s, "| --- | --- | --- | --- |");
        for d in &report.most_duplicated {
            let _ = writeln!(
                s,
                "| `{}` | {} | {} | {} |",
                md_cell(&d.pattern),
                d.count,
                d.kind.label(),
                d.documents.join(", ")
            );
        }
    }

    if let Some(pairs) = &report.similar_patterns {
        if !pairs.is_empty() {
            let _ = writeln!(s, "\n## Similar patterns (advisory)\n");
            let _ = writeln!(s, "| Left | Right | Similarity |");
            let _ = writeln!(s, "| --- | --- | --- |");
            for p in pairs {
                let _ = writeln!(
                    s,
                    "| `{}` | `{}` | {:.2}% |",
                    md_cell(&p.left),
                    md_cell(&p.right),
                    p.similarity
                );
            }
        }
    }

    if !report.diagnostics.is_empty() {
        let _ = writeln!(s, "\n## Diagnostics\n");
        for doc in &report.diagnostics {
            let _ = writeln!(s, "### {}\n", doc.document);
            for e in &doc.errors {
                let _ = writeln!(s, "- **error** {}", describe(e));
            }
            for w in &doc.warnings {
                let _ = writeln!(s, "- warning {}", describe(w));
            }
            s.push('\n');
        }
    }
    s.trim_end().to_string()
}

fn md_cell(s: &str) -> String {
    s.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{analyze_sources, AnalysisOptions, SourceDocument};

    fn sample_report() -> AnalysisReport {
        let a = "parameters:\n  ignoreErrors:\n    - '#Eloquent a|b#'\n    - '#x#'\n";
        let b = "parameters:\n  ignoreErrors:\n    - '#Eloquent a|b#'\n    - paths: []\n";
        analyze_sources(
            &[SourceDocument::new("a.neon", a), SourceDocument::new("b.neon", b)],
            &AnalysisOptions::default(),
        )
    }

    #[test]
    fn test_compose_json_shape() {
        let out: serde_json::Value =
            serde_json::from_str(&compose_json(&sample_report()).unwrap()).unwrap();
        assert_eq!(out["files_count"], 2);
        assert_eq!(out["total_patterns"], 3);
        assert_eq!(out["unique_patterns"], 2);
        assert_eq!(out["duplicate_patterns"], 1);
        assert_eq!(out["duplicate_percentage"], 50.0);
        assert_eq!(out["categories"]["eloquent"], 2);
        assert_eq!(out["complexity"]["very_complex"], 0);
        assert_eq!(out["most_duplicated"][0]["kind"], "cross_document");
        assert_eq!(out["most_duplicated"][0]["documents"][1], "b.neon");
        assert_eq!(out["diagnostics"][0]["document"], "b.neon");
        assert_eq!(out["diagnostics"][0]["errors"][0]["entry"], 1);
        assert!(out.get("similar_patterns").is_none());
    }

    #[test]
    fn test_compose_text_without_color() {
        let text = compose_text(&sample_report(), false);
        assert!(text.contains("duplicate patterns: 1 (50.00%)"));
        assert!(text.contains("cross-document conflict"));
        assert!(text.contains("⟦error⟧ b.neon ❲validation_error❳ entry #1"));
    }

    #[test]
    fn test_compose_markdown_escapes_pipes() {
        let md = compose_markdown(&sample_report());
        assert!(md.starts_with("# Pattern analysis"));
        assert!(md.contains("| `#Eloquent a\\|b#` | 2 | cross-document conflict | a.neon, b.neon |"));
        assert!(md.contains("### b.neon"));
    }
}
