//! CLI argument parsing via `clap`.

use crate::output::ReportFormat;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "baselint",
    version,
    about = "Analyze static-analysis baseline rule documents",
    long_about = "baselint — load ignoreErrors rule documents, classify their patterns, and report duplicates and cross-document conflicts.\n\nConfiguration precedence: CLI > baselint.toml > defaults.",
    after_help = "Examples:\n  baselint analyze baselines\n  baselint analyze baselines --top-n 5 --format markdown\n  baselint analyze --similarity --threshold 90\n  baselint validate baselines --format json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current baselint version.")]
    Version,
    /// Analyze a directory of rule documents
    #[command(
        about = "Analyze rule documents",
        long_about = "Load every rule document under DIR, then report totals, categories, complexity, duplicates, and diagnostics. Duplicates are findings; only load or validation errors exit non-zero.",
        after_help = "Examples:\n  baselint analyze baselines\n  baselint analyze baselines --format json --top-n 3"
    )]
    Analyze {
        #[command(flatten)]
        common: CommonArgs,
        #[arg(long, help = "Number of duplicate groups to list (default: 10)")]
        top_n: Option<usize>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Run the advisory similarity pass")]
        similarity: bool,
        #[arg(long, help = "Similarity threshold in percent (implies --similarity; default: 85)")]
        threshold: Option<f64>,
    },
    /// Validate rule documents only
    #[command(
        about = "Validate rule documents",
        long_about = "Run the same pipeline as analyze but print only errors, warnings, and a summary line.",
        after_help = "Examples:\n  baselint validate baselines\n  baselint validate baselines --format json"
    )]
    Validate {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
/// Options shared by `analyze` and `validate`.
pub struct CommonArgs {
    #[arg(help = "Directory of rule documents (default: `dir` from baselint.toml)")]
    pub dir: Option<String>,
    #[arg(long, help = "Repository root used for config discovery (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(long, value_enum, help = "Output format: text|markdown|json (default: text)")]
    pub format: Option<ReportFormat>,
    #[arg(long, help = "Sample message every pattern must match; mismatches are warnings")]
    pub sample: Option<String>,
}
