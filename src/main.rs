//! baselint CLI binary entry point.
//! Resolves configuration, runs the analysis pipeline and prints results.

use baselint::analyze::{analyze_dir, AnalysisOptions};
use baselint::cli::{Cli, Commands, CommonArgs};
use baselint::config::{self, CliOverrides, Effective};
use baselint::models::AnalysisReport;
use baselint::output;
use baselint::utils;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Analyze {
            common,
            top_n,
            similarity,
            threshold,
        } => {
            let eff = resolve(
                common,
                top_n,
                if similarity { Some(true) } else { None },
                threshold,
            );
            let report = run(&eff);
            if let Err(e) = output::print_report(&report, eff.format) {
                fail(&format!("cannot render report: {}", e));
            }
            if report.has_errors() {
                std::process::exit(1);
            }
        }
        Commands::Validate { common } => {
            let eff = resolve(common, None, None, None);
            let report = run(&eff);
            if let Err(e) = output::print_diagnostics(&report, eff.format) {
                fail(&format!("cannot render diagnostics: {}", e));
            }
            if report.has_errors() {
                std::process::exit(1);
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("BASELINT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve(
    common: CommonArgs,
    top_n: Option<usize>,
    similarity: Option<bool>,
    threshold: Option<f64>,
) -> Effective {
    let overrides = CliOverrides {
        repo_root: common.repo_root,
        dir: common.dir,
        top_n,
        format: common.format,
        sample: common.sample,
        similarity,
        threshold,
    };
    let eff = match config::resolve_effective(&overrides) {
        Ok(eff) => eff,
        Err(e) => fail(&e.to_string()),
    };
    if !eff.config_found && eff.format != output::ReportFormat::Json {
        eprintln!(
            "{} {}",
            utils::note_prefix(),
            "No baselint.toml found; using defaults."
        );
    }
    if eff.dir.is_none() {
        fail("Rule directory is not configured. Pass DIR or set `dir` in baselint.toml.");
    }
    eff
}

fn run(eff: &Effective) -> AnalysisReport {
    let Some(dir) = eff.dir.as_deref() else {
        fail("Rule directory is not configured.");
    };
    let opts = AnalysisOptions {
        top_n: eff.top_n,
        sample: eff.sample.clone(),
        similarity_threshold: eff.similarity_threshold,
    };
    if eff.format != output::ReportFormat::Json {
        eprintln!(
            "{} {}",
            utils::info_prefix(),
            format!("Analyzing {} ({})", dir.display(), eff.include.join(", "))
        );
    }
    match analyze_dir(dir, &eff.include, &opts) {
        Ok(report) => report,
        Err(e) => fail(&e.to_string()),
    }
}

fn fail(msg: &str) -> ! {
    eprintln!("{} {}", utils::error_prefix(), msg);
    std::process::exit(2);
}
