//! Configuration discovery and effective settings resolution.
//!
//! baselint reads `baselint.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config. Defaults:
//! - `include`: `**/*.neon`, `**/*.yml`, `**/*.yaml`
//! - `top_n`: 10
//! - `format`: `text`
//! - `sample`: empty string
//! - `similarity.enabled`: false, `similarity.threshold`: 85.0
//!
//! There is no default for `dir`: the rule-document directory must be
//! passed on the command line or set in the config file.
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::output::ReportFormat;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_INCLUDE: [&str; 3] = ["**/*.neon", "**/*.yml", "**/*.yaml"];
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 85.0;

const CONFIG_FILES: [&str; 3] = ["baselint.toml", "baselint.yaml", "baselint.yml"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {message}")]
    Read { path: String, message: String },
    #[error("invalid config {path}: {message}")]
    Parse { path: String, message: String },
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Similarity pass settings under `[similarity]`.
pub struct SimilarityCfg {
    pub enabled: Option<bool>,
    pub threshold: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `baselint.toml|yaml`.
pub struct BaselintConfig {
    pub dir: Option<String>,
    pub include: Option<Vec<String>>,
    pub top_n: Option<usize>,
    pub format: Option<ReportFormat>,
    pub sample: Option<String>,
    #[serde(default)]
    pub similarity: Option<SimilarityCfg>,
}

#[derive(Debug, Default, Clone)]
/// Values given on the command line; `None` defers to config/defaults.
pub struct CliOverrides {
    pub repo_root: Option<String>,
    pub dir: Option<String>,
    pub top_n: Option<usize>,
    pub format: Option<ReportFormat>,
    pub sample: Option<String>,
    pub similarity: Option<bool>,
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    /// Rule-document directory; `None` when neither CLI nor config set it.
    pub dir: Option<PathBuf>,
    pub include: Vec<String>,
    pub top_n: usize,
    pub format: ReportFormat,
    pub sample: String,
    pub similarity_threshold: Option<f64>,
    /// Whether a config file was found.
    pub config_found: bool,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `baselint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `BaselintConfig` from `baselint.toml` or `baselint.yaml|yml` if present.
pub fn load_config(root: &Path) -> Result<Option<BaselintConfig>, ConfigError> {
    for name in CONFIG_FILES {
        let p = root.join(name);
        if !p.exists() {
            continue;
        }
        let path = p.to_string_lossy().to_string();
        let s = fs::read_to_string(&p).map_err(|e| ConfigError::Read {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let cfg: BaselintConfig = if name.ends_with(".toml") {
            toml::from_str(&s).map_err(|e| ConfigError::Parse {
                path,
                message: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(&s).map_err(|e| ConfigError::Parse {
                path,
                message: e.to_string(),
            })?
        };
        return Ok(Some(cfg));
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// A relative `dir` from the CLI is taken as given (relative to the current
/// directory); one from the config file is resolved against the repo root.
pub fn resolve_effective(cli: &CliOverrides) -> Result<Effective, ConfigError> {
    let start = PathBuf::from(cli.repo_root.as_deref().unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let dir = cli
        .dir
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| cfg.dir.as_ref().map(|d| repo_root.join(d)));

    let include = cfg
        .include
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect());

    let top_n = cli.top_n.or(cfg.top_n).unwrap_or(DEFAULT_TOP_N);
    let format = cli.format.or(cfg.format).unwrap_or(ReportFormat::Text);
    let sample = cli.sample.clone().or(cfg.sample).unwrap_or_default();

    let sim_cfg = cfg.similarity.unwrap_or_default();
    let threshold = cli
        .threshold
        .or(sim_cfg.threshold)
        .unwrap_or(DEFAULT_SIMILARITY_THRESHOLD);
    // Passing --threshold alone turns the pass on.
    let enabled = cli
        .similarity
        .or(cli.threshold.map(|_| true))
        .or(sim_cfg.enabled)
        .unwrap_or(false);

    Ok(Effective {
        repo_root,
        dir,
        include,
        top_n,
        format,
        sample,
        similarity_threshold: enabled.then_some(threshold),
        config_found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn at(root: &Path) -> CliOverrides {
        CliOverrides {
            repo_root: root.to_str().map(String::from),
            ..CliOverrides::default()
        }
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("baselint.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
dir = "baselines"
top_n = 5
format = "json"
[similarity]
enabled = true
threshold = 90.0
    "#
        )
        .unwrap();

        // Resolve using explicit repo_root to avoid global CWD races
        let eff = resolve_effective(&at(root)).unwrap();
        assert!(eff.config_found);
        assert_eq!(eff.dir, Some(root.join("baselines")));
        assert_eq!(eff.top_n, 5);
        assert_eq!(eff.format, ReportFormat::Json);
        assert_eq!(eff.similarity_threshold, Some(90.0));
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("baselint.yaml")).unwrap();
        writeln!(f, "{}", "dir: rules\nformat: markdown\n").unwrap();

        let eff = resolve_effective(&at(root)).unwrap();
        assert_eq!(eff.dir, Some(root.join("rules")));
        assert_eq!(eff.format, ReportFormat::Markdown);
        assert_eq!(eff.top_n, DEFAULT_TOP_N);
        assert_eq!(eff.include.len(), DEFAULT_INCLUDE.len());
        assert_eq!(eff.sample, "");
        assert_eq!(eff.similarity_threshold, None);
    }

    #[test]
    fn test_cli_takes_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("baselint.toml"),
            "dir = \"baselines\"\ntop_n = 5\nformat = \"json\"\n",
        )
        .unwrap();
        let cli = CliOverrides {
            dir: Some("elsewhere".into()),
            top_n: Some(1),
            format: Some(ReportFormat::Text),
            threshold: Some(70.0),
            ..at(root)
        };
        let eff = resolve_effective(&cli).unwrap();
        assert_eq!(eff.dir, Some(PathBuf::from("elsewhere")));
        assert_eq!(eff.top_n, 1);
        assert_eq!(eff.format, ReportFormat::Text);
        assert_eq!(eff.similarity_threshold, Some(70.0));
    }

    #[test]
    fn test_no_config_leaves_dir_unset() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let eff = resolve_effective(&at(dir.path())).unwrap();
        assert!(!eff.config_found);
        assert!(eff.dir.is_none());
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("baselint.toml"), "top_n = \"many\"\n").unwrap();
        assert!(matches!(
            resolve_effective(&at(dir.path())),
            Err(ConfigError::Parse { .. })
        ));
    }
}
