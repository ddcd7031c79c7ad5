use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Explicit configuration for the run orchestrator. The orchestrator reads
/// no ambient globals; everything it touches comes from this object, so
/// several differently-configured harnesses can coexist in one process
/// (and in tests).
///
/// All artifact directories are keyed `{dir}/{set_name}/{instance}.{ext}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HarnessConfig {
    /// External solver executable, invoked as `solver [solver_arg] [log_path]`
    /// with the instance on stdin and the solution expected on stdout.
    #[serde(default)]
    pub solver_path: Option<PathBuf>,
    /// Heuristic selector forwarded to the solver as its first argument.
    #[serde(default)]
    pub solver_arg: Option<String>,
    /// Wall-clock budget per solver invocation. `None` waits indefinitely.
    #[serde(default)]
    pub solver_timeout_secs: Option<u64>,
    #[serde(default = "default_datasets_dir")]
    pub datasets_dir: PathBuf,
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    #[serde(default = "default_best_dir")]
    pub best_dir: PathBuf,
    #[serde(default = "default_baseline_dir")]
    pub baseline_dir: PathBuf,
    #[serde(default = "default_logs_dir")]
    pub logs_dir: PathBuf,
    #[serde(default = "default_plots_dir")]
    pub plots_dir: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            solver_path: None,
            solver_arg: None,
            solver_timeout_secs: None,
            datasets_dir: default_datasets_dir(),
            results_dir: default_results_dir(),
            best_dir: default_best_dir(),
            baseline_dir: default_baseline_dir(),
            logs_dir: default_logs_dir(),
            plots_dir: default_plots_dir(),
        }
    }
}

impl HarnessConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

fn default_datasets_dir() -> PathBuf {
    PathBuf::from("datasets")
}
fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}
fn default_best_dir() -> PathBuf {
    PathBuf::from("best_solutions")
}
fn default_baseline_dir() -> PathBuf {
    PathBuf::from("baseline/out")
}
fn default_logs_dir() -> PathBuf {
    PathBuf::from("convergence_logs")
}
fn default_plots_dir() -> PathBuf {
    PathBuf::from("plots")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg: HarnessConfig =
            serde_json::from_str(r#"{"solver_path": "bin/solver", "solver_timeout_secs": 30}"#)
                .unwrap();
        assert_eq!(cfg.solver_path, Some(PathBuf::from("bin/solver")));
        assert_eq!(cfg.solver_timeout_secs, Some(30));
        assert_eq!(cfg.datasets_dir, PathBuf::from("datasets"));
        assert_eq!(cfg.baseline_dir, PathBuf::from("baseline/out"));
    }
}
