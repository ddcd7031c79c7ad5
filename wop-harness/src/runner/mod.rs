pub mod convergence;
pub mod run_instance;
pub mod run_set;
pub mod score_file;

use crate::config::HarnessConfig;
use anyhow::{anyhow, Result};
use std::fmt;

pub use wop_report::ScoreRecord;

/// Ways a single solver invocation can fail. All of them are per-instance:
/// the orchestrator logs the error, records a `0.0` score and moves on to
/// the next instance.
#[derive(Debug)]
pub enum SolverError {
    /// The process could not be started.
    Spawn(std::io::Error),
    /// Redirecting or waiting on the process failed.
    Io(std::io::Error),
    /// The configured wall-clock budget elapsed; the child was killed.
    Timeout { secs: u64 },
    /// The solver exited with a non-zero status.
    Exit { code: Option<i32>, stderr: String },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::Spawn(e) => write!(f, "failed to spawn solver: {}", e),
            SolverError::Io(e) => write!(f, "solver i/o error: {}", e),
            SolverError::Timeout { secs } => {
                write!(f, "solver exceeded timeout of {}s and was killed", secs)
            }
            SolverError::Exit { code, stderr } => match code {
                Some(code) => write!(f, "solver exited with code {}: {}", code, stderr.trim_end()),
                None => write!(f, "solver terminated by signal: {}", stderr.trim_end()),
            },
        }
    }
}

impl std::error::Error for SolverError {}

/// Pre-batch check that the external solver exists. This is the only
/// failure that aborts a whole run; everything downstream degrades to
/// per-instance `0.0` scores.
pub fn check_solver(cfg: &HarnessConfig) -> Result<()> {
    match &cfg.solver_path {
        Some(path) if path.is_file() => Ok(()),
        Some(path) => Err(anyhow!(
            "Solver executable not found: {}",
            path.display()
        )),
        None => Err(anyhow!(
            "No solver executable configured (--solver or config solver_path)"
        )),
    }
}
