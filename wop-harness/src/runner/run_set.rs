use super::{run_instance, score_file, ScoreRecord};
use crate::config::HarnessConfig;
use anyhow::{Context, Result};
use log::{info, warn};
use std::fs;

/// Processes every instance of a named set, one at a time: optionally runs
/// the external solver on it, then scores the solver output and the
/// best-known and baseline reference solutions through the same oracle.
///
/// Per-instance failures (solver crash, timeout, unparsable files, missing
/// references) degrade that instance's scores to `0.0` and the batch
/// continues. A set whose instance directory is missing is skipped with a
/// warning and yields no records.
pub async fn execute(
    cfg: &HarnessConfig,
    set_name: &str,
    run_solver: bool,
) -> Result<Vec<ScoreRecord>> {
    let input_dir = cfg.datasets_dir.join(set_name);
    if !input_dir.is_dir() {
        warn!(
            "skipping set '{}': no such directory: {}",
            set_name,
            input_dir.display()
        );
        return Ok(Vec::new());
    }

    let mut filenames = Vec::new();
    for entry in fs::read_dir(&input_dir)
        .with_context(|| format!("Failed to list instance directory: {}", input_dir.display()))?
    {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if name.ends_with(".txt") {
            filenames.push(name);
        }
    }
    // Sorted by filename so batches are deterministic across runs.
    filenames.sort();

    if run_solver {
        fs::create_dir_all(cfg.results_dir.join(set_name))?;
        fs::create_dir_all(cfg.logs_dir.join(set_name))?;
    }

    info!("set '{}': {} instances", set_name, filenames.len());

    let mut records = Vec::with_capacity(filenames.len());
    for filename in &filenames {
        let instance_name = filename.trim_end_matches(".txt").to_string();
        let instance_path = input_dir.join(filename);
        let output_path = cfg.results_dir.join(set_name).join(filename);
        let log_path = cfg
            .logs_dir
            .join(set_name)
            .join(format!("{}.log", instance_name));

        if run_solver {
            info!("running {}/{}", set_name, filename);
            if let Err(e) = run_instance::execute(cfg, &instance_path, &output_path, &log_path).await
            {
                warn!("{}/{}: {}", set_name, filename, e);
            }
        }

        let best_path = cfg.best_dir.join(set_name).join(filename);
        let baseline_path = cfg.baseline_dir.join(set_name).join(filename);
        if !best_path.is_file() {
            warn!("{}/{}: no best-known solution file", set_name, filename);
        }
        if !baseline_path.is_file() {
            warn!("{}/{}: no baseline solution file", set_name, filename);
        }

        let record = ScoreRecord {
            instance_name,
            solver_score: score_file::execute(&instance_path, &output_path),
            best_known_score: score_file::execute(&instance_path, &best_path),
            baseline_score: score_file::execute(&instance_path, &baseline_path),
        };
        info!(
            "{}/{}: solver {:.4}, best {:.4}, baseline {:.4}",
            set_name,
            filename,
            record.solver_score,
            record.best_known_score,
            record.baseline_score
        );
        records.push(record);
    }

    Ok(records)
}
