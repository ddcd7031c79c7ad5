use super::SolverError;
use crate::config::HarnessConfig;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::timeout;

/// Runs the external solver once: the instance file is fed on stdin, the
/// candidate solution is captured from stdout into `output_path`, and the
/// solver may append `(elapsed_secs, best_score)` convergence samples to
/// `log_path`, which is passed as its final argument.
///
/// The wait is synchronous from the orchestrator's point of view; with
/// `solver_timeout_secs` set, a hung solver is killed instead of blocking
/// the batch forever.
pub async fn execute(
    cfg: &HarnessConfig,
    instance_path: &Path,
    output_path: &Path,
    log_path: &Path,
) -> Result<(), SolverError> {
    let solver_path = cfg.solver_path.as_ref().ok_or_else(|| {
        SolverError::Spawn(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no solver executable configured",
        ))
    })?;

    let stdin = std::fs::File::open(instance_path).map_err(SolverError::Io)?;
    let stdout = std::fs::File::create(output_path).map_err(SolverError::Io)?;

    let mut command = Command::new(solver_path);
    if let Some(arg) = &cfg.solver_arg {
        command.arg(arg);
    }
    command
        .arg(log_path)
        .stdin(Stdio::from(stdin))
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = command.spawn().map_err(SolverError::Spawn)?;

    // Drain stderr concurrently so a chatty solver cannot fill the pipe
    // and deadlock the wait below.
    let stderr_task = child.stderr.take().map(|mut pipe| {
        tokio::spawn(async move {
            let mut buf = String::new();
            let _ = pipe.read_to_string(&mut buf).await;
            buf
        })
    });

    let status = match cfg.solver_timeout_secs {
        Some(secs) => match timeout(Duration::from_secs(secs), child.wait()).await {
            Ok(waited) => waited.map_err(SolverError::Io)?,
            Err(_) => {
                let _ = child.kill().await;
                return Err(SolverError::Timeout { secs });
            }
        },
        None => child.wait().await.map_err(SolverError::Io)?,
    };

    if status.success() {
        Ok(())
    } else {
        let stderr = match stderr_task {
            Some(task) => task.await.unwrap_or_default(),
            None => String::new(),
        };
        Err(SolverError::Exit {
            code: status.code(),
            stderr,
        })
    }
}
