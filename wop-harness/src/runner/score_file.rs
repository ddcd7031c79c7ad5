use log::{debug, warn};
use std::path::Path;
use wop_oracle::{read_instance, read_solution};

/// Best-effort scoring of one (instance, solution) file pair. Every failure
/// mode collapses to `0.0`: a missing file, an unparsable instance, a
/// malformed solution (decoded as empty, hence infeasible) or an infeasible
/// solution. Diagnostics go to the log; the caller only sees the score, so
/// an invalid but unit-rich solution can never inflate batch statistics.
pub fn execute(instance_path: &Path, solution_path: &Path) -> f64 {
    if !instance_path.is_file() || !solution_path.is_file() {
        return 0.0;
    }

    let instance = match read_instance(instance_path) {
        Ok(instance) => instance,
        Err(e) => {
            warn!("{:#}", e);
            return 0.0;
        }
    };

    let solution = read_solution(solution_path);
    match instance.verify_solution(&solution) {
        Ok(()) => instance.compute_objective(&solution),
        Err(e) => {
            debug!("{} is infeasible: {}", solution_path.display(), e);
            0.0
        }
    }
}
