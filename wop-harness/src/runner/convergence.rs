use std::fs;
use std::path::Path;

/// Reads the `(elapsed_secs, best_score)` samples a solver appended to its
/// convergence log, one whitespace-separated pair per line. Traces are
/// advisory: a missing file yields no samples and malformed lines are
/// skipped.
pub fn read_convergence_log(path: &Path) -> Vec<(f64, f64)> {
    let Ok(text) = fs::read_to_string(path) else {
        return Vec::new();
    };
    text.lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let elapsed = parts.next()?.parse().ok()?;
            let score = parts.next()?.parse().ok()?;
            Some((elapsed, score))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_log_yields_no_samples() {
        let samples = read_convergence_log(Path::new("no/such/convergence.log"));
        assert!(samples.is_empty());
    }
}
