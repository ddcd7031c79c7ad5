use crate::ScoreRecord;
use std::fmt;

/// Percentage gap of the solver score versus the baseline score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gap {
    Percent(f64),
    /// Baseline scored `0.0` while the solver found something: an unbounded
    /// improvement that has no finite percentage.
    Unbounded,
    /// Both scores are `0.0`.
    Zero,
}

pub fn gap_percent(solver_score: f64, baseline_score: f64) -> Gap {
    if baseline_score > 0.0 {
        Gap::Percent((solver_score - baseline_score) / baseline_score * 100.0)
    } else if solver_score > 0.0 {
        Gap::Unbounded
    } else {
        Gap::Zero
    }
}

impl fmt::Display for Gap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gap::Percent(p) => write!(f, "{:.2}", p),
            Gap::Unbounded => write!(f, "inf"),
            Gap::Zero => write!(f, "0.00"),
        }
    }
}

/// Plain-text summary table: one row per instance with best-known,
/// baseline and solver scores plus the solver-vs-baseline gap.
pub fn score_table(records: &[ScoreRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<16} {:>10} {:>10} {:>10} {:>9}\n",
        "instance", "best", "baseline", "solver", "gap%"
    ));
    for record in records {
        out.push_str(&format!(
            "{:<16} {:>10.2} {:>10.2} {:>10.2} {:>9}\n",
            record.instance_name,
            record.best_known_score,
            record.baseline_score,
            record.solver_score,
            gap_percent(record.solver_score, record.baseline_score),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_percent() {
        assert_eq!(gap_percent(15.0, 10.0), Gap::Percent(50.0));
        assert_eq!(gap_percent(5.0, 10.0), Gap::Percent(-50.0));
        assert_eq!(gap_percent(3.0, 0.0), Gap::Unbounded);
        assert_eq!(gap_percent(0.0, 0.0), Gap::Zero);
    }

    #[test]
    fn test_gap_display() {
        assert_eq!(gap_percent(15.0, 10.0).to_string(), "50.00");
        assert_eq!(gap_percent(1.0, 0.0).to_string(), "inf");
        assert_eq!(gap_percent(0.0, 0.0).to_string(), "0.00");
    }

    #[test]
    fn test_score_table_layout() {
        let records = vec![ScoreRecord {
            instance_name: "instance_0001".to_string(),
            solver_score: 12.5,
            best_known_score: 14.0,
            baseline_score: 10.0,
        }];
        let table = score_table(&records);
        let mut lines = table.lines();
        assert!(lines.next().unwrap().starts_with("instance"));
        let row = lines.next().unwrap();
        assert!(row.contains("instance_0001"));
        assert!(row.contains("12.50"));
        assert!(row.trim_end().ends_with("25.00"));
    }
}
