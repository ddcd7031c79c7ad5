mod charts;
mod table;

pub use charts::*;
pub use table::*;

use serde::{Deserialize, Serialize};

/// Per-instance score triple handed from the run orchestrator to the
/// reporting layer. `0.0` is the sentinel for "infeasible, missing, or
/// unparsable"; this layer trusts the oracle and does no feasibility
/// checking of its own.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub instance_name: String,
    pub solver_score: f64,
    pub best_known_score: f64,
    pub baseline_score: f64,
}
