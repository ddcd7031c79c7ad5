use crate::Solution;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One wave order picking instance: a set of orders requiring item
/// quantities, a set of aisles stocking item quantities, and inclusive
/// bounds on the total number of units a wave may pick.
///
/// `num_items` is advisory header metadata; item ids in orders and aisles
/// are not validated against it. `wave_size_lb <= wave_size_ub` is not
/// enforced either: inverted bounds simply make every non-empty solution
/// infeasible.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Instance {
    pub num_orders: usize,
    pub num_items: usize,
    pub num_aisles: usize,
    pub orders: Vec<HashMap<u32, u32>>,
    pub aisles: Vec<HashMap<u32, u32>>,
    pub wave_size_lb: i64,
    pub wave_size_ub: i64,
}

impl Instance {
    /// Total units picked by the selected orders. Out-of-range order
    /// indices contribute nothing; `verify_solution` is the place where
    /// they are rejected.
    pub fn total_units(&self, solution: &Solution) -> u64 {
        solution
            .selected_orders
            .iter()
            .filter_map(|&order| self.orders.get(order))
            .map(|order| order.values().map(|&qty| qty as u64).sum::<u64>())
            .sum()
    }

    /// Checks feasibility of `solution`. Returns `Err` with the violated
    /// constraint; infeasibility is an outcome, not a failure, so callers
    /// that only need a verdict should use [`Instance::is_feasible`].
    pub fn verify_solution(&self, solution: &Solution) -> Result<()> {
        // Bounds are checked against the backing vecs, not the header
        // counts; the pub fields allow the two to disagree.
        if let Some(&order) = solution
            .selected_orders
            .iter()
            .find(|&&order| order >= self.orders.len())
        {
            return Err(anyhow!(
                "Order index {} out of range. Expected: < {}",
                order,
                self.orders.len()
            ));
        }

        let total_units = self.total_units(solution) as i64;
        if !(self.wave_size_lb..=self.wave_size_ub).contains(&total_units) {
            // An empty wave is a valid degenerate solution when the lower
            // bound does not force any picking.
            if !(total_units == 0 && self.wave_size_lb <= 0) {
                return Err(anyhow!(
                    "Total picked units {} outside wave size bounds [{}, {}]",
                    total_units,
                    self.wave_size_lb,
                    self.wave_size_ub
                ));
            }
        }

        if let Some(&aisle) = solution
            .visited_aisles
            .iter()
            .find(|&&aisle| aisle >= self.aisles.len())
        {
            return Err(anyhow!(
                "Aisle index {} out of range. Expected: < {}",
                aisle,
                self.aisles.len()
            ));
        }

        // Stock is aggregated across all visited aisles; no single aisle
        // has to cover an item on its own.
        let mut required = HashMap::<u32, u64>::new();
        for &order in &solution.selected_orders {
            for (&item, &qty) in &self.orders[order] {
                *required.entry(item).or_default() += qty as u64;
            }
        }
        for (&item, &needed) in &required {
            let available: u64 = solution
                .visited_aisles
                .iter()
                .map(|&aisle| self.aisles[aisle].get(&item).map_or(0, |&qty| qty as u64))
                .sum();
            if available < needed {
                return Err(anyhow!(
                    "Item {} requires {} units but visited aisles stock only {}",
                    item,
                    needed,
                    available
                ));
            }
        }

        Ok(())
    }

    pub fn is_feasible(&self, solution: &Solution) -> bool {
        self.verify_solution(solution).is_ok()
    }

    /// Units picked per aisle visited. Zero visited aisles score `0.0`
    /// regardless of units. Does not re-check feasibility; a meaningful
    /// score requires the caller to have verified the solution first.
    pub fn compute_objective(&self, solution: &Solution) -> f64 {
        if solution.visited_aisles.is_empty() {
            return 0.0;
        }
        self.total_units(solution) as f64 / solution.visited_aisles.len() as f64
    }
}
