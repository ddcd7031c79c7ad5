use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A candidate wave: a set of order indices to pick and a set of aisles to
/// visit. Duplicates collapse and ordering is irrelevant by construction.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    pub selected_orders: HashSet<usize>,
    pub visited_aisles: HashSet<usize>,
}

impl Solution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_indices(
        orders: impl IntoIterator<Item = usize>,
        aisles: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            selected_orders: orders.into_iter().collect(),
            visited_aisles: aisles.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selected_orders.is_empty() && self.visited_aisles.is_empty()
    }
}
