use crate::Instance;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GeneratorParams {
    pub num_orders: usize,
    pub num_items: usize,
    pub num_aisles: usize,
    pub max_qty: u32,
    pub wave_size_lb: i64,
    pub wave_size_ub: i64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            num_orders: 20,
            num_items: 10,
            num_aisles: 5,
            max_qty: 4,
            wave_size_lb: 0,
            wave_size_ub: 1000,
        }
    }
}

impl Instance {
    /// Deterministically generates a random instance from a seed. The total
    /// demand of every item is spread across randomly chosen aisles, so
    /// visiting all aisles always covers the stock requirement of any
    /// selection of orders.
    pub fn generate(seed: &[u8; 32], params: &GeneratorParams) -> Instance {
        let mut rng = StdRng::from_seed(seed.clone());

        let mut orders = Vec::with_capacity(params.num_orders);
        for _ in 0..params.num_orders {
            let num_lines = rng.gen_range(1..=params.num_items.min(4));
            let mut order = HashMap::with_capacity(num_lines);
            for _ in 0..num_lines {
                let item = rng.gen_range(0..params.num_items) as u32;
                let qty = rng.gen_range(1..=params.max_qty);
                *order.entry(item).or_insert(0) += qty;
            }
            orders.push(order);
        }

        let mut demand = HashMap::<u32, u32>::new();
        for order in &orders {
            for (&item, &qty) in order {
                *demand.entry(item).or_default() += qty;
            }
        }

        // Iterate the demand in a stable order so the RNG draws are applied
        // to the same items across runs, keeping generation deterministic.
        let mut demand: Vec<(u32, u32)> = demand.into_iter().collect();
        demand.sort_unstable();

        let mut aisles: Vec<HashMap<u32, u32>> = vec![HashMap::new(); params.num_aisles];
        for &(item, total) in &demand {
            let mut remaining = total;
            while remaining > 0 {
                let aisle = rng.gen_range(0..params.num_aisles);
                let qty = rng.gen_range(1..=remaining);
                *aisles[aisle].entry(item).or_insert(0) += qty;
                remaining -= qty;
            }
        }

        Instance {
            num_orders: params.num_orders,
            num_items: params.num_items,
            num_aisles: params.num_aisles,
            orders,
            aisles,
            wave_size_lb: params.wave_size_lb,
            wave_size_ub: params.wave_size_ub,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Solution;

    #[test]
    fn test_generate_is_deterministic() {
        let params = GeneratorParams::default();
        let a = Instance::generate(&[7u8; 32], &params);
        let b = Instance::generate(&[7u8; 32], &params);
        assert_eq!(a.orders, b.orders);
        assert_eq!(a.aisles, b.aisles);
    }

    #[test]
    fn test_all_aisles_cover_all_orders() {
        let params = GeneratorParams::default();
        let instance = Instance::generate(&[3u8; 32], &params);
        let solution = Solution::from_indices(0..params.num_orders, 0..params.num_aisles);
        instance.verify_solution(&solution).unwrap();
    }
}
