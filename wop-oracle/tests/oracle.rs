use std::collections::HashMap;
use wop_oracle::{GeneratorParams, Instance, Solution};

fn bounded_instance(lb: i64, ub: i64) -> Instance {
    // Orders 0..3 pick 4, 1 and 5 units of item 0; aisle 0 stocks plenty.
    Instance {
        num_orders: 3,
        num_items: 1,
        num_aisles: 1,
        orders: vec![
            HashMap::from([(0, 4)]),
            HashMap::from([(0, 1)]),
            HashMap::from([(0, 5)]),
        ],
        aisles: vec![HashMap::from([(0, 100)])],
        wave_size_lb: lb,
        wave_size_ub: ub,
    }
}

#[test]
fn test_wave_size_bounds_are_inclusive() {
    let instance = bounded_instance(5, 10);

    // 4 units: below the lower bound, infeasible regardless of coverage.
    let four = Solution::from_indices([0], [0]);
    assert!(!instance.is_feasible(&four));

    // Exactly 5 and exactly 10 units sit on the boundaries.
    let five = Solution::from_indices([0, 1], [0]);
    assert!(instance.is_feasible(&five));
    let ten = Solution::from_indices([0, 1, 2], [0]);
    assert!(instance.is_feasible(&ten));
}

#[test]
fn test_empty_solution_validity_follows_lower_bound() {
    let empty = Solution::new();
    assert!(bounded_instance(0, 10).is_feasible(&empty));
    assert!(bounded_instance(-3, 10).is_feasible(&empty));
    assert!(!bounded_instance(1, 10).is_feasible(&empty));
    assert_eq!(bounded_instance(0, 10).compute_objective(&empty), 0.0);
}

#[test]
fn test_order_index_one_past_end_is_infeasible() {
    let instance = bounded_instance(0, 100);
    let solution = Solution::from_indices([instance.num_orders], [0]);
    let err = instance.verify_solution(&solution).unwrap_err();
    assert!(err.to_string().contains("Order index 3 out of range"));
}

#[test]
fn test_aisle_index_out_of_range_is_infeasible() {
    let instance = bounded_instance(0, 100);
    let solution = Solution::from_indices([0], [1]);
    assert!(!instance.is_feasible(&solution));
}

#[test]
fn test_round_trip_scenario() {
    let instance = Instance {
        num_orders: 1,
        num_items: 2,
        num_aisles: 1,
        orders: vec![HashMap::from([(1, 4)])],
        aisles: vec![HashMap::from([(1, 10)])],
        wave_size_lb: 1,
        wave_size_ub: 10,
    };
    let solution = Solution::from_indices([0], [0]);
    instance.verify_solution(&solution).unwrap();
    assert_eq!(instance.compute_objective(&solution), 4.0);
}

#[test]
fn test_objective_is_exact_division() {
    let instance = bounded_instance(0, 100);
    let solution = Solution::from_indices([0, 2], [0]);
    let units = instance.total_units(&solution);
    assert_eq!(units, 9);
    assert_eq!(instance.compute_objective(&solution), 9.0 / 1.0);
}

#[test]
fn test_adding_aisles_never_breaks_feasibility() {
    // Availability only grows with extra aisles, so growing the visited set
    // of a feasible solution must keep it feasible.
    let params = GeneratorParams {
        num_orders: 12,
        num_items: 6,
        num_aisles: 8,
        max_qty: 3,
        wave_size_lb: 0,
        wave_size_ub: 500,
    };
    for seed_byte in 0..10u8 {
        let instance = Instance::generate(&[seed_byte; 32], &params);

        // Grow the visited set until the selection becomes feasible; the
        // generator guarantees all aisles together cover everything.
        let mut solution = Solution::from_indices(0..3, []);
        for aisle in 0..params.num_aisles {
            solution.visited_aisles.insert(aisle);
            if instance.is_feasible(&solution) {
                break;
            }
        }
        assert!(instance.is_feasible(&solution));

        for aisle in 0..params.num_aisles {
            let mut grown = solution.clone();
            grown.visited_aisles.insert(aisle);
            assert!(
                instance.is_feasible(&grown),
                "seed {}: adding aisle {} broke feasibility",
                seed_byte,
                aisle
            );
        }
    }
}
