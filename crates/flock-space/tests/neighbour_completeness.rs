//! The grid's 27-cell query, filtered by distance, must find exactly
//! the neighbours an exhaustive scan finds.

use flock_core::{Bounds, Vec3};
use flock_space::{BruteForceIndex, GridSpec, NeighbourIndex, SpatialGrid};
use flock_test_utils::{brute_force_neighbours, messages_of, random_population};
use proptest::prelude::*;

fn grid_neighbours(
    index: &dyn NeighbourIndex,
    messages: &[flock_core::SpatialMessage],
    point: Vec3,
    radius: f64,
) -> Vec<usize> {
    let r2 = radius * radius;
    let mut out = Vec::new();
    index.for_each_candidate(point, &mut |j| {
        let d2 = point.distance_squared(messages[j].position);
        if d2 > 0.0 && d2 < r2 {
            out.push(j);
        }
    });
    out.sort_unstable();
    out
}

#[test]
fn thousand_agents_match_brute_force() {
    let bounds = Bounds::cube(-100.0, 100.0);
    let agents = random_population(1000, bounds, 42);
    let messages = messages_of(&agents);
    let grid = SpatialGrid::build(GridSpec::new(bounds.min, 10.0).unwrap(), &messages).unwrap();

    for agent in &agents {
        let expected = brute_force_neighbours(&messages, agent.position, 10.0);
        assert_eq!(grid_neighbours(&grid, &messages, agent.position, 10.0), expected);
    }
}

#[test]
fn brute_force_index_agrees_with_grid() {
    let bounds = Bounds::cube(-20.0, 20.0);
    let agents = random_population(300, bounds, 9);
    let messages = messages_of(&agents);
    let grid = SpatialGrid::build(GridSpec::new(bounds.min, 4.0).unwrap(), &messages).unwrap();
    let mut brute = BruteForceIndex::new();
    brute.rebuild(&messages).unwrap();

    for agent in &agents {
        assert_eq!(
            grid_neighbours(&grid, &messages, agent.position, 4.0),
            grid_neighbours(&brute, &messages, agent.position, 4.0),
        );
    }
}

#[test]
fn grid_origin_need_not_match_bounds() {
    // The message grid may cover a smaller region than the agents roam.
    let bounds = Bounds::cube(-100.0, 100.0);
    let agents = random_population(400, bounds, 5);
    let messages = messages_of(&agents);
    let grid = SpatialGrid::build(GridSpec::new(Vec3::splat(-20.0), 10.0).unwrap(), &messages).unwrap();

    for agent in &agents {
        assert_eq!(
            grid_neighbours(&grid, &messages, agent.position, 10.0),
            brute_force_neighbours(&messages, agent.position, 10.0),
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn completeness_for_any_radius_up_to_cell_size(
        count in 0usize..150,
        seed in any::<u64>(),
        cell_size in 1.0f64..30.0,
        radius_frac in 0.0f64..=1.0,
        ox in -10.0f64..10.0, oy in -10.0f64..10.0, oz in -10.0f64..10.0,
    ) {
        let bounds = Bounds::cube(-50.0, 50.0);
        let agents = random_population(count, bounds, seed);
        let messages = messages_of(&agents);
        let radius = cell_size * radius_frac;
        let spec = GridSpec::new(bounds.min + Vec3::new(ox, oy, oz), cell_size).unwrap();
        let grid = SpatialGrid::build(spec, &messages).unwrap();

        for agent in &agents {
            prop_assert_eq!(
                grid_neighbours(&grid, &messages, agent.position, radius),
                brute_force_neighbours(&messages, agent.position, radius)
            );
        }
    }
}
