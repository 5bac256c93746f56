mod common;

use navplan::pathfinding::path_length;
use navplan::{
    ExhaustivePlanner, GopConfig, GopPlanner, MeshConfig, NodeKind, PlanError, PlanGraph,
    RoutePlan,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use common::{init_tracing, museum};

fn walk_cost(graph: &PlanGraph<'_>, plan: &RoutePlan) -> f64 {
    plan.nodes()
        .windows(2)
        .map(|hop| {
            let from = graph.position(hop[0]).unwrap();
            let to = graph.position(hop[1]).unwrap();
            let mut route = vec![from];
            route.extend(graph.route_between(from, to).unwrap());
            path_length(&route) + graph.dwell(hop[1]).unwrap()
        })
        .sum()
}

#[test]
fn test_generous_budget_visits_every_interest() {
    init_tracing();
    let env = museum();
    let mesh = env.build_navmesh(&MeshConfig::default()).unwrap();
    let graph = PlanGraph::build(&env, &mesh).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    let plan = graph
        .build_plan(1000.0, &[1.0, 1.0, 1.0], &GopPlanner::default(), &mut rng)
        .unwrap();
    assert_eq!(graph.node_kind(plan.start().unwrap()), Some(NodeKind::Spawn));
    assert_eq!(graph.node_kind(plan.end().unwrap()), Some(NodeKind::Exit));
    assert_eq!(plan.interior().len(), 4);
    assert!((plan.score() - 3.8).abs() < 1e-9);
    assert!(plan.distance() <= 1000.0);
}

#[test]
fn test_interests_pick_the_pois() {
    let env = museum();
    let mesh = env.build_navmesh(&MeshConfig::default()).unwrap();
    let graph = PlanGraph::build(&env, &mesh).unwrap();
    let mut rng = StdRng::seed_from_u64(2);

    // fresco and sculpture are the only art POIs
    let plan = graph
        .build_plan(1000.0, &[1.0, 0.0, 0.0], &GopPlanner::default(), &mut rng)
        .unwrap();
    let poi_start = graph.poi_range().start;
    let mut visited: Vec<usize> = plan.interior().iter().map(|n| n - poi_start).collect();
    visited.sort_unstable();
    assert_eq!(visited, vec![0, 1]);
    assert!((plan.score() - 1.8).abs() < 1e-9);
}

#[test]
fn test_short_budget_goes_straight_out() {
    let env = museum();
    let mesh = env.build_navmesh(&MeshConfig::default()).unwrap();
    let graph = PlanGraph::build(&env, &mesh).unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    let plan = graph
        .build_plan(100.0, &[1.0, 1.0, 1.0], &GopPlanner::default(), &mut rng)
        .unwrap();
    assert!(plan.is_direct());
    assert_eq!(plan.score(), 0.0);
    assert!(plan.distance() > 100.0);
}

#[test]
fn test_plans_match_the_walked_routes() {
    let env = museum();
    let mesh = env.build_navmesh(&MeshConfig::default()).unwrap();
    let graph = PlanGraph::build(&env, &mesh).unwrap();
    let planner = GopPlanner::new(GopConfig::new(4, 100));
    let mut rng = StdRng::seed_from_u64(4);

    for _ in 0..20 {
        let budget = rng.gen_range(150.0..600.0);
        let interests: Vec<f64> = (0..3).map(|_| rng.gen_range(0.0..1.0)).collect();
        let plan = graph.build_plan(budget, &interests, &planner, &mut rng).unwrap();
        if !plan.is_direct() {
            assert!(plan.distance() <= budget);
        }
        assert!((walk_cost(&graph, &plan) - plan.distance()).abs() < 1e-6);
    }
}

#[test]
fn test_heuristic_stays_below_the_optimum() {
    let env = museum();
    let mesh = env.build_navmesh(&MeshConfig::default()).unwrap();
    let graph = PlanGraph::build(&env, &mesh).unwrap();
    let planner = GopPlanner::new(GopConfig::new(4, 50));

    for seed in 0..10 {
        let budget = 200.0 + 40.0 * seed as f64;
        // identical seeds give both planners the same start and end
        let gop = graph
            .build_plan(budget, &[1.0, 0.5, 0.2], &planner, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let exact = graph
            .build_plan(budget, &[1.0, 0.5, 0.2], &ExhaustivePlanner, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        assert_eq!(gop.start(), exact.start());
        assert_eq!(gop.end(), exact.end());
        assert!(gop.score() <= exact.score() + 1e-9);
    }
}

#[test]
fn test_interest_vector_must_match_topics() {
    let env = museum();
    let mesh = env.build_navmesh(&MeshConfig::default()).unwrap();
    let graph = PlanGraph::build(&env, &mesh).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        graph.build_plan(300.0, &[1.0], &GopPlanner::default(), &mut rng),
        Err(PlanError::InterestLengthMismatch {
            expected: 3,
            found: 1
        })
    );
}
