mod common;

use navplan::geometry::segments_intersect;
use navplan::pathfinding::path_length;
use navplan::{CornerSmoothing, MeshConfig, NavMesh, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use common::{init_tracing, museum};

fn crosses_obstacle(path: &[Point], obstacles: &[navplan::Polygon]) -> bool {
    path.windows(2).any(|seg| {
        obstacles.iter().any(|o| {
            let pts = o.points();
            (0..pts.len()).any(|k| {
                segments_intersect(&seg[0], &seg[1], &pts[k], &pts[(k + 1) % pts.len()])
            })
        })
    })
}

#[test]
fn test_mesh_covers_the_hall_once() {
    init_tracing();
    let env = museum();
    let mesh = env.build_navmesh(&MeshConfig::raw()).unwrap();
    // 120 * 80 minus the wall and the bench
    assert!((mesh.area() - (9600.0 - 500.0 - 200.0)).abs() < 1e-6);
    assert_eq!(mesh.component_count(), 1);
    assert!(mesh.corridors().iter().all(|c| c.is_convex() && c.is_ccw()));
}

#[test]
fn test_inflation_shrinks_the_walkable_area() {
    let env = museum();
    let raw = env.build_navmesh(&MeshConfig::raw()).unwrap();
    let inflated = env.build_navmesh(&MeshConfig::default()).unwrap();
    assert!(inflated.area() < raw.area());
    assert_eq!(inflated.component_count(), 1);
}

#[test]
fn test_route_goes_around_the_wall() {
    init_tracing();
    let env = museum();
    let mesh = env.build_navmesh(&MeshConfig::default()).unwrap();
    let start = Point::new(5.0, 5.0);
    let end = Point::new(115.0, 5.0);

    let path = mesh.route(start, end, env.agent_path_width).unwrap();
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&end));
    assert!(path.len() > 2);
    assert!(path_length(&path) > 130.0);
    assert!(!crosses_obstacle(&path, env.obstacles()));
}

#[test]
fn test_every_smoothing_mode_connects_the_hall() {
    let env = museum();
    let start = Point::new(5.0, 5.0);
    let end = Point::new(115.0, 5.0);
    for smoothing in [CornerSmoothing::None, CornerSmoothing::PolyOffset, CornerSmoothing::Portal] {
        for triangulate in [false, true] {
            let config = MeshConfig::default()
                .with_smoothing(smoothing)
                .with_triangulation(triangulate);
            let mesh = env.build_navmesh(&config).unwrap();
            let path = mesh.route(start, end, env.agent_path_width);
            assert!(path.is_some(), "{smoothing:?} triangulate={triangulate}");
            let length = path_length(&path.unwrap());
            assert!(length >= start.distance_to(&end));
        }
    }
}

#[test]
fn test_random_routes_avoid_obstacles() {
    let env = museum();
    let mesh = env.build_navmesh(&MeshConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(31);
    let free = |p: &Point| mesh.corridors().iter().any(|c| c.contains(p));

    let mut checked = 0;
    while checked < 100 {
        let a = Point::new(rng.gen_range(0.0..120.0), rng.gen_range(0.0..80.0));
        let b = Point::new(rng.gen_range(0.0..120.0), rng.gen_range(0.0..80.0));
        if !free(&a) || !free(&b) {
            continue;
        }
        let path = mesh.route(a, b, 0.0).unwrap();
        assert!(path_length(&path) + 1e-9 >= a.distance_to(&b));
        assert!(!crosses_obstacle(&path, env.obstacles()), "{a} -> {b}");
        checked += 1;
    }
}

#[test]
fn test_regions_from_an_external_decomposition() {
    // Two squares sharing the edge x = 10
    let left = vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ];
    let right = vec![
        Point::new(10.0, 0.0),
        Point::new(20.0, 0.0),
        Point::new(20.0, 10.0),
        Point::new(10.0, 10.0),
    ];
    let mesh = NavMesh::from_regions(vec![left, right], &MeshConfig::raw()).unwrap();
    assert_eq!(mesh.portal_count(), 2);
    let path = mesh
        .route(Point::new(2.0, 5.0), Point::new(18.0, 5.0), 3.0)
        .unwrap();
    assert!((path_length(&path) - 16.0).abs() < 1e-9);
}
