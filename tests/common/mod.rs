#![allow(dead_code)]

use navplan::{Environment, Polygon, Rect};
use qtty::Quantity;

/// Installs a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn block(x: f64, y: f64, w: f64, h: f64) -> Polygon {
    Polygon::new(Rect::new(x, y, w, h).to_ccw_ring())
}

/// 120x80 hall split by a wall rising from the bottom edge, with a bench
/// in the upper left. Spawn bottom left, exit bottom right.
///
/// POIs: 0 fresco, 1 sculpture, 2 cafe, 3 library.
/// Topics: art, food, books.
pub fn museum() -> Environment {
    let mut env = Environment::new(120.0, 80.0);
    env.add_obstacle(block(55.0, 0.0, 10.0, 50.0));
    env.add_obstacle(block(25.0, 55.0, 20.0, 10.0));

    env.add_spawn(1.0, Rect::new(2.0, 2.0, 6.0, 6.0));
    env.add_exit(1.0, Rect::new(112.0, 2.0, 6.0, 6.0));

    for topic in ["art", "food", "books"] {
        env.add_topic(topic);
    }
    let fresco = env.add_poi("fresco", 0, Quantity::new(30.0), Rect::new(10.0, 30.0, 4.0, 4.0));
    let sculpture = env.add_poi("sculpture", 0, Quantity::new(20.0), Rect::new(80.0, 60.0, 4.0, 4.0));
    let cafe = env.add_poi("cafe", 1, Quantity::new(15.0), Rect::new(100.0, 30.0, 4.0, 4.0));
    let library = env.add_poi("library", 2, Quantity::new(25.0), Rect::new(30.0, 70.0, 4.0, 4.0));

    env.set_relevance(fresco, vec![1.0, 0.0, 0.0]).unwrap();
    env.set_relevance(sculpture, vec![0.8, 0.0, 0.0]).unwrap();
    env.set_relevance(cafe, vec![0.0, 1.0, 0.0]).unwrap();
    env.set_relevance(library, vec![0.0, 0.0, 1.0]).unwrap();
    env
}
