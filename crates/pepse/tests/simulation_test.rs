//! # Simulation Integration Test
//!
//! Drives a whole simulation the way the headless binary does.

use pepse::procedural::{BlockCategory, WorldConfig};
use pepse::Simulation;

/// Test: A long walk keeps ground under the avatar the whole way.
#[test]
fn test_long_walk_has_ground_everywhere() {
    let mut sim = Simulation::new(WorldConfig::default()).unwrap();

    for tick in 0..10_000 {
        sim.walk(7.0);
        if tick % 50 == 0 {
            let avatar = sim.avatar();
            #[allow(clippy::cast_possible_truncation)]
            let column = (avatar.x.floor() as i32).div_euclid(30) * 30;
            assert!(
                sim.store().column_height(column).is_some(),
                "VOID under avatar at x={}",
                avatar.x
            );
        }
    }

    let stats = sim.stats();
    println!("{stats:?}");
    assert_eq!(stats.ticks, 10_000);
    assert!(stats.slides >= 150);
}

/// Test: Walking left then respawning returns the original world.
#[test]
fn test_respawn_round_trip() {
    let mut sim = Simulation::new(WorldConfig::default().with_seed(7)).unwrap();
    let ground = sim.store().ground_columns();
    let trees = sim.store().tree_anchors();

    for _ in 0..2_000 {
        sim.walk(-9.0);
    }
    sim.respawn();

    assert_eq!(sim.store().ground_columns(), ground);
    assert_eq!(sim.store().tree_anchors(), trees);
}

/// Test: A config file drives the whole simulation.
#[test]
fn test_simulation_from_toml() {
    let config = WorldConfig::from_toml_str(
        r"
        seed = 3

        [viewport]
        width = 600.0

        [trees]
        chance_denominator = 4
        ",
    )
    .unwrap();

    let mut sim = Simulation::new(config).unwrap();
    assert_eq!(sim.spawn().x, 300.0);
    for _ in 0..500 {
        sim.walk(11.0);
    }

    let store = sim.store();
    let span = sim.window().materialized_span();
    assert_eq!(store.ground_columns().len(), span.len());
    assert!(store.count(BlockCategory::Trunk) > 0);
}
