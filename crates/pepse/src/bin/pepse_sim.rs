//! # PEPSE Headless Simulation
//!
//! Walks the avatar through the world for a fixed number of ticks and
//! reports what the window did.
//!
//! ## Usage
//!
//! ```bash
//! pepse_sim --seed 120 --ticks 10000 --speed 6.5
//! pepse_sim --config world.toml --ticks 5000 --speed -4
//! ```

use std::process::ExitCode;
use std::time::{Duration, Instant};

use pepse::procedural::{BlockCategory, WorldConfig};
use pepse::Simulation;

fn main() -> ExitCode {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         PEPSE HEADLESS SIMULATION                                ║");
    println!("║         ENDLESS WORLD STREAMING                                  ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    // Parse command line arguments (simple parsing, no external deps)
    let args: Vec<String> = std::env::args().collect();
    let mut seed: Option<i32> = None;
    let mut ticks = 10_000u64;
    let mut speed = 5.0f32;
    let mut respawn_every: Option<u64> = None;
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" | "-s" => {
                if i + 1 < args.len() {
                    seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--ticks" | "-t" => {
                if i + 1 < args.len() {
                    ticks = args[i + 1].parse().unwrap_or(10_000);
                    i += 1;
                }
            }
            "--speed" | "-v" => {
                if i + 1 < args.len() {
                    speed = args[i + 1].parse().unwrap_or(5.0);
                    i += 1;
                }
            }
            "--respawn-every" | "-r" => {
                if i + 1 < args.len() {
                    respawn_every = args[i + 1].parse().ok().filter(|n| *n > 0);
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Usage: pepse_sim [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --seed <SEED>          World seed (default: 120, or from config)");
                println!("  -t, --ticks <NUM>          Ticks to run (default: 10000)");
                println!("  -v, --speed <UNITS>        Avatar x change per tick (default: 5.0)");
                println!("  -r, --respawn-every <NUM>  Respawn the avatar every N ticks");
                println!("  -c, --config <PATH>        TOML world config");
                println!("  -h, --help                 Show this help");
                return ExitCode::SUCCESS;
            }
            other => {
                eprintln!("Ignoring unknown argument: {other}");
            }
        }
        i += 1;
    }

    let mut config = match &config_path {
        Some(path) => match WorldConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => WorldConfig::default(),
    };
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Invalid world config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let spawn = sim.spawn();
    println!("┌─ CONFIGURATION ─────────────────────────────────────────────────┐");
    println!("│ Seed:               {}", config.seed);
    println!("│ Viewport:           {} x {}", config.viewport.width, config.viewport.height);
    println!("│ Grid Unit:          {}", config.terrain.grid_unit);
    println!("│ Ticks:              {ticks}");
    println!("│ Speed:              {speed} units/tick");
    println!("│ Spawn:              ({:.1}, {:.1})", spawn.x, spawn.y);
    println!("│ Target Framerate:   {} Hz", config.simulation.target_framerate);
    println!("└─────────────────────────────────────────────────────────────────┘");
    println!();

    let budget = sim.frame_budget();
    let started = Instant::now();
    let mut slowest = Duration::ZERO;
    let mut over_budget = 0u64;
    let mut peak_blocks = sim.store().len();

    for tick in 1..=ticks {
        let tick_start = Instant::now();

        if respawn_every.is_some_and(|n| tick % n == 0) {
            sim.respawn();
        } else {
            sim.walk(speed);
        }

        let elapsed = tick_start.elapsed();
        slowest = slowest.max(elapsed);
        if elapsed > budget {
            over_budget += 1;
        }
        peak_blocks = peak_blocks.max(sim.store().len());
    }

    let total = started.elapsed();
    let stats = sim.stats();
    let window = sim.window();
    let span = window.materialized_span();
    let store = sim.store();

    println!("┌─ RESULTS ───────────────────────────────────────────────────────┐");
    println!("│ Wall Time:          {total:?}");
    println!("│ Slowest Tick:       {slowest:?} (budget {budget:?})");
    println!("│ Ticks Over Budget:  {over_budget}");
    println!("│ Slides:             {}", stats.slides);
    println!("│ Respawns:           {}", stats.respawns);
    println!("│ Generated Blocks:   {}", stats.generated);
    println!("│ Removed Blocks:     {}", stats.removed);
    println!("│ Avatar:             ({:.1}, {:.1})", sim.avatar().x, sim.avatar().y);
    println!("│ Window Edges:       [{:.1}, {:.1})", window.left_edge(), window.right_edge());
    println!("│ Materialized:       [{}, {}) = {} columns", span.start, span.end, span.len());
    println!("│ Peak Blocks:        {peak_blocks}");
    println!("├─ STORE ─────────────────────────────────────────────────────────┤");
    for category in BlockCategory::ALL {
        println!("│ {:<20}{}", category.name(), store.count(category));
    }
    println!("│ {:<20}{}", "trees", store.tree_anchors().len());
    println!("└─────────────────────────────────────────────────────────────────┘");

    ExitCode::SUCCESS
}
