//! Cellular GA CLI - Run evolutions from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::path::PathBuf;
use std::time::Instant;

use cellular_ga::{
    compute::{EvolutionEngine, PopulationStats, TerminationReason},
    schema::RunConfig,
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json>", args[0]);
        eprintln!();
        eprintln!("Evolve a colored toroidal grid with a cellular genetic algorithm.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to run configuration file");
        eprintln!();
        eprintln!("Print an example configuration with --example.");
        std::process::exit(1);
    }

    let config_path = PathBuf::from(&args[1]);
    let config = RunConfig::from_json_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    });

    let seed = config.seed.unwrap_or_else(rand::random);
    let grid = config.grid;

    println!("Cellular GA");
    println!("===========");
    println!("Grid: {}x{}", grid.rows, grid.cols);
    println!("Neighborhood: {}", grid.topology);
    println!("Merge policy: {}", grid.merge);
    println!("Execution: {}", config.execution);
    println!("Generations: {}", config.max_generations);
    println!("Seed: {}", seed);
    println!();

    let mut engine = EvolutionEngine::with_seed(grid, seed).unwrap_or_else(|e| {
        eprintln!("Error creating engine: {}", e);
        std::process::exit(1);
    });
    if let Err(e) = engine.initialize_with(&config.pattern) {
        eprintln!("Error initializing population: {}", e);
        std::process::exit(1);
    }

    print_stats("Initial population", engine.score(), &engine.stats());

    let start = Instant::now();
    let result = engine.run_with_callback(config.max_generations, config.execution, |report| {
        println!(
            "  Generation {}/{}: score={:.6}, {:.3} ms",
            report.generation,
            config.max_generations,
            report.score,
            report.elapsed.as_secs_f64() * 1e3
        );
    });
    let elapsed = start.elapsed();

    let reason = result.unwrap_or_else(|e| {
        eprintln!("Evolution failed: {}", e);
        std::process::exit(1);
    });

    println!();
    match reason {
        TerminationReason::Converged => println!("Target objective was reached."),
        TerminationReason::Exhausted => println!("Generation budget exhausted."),
    }
    print_stats("Final population", engine.score(), &engine.stats());
    println!(
        "Time: {:.2}s ({:.1} generations/s)",
        elapsed.as_secs_f32(),
        engine.generation() as f32 / elapsed.as_secs_f32().max(f32::EPSILON)
    );
}

fn print_stats(title: &str, score: f64, stats: &PopulationStats) {
    println!("{}:", title);
    println!("  Score: {:.6}", score);
    println!(
        "  Fitness: min={}, max={}, mean={:.2}",
        stats.min_fitness, stats.max_fitness, stats.mean_fitness
    );
    println!("  Saturated cells: {}", stats.saturated_cells);
    println!();
}

fn print_example_config() {
    let config = RunConfig {
        seed: Some(42),
        ..Default::default()
    };
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing example config: {}", e);
            std::process::exit(1);
        }
    }
}
