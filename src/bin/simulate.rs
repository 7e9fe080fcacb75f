//! Dino Run balance simulator CLI.
//!
//! Plays runs with a scripted autopilot to check pacing and the obstacle mix.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                 # Default: 100 runs
//!   cargo run --bin simulate -- -n 500       # 500 runs
//!   cargo run --bin simulate -- --seed 42    # Reproducible run

use dinorun::simulator::{run_simulation, SimConfig};
use dinorun::GameConfig;
use std::env;
use std::path::PathBuf;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let (mut config, config_path) = parse_args(&args);

    config.game = match GameConfig::resolve(config_path.as_deref()) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if config.verbosity >= 1 {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║               DINO RUN BALANCE SIMULATOR                      ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        println!("  Max Frames:     {}", config.max_frames_per_run);
        println!("  Frame Time:     {:.2}ms", config.frame_ms);
        println!("  Fumble Chance:  {:.1}%", config.fumble_chance * 100.0);
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write JSON report: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> (SimConfig, Option<PathBuf>) {
    let mut config = SimConfig::default();
    let mut config_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-f" | "--frames" => {
                if i + 1 < args.len() {
                    config.max_frames_per_run = args[i + 1].parse().unwrap_or(36_000);
                    i += 1;
                }
            }
            "--fumble" => {
                if i + 1 < args.len() {
                    config.fumble_chance = args[i + 1]
                        .parse::<f64>()
                        .ok()
                        .filter(|p| p.is_finite())
                        .unwrap_or(0.02);
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    (config, config_path)
}

fn print_help() {
    println!("Dino Run Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of runs (default: 100)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -f, --frames <F>    Max frames per run (default: 36,000)");
    println!("    --fumble <P>        Chance the autopilot ignores an obstacle (default: 0.02)");
    println!("    -c, --config <P>    Game config JSON (default: ~/.dinorun/config.json)");
    println!("    -q, --quiet         Only print the report");
    println!("    -v, --verbose       Print every run");
    println!("    --json              Save JSON report");
    println!("    -h, --help          Show this help");
    println!();
    println!("Set RUST_LOG=debug for spawn and collision logs.");
}
