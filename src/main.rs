use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{LevelFilter, error, info};

use fitwatch::config;
use fitwatch::logging;
use fitwatch::sensors::{self, parse_sensor_spec};
use fitwatch::vm::{self, Registers, RunConfig};

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "FitWatch VM - Execute fitness routine assembly programs",
    after_help = "Examples:\n  \
        fitwatch demos/routine.fasm\n  \
        fitwatch demos/routine.fasm --sensor ENERGY_LEVEL=8 --sensor HEART_RATE=120\n  \
        fitwatch demos/routine.fasm --debug\n  \
        fitwatch demos/routine.fasm --output routine.json"
)]
struct Args {
    /// FitWatch assembly program file (.fasm)
    program: PathBuf,

    /// Set a sensor value (format: NAME=VALUE). Defaults are used when none are given.
    #[arg(long = "sensor", value_name = "NAME=VALUE", value_parser = parse_sensor_spec)]
    sensors: Vec<(String, i64)>,

    /// Output JSON file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Name of the routine
    #[arg(long, default_value = config::DEFAULT_ROUTINE_NAME)]
    routine_name: String,

    /// Stop with an error after this many executed instructions
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Enable debug output (same as --log-level debug)
    #[arg(long)]
    debug: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Debug filter to specify log topics (e.g., "loader,vm,instructions,sensors")
    #[arg(long)]
    debug_filter: Option<String>,
}

fn main() {
    let args = Args::parse();

    let log_level = match logging::parse_level(&args.log_level) {
        level if args.debug && level < LevelFilter::Debug => LevelFilter::Debug,
        level => level,
    };
    if let Err(e) = logging::init_logger(log_level, args.debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    let sensors = sensors::sensors_from_specs(args.sensors);

    let program = match vm::load_program(&args.program) {
        Ok(program) => program,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };
    info!(
        "Loaded {} instructions from {}",
        program.len(),
        args.program.display()
    );

    let run_config = RunConfig {
        max_cycles: args.max_cycles,
    };
    let outcome = match vm::run(&program, Registers::new(), &sensors, run_config) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };
    info!(
        "Program completed in {} cycles with {} exercises",
        outcome.cycle_count,
        outcome.exercises.len()
    );

    let routine = outcome.into_routine(args.routine_name);
    let json = match routine.to_json() {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize routine: {}", e);
            process::exit(1);
        }
    };

    match args.output {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                error!("Failed to write {}: {}", path.display(), e);
                process::exit(1);
            }
            println!("Routine exported to {}", path.display());
        }
        None => {
            let rule = "=".repeat(50);
            println!("\n{}\nROUTINE OUTPUT\n{}\n{}", rule, rule, json);
        }
    }
}
