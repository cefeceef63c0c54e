//! Cache simulator CLI.
//!
//! This binary provides a single entry point for all simulation modes. It performs:
//! 1. **Run:** Load a cache configuration, simulate a trace file, and print hit/miss statistics.
//! 2. **Generate:** Write a synthetic mixed-locality trace.
//! 3. **Geometry:** Print the cache shape derived from a configuration.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use cachesim_core::common::constants::TRACE_DEFAULT_COUNT;
use cachesim_core::trace::{self, TraceGenerator};
use cachesim_core::{CacheGeometry, CacheSim, Config, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven set-associative LRU cache simulator",
    long_about = "Simulate a single set-associative cache with LRU replacement over a memory access trace.\n\nConfiguration is read from an INI-style file (CACHE_SIZE_KB / BLOCK_SIZE_BYTES / ASSOCIATIVITY) or a .json file.\nTrace records are one access per line: `R 0x1a000` or `W 0x1a004`.\n\nExamples:\n  cachesim run --config config.ini --trace trace.txt\n  cachesim run --generate 5000 --seed 42\n  cachesim generate -o trace.txt -n 10000\n  cachesim geometry --config config.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a trace against the configured cache.
    Run {
        /// Cache configuration file (INI, or JSON with a .json extension).
        #[arg(short, long, default_value = "config.ini")]
        config: PathBuf,

        /// Access trace to simulate.
        #[arg(short, long, default_value = "trace.txt")]
        trace: PathBuf,

        /// Overwrite the trace with N synthetic records before simulating.
        #[arg(long, value_name = "N", num_args = 0..=1, default_missing_value = TRACE_DEFAULT_COUNT.to_string())]
        generate: Option<usize>,

        /// Seed for --generate.
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Print the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Write a synthetic access trace.
    Generate {
        /// Output trace file.
        #[arg(short, long, default_value = "trace.txt")]
        output: PathBuf,

        /// Number of records.
        #[arg(short = 'n', long, default_value_t = TRACE_DEFAULT_COUNT)]
        count: usize,

        /// Generator seed; the same seed always produces the same trace.
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },

    /// Print the cache geometry derived from a configuration.
    Geometry {
        /// Cache configuration file.
        #[arg(short, long, default_value = "config.ini")]
        config: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            trace,
            generate,
            seed,
            json,
        } => cmd_run(&config, &trace, generate, seed, json),
        Commands::Generate {
            output,
            count,
            seed,
        } => cmd_generate(&output, count, seed, true),
        Commands::Geometry { config } => {
            let (config, geometry) = load_geometry(&config);
            print_config(&config);
            print_geometry(&geometry);
        }
    }
}

/// Loads the configuration and derives its geometry, exiting on any configuration error.
fn load_geometry(path: &Path) -> (Config, CacheGeometry) {
    let config = Config::load(path).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
    let geometry = config.geometry().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
    (config, geometry)
}

/// Writes `count` synthetic records to `output`. Exits with code 1 on I/O failure.
fn cmd_generate(output: &Path, count: usize, seed: u64, announce: bool) {
    let records = TraceGenerator::new(seed).generate(count);
    let file = File::create(output).unwrap_or_else(|e| {
        eprintln!("Error: could not create trace file {}: {e}", output.display());
        process::exit(1);
    });
    if let Err(e) = trace::write_trace(BufWriter::new(file), records) {
        eprintln!("Error: could not write trace file {}: {e}", output.display());
        process::exit(1);
    }
    if announce {
        println!(
            "--- New '{}' generated with {count} accesses ---",
            output.display()
        );
    }
}

/// Runs a full simulation: config load, optional trace generation, trace replay, report.
///
/// A configuration or allocation error aborts before the trace is generated or opened;
/// no partial report is printed.
fn cmd_run(config_path: &Path, trace_path: &Path, generate: Option<usize>, seed: u64, json: bool) {
    let (config, geometry) = load_geometry(config_path);
    let cache = CacheSim::new(geometry).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    if let Some(count) = generate {
        cmd_generate(trace_path, count, seed, !json);
    }
    if !json {
        print_config(&config);
        print_geometry(&geometry);
    }

    let file = File::open(trace_path).unwrap_or_else(|e| {
        eprintln!(
            "Error: could not open trace file {}: {e}",
            trace_path.display()
        );
        process::exit(1);
    });

    let mut sim = Simulator::with_cache(cache);
    if let Err(e) = sim.run_trace(BufReader::new(file)) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    let skipped = sim.stats().skipped_records;
    if skipped > 0 {
        tracing::warn!(skipped, "malformed trace records were skipped");
    }

    let report = sim.report();
    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("\n{report}");
    }
}

fn print_config(config: &Config) {
    println!("--- Configuration ---");
    println!("Cache Size: {} KB", config.cache_size_kb);
    println!("Block Size: {} Bytes", config.block_size_bytes);
    println!("Associativity: {}", config.associativity);
    println!("---------------------");
}

fn print_geometry(geometry: &CacheGeometry) {
    println!("--- Cache Geometry ---");
    println!("Num Sets: {}", geometry.num_sets());
    println!("Offset Bits: {}", geometry.offset_bits());
    println!("Index Bits: {}", geometry.index_bits());
    println!("Tag Bits: {}", geometry.tag_bits());
    println!("----------------------");
}
