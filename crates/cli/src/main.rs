//! Cache simulator CLI.
//!
//! This binary drives a cache instance from a plain-text request trace. It performs:
//! 1. **Configuration:** Built-in defaults, an optional JSON config file, and
//!    flag overrides for organization and shape.
//! 2. **Trace run:** One `load`/`store` request per line, fed through the cache
//!    in order.
//! 3. **Reporting:** The hit/miss statistics report on completion.

use clap::{Parser, Subcommand};
use std::{fs, process};

use cachesim_core::config::{Config, Organization};
use cachesim_core::{Cache, MainMemory};

mod trace;

use trace::Request;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Word-granularity write-back cache simulator",
    long_about = "Drive a simulated cache from a request trace.\n\nThe trace is plain text, one request per line:\n  load 0x40\n  store 0x44 7\n\nExamples:\n  cachesim run -t traces/sweep.txt\n  cachesim run -t trace.txt --organization set-associative --sets 4 --ways 2\n  cachesim run -t trace.txt -c config.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a request trace through a cache and print statistics.
    Run {
        /// Trace file (one `load <addr>` / `store <addr> <value>` per line).
        #[arg(short, long)]
        trace: String,

        /// JSON configuration file (built-in defaults when omitted).
        #[arg(short, long)]
        config: Option<String>,

        /// Organization override: direct-mapped, set-associative, fully-associative.
        #[arg(long)]
        organization: Option<String>,

        /// Override the number of sets.
        #[arg(long)]
        sets: Option<usize>,

        /// Override the number of ways per set.
        #[arg(long)]
        ways: Option<usize>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            trace,
            config,
            organization,
            sets,
            ways,
        } => cmd_run(&trace, config, organization, sets, ways),
    }
}

/// Runs the trace: builds the cache from config plus overrides, feeds every
/// request through it, and prints the statistics report.
///
/// Exits with code 1 on unreadable input, invalid configuration, or a
/// contract violation (e.g. a misaligned address) in the trace.
fn cmd_run(
    trace_path: &str,
    config_path: Option<String>,
    organization: Option<String>,
    sets: Option<usize>,
    ways: Option<usize>,
) {
    let mut config = config_path.map_or_else(Config::default, |path| load_config(&path));
    if let Some(org) = organization {
        config.cache.organization = parse_organization(&org);
    }
    if let Some(sets) = sets {
        config.cache.num_sets = sets;
    }
    if let Some(ways) = ways {
        config.cache.num_ways = ways;
    }

    let memory = MainMemory::new(&config.memory).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
    let mut cache = Cache::new(&config.cache, &config.memory, Box::new(memory)).unwrap_or_else(
        |e| {
            eprintln!("Error: {e}");
            process::exit(1);
        },
    );

    println!(
        "Configuration: {:?}, {} set(s) x {} way(s), {}-byte blocks",
        config.cache.organization,
        cache.num_sets(),
        cache.num_ways(),
        config.memory.block_bytes
    );

    let contents = fs::read_to_string(trace_path).unwrap_or_else(|e| {
        eprintln!("Error reading trace {trace_path}: {e}");
        process::exit(1);
    });
    let requests = trace::parse(&contents).unwrap_or_else(|e| {
        eprintln!("Error in trace {trace_path}: {e}");
        process::exit(1);
    });

    for request in requests {
        let outcome = match request {
            Request::Load { addr } => cache.load_word(addr).map(|_| ()),
            Request::Store { addr, data } => cache.store_word(addr, data),
        };
        if let Err(e) = outcome {
            eprintln!("\n[!] FATAL: {e}");
            cache.stats().print();
            process::exit(1);
        }
    }

    cache.stats().print();
}

/// Loads and deserializes a JSON configuration file, exiting on failure.
fn load_config(path: &str) -> Config {
    let contents = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config {path}: {e}");
        process::exit(1);
    });
    serde_json::from_str(&contents).unwrap_or_else(|e| {
        eprintln!("Error parsing config {path}: {e}");
        process::exit(1);
    })
}

/// Maps an `--organization` flag value onto [`Organization`], exiting on an
/// unknown name.
fn parse_organization(name: &str) -> Organization {
    match name.to_ascii_lowercase().as_str() {
        "direct-mapped" | "direct" | "dm" => Organization::DirectMapped,
        "set-associative" | "set-assoc" | "sa" => Organization::SetAssociative,
        "fully-associative" | "fully-assoc" | "fa" => Organization::FullyAssociative,
        other => {
            eprintln!("Error: unknown organization `{other}`");
            eprintln!("  expected: direct-mapped, set-associative, fully-associative");
            process::exit(1);
        }
    }
}
