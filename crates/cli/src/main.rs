//! Cache hierarchy simulator CLI.
//!
//! This binary provides the single entry point for the simulator. It
//! performs:
//! 1. **Interactive run:** Read `ld`/`st`/`show` commands from stdin.
//! 2. **Replay run:** Execute commands from a test file (`--test`).
//! 3. **Configuration:** Built-in two-level defaults, or a JSON hierarchy
//!    description (`--config`).

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::{fs, process};

use cachesim_core::config::{HierarchyConfig, MemoryInitMode, TraceLevel};
use cachesim_core::sim;
use cachesim_core::Hierarchy;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven multi-level cache hierarchy simulator",
    long_about = "Feed ld/st/show commands to a configurable multi-level set-associative \
cache hierarchy backed by flat memory.\n\nExamples:\n  cachesim\n  cachesim -t 2 -i 1\n  \
cachesim --test traces/basic.txt\n  cachesim --config machines/two_level.json"
)]
struct Cli {
    /// Trace level (0=none, 1=basic, 2=full).
    #[arg(short, long, default_value_t = 0)]
    trace: u8,

    /// Memory init mode (0=zeros, 1=addresses).
    #[arg(short, long, default_value_t = 0)]
    init: u8,

    /// Replay commands from a file instead of stdin.
    #[arg(long)]
    test: Option<PathBuf>,

    /// JSON hierarchy configuration file (defaults to the built-in
    /// two-level machine).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => load_config(path),
        None => HierarchyConfig::default(),
    };
    config.trace = TraceLevel::from_level(cli.trace);
    config.init = MemoryInitMode::from_mode(cli.init);

    let mut hierarchy = match Hierarchy::new(&config) {
        Ok(hierarchy) => hierarchy,
        Err(e) => {
            eprintln!("configuration error: {e}");
            process::exit(1);
        }
    };

    for (i, level) in config.levels.iter().enumerate() {
        println!(
            "L{}: {} B, {} B blocks, {}-way, {:?}, {:?}, {:?}",
            i + 1,
            level.size_bytes,
            level.block_bytes,
            level.ways,
            level.write_policy,
            level.alloc_policy,
            level.policy
        );
    }

    let run_result = if let Some(ref path) = cli.test {
        sim::run_file(&mut hierarchy, path)
    } else {
        println!("Enter commands (ld <size> <addr> | st <size> <addr> <val1> <val2> ...) | show:");
        sim::run(&mut hierarchy, io::stdin().lock(), false)
    };

    if let Err(e) = run_result {
        eprintln!("error: {e}");
        process::exit(1);
    }

    if config.trace != TraceLevel::None {
        hierarchy.stats().print();
    }
}

/// Loads and parses a JSON hierarchy configuration; exits with code 1 on
/// failure.
fn load_config(path: &PathBuf) -> HierarchyConfig {
    let contents = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error reading config {}: {e}", path.display());
        process::exit(1);
    });
    serde_json::from_str(&contents).unwrap_or_else(|e| {
        eprintln!("error parsing config {}: {e}", path.display());
        process::exit(1);
    })
}
