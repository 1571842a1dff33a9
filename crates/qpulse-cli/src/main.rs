//! qpulse command-line interface
//!
//! Renders pulse sequences described in YAML run files, builds recovery
//! tables for two-qubit randomized benchmarking and solves single
//! recoveries.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use qpulse_cli::commands::{rb_table, recover, render, version};

/// qpulse - pulse sequence compiler and randomized benchmarking
#[derive(Parser)]
#[command(name = "qpulse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a run file into waveforms
    Render {
        /// Run file (YAML)
        #[arg(short, long)]
        config: String,

        /// Output file for the waveforms (JSON)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Build a two-qubit recovery table
    RbTable {
        /// Entangling gate (cz, iswap)
        #[arg(short, long, default_value = "cz")]
        generator: String,

        /// Output file (JSON)
        #[arg(short, long)]
        output: String,
    },

    /// Find the recovery of a list of Clifford indices
    Recover {
        /// Clifford indices, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        cliffords: Vec<usize>,

        /// Entangling gate (cz, iswap)
        #[arg(short, long, default_value = "cz")]
        generator: String,

        /// Recovery table to use instead of searching
        #[arg(short, long)]
        table: Option<String>,

        /// Pick the cheapest recovery
        #[arg(long)]
        cheapest: bool,

        /// Indices are single-qubit Cliffords
        #[arg(long)]
        single: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Render { config, output } => render::execute(&config, output.as_deref()),

        Commands::RbTable { generator, output } => rb_table::execute(&generator, &output),

        Commands::Recover {
            cliffords,
            generator,
            table,
            cheapest,
            single,
        } => recover::execute(&cliffords, &generator, table.as_deref(), cheapest, single),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
