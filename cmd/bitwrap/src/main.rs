//! Bitwrap CLI - fixed-width doubling overflow simulator.
//!
//! Commands:
//! - `bitwrap simulate` - Double a value inside a register and report the overflow
//! - `bitwrap collatz` - Trace a Collatz trajectory inside a register
//! - `bitwrap formula` - Print the piecewise closed form of doubling in a register

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "bitwrap")]
#[command(about = "Fixed-width integer overflow simulator for repeated doubling")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Double a start value inside a register and locate the overflow
    Simulate {
        /// Built-in configuration to start from (long-long or int32)
        #[arg(long)]
        preset: Option<String>,

        /// Path to a YAML or JSON simulation config
        #[arg(short, long, env = "BITWRAP_CONFIG")]
        config: Option<String>,

        /// Register name, e.g. u64, i32, i8, "long long"
        #[arg(short, long)]
        register: Option<String>,

        /// Start value (any size)
        #[arg(short, long, allow_hyphen_values = true)]
        start: Option<String>,

        /// Number of iterations, including the start value
        #[arg(short, long)]
        iterations: Option<usize>,

        /// Output format (text, json, yaml or csv)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Trace the Collatz trajectory of a start value inside a register
    Collatz {
        /// Start value (at least 1)
        start: String,

        /// Register name
        #[arg(short, long, default_value = "long long")]
        register: String,

        /// Maximum number of steps per trajectory
        #[arg(short, long, default_value_t = 10_000)]
        max_steps: usize,

        /// Output format (text, json, yaml or csv)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the piecewise formula for doubling inside a register
    Formula {
        /// Register name
        #[arg(short, long, default_value = "i32")]
        register: String,

        /// Start value
        #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
        start: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Simulate {
            preset,
            config: config_path,
            register,
            start,
            iterations,
            format,
            output,
        } => {
            let overrides = config::Overrides {
                preset,
                config: config_path,
                register,
                start,
                iterations,
            };
            commands::simulate::run(&overrides, &format, output.as_deref())
        }
        Commands::Collatz {
            start,
            register,
            max_steps,
            format,
            output,
        } => commands::collatz::run(&start, &register, max_steps, &format, output.as_deref()),
        Commands::Formula { register, start } => commands::formula::run(&register, &start),
    }
}
