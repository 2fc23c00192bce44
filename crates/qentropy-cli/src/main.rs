//! CLI for qentropy — entanglement entropy from measured bitstrings.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qentropy")]
#[command(about = "qentropy — entanglement entropy from measured bitstrings")]
#[command(version = qentropy_core::VERSION)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Streaming von Neumann entropy estimate, one value per shot.
    Estimate {
        /// Outcome file: one 4-bit symbol per line, or "-" for stdin
        #[arg(long, default_value = "-")]
        input: String,

        /// Treat input as a JSON array of register memories
        #[arg(long)]
        registers: bool,

        /// Correct every step with tensored readout-error mitigation
        #[arg(long)]
        error_correction: bool,

        /// Readout calibration JSON (required with --error-correction)
        #[arg(long)]
        calibration: Option<String>,

        /// Estimator config JSON; flags override its values
        #[arg(long)]
        config: Option<String>,

        /// Write the full sequence as JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Hoeffding confidence bounds on the entangled-outcome proportion.
    Bounds {
        /// Outcome file: one 4-bit symbol per line, or "-" for stdin
        #[arg(long, default_value = "-")]
        input: String,

        /// Treat input as a JSON array of register memories
        #[arg(long)]
        registers: bool,

        /// Error probability δ (coverage is 1 − δ)
        #[arg(long)]
        error_probability: Option<f64>,

        /// Estimator config JSON; flags override its values
        #[arg(long)]
        config: Option<String>,

        /// Write bounds as JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Exact entanglement entropy of a state vector via partial trace.
    Exact {
        /// Path to state JSON (array of [re, im] pairs)
        #[arg(long)]
        state: String,

        /// Dimension of subsystem A
        #[arg(long, default_value = "2")]
        dim_a: usize,

        /// Dimension of subsystem B
        #[arg(long, default_value = "3")]
        dim_b: usize,
    },

    /// Generate random normalized 6-component states and their entropies.
    Random {
        /// Number of states
        #[arg(long, default_value = "5")]
        count: usize,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Write states as JSON
        #[arg(long)]
        output: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Estimate {
            input,
            registers,
            error_correction,
            calibration,
            config,
            output,
        } => commands::estimate::run(commands::estimate::EstimateCommandConfig {
            input: &input,
            registers,
            error_correction,
            calibration_path: calibration.as_deref(),
            config_path: config.as_deref(),
            output_path: output.as_deref(),
        }),
        Commands::Bounds {
            input,
            registers,
            error_probability,
            config,
            output,
        } => commands::bounds::run(
            &input,
            registers,
            error_probability,
            config.as_deref(),
            output.as_deref(),
        ),
        Commands::Exact { state, dim_a, dim_b } => commands::exact::run(&state, dim_a, dim_b),
        Commands::Random {
            count,
            seed,
            output,
        } => commands::random::run(count, seed, output.as_deref()),
    }
}
