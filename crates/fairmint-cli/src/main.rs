//! Fairmint CLI - seed-driven serial shuffling, metadata allocation and audits.

use clap::{Args, Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod output;

use commands::{allocate, policy, shuffle, verify};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "FAIRMINT_LOG";

#[derive(Parser)]
#[command(name = "fairmint")]
#[command(about = "Provably fair allocation of token serials to rarity tiers and artwork")]
struct Cli {
    /// Log debug output to stderr
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Inputs that fully determine an allocation.
#[derive(Args)]
pub struct AllocationArgs {
    /// Number of tokens minted
    #[arg(long, allow_negative_numbers = true)]
    pub num_nfts_minted: i64,
    /// Public seed (ASCII; lowercased before use)
    #[arg(long)]
    pub random_seed: String,
    /// Directory holding one metadata file per serial
    #[arg(long)]
    pub output_directory: PathBuf,
    /// Base path of the artwork; images are `<base>/<artwork_id>.jpg`
    #[arg(long)]
    pub base_image_path: String,
    /// JSON rarity policy file (default: 1 Legendary, 20 Epic, 500 Rare, rest Common)
    #[arg(long)]
    pub policy: Option<PathBuf>,
    /// Worker threads used to compute digests
    #[arg(long, default_value = "1")]
    pub threads: NonZeroUsize,
}

#[derive(Subcommand)]
enum Commands {
    /// Shuffle serials and write one metadata file per serial
    Allocate {
        #[command(flatten)]
        args: AllocationArgs,
        /// Overwrite existing metadata files
        #[arg(long)]
        force: bool,
        /// Output the tier summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the shuffled order of serials
    Shuffle {
        /// Number of tokens
        #[arg(long, allow_negative_numbers = true)]
        count: i64,
        /// Public seed (ASCII; lowercased before use)
        #[arg(long)]
        seed: String,
        /// Include the digest that ranked each serial
        #[arg(long)]
        digests: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Worker threads used to compute digests
        #[arg(long, default_value = "1")]
        threads: NonZeroUsize,
    },
    /// Re-derive an allocation and check a metadata directory against it
    Verify {
        #[command(flatten)]
        args: AllocationArgs,
        /// Exit with error code if any serial fails verification
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective rarity policy
    Policy {
        /// JSON rarity policy file to validate and print
        #[arg(long)]
        policy: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Allocate { args, force, json } => allocate::run(&args, force, json),
        Commands::Shuffle {
            count,
            seed,
            digests,
            json,
            threads,
        } => shuffle::run(count, &seed, digests, json, threads),
        Commands::Verify { args, strict, json } => verify::run(&args, strict, json),
        Commands::Policy { policy: path } => policy::run(path),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
