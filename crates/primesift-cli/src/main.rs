//! CLI for primesift — sift multiplier primes by hash quality.

mod chart;
mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "primesift")]
#[command(about = "primesift — statistical quality screening for multiply-by-prime hashes")]
#[command(version = primesift_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep candidate primes over key samples and append records to a data file
    Run {
        /// Output data file (flat array of fixed-size binary records)
        #[arg(short, long)]
        output: String,

        /// Directory of key files, keys.len.<L>.bin for L in 1..8
        #[arg(short, long)]
        keys: Option<String>,

        /// Directory of prime files (flat little-endian u64 records)
        #[arg(short, long)]
        primes: String,

        /// Maximum keys tested per length bucket
        #[arg(long, default_value = "10000")]
        max_keys: usize,

        /// Records buffered per append batch
        #[arg(long, default_value = "4096")]
        batch_len: usize,

        /// Worker threads (0 = available parallelism)
        #[arg(long, default_value = "0")]
        threads: usize,

        /// Use N synthetic keys per length instead of --keys
        #[arg(long)]
        synthetic: Option<usize>,

        /// Seed for random synthetic keys; sequential keys when omitted
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Read a data file, filter records by avalanche quality, print charts
    Inspect {
        /// Data file to read
        file: String,

        /// Key lengths whose avalanche summary is tested, comma-separated
        #[arg(long, default_value = "7,8")]
        lens: String,

        /// Accepted avalanche pop.avg range, inclusive (MIN..MAX)
        #[arg(long, default_value = "15..35")]
        ava_pop_avg: String,

        /// Maximum records printed
        #[arg(long, default_value = "100")]
        limit: usize,

        /// Write matching records' summaries as JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Chart a single prime against a key sample without writing output
    Probe {
        /// The multiplier prime to test
        prime: u64,

        /// Directory of key files; synthetic keys when omitted
        #[arg(short, long)]
        keys: Option<String>,

        /// Maximum keys tested per length bucket
        #[arg(long, default_value = "10000")]
        max_keys: usize,

        /// Seed for random synthetic keys; sequential keys when omitted
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            output,
            keys,
            primes,
            max_keys,
            batch_len,
            threads,
            synthetic,
            seed,
        } => commands::run::run(commands::run::RunConfig {
            output: &output,
            keys_dir: keys.as_deref(),
            primes_dir: &primes,
            max_keys,
            batch_len,
            threads,
            synthetic,
            seed,
        }),
        Commands::Inspect {
            file,
            lens,
            ava_pop_avg,
            limit,
            output,
        } => commands::inspect::run(&file, &lens, &ava_pop_avg, limit, output.as_deref()),
        Commands::Probe {
            prime,
            keys,
            max_keys,
            seed,
        } => commands::probe::run(prime, keys.as_deref(), max_keys, seed),
    }
}
