//! Command line driver for search and sorting sweeps.
//!
//! ```bash
//! # Binary search over a sorted dictionary, N = 1000, 2000, ..., 10000:
//! dictbench search --method bin --order sorted --min 1000 --max 10000 --incr 1000 \
//!     --n-times 1 -o bin_sorted.txt
//!
//! # Self-organizing search under a skewed workload, reproducible:
//! dictbench search --method lin-auto --generator potential --order unsorted \
//!     --min 100 --max 2000 --incr 100 --n-times 10 --seed 7 -o auto.txt
//!
//! # Insertion sort over 100 permutations per size:
//! dictbench sort --min 10 --max 1000 --incr 10 --n-perms 100 -o sort.txt
//! ```
//!
//! Logging is controlled with `RUST_LOG` (tracing-subscriber `EnvFilter`);
//! the default is `warn,dictbench=info`. Use `RUST_LOG=dictbench=debug` to
//! see every measured size.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use dictbench::{
    generate_search_times, generate_sorting_times, insertion_sort, Generator, Method, Order, SearchConfig,
    SizeSweep, SortConfig,
};

#[derive(Parser, Debug)]
#[command(name = "dictbench")]
#[command(about = "Measure comparison counts and lookup times of array search strategies")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Time lookups in a dictionary of growing size.
    Search(SearchArgs),
    /// Time insertion sort over random permutations of growing size.
    Sort(SortArgs),
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// Smallest problem size.
    #[arg(long, env = "DICTBENCH_MIN")]
    min: usize,

    /// Largest problem size.
    #[arg(long, env = "DICTBENCH_MAX")]
    max: usize,

    /// Step between sizes (a multiplier with --geometric).
    #[arg(long, default_value_t = 1, env = "DICTBENCH_INCR")]
    incr: usize,

    /// Multiply the size by --incr instead of adding it.
    #[arg(long)]
    geometric: bool,

    /// Output table path.
    #[arg(short, long, env = "DICTBENCH_OUTPUT")]
    output: PathBuf,

    /// Seed for reproducible runs. Fresh entropy when omitted.
    #[arg(long, env = "DICTBENCH_SEED")]
    seed: Option<u64>,
}

impl SweepArgs {
    fn sweep(&self) -> SizeSweep {
        if self.geometric {
            SizeSweep::geometric(self.min, self.max, self.incr)
        } else {
            SizeSweep::arithmetic(self.min, self.max, self.incr)
        }
    }
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Search strategy: bin, lin or lin-auto.
    #[arg(long, default_value = "bin")]
    method: Method,

    /// Key generator: uniform or potential.
    #[arg(long, default_value = "uniform")]
    generator: Generator,

    /// Dictionary order mode: sorted or unsorted.
    #[arg(long, default_value = "sorted")]
    order: Order,

    /// Lookups per stored key.
    #[arg(long, default_value_t = 1)]
    n_times: usize,

    #[command(flatten)]
    sweep: SweepArgs,
}

#[derive(Args, Debug)]
struct SortArgs {
    /// Permutations sorted per size.
    #[arg(long, default_value_t = 1)]
    n_perms: usize,

    #[command(flatten)]
    sweep: SweepArgs,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,dictbench=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Search(args) => {
            if args.method.requires_sorted() && args.order == Order::Unsorted {
                tracing::warn!(method = %args.method, "strategy expects a sorted dictionary; positions will be unreliable");
            }
            let config = SearchConfig {
                method: args.method,
                generator: args.generator,
                order: args.order,
                output: args.sweep.output.clone(),
                sweep: args.sweep.sweep(),
                n_times: args.n_times,
                seed: args.sweep.seed,
            };
            let records = generate_search_times(&config, &mut config.rng())
                .with_context(|| format!("search sweep into {}", config.output.display()))?;
            println!("{} sizes written to {}", records.len(), config.output.display());
        }
        Command::Sort(args) => {
            let config = SortConfig {
                output: args.sweep.output.clone(),
                sweep: args.sweep.sweep(),
                n_perms: args.n_perms,
                seed: args.sweep.seed,
            };
            let records = generate_sorting_times(insertion_sort, &config, &mut config.rng())
                .with_context(|| format!("sorting sweep into {}", config.output.display()))?;
            println!("{} sizes written to {}", records.len(), config.output.display());
        }
    }

    Ok(())
}
