use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dicepool::{pools::load_pools, DiceSpec, RandomSource, Results, SeededRandom, ThreadRandom};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Most dice a single CLI roll will allocate for.
const MAX_DICE: i64 = 1_000_000;

#[derive(Copy, Clone, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Cmd {
    /// Roll a dice pool written as notation, e.g. 5d20L2H1
    Roll {
        /// Dice notation: NdS with optional L<n> (drop lowest) and H<n> (drop highest)
        spec: DiceSpec,
        /// RNG seed for determinism (omit for thread randomness)
        #[arg(long)]
        seed: Option<u64>,
        /// Number of rolls
        #[arg(long, default_value_t = 1)]
        times: u32,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Validate notation and print its canonical form and total range
    Check {
        /// Dice notation to check
        spec: DiceSpec,
    },
    /// Roll every pool in a JSON/YAML pool file once, in file order
    Pools {
        /// Path to pool file (.json, .yaml or .yml)
        file: PathBuf,
        /// RNG seed for determinism (omit for thread randomness)
        #[arg(long)]
        seed: Option<u64>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Parser)]
#[command(name = "dicepool")]
#[command(about = "Roll pools of identical dice, dropping the lowest/highest results")]
struct Cli {
    /// Log debug detail to stderr (RUST_LOG is honoured otherwise)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Serialize)]
struct RollLine<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pool: Option<&'a str>,
    spec: String,
    results: &'a Results,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn source_for(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::from_seed(seed)),
        None => Box::new(ThreadRandom),
    }
}

fn ensure_rollable(spec: &DiceSpec) -> Result<()> {
    if spec.count() > MAX_DICE {
        bail!(
            "refusing to roll {}: {} dice exceeds the limit of {}",
            spec,
            spec.count(),
            MAX_DICE
        );
    }
    Ok(())
}

fn print_roll(pool: Option<&str>, spec: &DiceSpec, res: &Results, format: Format) -> Result<()> {
    match format {
        Format::Text => match pool {
            Some(name) => println!("{} {}: {}", name, spec, res),
            None => println!("{}: {}", spec, res),
        },
        Format::Json => {
            let line = RollLine { pool, spec: spec.to_string(), results: res };
            println!("{}", serde_json::to_string(&line)?);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Cmd::Roll { spec, seed, times, format } => {
            ensure_rollable(&spec)?;
            let mut source = source_for(seed);
            for _ in 0..times {
                let res = spec.roll(&mut *source);
                print_roll(None, &spec, &res, format)?;
            }
        }
        Cmd::Check { spec } => {
            println!(
                "{}: keeps {}, total {}..={}",
                spec,
                spec.kept_count(),
                spec.min_total(),
                spec.max_total()
            );
        }
        Cmd::Pools { file, seed, format } => {
            let pools = load_pools(&file)?;
            tracing::debug!(pools = pools.len(), file = %file.display(), "rolling pools");
            for (name, spec) in &pools {
                ensure_rollable(spec).with_context(|| format!("pool '{}'", name))?;
            }
            let mut source = source_for(seed);
            for (name, spec) in &pools {
                let res = spec.roll(&mut *source);
                print_roll(Some(name), spec, &res, format)?;
            }
        }
    }
    Ok(())
}
