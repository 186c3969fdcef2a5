//! # Irminsul CLI
//!
//! Restores withered elemental records with the Viterbi decoder.
//!
//! ## Usage
//!
//! ```bash
//! # Restore a record
//! irminsul restore --withered DEWEPWHWG
//!
//! # Compare against the known pure record
//! irminsul restore --withered DEWEPWHWG --pure DEEEPAHHG
//!
//! # Machine-readable output, including the decoding lattice
//! irminsul restore --withered DEWEPWHWG --lattice --json
//!
//! # The canonical example
//! irminsul demo
//! ```
//!
//! Set `RUST_LOG=irminsul_hmm=debug` to trace decoding on stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use irminsul_core::Summarizable;
use irminsul_hmm::{Lattice, LatticeMode, Restoration, RestoreConfig, Restorer, DEFAULT_MAX_LEN};
use tracing_subscriber::EnvFilter;

/// Pure record of the demo: quicken, aggravate, burning, swirl, vaporize, crystallize.
const DEMO_PURE: &str = "DEEEPAHHG";
/// The same record after the Withering corrupted every other element.
const DEMO_WITHERED: &str = "DEWEPWHWG";

#[derive(Parser)]
#[command(name = "irminsul")]
#[command(version, about = "Restore withered elemental records with a Hidden Markov Model")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Restore a withered record
    Restore {
        /// Withered record: codes P H E C A D G, with W for withered entries
        #[arg(short, long)]
        withered: String,

        /// Known pure record to measure accuracy against
        #[arg(short, long)]
        pure: Option<String>,

        /// Maximum number of codes read from each record (0 = unlimited)
        #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_LEN)]
        max_len: usize,

        /// Include the decoding lattice in the output
        #[arg(long)]
        lattice: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the canonical restoration example
    Demo {
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let restorer = Restorer::elemental().context("building the elemental model")?;

    match cli.command {
        Commands::Restore {
            withered,
            pure,
            max_len,
            lattice,
            json,
        } => {
            let config = RestoreConfig {
                max_len: (max_len > 0).then_some(max_len),
                lattice: if lattice {
                    LatticeMode::Keep
                } else {
                    LatticeMode::Discard
                },
            };
            let restoration = restorer
                .restore(&withered, pure.as_deref(), &config)
                .context("restoring record")?;
            report(&restorer, &restoration, json)?;
        }
        Commands::Demo { json } => {
            let restoration = restorer
                .restore(DEMO_WITHERED, Some(DEMO_PURE), &RestoreConfig::default())
                .context("restoring demo record")?;
            report(&restorer, &restoration, json)?;
        }
    }

    Ok(())
}

fn report(restorer: &Restorer, restoration: &Restoration, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(restoration)?);
        return Ok(());
    }

    if let Some(pure) = &restoration.pure {
        println!("Original: {pure}");
    }
    println!("Withered: {}", restoration.withered);
    println!("Restored: {}", restoration.restored);
    if let Some(accuracy) = &restoration.accuracy {
        println!("{}", accuracy.summary());
    }
    if let Some(lattice) = &restoration.decoded.lattice {
        print_lattice(restorer, restoration, lattice);
    }
    Ok(())
}

/// One row per state, one column per observation; `*` marks the restored path.
fn print_lattice(restorer: &Restorer, restoration: &Restoration, lattice: &Lattice) {
    println!();
    print!("{:>3}", "");
    for &code in &restoration.trellis.observations {
        print!(" {:>9}", code as char);
    }
    println!();
    for (s, label) in restorer.params().labels().iter().enumerate() {
        print!("{label:>3}");
        for t in 0..lattice.n_steps() {
            let mark = if restoration.decoded.path[t] == s { '*' } else { ' ' };
            match lattice.score(t, s) {
                Some(v) if v.is_finite() => print!(" {v:>8.3}{mark}"),
                _ => print!(" {:>8}{mark}", "-inf"),
            }
        }
        println!();
    }
}
