//! hamming74: encode, corrupt and repair files with a Hamming(7,4) code.
//!
//! ```text
//! hamming74 encode report.pdf report.ham
//! hamming74 inject report.ham noisy.ham --seed 42
//! hamming74 decode noisy.ham recovered.pdf
//! ```

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use hamming74::{Mode, NoiseParameters, Pipeline};
use log::debug;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Hamming(7,4) file codec.
///
/// Adds 3 parity bits to every 4 data bits of a file, simulates a noisy
/// channel by flipping single bits, and repairs one flipped bit per codeword.
#[derive(Parser, Debug)]
#[command(name = "hamming74")]
#[command(author, version, about = "Encode, corrupt and repair files with a Hamming(7,4) code", long_about = None)]
struct Cli {
    /// Log more detail (-v debug, -vv trace)
    ///
    /// RUST_LOG takes precedence when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct Files {
    /// File to read
    input: PathBuf,

    /// File to write (replaced if it exists)
    output: PathBuf,
}

#[derive(Args, Debug)]
struct NoiseArgs {
    /// Seed for the noise generator (default: system clock)
    #[arg(long)]
    seed: Option<u64>,

    /// One codeword in ODDS, on average, gets a flipped bit
    #[arg(long, default_value_t = 7)]
    odds: u32,

    /// Die roll in 0..ODDS that triggers a flip
    #[arg(long, default_value_t = 4)]
    sentinel: u32,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add Hamming(7,4) parity to a file.
    Encode(Files),

    /// Correct single-bit errors and strip the parity bits.
    Decode(Files),

    /// Flip single bits in an already encoded file.
    Inject {
        #[command(flatten)]
        files: Files,

        #[command(flatten)]
        noise: NoiseArgs,
    },

    /// Encode a file and flip single bits in the same pass.
    EncodeNoisy {
        #[command(flatten)]
        files: Files,

        #[command(flatten)]
        noise: NoiseArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    debug!("{:?}", cli);

    let (mode, files, noise) = match cli.command {
        Commands::Encode(files) => (Mode::Encode, files, None),
        Commands::Decode(files) => (Mode::Decode, files, None),
        Commands::Inject { files, noise } => (Mode::Inject, files, Some(noise)),
        Commands::EncodeNoisy { files, noise } => (Mode::EncodeNoisy, files, Some(noise)),
    };

    let mut pipeline = match noise {
        Some(noise) => {
            let params = NoiseParameters::new(noise.odds, noise.sentinel)
                .context("invalid noise options")?;
            Pipeline::with_noise(params, noise.seed)?
        }
        None => Pipeline::new(),
    };

    let summary = pipeline
        .run(mode, &files.input, &files.output)
        .with_context(|| format!("failed to {} {}", mode, files.input.display()))?;

    println!("{}", summary);
    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
