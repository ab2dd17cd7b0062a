use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;

use alien_invasion::{invade, Options, WriteReport};

/// Discrete-event simulator of an alien invasion over a city road map
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the city map file (defaults to stdin)
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// Number of aliens invading
    #[arg(short, long, default_value_t = 10)]
    aliens: usize,

    /// Limit on the number of rounds the aliens perform before giving up
    #[arg(short, long, default_value_t = 10000)]
    rounds: usize,

    /// Random seed to control pseudo-random results (0 derives one from the clock)
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Parse the map strictly, without back-linking cities in opposite directions
    #[arg(long)]
    strict: bool,

    /// Output file for the remaining city map (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Suppress log output, still printing narration and remaining cities
    #[arg(long)]
    silent: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let default_filter = if args.silent { "off" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let seed = if args.seed == 0 { clock_seed() } else { args.seed };
    info!("invasion seed {}", seed);

    let stdin = io::stdin();
    let mut map_input: Box<dyn BufRead> = match &args.map {
        Some(path) => Box::new(BufReader::new(
            File::open(path)
                .wrap_err_with(|| format!("Failed to open map file '{}'", path.display()))?,
        )),
        None => Box::new(stdin.lock()),
    };

    let mut remaining_output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path)
                .wrap_err_with(|| format!("Failed to create output file '{}'", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };

    let mut report = WriteReport::new(io::stdout());

    let summary = invade(Options {
        aliens: args.aliens,
        rounds: args.rounds,
        seed,
        strict_parse: args.strict,
        map_input: &mut map_input,
        remaining_output: &mut remaining_output,
        report: &mut report,
    })
    .wrap_err("Invasion failed")?;

    remaining_output.flush().wrap_err("Failed to flush output")?;

    info!(
        "{} rounds, {} cities destroyed, {} remaining, {} aliens surviving ({} trapped)",
        summary.rounds_completed,
        summary.destroyed,
        summary.remaining,
        summary.survivors,
        summary.trapped
    );
    Ok(())
}

/// Seed derived from the wall clock, for runs that did not ask for a
/// reproducible one.
fn clock_seed() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_nanos() as u64,
        Err(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = Args::parse_from(["alien-invasion"]);
        assert_eq!(args.aliens, 10);
        assert_eq!(args.rounds, 10000);
        assert_eq!(args.seed, 0);
        assert!(!args.strict);
        assert!(!args.silent);
        assert_eq!(args.map, None);
        assert_eq!(args.output, None);
    }

    #[test]
    fn test_cli_full_invocation() {
        let args = Args::parse_from([
            "alien-invasion",
            "--map", "cities.txt",
            "--aliens", "4",
            "--rounds", "100",
            "--seed", "99",
            "--strict",
            "--output", "left.txt",
            "--silent",
        ]);
        assert_eq!(args.map, Some(PathBuf::from("cities.txt")));
        assert_eq!(args.aliens, 4);
        assert_eq!(args.rounds, 100);
        assert_eq!(args.seed, 99);
        assert!(args.strict);
        assert!(args.silent);
        assert_eq!(args.output, Some(PathBuf::from("left.txt")));
    }

    #[test]
    fn test_clock_seed_nonzero() {
        assert_ne!(clock_seed(), 0);
    }
}
