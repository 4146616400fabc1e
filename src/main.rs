//! Directional Combination Lock Explorer
//!
//! Shows the internal disk state a combination leaves behind, searches for
//! other combinations that reach the same state, and tallies how often
//! combinations collide. Combinations are written as letters (`U`, `L`, `D`,
//! `R`), e.g. `ULDR`.

use std::process;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use combolock::{
    census, fingerprint, search_range_blocking, Combination, DiskConfiguration, LockError,
    SearchOptions, SearchRange, Seed, DEFAULT_YIELD_THRESHOLD,
};

/// Explores duplicate combinations of a directional padlock.
#[derive(Parser)]
#[command(name = "combolock")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Drop characters that are not U, L, D or R instead of rejecting them.
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the disk state after entering a combination.
    Show {
        /// Combination in letter notation.
        combination: String,
    },
    /// Find every combination in a length range that reaches a target state.
    Search(SearchArgs),
    /// Count how many combinations collide on each state.
    Census {
        /// Longest combination to include.
        #[arg(long, default_value_t = 6)]
        max: usize,
        /// How many of the most ambiguous states to list.
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
}

/// Failures reported by the command line.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error("search needs either --target or --seed")]
    MissingTarget,
}

/// The state to search for, given one way or the other.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct TargetArgs {
    /// Combination whose final state is the target.
    #[arg(long)]
    target: Option<String>,
    /// Target seed given directly.
    #[arg(long)]
    seed: Option<Seed>,
}

impl TargetArgs {
    /// Resolves the target to a seed.
    fn resolve(&self, lenient: bool) -> Result<Seed, CliError> {
        if let Some(letters) = &self.target {
            let combination = parse_letters(letters, lenient)?;
            let seed = fingerprint(&DiskConfiguration::after(&combination));
            println!("Target {combination} has seed {seed}");
            return Ok(seed);
        }
        self.seed.ok_or(CliError::MissingTarget)
    }
}

#[derive(Args)]
struct SearchArgs {
    #[command(flatten)]
    target: TargetArgs,
    /// Shortest combination length to try.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    min: i64,
    /// Longest combination length to try.
    #[arg(long, default_value_t = 6, allow_negative_numbers = true)]
    max: i64,
    /// Yield to the scheduler periodically while searching.
    #[arg(long)]
    realtime: bool,
    /// Milliseconds between yields in realtime mode.
    #[arg(long, default_value_t = DEFAULT_YIELD_THRESHOLD.as_millis() as u64)]
    yield_ms: u64,
    /// Print the candidate being checked every this many candidates.
    #[arg(long)]
    progress: Option<usize>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Show { combination } => run_show(&combination, cli.lenient),
        Command::Search(args) => run_search(&args, cli.lenient),
        Command::Census { max, top } => {
            run_census(max, top);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Translates letter notation into canonical move tokens.
fn parse_letters(input: &str, lenient: bool) -> Result<Combination, LockError> {
    let mut tokens = Vec::with_capacity(input.len());
    for letter in input.chars() {
        let token = match letter.to_ascii_uppercase() {
            'U' => "Up",
            'L' => "Left",
            'D' => "Down",
            'R' => "Right",
            _ if lenient => continue,
            _ => return Err(LockError::InvalidMoveToken(letter.to_string())),
        };
        tokens.push(token);
    }
    Combination::from_tokens(tokens)
}

/// Renders every disk and the seed of a configuration.
fn format_state(config: &DiskConfiguration) -> String {
    let mut output = String::new();
    for (direction, disk) in config.iter() {
        output.push_str(&format!(
            "{:<5}  notch {}  pin {:+}  angle {:>3}\n",
            direction.token(),
            disk.notch_index(),
            disk.last_pin_offset(),
            disk.angle()
        ));
    }
    output.push_str(&format!("seed {}", fingerprint(config)));
    output
}

fn run_show(input: &str, lenient: bool) -> Result<(), CliError> {
    let combination = parse_letters(input, lenient)?;
    println!("Combination: {combination}");
    println!("{}", format_state(&DiskConfiguration::after(&combination)));
    Ok(())
}

fn run_search(args: &SearchArgs, lenient: bool) -> Result<(), CliError> {
    let target = args.target.resolve(lenient)?;
    let range = SearchRange::new(args.min, args.max)?;
    let options = SearchOptions::default()
        .with_cooperative(args.realtime)
        .with_yield_threshold(Duration::from_millis(args.yield_ms));

    let start = Instant::now();
    let mut checked = 0usize;
    let every = args.progress.unwrap_or(0);
    let mut observer = |candidate: &Combination| {
        checked += 1;
        if every > 0 && checked % every == 0 {
            eprintln!("checking {candidate}");
        }
    };
    let results = search_range_blocking(range, target, &mut observer, &options)?;

    for combination in &results {
        if combination.is_empty() {
            println!("(empty)");
        } else {
            println!("{combination}");
        }
    }
    println!(
        "Found {} combinations in {} ms",
        results.len(),
        start.elapsed().as_millis()
    );
    Ok(())
}

fn run_census(max: usize, top: usize) {
    let census = census(max);
    println!("For up to {} moves", census.max_length());
    println!("{} combinations", census.combinations());
    println!("{} unique states", census.unique_states());
    println!("{} duplicates", census.duplicate_count());

    for (seed, tally) in census.most_ambiguous().into_iter().take(top) {
        println!("seed {seed:5}: {} combinations, first {}", tally.count, tally.first);
    }
}
