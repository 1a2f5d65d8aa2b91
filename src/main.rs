//! Crossword Grid Placer
//!
//! Places an ordered list of words onto a square grid, crossing words only
//! where their letters agree, and prints the resulting grid.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{error, info, warn};

use crossgrid::config::Config;
use crossgrid::words::{DEMO_SIZE, DEMO_WORDS};
use crossgrid::{solve_puzzle, Puzzle, SolveStatus};

/// Places words on a square grid and prints the result.
#[derive(Parser)]
#[command(name = "crossgrid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Place the given words on a grid.
    Solve(SolveArgs),
    /// Place the built-in demo word list on a 10x10 grid.
    Demo,
}

#[derive(Args, Default)]
struct SolveArgs {
    /// Words to place, in order. Replaces any words from the config file.
    words: Vec<String>,

    /// Grid side length.
    #[arg(short, long)]
    size: Option<usize>,

    /// TOML file with size, words, blank, and max_placements.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Give up after this many placements.
    #[arg(short, long)]
    max_placements: Option<u64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    crossgrid::log::init_logger(cli.debug);

    let result = match cli.command {
        Some(Command::Solve(args)) => resolve_config(args).and_then(|config| run(&config)),
        Some(Command::Demo) | None => run(&demo_config()),
    };

    match result {
        Ok(SolveStatus::Solved) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(2),
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// The demo puzzle: five fruit on a 10x10 grid.
fn demo_config() -> Config {
    Config {
        size: DEMO_SIZE,
        words: DEMO_WORDS.iter().map(|w| w.to_string()).collect(),
        ..Config::default()
    }
}

/// Merges command-line arguments over the optional config file.
fn resolve_config(args: SolveArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::read_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(size) = args.size {
        config.size = size;
    }
    if !args.words.is_empty() {
        config.words = args.words;
    }
    if args.max_placements.is_some() {
        config.max_placements = args.max_placements;
    }

    config.validate()?;
    if config.words.is_empty() {
        warn!("no words given; the grid will stay empty");
    }
    Ok(config)
}

/// Solves the configured puzzle and prints the outcome.
fn run(config: &Config) -> Result<SolveStatus> {
    let words = config.parsed_words()?;
    info!(
        "placing {} words on a {}x{} grid",
        words.len(),
        config.size,
        config.size
    );

    let puzzle = solve_puzzle(config.size, &words, config.solve_options())?;
    print!("{}", render(&puzzle, config.blank));
    info!(
        "checked {} candidates, {} placements, {} removals",
        puzzle.report.stats.candidates_checked,
        puzzle.report.stats.placements,
        puzzle.report.stats.removals
    );
    Ok(puzzle.report.status)
}

/// Formats the search outcome: the grid and placements on success, a
/// one-line reason otherwise.
fn render(puzzle: &Puzzle, blank: char) -> String {
    match puzzle.report.status {
        SolveStatus::Solved => {
            let size = puzzle.grid.size();
            let mut output = format!(
                "Placed {} words on a {size}x{size} grid:\n\n",
                puzzle.placements.len()
            );
            output.push_str(&puzzle.grid.format(blank));
            output.push('\n');
            for placement in &puzzle.placements {
                output.push_str(&format!("{placement}\n"));
            }
            output
        }
        SolveStatus::Unsatisfiable => "Failed to place all words on the grid.\n".to_string(),
        SolveStatus::BudgetExhausted => format!(
            "Gave up after {} placements without placing all words.\n",
            puzzle.report.stats.placements
        ),
    }
}
