use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use slow_referee::{MatchConfig, PlayerSession, Referee, RefereeError, render_report};

#[derive(Parser, Debug)]
#[command(
    name = "referee",
    version,
    about = "Referee a match of Slow between two player programs."
)]
struct Args {
    /// Executable for player 1
    #[arg(long = "player1", value_name = "EXE")]
    player1: PathBuf,

    /// Executable for player 2
    #[arg(long = "player2", value_name = "EXE")]
    player2: PathBuf,

    /// Number of games in the match
    #[arg(short = 'n', long = "number", default_value_t = 1)]
    number: usize,

    /// Base RNG seed for deck shuffles (random when omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Trace every exchange on stderr
    #[arg(long = "verbose", action = ArgAction::SetTrue)]
    verbose: bool,

    /// Print the match report as JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    if let Err(err) = run(args) {
        error!("match failed: {err}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    info!(
        player1 = %args.player1.display(),
        player2 = %args.player2.display(),
        number = args.number,
        verbose = args.verbose,
        "options"
    );

    let mut config = MatchConfig::new(args.number)?;
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let first = PlayerSession::spawn(&args.player1)
        .map_err(|source| RefereeError::Transport { player: 0, source })?;
    let second = PlayerSession::spawn(&args.player2)
        .map_err(|source| RefereeError::Transport { player: 1, source })?;

    let mut referee = Referee::new(config, [first, second]);
    let report = referee.run()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}
