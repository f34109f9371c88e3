use std::error::Error;
use std::io;
use std::process;

use clap::{ArgAction, Parser};
use tracing::error;
use tracing_subscriber::EnvFilter;

use slow_referee::{create_bot_from_spec, serve};

// Stdout carries the protocol, so every log line goes to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "player",
    version,
    about = "Reference Slow player speaking the referee protocol on stdin/stdout."
)]
struct Args {
    /// Strategy spec: first, random[:seed] or greedy
    #[arg(long = "strategy", default_value = "greedy")]
    strategy: String,

    /// Seed for randomized strategies
    #[arg(short = 's', long = "seed", default_value_t = 0)]
    seed: u64,

    /// Log each decision on stderr
    #[arg(long = "verbose", action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    let fallback = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    if let Err(err) = run(args) {
        error!("player stopped: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let bot = create_bot_from_spec(&args.strategy, args.seed)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(stdin.lock(), stdout.lock(), bot)?;
    Ok(())
}
