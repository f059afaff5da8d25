//! Answers maze path requests read from stdin.
//!
//! Every `--interval-ms` the program announces that input is accepted, reads one request in the
//! [request](maze_pathfinding::request) text format and prints the path followed by a `.` line.
//! Failures are reported on stderr. SIGINT or SIGTERM stops the loop before the next request; a
//! second signal exits immediately.

use std::io;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::info;
use signal_hook::consts::TERM_SIGNALS;
use signal_hook::flag;

use maze_pathfinding::error::{Error, Result};
use maze_pathfinding::runner::{RunConfig, Runner};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Milliseconds to wait before accepting each request
    #[arg(long, default_value_t = 2000)]
    interval_ms: u64,

    /// Report no path when the start or end cell is blocked
    #[arg(long)]
    strict_endpoints: bool,

    /// Do not print the separator and prompt before each request
    #[arg(long)]
    no_prompt: bool,
}

impl From<Args> for RunConfig {
    fn from(args: Args) -> RunConfig {
        RunConfig {
            poll_interval: Duration::from_millis(args.interval_ms),
            strict_endpoints: args.strict_endpoints,
            prompt: !args.no_prompt,
        }
    }
}

fn register_shutdown(shutdown: &Arc<AtomicBool>) -> Result<()> {
    for &signal in TERM_SIGNALS {
        // Order matters: the conditional exit must see the flag before this signal sets it.
        flag::register_conditional_shutdown(signal, 1, Arc::clone(shutdown))
            .map_err(Error::Signal)?;
        flag::register(signal, Arc::clone(shutdown)).map_err(Error::Signal)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RunConfig::from(Args::parse());
    info!("Starting with {:?}", config);

    let shutdown = Arc::new(AtomicBool::new(false));
    register_shutdown(&shutdown)?;

    let runner = Runner::new(config, shutdown);
    let summary = runner.run(&mut io::stdin().lock(), &mut io::stdout(), &mut io::stderr())?;
    info!(
        "Finished: {} solved, {} without path, {} rejected",
        summary.solved, summary.not_found, summary.rejected
    );
    Ok(())
}
