//! Polling request loop: waits for the configured interval, announces that input is accepted,
//! answers one request and repeats until the input ends or shutdown is requested.
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::request::{read_request, write_path, RequestError};
use crate::solver::{bfs::BfsSolver, MazeSolver};

/// Printed before every prompt to separate one answer from the next.
pub const SEPARATOR: &str = "_______________________________";
pub const PROMPT: &str = "Input allowed:";

/// Longest single sleep while waiting for the next cycle, bounding how late a shutdown request is
/// noticed.
const SHUTDOWN_POLL: Duration = Duration::from_millis(50);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Time to wait before accepting each request.
    pub poll_interval: Duration,
    /// Reject requests whose start or end cell is blocked.
    pub strict_endpoints: bool,
    /// Print [SEPARATOR] and [PROMPT] before each request.
    pub prompt: bool,
}

impl Default for RunConfig {
    fn default() -> RunConfig {
        RunConfig {
            poll_interval: Duration::from_secs(2),
            strict_endpoints: false,
            prompt: true,
        }
    }
}

/// Counts of how each request of a run was answered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub solved: usize,
    pub not_found: usize,
    pub rejected: usize,
}

enum Cycle {
    Solved,
    NotFound,
    Rejected,
    EndOfInput,
}

pub struct Runner {
    config: RunConfig,
    solver: BfsSolver,
    shutdown: Arc<AtomicBool>,
}

impl Runner {
    /// The loop stops at the next check once `shutdown` is set.
    pub fn new(config: RunConfig, shutdown: Arc<AtomicBool>) -> Runner {
        let solver = BfsSolver {
            require_passable_endpoints: config.strict_endpoints,
        };
        Runner {
            config,
            solver,
            shutdown,
        }
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    /// Sleeps for the poll interval. Returns `false` if shutdown was requested meanwhile.
    fn wait_for_next_cycle(&self) -> bool {
        let deadline = Instant::now() + self.config.poll_interval;
        loop {
            if self.shutdown_requested() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep((deadline - now).min(SHUTDOWN_POLL));
        }
    }

    /// Answers requests from `input` until it is exhausted or shutdown is requested. Paths go to
    /// `output`; rejected requests and unreachable goals are reported as one line on `errors`.
    /// Only I/O failures end the run with an error.
    pub fn run<R, W, E>(&self, input: &mut R, output: &mut W, errors: &mut E) -> Result<RunSummary>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut summary = RunSummary::default();
        while self.wait_for_next_cycle() {
            if self.config.prompt {
                writeln!(output, "{}", SEPARATOR)?;
                writeln!(output, "{}", PROMPT)?;
                output.flush()?;
            }
            match self.cycle(input, output, errors)? {
                Cycle::Solved => summary.solved += 1,
                Cycle::NotFound => summary.not_found += 1,
                Cycle::Rejected => summary.rejected += 1,
                Cycle::EndOfInput => {
                    info!("Input closed");
                    break;
                }
            }
        }
        if self.shutdown_requested() {
            info!("Shutdown requested, stopping");
        }
        debug!("{:?}", summary);
        Ok(summary)
    }

    fn cycle<R, W, E>(&self, input: &mut R, output: &mut W, errors: &mut E) -> Result<Cycle>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let request = match read_request(input) {
            Ok(Some(request)) => request,
            Ok(None) => return Ok(Cycle::EndOfInput),
            Err(RequestError::Io(e)) => return Err(Error::Io(e)),
            Err(e) => {
                warn!("Rejected request: {}", e);
                writeln!(errors, "{}", e)?;
                return Ok(Cycle::Rejected);
            }
        };
        debug!(
            "Solving {}x{} maze from ({}) to ({})",
            request.maze.height(),
            request.maze.width(),
            request.start,
            request.end
        );
        match self
            .solver
            .find_path(&request.maze, request.start, request.end)
        {
            Ok(path) => {
                write_path(output, &path)?;
                Ok(Cycle::Solved)
            }
            Err(e) => {
                info!("{}", e);
                writeln!(errors, "{}", e)?;
                Ok(Cycle::NotFound)
            }
        }
    }
}
