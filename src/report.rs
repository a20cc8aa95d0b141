//! Console presentation of a run.
//!
//! All user-facing status text goes through [`Reporter`], which writes to any
//! `io::Write`. The binary hands it stdout; tests hand it a `Vec<u8>`.

use std::fmt;
use std::io::Write;

use tracing::debug;

use crate::filter::{self, FAILURE_STDOUT_LINES};
use crate::outcome::{IterationOutcome, LaunchFailure};
use crate::summary::RunSummary;

const SEPARATOR: &str = "===========================================";

pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        // A closed pipe must not abort the run.
        if let Err(e) = writeln!(self.out, "{}", args) {
            debug!(error = %e, "failed to write status line");
        }
    }

    pub fn start(&mut self, total: u32) {
        self.line(format_args!("Starting automated swap test: {} iterations.", total));
    }

    pub fn iteration_header(&mut self, iteration: u32, total: u32) {
        self.line(format_args!(
            "\n--- Running swap iteration {}/{} ---",
            iteration, total
        ));
    }

    pub fn outcome(&mut self, iteration: u32, outcome: &IterationOutcome) {
        match outcome {
            IterationOutcome::Success { highlights } => {
                self.line(format_args!(
                    "Iteration {} successful. Swap transaction broadcasted.",
                    iteration
                ));
                for l in highlights {
                    self.line(format_args!("-> {}", l));
                }
            }
            IterationOutcome::ConfigError { variable } => {
                self.line(format_args!(
                    "ERROR: {} environment variable is not set.",
                    variable
                ));
            }
            IterationOutcome::ProcessError {
                code,
                stdout,
                stderr,
            } => {
                match code {
                    Some(c) => self.line(format_args!(
                        "Iteration {} FAILED with error code {}.",
                        iteration, c
                    )),
                    None => self.line(format_args!(
                        "Iteration {} FAILED: terminated by signal.",
                        iteration
                    )),
                }
                self.line(format_args!("--- Stdout (Partial Output) ---"));
                for l in filter::head_lines(stdout, FAILURE_STDOUT_LINES) {
                    self.line(format_args!("{}", l));
                }
                self.line(format_args!("--- Stderr ---"));
                self.line(format_args!("{}", stderr.trim_end()));
            }
            IterationOutcome::LaunchError {
                program,
                kind: LaunchFailure::NotFound,
                ..
            } => {
                self.line(format_args!(
                    "FATAL ERROR: '{}' command not found. Ensure Foundry is installed and in your PATH.",
                    program
                ));
            }
            IterationOutcome::LaunchError {
                program, message, ..
            } => {
                self.line(format_args!(
                    "FATAL ERROR: failed to launch '{}': {}",
                    program, message
                ));
            }
        }
    }

    pub fn summary(&mut self, summary: &RunSummary) {
        self.line(format_args!("\n{}", SEPARATOR));
        self.line(format_args!(
            "Swap Automation Complete: {} / {} runs successful.",
            summary.successful, summary.total
        ));
        self.line(format_args!(
            "Total time elapsed: {:.2} seconds.",
            summary.elapsed_secs
        ));
        self.line(format_args!("{}", SEPARATOR));
        let _ = self.out.flush();
    }
}
