//! The fixed-count swap loop.
//!
//! Every configured iteration is attempted exactly once, in order, and the
//! loop never stops early: config, process and launch failures are all
//! recorded and the run moves on. There is no timeout on the child process,
//! so a hung `forge` stalls the run.

use std::io::Write;
use std::time::Instant;

use tracing::{info, warn};

use crate::command::Invocation;
use crate::config::RunConfig;
use crate::executor::ScriptExecutor;
use crate::outcome::{classify, IterationOutcome};
use crate::report::Reporter;
use crate::summary::RunSummary;

/// Run a single iteration: check the endpoint, then spawn and classify.
pub async fn run_iteration(
    config: &RunConfig,
    invocation: &Invocation,
    executor: &dyn ScriptExecutor,
) -> IterationOutcome {
    if invocation.missing_endpoint() {
        return IterationOutcome::ConfigError {
            variable: config.rpc_env.clone(),
        };
    }

    classify(&invocation.program, executor.execute(invocation).await)
}

/// Run all iterations and return the aggregate. Never fails.
pub async fn run<W: Write>(
    config: &RunConfig,
    executor: &dyn ScriptExecutor,
    reporter: &mut Reporter<W>,
) -> RunSummary {
    let invocation = Invocation::from_config(config);
    let total = config.run_count;
    let delay = config.delay();

    let mut summary = RunSummary::new(total);
    let started = Instant::now();

    info!(run_id = %summary.run_id, total, command = %invocation.display(), "starting swap run");
    if invocation.missing_endpoint() {
        warn!(variable = %config.rpc_env, "RPC endpoint not set; every iteration will fail");
    }
    reporter.start(total);

    for iteration in 1..=total {
        reporter.iteration_header(iteration, total);

        let outcome = run_iteration(config, &invocation, executor).await;
        match &outcome {
            IterationOutcome::Success { highlights } => {
                info!(iteration, highlights = highlights.len(), "swap iteration succeeded");
            }
            IterationOutcome::ProcessError { code, .. } => {
                warn!(iteration, ?code, "swap iteration failed");
            }
            other => {
                warn!(iteration, outcome = other.label(), "swap iteration not executed");
            }
        }

        reporter.outcome(iteration, &outcome);
        summary.record(&outcome);

        // Eases RPC rate limiting; applies after failures too.
        tokio::time::sleep(delay).await;
    }

    summary.finish(started.elapsed());
    info!(
        run_id = %summary.run_id,
        successful = summary.successful,
        total,
        elapsed_secs = summary.elapsed_secs,
        "swap run complete"
    );
    reporter.summary(&summary);

    summary
}
