//! Aggregate counts for one automated run.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::outcome::IterationOutcome;

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    /// Configured iteration count.
    pub total: u32,
    /// Iterations actually attempted; equals `total` once the run finishes.
    pub attempted: u32,
    pub successful: u32,
    pub config_errors: u32,
    pub process_errors: u32,
    pub launch_errors: u32,
    pub elapsed_secs: f64,
}

impl RunSummary {
    pub fn new(total: u32) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            total,
            attempted: 0,
            successful: 0,
            config_errors: 0,
            process_errors: 0,
            launch_errors: 0,
            elapsed_secs: 0.0,
        }
    }

    pub fn record(&mut self, outcome: &IterationOutcome) {
        self.attempted += 1;
        match outcome {
            IterationOutcome::Success { .. } => self.successful += 1,
            IterationOutcome::ConfigError { .. } => self.config_errors += 1,
            IterationOutcome::ProcessError { .. } => self.process_errors += 1,
            IterationOutcome::LaunchError { .. } => self.launch_errors += 1,
        }
    }

    pub fn finish(&mut self, elapsed: Duration) {
        self.elapsed_secs = elapsed.as_secs_f64();
    }

    pub fn failed(&self) -> u32 {
        self.attempted - self.successful
    }

    /// Successful share of the configured total, `0.0` for an empty run.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.successful as f64 / self.total as f64
        }
    }
}
