//! Run configuration for the swap runner.
//!
//! Layered the usual way: compiled-in defaults, an optional TOML file, then
//! command-line overrides. The RPC endpoint is resolved once from the process
//! environment; when it is missing the sentinel [`RPC_URL_NOT_SET`] is stored
//! so every iteration can fail fast without spawning anything.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ConfigError;

/// Placeholder stored in place of the endpoint when the environment lacks it.
pub const RPC_URL_NOT_SET: &str = "RPC_URL_NOT_SET";

/// Environment variable that points at an alternate config file.
pub const CONFIG_ENV: &str = "SWAPRUNNER_CONFIG";

/// Config file picked up from the working directory when nothing else is given.
pub const LOCAL_CONFIG_FILE: &str = "swaprunner.toml";

const MAX_VERBOSITY: u8 = 5;

/// Immutable description of one automated run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of iterations to attempt.
    pub run_count: u32,
    /// External program to invoke.
    pub program: String,
    /// Script path and contract name handed to `forge script`.
    pub script: String,
    /// Name of the environment variable holding the RPC endpoint.
    pub rpc_env: String,
    /// Endpoint passed via `--rpc-url`. Filled from `rpc_env` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
    /// Submit transactions instead of simulating them.
    pub broadcast: bool,
    /// Number of `v`s in the verbosity flag.
    pub verbosity: u8,
    /// Pause after every iteration, in milliseconds.
    pub delay_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            run_count: 100,
            program: "forge".to_string(),
            script: "script/PerformSwap.s.sol:PerformSwapScript".to_string(),
            rpc_env: "ARC_TESTNET_RPC_URL".to_string(),
            rpc_url: None,
            broadcast: true,
            verbosity: 4,
            delay_ms: 200,
        }
    }
}

/// Values given on the command line. `None` leaves the file/default value alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub run_count: Option<u32>,
    pub program: Option<String>,
    pub script: Option<String>,
    pub rpc_env: Option<String>,
    pub no_broadcast: bool,
    pub verbosity: Option<u8>,
    pub delay_ms: Option<u64>,
}

impl RunConfig {
    /// Load configuration from a TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded run configuration");
        Ok(config)
    }

    /// Try to load configuration from, in order:
    /// 1. The path in the `SWAPRUNNER_CONFIG` environment variable.
    /// 2. `swaprunner.toml` in the working directory.
    /// 3. Compiled-in defaults.
    pub fn load_or_default() -> Self {
        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(env_path);
            match Self::load(&path) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "SWAPRUNNER_CONFIG set but file could not be loaded, trying fallback"
                    );
                }
            }
        }

        let local = Path::new(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load(local) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    warn!(
                        path = %local.display(),
                        error = %e,
                        "local config file exists but could not be loaded, using defaults"
                    );
                }
            }
        }

        debug!("no config file found, using compiled-in defaults");
        Self::default()
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, o: Overrides) -> Self {
        if let Some(n) = o.run_count {
            self.run_count = n;
        }
        if let Some(p) = o.program {
            self.program = p;
        }
        if let Some(s) = o.script {
            self.script = s;
        }
        if let Some(v) = o.rpc_env {
            self.rpc_env = v;
        }
        if o.no_broadcast {
            self.broadcast = false;
        }
        if let Some(v) = o.verbosity {
            self.verbosity = v;
        }
        if let Some(d) = o.delay_ms {
            self.delay_ms = d;
        }
        self
    }

    /// Fill in the endpoint from the environment using `lookup`.
    ///
    /// An endpoint already set in the config file wins. Otherwise the variable
    /// named by `rpc_env` is consulted, and the sentinel is stored if it is
    /// missing or blank.
    pub fn resolve_endpoint<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.rpc_url.is_none() {
            let url = lookup(&self.rpc_env)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| RPC_URL_NOT_SET.to_string());
            self.rpc_url = Some(url);
        }
        self
    }

    /// Resolve the endpoint from the real process environment.
    pub fn resolve_endpoint_from_env(self) -> Self {
        self.resolve_endpoint(|key| std::env::var(key).ok())
    }

    /// The endpoint argument, or the sentinel if it was never resolved.
    pub fn endpoint(&self) -> &str {
        self.rpc_url.as_deref().unwrap_or(RPC_URL_NOT_SET)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.verbosity > MAX_VERBOSITY {
            return Err(ConfigError::InvalidVerbosity(self.verbosity));
        }
        if self.script.trim().is_empty() {
            return Err(ConfigError::EmptyScript);
        }
        Ok(())
    }
}
