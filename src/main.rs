use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use swaprunner::command::Invocation;
use swaprunner::config::{Overrides, RunConfig};
use swaprunner::executor::ForgeExecutor;
use swaprunner::report::Reporter;

#[derive(Parser)]
#[command(
    name = "swaprunner",
    about = "Repeatedly broadcast a forge swap script against a testnet and tally the results",
    version,
    long_about = None
)]
struct Cli {
    /// Number of iterations to run
    #[arg(long)]
    count: Option<u32>,

    /// Pause after each iteration, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// External program to invoke
    #[arg(long)]
    program: Option<String>,

    /// Script path and contract, e.g. script/PerformSwap.s.sol:PerformSwapScript
    #[arg(long)]
    script: Option<String>,

    /// Environment variable holding the RPC endpoint
    #[arg(long)]
    rpc_env: Option<String>,

    /// Simulate only; omit --broadcast
    #[arg(long)]
    no_broadcast: bool,

    /// Number of `v`s passed to the script (0-5)
    #[arg(long)]
    verbosity: Option<u8>,

    /// TOML config file (otherwise SWAPRUNNER_CONFIG or ./swaprunner.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the run summary as JSON after the console summary
    #[arg(long)]
    json: bool,

    /// Print the resolved command line and exit
    #[arg(long)]
    print_command: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            run_count: self.count,
            program: self.program.clone(),
            script: self.script.clone(),
            rpc_env: self.rpc_env.clone(),
            no_broadcast: self.no_broadcast,
            verbosity: self.verbosity,
            delay_ms: self.delay_ms,
        }
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Logs go to stderr; stdout carries the status lines.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let base = match &cli.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => RunConfig::load_or_default(),
    };
    let config = base
        .with_overrides(cli.overrides())
        .resolve_endpoint_from_env();
    config.validate().context("invalid run configuration")?;

    if cli.print_command {
        println!("{}", Invocation::from_config(&config).display());
        return Ok(());
    }

    let mut reporter = Reporter::new(std::io::stdout());
    let summary = swaprunner::run(&config, &ForgeExecutor, &mut reporter).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
