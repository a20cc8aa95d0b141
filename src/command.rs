//! `forge script` argument vector construction.

use crate::config::{RunConfig, RPC_URL_NOT_SET};

pub const RPC_URL_FLAG: &str = "--rpc-url";

/// A fully resolved external command: program plus argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Build `<program> script <script> --rpc-url <endpoint> [--broadcast] [-v..]`.
    pub fn from_config(config: &RunConfig) -> Self {
        let mut args = vec![
            "script".to_string(),
            config.script.clone(),
            RPC_URL_FLAG.to_string(),
            config.endpoint().to_string(),
        ];
        if config.broadcast {
            args.push("--broadcast".to_string());
        }
        if config.verbosity > 0 {
            args.push(format!("-{}", "v".repeat(config.verbosity as usize)));
        }

        Self {
            program: config.program.clone(),
            args,
        }
    }

    /// Value following `--rpc-url`, if present.
    pub fn endpoint_arg(&self) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == RPC_URL_FLAG)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// True when the endpoint argument is missing or still the sentinel.
    pub fn missing_endpoint(&self) -> bool {
        matches!(self.endpoint_arg(), None | Some(RPC_URL_NOT_SET))
    }

    /// Shell-like rendering for logs and `--print-command`.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
