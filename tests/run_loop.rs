//! End-to-end runs against a fake `forge`.
//!
//! The fake is driven through `sh`: with `--program sh` the runner executes
//! `sh script <id> --rpc-url <url> ...`, so a file named `script` in the
//! working directory stands in for the forge subcommand and sees the rest of
//! the argument vector as `$1..`.

#![cfg(unix)]

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RPC: &str = "http://rpc.test";

fn fake_forge(body: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("script"), body).unwrap();
    dir
}

fn swaprunner_with(dir: &Path, program: &str) -> Command {
    let mut cmd = Command::cargo_bin("swaprunner").unwrap();
    cmd.current_dir(dir)
        .env_remove("SWAPRUNNER_CONFIG")
        .env("ARC_TESTNET_RPC_URL", RPC)
        .args(["--program", program, "--delay-ms", "0"]);
    cmd
}

fn swaprunner(dir: &Path) -> Command {
    swaprunner_with(dir, "sh")
}

#[test]
fn test_missing_endpoint_fails_every_iteration() {
    let dir = fake_forge("echo should-not-run\nexit 0\n");
    let assert = swaprunner(dir.path())
        .env_remove("ARC_TESTNET_RPC_URL")
        .args(["--count", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting automated swap test: 3 iterations."))
        .stdout(predicate::str::contains("0 / 3 runs successful."))
        .stdout(predicate::str::contains("should-not-run").not());

    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(
        out.matches("ERROR: ARC_TESTNET_RPC_URL environment variable is not set.")
            .count(),
        3
    );
}

#[test]
fn test_success_echoes_highlights() {
    let dir = fake_forge(
        "echo 'Compiling 1 files'\n\
         echo '  Script ran successfully.'\n\
         echo '## Setting up 1 EVM.'\n\
         echo 'Hash: 0xabc'\n\
         echo 'Total Paid: 0.00042 ETH (210000 gas * avg 2 gwei)'\n\
         exit 0\n",
    );
    swaprunner(dir.path())
        .args(["--count", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Iteration 1 successful. Swap transaction broadcasted.",
        ))
        .stdout(predicate::str::contains("-> Script ran successfully.\n"))
        .stdout(predicate::str::contains("-> Hash: 0xabc\n"))
        .stdout(predicate::str::contains("-> Total Paid: 0.00042 ETH"))
        .stdout(predicate::str::contains("Setting up").not())
        .stdout(predicate::str::contains("1 / 1 runs successful."));
}

#[test]
fn test_arguments_reach_the_script() {
    // $1 script id, $2 --rpc-url, $3 endpoint, $4 --broadcast, $5 -vvvv
    let dir = fake_forge(
        "[ \"$1\" = 'script/PerformSwap.s.sol:PerformSwapScript' ] || exit 11\n\
         [ \"$2\" = '--rpc-url' ] || exit 12\n\
         [ \"$3\" = 'http://rpc.test' ] || exit 13\n\
         [ \"$4\" = '--broadcast' ] || exit 14\n\
         [ \"$5\" = '-vvvv' ] || exit 15\n\
         exit 0\n",
    );
    swaprunner(dir.path())
        .args(["--count", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 / 2 runs successful."));
}

#[test]
fn test_failure_truncates_stdout() {
    let dir = fake_forge(
        "i=1\n\
         while [ $i -le 30 ]; do echo \"trace line $i\"; i=$((i+1)); done\n\
         echo 'Error: script failed: revert' >&2\n\
         exit 1\n",
    );
    let assert = swaprunner(dir.path())
        .args(["--count", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Iteration 1 FAILED with error code 1.",
        ))
        .stdout(predicate::str::contains("--- Stdout (Partial Output) ---"))
        .stdout(predicate::str::contains("trace line 20\n"))
        .stdout(predicate::str::contains("trace line 21").not())
        .stdout(predicate::str::contains(
            "--- Stderr ---\nError: script failed: revert",
        ))
        .stdout(predicate::str::contains("0 / 1 runs successful."));

    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(out.matches("trace line ").count(), 20);
}

#[test]
fn test_missing_program_keeps_going() {
    let dir = tempfile::tempdir().unwrap();
    swaprunner_with(dir.path(), "swaprunner-missing-forge")
        .args(["--count", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "FATAL ERROR: 'swaprunner-missing-forge' command not found.",
        ))
        .stdout(predicate::str::contains("0 / 2 runs successful."));
}

#[test]
fn test_config_file_in_working_directory() {
    let dir = fake_forge("echo 'Hash: 0x1'\nexit 0\n");
    std::fs::write(
        dir.path().join("swaprunner.toml"),
        "run_count = 2\ndelay_ms = 0\nprogram = \"sh\"\nrpc_url = \"http://from-file\"\n",
    )
    .unwrap();

    Command::cargo_bin("swaprunner")
        .unwrap()
        .current_dir(dir.path())
        .env_remove("SWAPRUNNER_CONFIG")
        .env_remove("ARC_TESTNET_RPC_URL")
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting automated swap test: 2 iterations."))
        .stdout(predicate::str::contains("2 / 2 runs successful."));
}

#[test]
fn test_json_summary() {
    let dir = fake_forge("exit 0\n");
    swaprunner(dir.path())
        .args(["--count", "2", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"successful\": 2"))
        .stdout(predicate::str::contains("\"total\": 2"))
        .stdout(predicate::str::contains("\"run_id\""));
}
