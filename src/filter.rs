//! Scraping of verbose `forge` output for the few lines worth echoing.

/// Prefix forge prints once a script finishes without reverting.
pub const SCRIPT_OK_PREFIX: &str = "Script ran successfully.";
pub const HASH_MARKER: &str = "Hash:";
pub const TOTAL_PAID_MARKER: &str = "Total Paid:";

/// Stdout lines shown for a failed run; `-vvvv` traces are long.
pub const FAILURE_STDOUT_LINES: usize = 20;

/// Whether an already trimmed line should be echoed after a successful run.
pub fn is_highlight(line: &str) -> bool {
    line.starts_with(SCRIPT_OK_PREFIX)
        || line.contains(HASH_MARKER)
        || line.contains(TOTAL_PAID_MARKER)
}

/// Trimmed highlight lines from captured stdout, in order.
pub fn highlights(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|l| is_highlight(l))
        .map(str::to_string)
        .collect()
}

/// The first `n` lines of `text`.
pub fn head_lines(text: &str, n: usize) -> Vec<&str> {
    text.lines().take(n).collect()
}
