//! Response assembly shared by all backends.

use serde::Deserialize;
use serde::Serialize;

/// Exit code reported when a command exceeds its deadline.
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// Exit code reported when a command could not be run at all.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Inserted between the kept head and tail of oversized output.
pub const TRUNCATION_MARKER: &str = "\n... [truncated] ...\n";

/// Result of a single command execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteResponse {
    /// Merged stdout/stderr, possibly truncated.
    pub output: String,
    pub exit_code: i32,
    /// Whether the merged output exceeded the configured bound.
    pub truncated: bool,
}

impl ExecuteResponse {
    /// Builds a response from raw process streams.
    pub fn from_streams(stdout: &[u8], stderr: &[u8], exit_code: i32, max_chars: usize) -> Self {
        let merged = merge_output(
            &String::from_utf8_lossy(stdout),
            &String::from_utf8_lossy(stderr),
        );
        let (output, truncated) = truncate_output(merged, max_chars);
        Self {
            output,
            exit_code,
            truncated,
        }
    }

    pub fn timed_out(timeout_secs: u64) -> Self {
        Self {
            output: format!("Command timed out after {timeout_secs}s"),
            exit_code: TIMEOUT_EXIT_CODE,
            truncated: false,
        }
    }

    pub fn error(description: impl std::fmt::Display) -> Self {
        Self {
            output: format!("Error executing command: {description}"),
            exit_code: FAILURE_EXIT_CODE,
            truncated: false,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn is_timeout(&self) -> bool {
        self.exit_code == TIMEOUT_EXIT_CODE
    }
}

/// Joins stdout and stderr, separated by a newline only when both are present.
pub fn merge_output(stdout: &str, stderr: &str) -> String {
    match (stdout.is_empty(), stderr.is_empty()) {
        (_, true) => stdout.to_string(),
        (true, false) => stderr.to_string(),
        (false, false) => format!("{stdout}\n{stderr}"),
    }
}

/// Keeps the first and last `max_chars / 2` characters of an oversized output.
///
/// Returns the (possibly shortened) text and whether truncation happened.
pub fn truncate_output(output: String, max_chars: usize) -> (String, bool) {
    let total = output.chars().count();
    if total <= max_chars {
        return (output, false);
    }

    let keep = max_chars / 2;
    let head_end = output
        .char_indices()
        .nth(keep)
        .map_or(output.len(), |(idx, _)| idx);
    let tail_start = output
        .char_indices()
        .nth(total - keep)
        .map_or(output.len(), |(idx, _)| idx);

    let mut truncated = String::with_capacity(head_end + TRUNCATION_MARKER.len() + output.len() - tail_start);
    truncated.push_str(&output[..head_end]);
    truncated.push_str(TRUNCATION_MARKER);
    truncated.push_str(&output[tail_start..]);
    (truncated, true)
}

#[cfg(test)]
#[path = "response.test.rs"]
mod tests;
