//! Bounded execution of one trial's child process.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

/// Sentinel exit code recorded for trials whose child was killed on
/// timeout. Reserved for timeouts only; classification rides on the
/// trial status, and this code exists only for display.
pub const TIMEOUT_EXIT_CODE: i32 = -1;

/// What happened to one child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    /// The child ran to completion. `exit_code` is the real code even
    /// when nonzero (only content inspection invalidates a trial) and
    /// `None` when the child died to a signal.
    Completed {
        exit_code: Option<i32>,
        output: String,
    },
    /// The wall-clock bound expired; the child was killed and no partial
    /// output is salvaged.
    TimedOut,
}

/// Run `program` with `args`, capturing stdout and stderr merged into one
/// text blob, bounded by `limit`.
pub async fn execute(
    program: &str,
    args: &[String],
    limit: Duration,
) -> std::io::Result<ExecOutcome> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    // Dropping the wait future on timeout kills the child (kill_on_drop).
    match tokio::time::timeout(limit, child.wait_with_output()).await {
        Ok(result) => {
            let out = result?;
            let mut output = String::from_utf8_lossy(&out.stdout).into_owned();
            output.push_str(&String::from_utf8_lossy(&out.stderr));
            Ok(ExecOutcome::Completed {
                exit_code: out.status.code(),
                output,
            })
        }
        Err(_) => Ok(ExecOutcome::TimedOut),
    }
}
