use serde::{Deserialize, Serialize};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

fn default_sleep_millis() -> u64 {
    1500
}

fn default_timeout_ms() -> u64 {
    30_000
}

/// Asynchronous job a host runs while a button shows its spinner
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Work {
    /// Waits a fixed time
    Sleep {
        #[serde(default = "default_sleep_millis")]
        millis: u64,
    },
    /// Runs an external command to completion
    Command {
        command: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default = "default_timeout_ms")]
        timeout_ms: u64,
    },
}

impl Default for Work {
    fn default() -> Self {
        Work::Sleep {
            millis: default_sleep_millis(),
        }
    }
}

/// Result of running a [`Work`] item
#[derive(Debug, Clone, PartialEq)]
pub struct WorkOutcome {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub error_message: Option<String>,
}

impl WorkOutcome {
    pub fn success(exit_code: Option<i32>, stdout: String, stderr: String) -> Self {
        Self {
            success: true,
            exit_code,
            stdout,
            stderr,
            error_message: None,
        }
    }

    pub fn failure(exit_code: Option<i32>, stdout: String, stderr: String, error_message: String) -> Self {
        Self {
            success: false,
            exit_code,
            stdout,
            stderr,
            error_message: Some(error_message),
        }
    }

    /// Returns true if the work could not be run at all (spawn error or timeout)
    pub fn is_execution_error(&self) -> bool {
        !self.success && self.exit_code.is_none()
    }
}

/// Runs `work` on behalf of `button_name`
pub async fn run_work(work: &Work, button_name: &str) -> WorkOutcome {
    match work {
        Work::Sleep { millis } => {
            debug!("Work for '{}': sleeping {}ms", button_name, millis);
            tokio::time::sleep(Duration::from_millis(*millis)).await;
            WorkOutcome::success(None, String::new(), String::new())
        }
        Work::Command {
            command,
            args,
            timeout_ms,
        } => run_command(command, args, *timeout_ms, button_name).await,
    }
}

async fn run_command(command: &str, args: &[String], timeout_ms: u64, button_name: &str) -> WorkOutcome {
    info!(
        "Executing command for '{}': {} {:?} (timeout: {}ms)",
        button_name, command, args, timeout_ms
    );

    let mut cmd = Command::new(command);
    cmd.args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .stdin(Stdio::null())
        .kill_on_drop(true);

    let timeout = Duration::from_millis(timeout_ms);

    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => {
            let exit_code = output.status.code();
            let stdout = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
            let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();

            if !stdout.is_empty() {
                debug!("Command STDOUT for '{}': {}", button_name, stdout);
            }
            if !stderr.is_empty() {
                debug!("Command STDERR for '{}': {}", button_name, stderr);
            }

            if output.status.success() {
                info!("Command for '{}' succeeded", button_name);
                WorkOutcome::success(exit_code, stdout, stderr)
            } else {
                let message = format!("Command exited with status {:?}", exit_code);
                warn!("Command for '{}' failed: {}", button_name, message);
                WorkOutcome::failure(exit_code, stdout, stderr, message)
            }
        }
        Ok(Err(e)) => {
            error!("Failed to execute command for '{}': {} {:?} - {}", button_name, command, args, e);
            WorkOutcome::failure(None, String::new(), String::new(), format!("Command execution failed: {}", e))
        }
        Err(_) => {
            warn!(
                "Command for '{}' timed out after {}ms: {} {:?}",
                button_name, timeout_ms, command, args
            );
            WorkOutcome::failure(
                None,
                String::new(),
                String::new(),
                format!("Command timed out after {}ms", timeout_ms),
            )
        }
    }
}
