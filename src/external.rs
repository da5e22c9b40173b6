//! ffmpeg process execution and abstraction.
//!
//! The executable path is an explicit value on [`FfmpegTool`] rather than a
//! hard-coded lookup, so callers can point operations at a specific binary
//! and tests can substitute a fake one. The [`ToolRunner`] trait is the seam
//! operations are written against.

use std::ffi::OsString;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::Duration;

use crate::error::{CoreError, CoreResult};

/// Trait representing something that can run the external media tool and
/// return its captured output.
///
/// Implementations must treat a non-zero exit status as an error carrying
/// the tool's stderr text.
pub trait ToolRunner {
    /// Runs the tool with the given arguments, blocking until it exits.
    fn run(&self, args: &[OsString]) -> CoreResult<Output>;
}

/// Handle to an ffmpeg executable.
#[derive(Debug, Clone)]
pub struct FfmpegTool {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl Default for FfmpegTool {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegTool {
    /// Creates a handle that resolves `ffmpeg` via the search path at spawn time.
    pub fn new() -> Self {
        Self::with_program("ffmpeg")
    }

    /// Creates a handle for a specific executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Bounds each invocation; the child is killed once the limit elapses.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The executable this handle will spawn.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Checks that the executable is present and runnable.
    ///
    /// Runs the tool with `-version`, discarding output. Only the ability to
    /// start the process is checked, not its version contents.
    pub fn verify(&self) -> CoreResult<()> {
        let result = Command::new(&self.program)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match result {
            Ok(_) => {
                log::debug!("Found external tool: {}", self.program.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!("External tool '{}' not found.", self.program.display());
                Err(CoreError::DependencyNotFound(self.tool_name()))
            }
            Err(e) => {
                log::error!(
                    "Failed to start external tool check '{}': {}",
                    self.program.display(),
                    e
                );
                Err(CoreError::CommandStart(self.tool_name(), e))
            }
        }
    }

    fn tool_name(&self) -> String {
        self.program.display().to_string()
    }

    fn check_status(&self, output: Output) -> CoreResult<Output> {
        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            log::error!(
                "'{}' failed with exit code {}: {}",
                self.program.display(),
                code,
                stderr
            );
            return Err(CoreError::CommandFailed {
                tool: self.tool_name(),
                status: code,
                stderr,
            });
        }
        Ok(output)
    }

    fn run_with_timeout(&self, cmd: &mut Command, timeout: Duration) -> CoreResult<Output> {
        let mut child = cmd
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                log::error!("Failed to spawn '{}': {}", self.program.display(), e);
                CoreError::CommandStart(self.tool_name(), e)
            })?;

        // Drain the pipes on background threads so a chatty child cannot
        // block on a full pipe buffer while we poll for exit.
        let stdout = BufReader::new(child.stdout.take().expect("stdout was piped"));
        let stderr = BufReader::new(child.stderr.take().expect("stderr was piped"));

        let stdout_handle = std::thread::spawn(move || collect_lines(stdout));
        let stderr_handle = std::thread::spawn(move || collect_lines(stderr));

        let start = std::time::Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if start.elapsed() >= timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        log::error!(
                            "'{}' timed out after {} seconds",
                            self.program.display(),
                            timeout.as_secs()
                        );
                        return Err(CoreError::CommandTimeout {
                            tool: self.tool_name(),
                            seconds: timeout.as_secs(),
                        });
                    }
                    std::thread::sleep(Duration::from_millis(50));
                }
                Err(e) => return Err(CoreError::Io(e)),
            }
        };

        let stdout_lines = stdout_handle.join().unwrap_or_default();
        let stderr_lines = stderr_handle.join().unwrap_or_default();

        self.check_status(Output {
            status,
            stdout: stdout_lines.join("\n").into_bytes(),
            stderr: stderr_lines.join("\n").into_bytes(),
        })
    }
}

fn collect_lines(reader: impl BufRead) -> Vec<String> {
    reader.lines().map_while(|line| line.ok()).collect()
}

impl ToolRunner for FfmpegTool {
    fn run(&self, args: &[OsString]) -> CoreResult<Output> {
        log::debug!("Running: {} {:?}", self.program.display(), args);

        let mut cmd = Command::new(&self.program);
        cmd.args(args);

        match self.timeout {
            Some(timeout) => self.run_with_timeout(&mut cmd, timeout),
            None => {
                let output = cmd.output().map_err(|e| {
                    log::error!("Failed to execute '{}': {}", self.program.display(), e);
                    if e.kind() == io::ErrorKind::NotFound {
                        CoreError::DependencyNotFound(self.tool_name())
                    } else {
                        CoreError::CommandStart(self.tool_name(), e)
                    }
                })?;
                self.check_status(output)
            }
        }
    }
}

// --- Mocking infrastructure (for unit tests) ---


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_missing_program() {
        let tool = FfmpegTool::with_program("surely-this-binary-does-not-exist-42");
        match tool.verify() {
            Err(CoreError::DependencyNotFound(name)) => {
                assert!(name.contains("surely-this-binary-does-not-exist-42"));
            }
            other => panic!("Unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_run_missing_program() {
        let tool = FfmpegTool::with_program("surely-this-binary-does-not-exist-42");
        let result = tool.run(&[OsString::from("-version")]);
        assert!(matches!(result, Err(CoreError::DependencyNotFound(_))));
    }

    #[test]
    fn test_default_program_is_ffmpeg() {
        assert_eq!(FfmpegTool::new().program(), Path::new("ffmpeg"));
    }
}
