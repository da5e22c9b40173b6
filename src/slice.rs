//! Stream-copy extraction of a time-bounded segment.

use std::ffi::OsString;
use std::path::Path;

use crate::error::CoreResult;
use crate::external::ToolRunner;
use crate::utils::{format_time, validate_offset};

/// Builds the ffmpeg argument list for a metadata-preserving stream copy of
/// one segment. The output is overwritten without prompting.
fn slice_args(input: &Path, output: &Path, start_secs: f64, duration_secs: f64) -> Vec<OsString> {
    vec![
        OsString::from("-y"),
        OsString::from("-ss"),
        OsString::from(format_time(start_secs)),
        OsString::from("-i"),
        OsString::from(input),
        OsString::from("-t"),
        OsString::from(format_time(duration_secs)),
        OsString::from("-map_metadata"),
        OsString::from("0"),
        OsString::from("-c:v"),
        OsString::from("copy"),
        OsString::from("-c:a"),
        OsString::from("copy"),
        OsString::from(output),
    ]
}

/// Copies the segment `[start_secs, start_secs + duration_secs)` of `input`
/// into `output` without re-encoding, preserving container metadata.
///
/// The input is not pre-checked; a missing or unreadable file surfaces as a
/// [`CoreError::CommandFailed`](crate::CoreError::CommandFailed) from the
/// tool itself. An existing file at `output` is overwritten. On failure no
/// cleanup of a partial output is attempted; ffmpeg owns that contract.
///
/// Concurrent calls targeting the same `output` are the caller's problem:
/// one writer per target path at a time.
pub fn slice_video<R: ToolRunner>(
    runner: &R,
    input: &Path,
    output: &Path,
    start_secs: f64,
    duration_secs: f64,
) -> CoreResult<()> {
    validate_offset("start", start_secs)?;
    validate_offset("duration", duration_secs)?;

    log::debug!(
        "Slicing {} -> {} (start={}, duration={})",
        input.display(),
        output.display(),
        format_time(start_secs),
        format_time(duration_secs)
    );

    runner.run(&slice_args(input, output, start_secs, duration_secs))?;
    Ok(())
}
