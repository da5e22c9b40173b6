//! Writing a generated title into a video's container metadata.
//!
//! ffmpeg cannot edit a container in place, so the video is stream-copied
//! into a sibling temporary file with the extra metadata field and the
//! temporary file is then renamed over the original. The rename is the
//! commit point: the original is either fully replaced or untouched, and
//! the temporary path never survives the call.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::external::ToolRunner;

/// Suffix appended to the original path for the in-flight copy.
const TEMP_SUFFIX: &str = ".temp";

/// Sibling path the tagged copy is written to before the rename.
fn temp_path(video: &Path) -> PathBuf {
    let mut path = video.as_os_str().to_os_string();
    path.push(TEMP_SUFFIX);
    PathBuf::from(path)
}

/// Builds the ffmpeg argument list for a full stream copy that injects the
/// `generate` metadata key.
fn title_args(video: &Path, title: &str, temp: &Path) -> Vec<OsString> {
    let mut metadata_arg = OsString::from("generate=");
    metadata_arg.push(title);

    vec![
        OsString::from("-y"),
        OsString::from("-i"),
        OsString::from(video),
        OsString::from("-c"),
        OsString::from("copy"),
        OsString::from("-metadata"),
        metadata_arg,
        OsString::from(temp),
    ]
}

/// Embeds `title` in the `generate` metadata field of the container at
/// `video`, replacing the file atomically.
///
/// The file must exist and the title must be non-empty; both are checked
/// before any subprocess is spawned. On any failure the original file is
/// left untouched and the `.temp` sibling is removed if it was created.
///
/// Concurrent calls against the same `video` race on the `.temp` sibling:
/// one writer per target path at a time.
pub fn add_title_to_metadata<R: ToolRunner>(
    runner: &R,
    video: &Path,
    title: &str,
) -> CoreResult<()> {
    if !video.exists() {
        log::warn!("Video file not found: {}", video.display());
        return Err(CoreError::InputNotFound(video.display().to_string()));
    }

    if title.is_empty() {
        log::warn!("No title provided for {}", video.display());
        return Err(CoreError::InvalidInput(
            "title must not be empty".to_string(),
        ));
    }

    let temp = temp_path(video);

    if let Err(e) = runner.run(&title_args(video, title, &temp)) {
        remove_if_present(&temp);
        return Err(e);
    }

    // Commit: rename over the original so there is no window where the
    // video is missing.
    if let Err(e) = fs::rename(&temp, video) {
        log::error!(
            "Failed to replace {} with tagged copy: {}",
            video.display(),
            e
        );
        remove_if_present(&temp);
        return Err(e.into());
    }

    log::info!("Added generated title to {}: {}", video.display(), title);
    Ok(())
}

fn remove_if_present(temp: &Path) {
    if temp.exists() {
        if let Err(e) = fs::remove_file(temp) {
            log::warn!(
                "Failed to remove temporary file {}: {}",
                temp.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::MockRunner;
    use std::ffi::OsStr;

    #[test]
    fn test_temp_path_appends_suffix() {
        assert_eq!(
            temp_path(Path::new("/videos/walk.mp4")),
            PathBuf::from("/videos/walk.mp4.temp")
        );
    }

    #[test]
    fn test_missing_video_fails_without_spawning() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.mp4");

        let runner = MockRunner::succeeding();
        let result = add_title_to_metadata(&runner, &missing, "Sunset Walk");

        assert!(matches!(result, Err(CoreError::InputNotFound(_))));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_empty_title_fails_without_spawning() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("walk.mp4");
        fs::write(&video, b"original").unwrap();

        let runner = MockRunner::succeeding();
        let result = add_title_to_metadata(&runner, &video, "");

        assert!(matches!(result, Err(CoreError::InvalidInput(_))));
        assert!(runner.calls().is_empty());
        assert_eq!(fs::read(&video).unwrap(), b"original");
    }

    #[test]
    fn test_success_replaces_original_and_removes_temp() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("walk.mp4");
        fs::write(&video, b"original").unwrap();

        let runner = MockRunner::succeeding();
        add_title_to_metadata(&runner, &video, "Sunset Walk").unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0][0].as_os_str(), OsStr::new("-y"));
        assert_eq!(calls[0][2].as_os_str(), video.as_os_str());
        assert_eq!(calls[0][6].as_os_str(), OsStr::new("generate=Sunset Walk"));
        assert_eq!(
            calls[0].last().unwrap().as_os_str(),
            temp_path(&video).as_os_str()
        );

        // The mock wrote its output to the temp path; the rename promoted it.
        assert_eq!(fs::read(&video).unwrap(), b"mock output");
        assert!(!temp_path(&video).exists());
    }

    #[test]
    fn test_tool_failure_leaves_original_and_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("walk.mp4");
        fs::write(&video, b"original").unwrap();

        let runner = MockRunner::failing_with_partial_output(1, "muxer exploded");
        let result = add_title_to_metadata(&runner, &video, "Sunset Walk");

        match result {
            Err(CoreError::CommandFailed { stderr, .. }) => {
                assert!(stderr.contains("muxer exploded"));
            }
            other => panic!("Unexpected result: {other:?}"),
        }
        assert_eq!(fs::read(&video).unwrap(), b"original");
        assert!(!temp_path(&video).exists());
    }
}
