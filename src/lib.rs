//! Thin, blocking orchestration over ffmpeg for two operations: slicing a
//! time-bounded segment out of a video by stream copy, and stamping a
//! generated title into a video's container metadata.
//!
//! Both operations spawn one ffmpeg process, block until it exits, and
//! surface any non-zero exit as a structured error carrying the captured
//! stderr. Nothing is re-encoded; ffmpeg copies streams as-is.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use vidslice::{add_title_to_metadata, slice_video, FfmpegTool};
//!
//! let ffmpeg = FfmpegTool::new();
//! ffmpeg.verify().expect("ffmpeg must be installed");
//!
//! // Cut five seconds starting at 00:00:10, keeping container metadata.
//! slice_video(
//!     &ffmpeg,
//!     Path::new("stream.mp4"),
//!     Path::new("highlight.mp4"),
//!     10.0,
//!     5.0,
//! )
//! .unwrap();
//!
//! // Tag the clip with a generated title, replacing the file in place.
//! add_title_to_metadata(&ffmpeg, Path::new("highlight.mp4"), "Sunset Walk").unwrap();
//! ```

pub mod error;
pub mod external;
pub mod metadata;
pub mod slice;
pub mod utils;

// Re-exports for public API
pub use error::{CoreError, CoreResult};
pub use external::{FfmpegTool, ToolRunner};
pub use metadata::add_title_to_metadata;
pub use slice::slice_video;
pub use utils::format_time;
