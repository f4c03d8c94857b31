//! # vidforge-av
//!
//! Media assembly library for vidforge.
//!
//! This crate provides the filesystem-facing half of video generation:
//! - Scoped temporary workspaces that are deleted on every exit path
//! - Muxing a still image and an audio track into a single video container
//! - External tool detection (ffmpeg)
//!
//! ## Example
//!
//! ```no_run
//! use vidforge_av::{mux_still_image, MuxOptions, Workspace};
//!
//! let workspace = Workspace::new()?;
//! let image = workspace.write_file("frame.png", b"...")?;
//! let audio = workspace.write_file("narration.mp3", b"...")?;
//! let output = workspace.file("video.mp4");
//! mux_still_image(&image, &audio, &output, &MuxOptions::default())?;
//! # Ok::<(), vidforge_av::Error>(())
//! ```

mod error;
pub mod mux;
pub mod tools;
pub mod workspace;

// Re-exports
pub use error::{Error, Result};
pub use mux::{mux_still_image, MuxOptions};
pub use tools::{check_tool, check_tools, require_tool, ToolInfo};
pub use workspace::Workspace;
