//! Still-image video muxing.

use crate::{Error, Result};
use std::path::Path;
use std::process::Command;

/// Encoder options for still-image muxing.
///
/// The defaults loop a single frame for the length of the audio track,
/// encode video with libx264 tuned for static content, and encode audio
/// as AAC at a fixed bitrate. Output is terminated at the shorter input
/// stream, which in practice is the audio.
#[derive(Debug, Clone)]
pub struct MuxOptions {
    /// Video codec name passed to `-c:v`.
    pub video_codec: String,
    /// Encoder tune passed to `-tune`.
    pub video_tune: String,
    /// Audio codec name passed to `-c:a`.
    pub audio_codec: String,
    /// Audio bitrate passed to `-b:a`.
    pub audio_bitrate: String,
    /// Pixel format passed to `-pix_fmt`.
    pub pixel_format: String,
}

impl Default for MuxOptions {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            video_tune: "stillimage".to_string(),
            audio_codec: "aac".to_string(),
            audio_bitrate: "192k".to_string(),
            pixel_format: "yuv420p".to_string(),
        }
    }
}

/// Mux a still image and an audio track into a single video file.
///
/// Loops the image for the duration of the audio and stops at the shorter
/// of the two input streams. The output file is written to `output`; the
/// caller owns the surrounding workspace and its cleanup.
pub fn mux_still_image(
    image: &Path,
    audio: &Path,
    output: &Path,
    options: &MuxOptions,
) -> Result<()> {
    if !image.exists() {
        return Err(Error::file_not_found(image));
    }
    if !audio.exists() {
        return Err(Error::file_not_found(audio));
    }

    #[cfg(feature = "tracing")]
    tracing::debug!("Muxing {:?} + {:?} -> {:?}", image, audio, output);

    let mut cmd = Command::new("ffmpeg");
    cmd.args(ffmpeg_args(image, audio, output, options));

    let result = cmd.output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::tool_not_found("ffmpeg")
        } else {
            Error::Io(e)
        }
    })?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(Error::tool_failed("ffmpeg", stderr.to_string()));
    }

    #[cfg(feature = "tracing")]
    tracing::info!("Mux complete: {:?}", output);

    Ok(())
}

/// Build the ffmpeg argument list for a still-image mux.
fn ffmpeg_args(image: &Path, audio: &Path, output: &Path, options: &MuxOptions) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-loop".to_string(),
        "1".to_string(),
        "-i".to_string(),
        image.to_string_lossy().to_string(),
        "-i".to_string(),
        audio.to_string_lossy().to_string(),
        "-c:v".to_string(),
        options.video_codec.clone(),
        "-tune".to_string(),
        options.video_tune.clone(),
        "-c:a".to_string(),
        options.audio_codec.clone(),
        "-b:a".to_string(),
        options.audio_bitrate.clone(),
        "-pix_fmt".to_string(),
        options.pixel_format.clone(),
        "-shortest".to_string(),
        output.to_string_lossy().to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Workspace;
    use std::path::PathBuf;

    #[test]
    fn test_default_options() {
        let options = MuxOptions::default();
        assert_eq!(options.video_codec, "libx264");
        assert_eq!(options.video_tune, "stillimage");
        assert_eq!(options.audio_codec, "aac");
        assert_eq!(options.audio_bitrate, "192k");
        assert_eq!(options.pixel_format, "yuv420p");
    }

    #[test]
    fn test_ffmpeg_args_order() {
        let args = ffmpeg_args(
            &PathBuf::from("/work/frame.png"),
            &PathBuf::from("/work/narration.mp3"),
            &PathBuf::from("/work/video.mp4"),
            &MuxOptions::default(),
        );

        // The image input must be looped and the output capped at the
        // shorter stream, so the audio bounds the video length.
        let loop_pos = args.iter().position(|a| a == "-loop").unwrap();
        let image_pos = args.iter().position(|a| a == "/work/frame.png").unwrap();
        assert!(loop_pos < image_pos);
        assert!(args.contains(&"-shortest".to_string()));
        assert!(args.contains(&"stillimage".to_string()));
        assert_eq!(args.last().unwrap(), "/work/video.mp4");
    }

    #[test]
    fn test_mux_missing_inputs() {
        let workspace = Workspace::new().unwrap();
        let err = mux_still_image(
            &workspace.file("frame.png"),
            &workspace.file("narration.mp3"),
            &workspace.file("video.mp4"),
            &MuxOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_workspace_removed_after_mux_failure() {
        let workspace = Workspace::new().unwrap();
        let dir = workspace.dir().to_path_buf();

        // Garbage inputs: the mux fails whether or not ffmpeg is installed.
        let image = workspace.write_file("frame.png", b"not a png").unwrap();
        let audio = workspace.write_file("narration.mp3", b"not audio").unwrap();
        let output = workspace.file("video.mp4");
        assert!(mux_still_image(&image, &audio, &output, &MuxOptions::default()).is_err());

        drop(workspace);
        assert!(!dir.exists());
    }
}
