//! Still image + audio to MP4 via the system `ffmpeg`.

use std::{
    ffi::OsString,
    path::Path,
    process::{Command, Stdio},
};

use crate::foundation::error::{NewsreelError, NewsreelResult};

pub trait MediaEncoder {
    /// Combine a still image and an audio track into a video as long as the audio.
    fn mux(&self, image: &Path, audio: &Path, output: &Path) -> NewsreelResult<()>;
}

pub fn is_program_on_path(program: &str) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> NewsreelResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// The system `ffmpeg` binary, looping the image over the audio.
#[derive(Clone, Debug)]
pub struct FfmpegMuxer {
    program: String,
}

impl Default for FfmpegMuxer {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FfmpegMuxer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

/// Full argument list for one mux. Overwrites `output` without prompting.
pub fn mux_args(image: &Path, audio: &Path, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-y", "-loop", "1", "-i"].map(OsString::from).to_vec();
    args.push(image.into());
    args.push("-i".into());
    args.push(audio.into());
    args.extend(
        [
            "-c:v",
            "libx264",
            "-tune",
            "stillimage",
            "-c:a",
            "aac",
            "-b:a",
            "192k",
            "-pix_fmt",
            "yuv420p",
            // The looped image never ends, so this cuts the video at the audio's length.
            "-shortest",
        ]
        .map(OsString::from),
    );
    args.push(output.into());
    args
}

impl MediaEncoder for FfmpegMuxer {
    fn mux(&self, image: &Path, audio: &Path, output: &Path) -> NewsreelResult<()> {
        ensure_parent_dir(output)?;

        let args = mux_args(image, audio, output);
        tracing::debug!(program = %self.program, ?args, "spawning encoder");

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        let out = match result {
            Ok(out) => out,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(NewsreelError::dependency_missing(&self.program));
            }
            Err(e) => {
                return Err(NewsreelError::execution_failed(
                    &self.program,
                    "failed to spawn",
                    e.to_string(),
                ));
            }
        };

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(NewsreelError::execution_failed(
                &self.program,
                out.status.to_string(),
                stderr.trim(),
            ));
        }

        tracing::info!(path = %output.display(), "muxed video");
        Ok(())
    }
}
