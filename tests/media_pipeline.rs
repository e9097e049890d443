//! Real `ffmpeg` runs. Skipped when ffmpeg/ffprobe are not installed.

use std::{path::Path, process::Command};

use newsreel::{FfmpegMuxer, MediaEncoder, is_program_on_path, write_placeholder};

fn ffmpeg_tools_available() -> bool {
    is_program_on_path("ffmpeg") && is_program_on_path("ffprobe")
}

fn synth_tone(path: &Path, seconds: u32) -> anyhow::Result<()> {
    let status = Command::new("ffmpeg")
        .args([
            "-v",
            "error",
            "-y",
            "-f",
            "lavfi",
            "-i",
            "sine=frequency=440:sample_rate=44100",
            "-t",
            &seconds.to_string(),
            "-c:a",
            "libmp3lame",
        ])
        .arg(path)
        .status()?;
    anyhow::ensure!(status.success(), "ffmpeg failed creating tone");
    Ok(())
}

fn probe_duration(path: &Path) -> anyhow::Result<f64> {
    let out = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .output()?;
    anyhow::ensure!(out.status.success(), "ffprobe failed");
    Ok(String::from_utf8_lossy(&out.stdout).trim().parse()?)
}

#[test]
fn muxed_video_lasts_as_long_as_the_audio() {
    if !ffmpeg_tools_available() {
        return;
    }
    let root = std::env::temp_dir().join(format!("newsreel_media_{}", std::process::id()));
    std::fs::create_dir_all(&root).unwrap();

    let audio = root.join("voice.mp3");
    let image = root.join("background.jpg");
    let video = root.join("out").join("output.mp4");

    if synth_tone(&audio, 2).is_err() {
        // ffmpeg build without libmp3lame.
        std::fs::remove_dir_all(&root).ok();
        return;
    }
    write_placeholder(&image, 320, 180, [0, 0, 0]).unwrap();

    FfmpegMuxer::default().mux(&image, &audio, &video).unwrap();

    let audio_len = probe_duration(&audio).unwrap();
    let video_len = probe_duration(&video).unwrap();
    assert!(
        (video_len - audio_len).abs() < 0.5,
        "video {video_len}s vs audio {audio_len}s"
    );

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn corrupt_audio_reports_encoder_diagnostics() {
    if !ffmpeg_tools_available() {
        return;
    }
    let root = std::env::temp_dir().join(format!("newsreel_media_bad_{}", std::process::id()));
    std::fs::create_dir_all(&root).unwrap();

    let audio = root.join("voice.mp3");
    let image = root.join("background.png");
    std::fs::write(&audio, b"definitely not audio").unwrap();
    write_placeholder(&image, 16, 16, [0, 0, 0]).unwrap();

    let err = FfmpegMuxer::default()
        .mux(&image, &audio, &root.join("output.mp4"))
        .unwrap_err();
    match err {
        newsreel::NewsreelError::ExecutionFailed { stderr, .. } => assert!(!stderr.is_empty()),
        other => panic!("expected ExecutionFailed, got {other:?}"),
    }

    std::fs::remove_dir_all(&root).ok();
}
