//! Run orchestration.
//!
//! A run resolves topics, composes the script, then synthesizes speech, acquires the
//! background and muxes, strictly in that order. All three artifacts are named after one
//! [`RunId`].

use std::{
    fmt,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    config::NewsreelConfig,
    foundation::error::NewsreelResult,
    imagery::{ImageRequest, ImageService, UnsplashImages, acquire_image},
    mux::{FfmpegMuxer, MediaEncoder},
    script::compose_script,
    speech::{GoogleTts, SpeechSynthesizer},
    topics::{RedditFeed, TopicFeed, resolve_topics},
};

/// Names every artifact of one run.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RunId(String);

impl RunId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Local wall-clock seconds plus a random suffix, so runs in the same second differ.
    pub fn generate() -> Self {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let token = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("{stamp}_{}", &token[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineArtifacts {
    pub audio: PathBuf,
    pub image: PathBuf,
    pub video: PathBuf,
}

impl PipelineArtifacts {
    pub fn for_run(dir: &Path, run_id: &RunId) -> Self {
        Self {
            audio: dir.join(format!("voice_{run_id}.mp3")),
            image: dir.join(format!("background_{run_id}.jpg")),
            video: dir.join(format!("output_{run_id}.mp4")),
        }
    }
}

/// Progress of a single run.
///
/// `Failed` follows the speech and mux steps, and also local filesystem errors (creating
/// the output directory, resolving the final path). Image acquisition never fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStage {
    Start,
    TopicsResolved,
    ScriptComposed,
    AudioReady,
    ImageReady,
    VideoReady,
    Failed,
}

#[derive(Clone, Debug)]
pub struct PipelineSettings {
    pub output_dir: PathBuf,
    pub topic_limit: u32,
    pub image_query: String,
    pub width: u32,
    pub height: u32,
    pub placeholder_rgb: [u8; 3],
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from_config(&NewsreelConfig::default())
    }
}

impl PipelineSettings {
    pub fn from_config(cfg: &NewsreelConfig) -> Self {
        Self {
            output_dir: cfg.output_dir.clone(),
            topic_limit: cfg.feed.limit,
            image_query: cfg.images.query.clone(),
            width: cfg.images.width,
            height: cfg.images.height,
            placeholder_rgb: cfg.images.placeholder_rgb,
        }
    }
}

/// Topics in, narrated video out.
pub struct Pipeline {
    feed: Box<dyn TopicFeed>,
    speech: Box<dyn SpeechSynthesizer>,
    images: Box<dyn ImageService>,
    encoder: Box<dyn MediaEncoder>,
    settings: PipelineSettings,
}

impl Pipeline {
    pub fn new(
        feed: Box<dyn TopicFeed>,
        speech: Box<dyn SpeechSynthesizer>,
        images: Box<dyn ImageService>,
        encoder: Box<dyn MediaEncoder>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            feed,
            speech,
            images,
            encoder,
            settings,
        }
    }

    /// Wire the network services and the system encoder.
    pub fn from_config(cfg: &NewsreelConfig) -> Self {
        Self::new(
            Box::new(RedditFeed::new(&cfg.feed)),
            Box::new(GoogleTts::new(&cfg.speech)),
            Box::new(UnsplashImages::new(&cfg.images)),
            Box::new(FfmpegMuxer::new(cfg.encoder.program.clone())),
            PipelineSettings::from_config(cfg),
        )
    }

    /// Narration text for the resolved topics, without touching speech, images or video.
    pub fn script(&self, topic_override: &[String]) -> String {
        let topics = resolve_topics(topic_override, self.feed.as_ref(), self.settings.topic_limit);
        compose_script(&topics)
    }

    pub fn run(&self, topic_override: &[String]) -> NewsreelResult<PathBuf> {
        self.run_with_id(topic_override, &RunId::generate())
    }

    /// Run every stage under an explicit identifier and return the absolute video path.
    ///
    /// Audio and image files stay on disk whether or not the run succeeds.
    #[tracing::instrument(skip(self, topic_override, run_id), fields(run = %run_id))]
    pub fn run_with_id(
        &self,
        topic_override: &[String],
        run_id: &RunId,
    ) -> NewsreelResult<PathBuf> {
        trace_stage(RunStage::Start);
        let topics = resolve_topics(topic_override, self.feed.as_ref(), self.settings.topic_limit);
        trace_stage(RunStage::TopicsResolved);

        let script = compose_script(&topics);
        trace_stage(RunStage::ScriptComposed);

        let dir = &self.settings.output_dir;
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create output directory '{}'", dir.display()))
                .inspect_err(|_| trace_stage(RunStage::Failed))?;
        }
        let artifacts = PipelineArtifacts::for_run(dir, run_id);

        self.speech
            .synthesize(&script, &artifacts.audio)
            .inspect_err(|_| trace_stage(RunStage::Failed))?;
        trace_stage(RunStage::AudioReady);

        let req = ImageRequest {
            query: &self.settings.image_query,
            width: self.settings.width,
            height: self.settings.height,
            placeholder_rgb: self.settings.placeholder_rgb,
        };
        let source = acquire_image(self.images.as_ref(), &req, &artifacts.image);
        tracing::debug!(?source, "background ready");
        trace_stage(RunStage::ImageReady);

        self.encoder
            .mux(&artifacts.image, &artifacts.audio, &artifacts.video)
            .inspect_err(|_| trace_stage(RunStage::Failed))?;
        trace_stage(RunStage::VideoReady);

        let video = std::path::absolute(&artifacts.video)
            .with_context(|| format!("resolve absolute path of '{}'", artifacts.video.display()))
            .inspect_err(|_| trace_stage(RunStage::Failed))?;
        Ok(video)
    }
}

fn trace_stage(stage: RunStage) {
    match stage {
        RunStage::Failed => tracing::error!(?stage, "run failed"),
        _ => tracing::info!(?stage, "stage reached"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifacts_share_the_run_id() {
        let id = RunId::new("20250101_120000_deadbeef");
        let a = PipelineArtifacts::for_run(Path::new("out"), &id);
        assert_eq!(a.audio, Path::new("out/voice_20250101_120000_deadbeef.mp3"));
        assert_eq!(a.image, Path::new("out/background_20250101_120000_deadbeef.jpg"));
        assert_eq!(a.video, Path::new("out/output_20250101_120000_deadbeef.mp4"));
    }

    #[test]
    fn generated_ids_differ_within_the_same_second() {
        let a = RunId::generate();
        let b = RunId::generate();
        assert_ne!(a, b);
        // YYYYmmdd_HHMMSS_xxxxxxxx
        assert_eq!(a.as_str().len(), 24);
        assert_eq!(&a.as_str()[8..9], "_");
    }

    #[test]
    fn settings_follow_config() {
        let mut cfg = NewsreelConfig::default();
        cfg.output_dir = PathBuf::from("videos");
        cfg.feed.limit = 3;
        let s = PipelineSettings::from_config(&cfg);
        assert_eq!(s.output_dir, PathBuf::from("videos"));
        assert_eq!(s.topic_limit, 3);
        assert_eq!((s.width, s.height), (1280, 720));
    }
}
