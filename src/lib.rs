//! Newsreel turns a handful of news topics into a short narrated video.
//!
//! A run resolves topics (caller override or a live feed), composes narration, synthesizes
//! speech, fetches a background image (falling back to a local placeholder) and muxes the
//! two into an MP4 with the system `ffmpeg`. Every external service sits behind a
//! one-method trait so [`Pipeline`] can be wired with fakes.
#![forbid(unsafe_code)]

mod foundation;

pub mod config;
pub mod imagery;
pub mod mux;
pub mod pipeline;
pub mod script;
pub mod speech;
pub mod topics;

pub use crate::config::{EncoderConfig, FeedConfig, ImageConfig, NewsreelConfig, SpeechConfig};
pub use crate::foundation::error::{NewsreelError, NewsreelResult};
pub use crate::imagery::{
    ImageRequest, ImageService, ImageSource, UnsplashImages, acquire_image, write_placeholder,
};
pub use crate::mux::{FfmpegMuxer, MediaEncoder, is_program_on_path, mux_args};
pub use crate::pipeline::{Pipeline, PipelineArtifacts, PipelineSettings, RunId, RunStage};
pub use crate::script::compose_script;
pub use crate::speech::{GoogleTts, SpeechSynthesizer, split_for_tts};
pub use crate::topics::{RedditFeed, Topic, TopicFeed, parse_listing, resolve_topics};
