//! JSON configuration.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{NewsreelError, NewsreelResult};

/// Everything a run needs that is not code: where to write, what to narrate and how to
/// reach each external service.
///
/// Every field has a default so a partial JSON document (or the admin dashboard's
/// `{"topics": [...]}` file) deserializes as-is.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsreelConfig {
    pub output_dir: PathBuf,
    /// Ordered topic override. Empty means "ask the feed".
    pub topics: Vec<String>,
    pub feed: FeedConfig,
    pub images: ImageConfig,
    pub speech: SpeechConfig,
    pub encoder: EncoderConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub base_url: String,
    pub subreddit: String,
    pub limit: u32,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.reddit.com".to_string(),
            subreddit: "artificial".to_string(),
            limit: 5,
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (compatible; newsreel/0.1)".to_string(),
        }
    }
}

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub base_url: String,
    /// Comma-joined keyword terms.
    pub query: String,
    pub width: u32,
    pub height: u32,
    pub timeout_secs: u64,
    pub placeholder_rgb: [u8; 3],
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: "https://source.unsplash.com".to_string(),
            query: "ai,technology".to_string(),
            width: 1280,
            height: 720,
            timeout_secs: 15,
            placeholder_rgb: [0, 0, 0],
        }
    }
}

impl ImageConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub endpoint: String,
    pub lang: String,
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://translate.google.com/translate_tts".to_string(),
            lang: "en".to_string(),
            timeout_secs: 15,
        }
    }
}

impl SpeechConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub program: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
        }
    }
}

impl NewsreelConfig {
    pub fn from_json_file(path: &Path) -> NewsreelResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            NewsreelError::serde(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> NewsreelResult<()> {
        if self.feed.limit == 0 {
            return Err(NewsreelError::validation("feed.limit must be non-zero"));
        }
        if self.images.width == 0 || self.images.height == 0 {
            return Err(NewsreelError::validation(
                "images.width/height must be non-zero",
            ));
        }
        if self.feed.timeout_secs == 0
            || self.images.timeout_secs == 0
            || self.speech.timeout_secs == 0
        {
            return Err(NewsreelError::validation("timeouts must be non-zero"));
        }
        if self.encoder.program.trim().is_empty() {
            return Err(NewsreelError::validation("encoder.program must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_services() {
        let cfg = NewsreelConfig::default();
        assert!(cfg.topics.is_empty());
        assert_eq!(cfg.feed.limit, 5);
        assert_eq!(cfg.feed.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.images.timeout(), Duration::from_secs(15));
        assert_eq!((cfg.images.width, cfg.images.height), (1280, 720));
        assert_eq!(cfg.images.query, "ai,technology");
        assert_eq!(cfg.encoder.program, "ffmpeg");
        cfg.validate().unwrap();
    }

    #[test]
    fn admin_topic_file_deserializes_with_defaults() {
        let cfg: NewsreelConfig =
            serde_json::from_str(r#"{"topics": ["GPT news", "Robots"], "admin": "x"}"#).unwrap();
        assert_eq!(cfg.topics, vec!["GPT news", "Robots"]);
        assert_eq!(cfg.feed.subreddit, "artificial");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let cfg: NewsreelConfig =
            serde_json::from_str(r#"{"images": {"width": 640}}"#).unwrap();
        assert_eq!(cfg.images.width, 640);
        assert_eq!(cfg.images.height, 720);
    }

    #[test]
    fn validation_catches_bad_values() {
        let mut cfg = NewsreelConfig::default();
        cfg.feed.limit = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = NewsreelConfig::default();
        cfg.images.height = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = NewsreelConfig::default();
        cfg.speech.timeout_secs = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = NewsreelConfig::default();
        cfg.encoder.program = " ".to_string();
        assert!(cfg.validate().is_err());
    }
}
