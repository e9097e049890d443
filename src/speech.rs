//! Narration to audio through an online text-to-speech endpoint.
//!
//! There is no offline substitute for speech: every failure here is fatal to the run.

use std::{path::Path, time::Duration};

use crate::{
    config::SpeechConfig,
    foundation::error::{NewsreelError, NewsreelResult},
};

/// Longest text the translate TTS endpoint accepts in one request.
pub const MAX_CHUNK_CHARS: usize = 100;

pub trait SpeechSynthesizer {
    /// Write spoken `text` as an audio file at `dest`.
    fn synthesize(&self, text: &str, dest: &Path) -> NewsreelResult<()>;
}

/// Google Translate's public TTS endpoint. Produces MP3.
pub struct GoogleTts {
    endpoint: String,
    lang: String,
    timeout: Duration,
}

impl GoogleTts {
    pub fn new(cfg: &SpeechConfig) -> Self {
        Self {
            endpoint: cfg.endpoint.clone(),
            lang: cfg.lang.clone(),
            timeout: cfg.timeout(),
        }
    }
}

impl SpeechSynthesizer for GoogleTts {
    fn synthesize(&self, text: &str, dest: &Path) -> NewsreelResult<()> {
        let chunks = split_for_tts(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(NewsreelError::synthesis("nothing to speak"));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| NewsreelError::synthesis(format!("build tts client: {e}")))?;

        let total = chunks.len();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let total_s = total.to_string();
            let idx_s = idx.to_string();
            let bytes = client
                .get(&self.endpoint)
                .query(&[
                    ("ie", "UTF-8"),
                    ("client", "tw-ob"),
                    ("tl", self.lang.as_str()),
                    ("total", total_s.as_str()),
                    ("idx", idx_s.as_str()),
                    ("q", chunk.as_str()),
                ])
                .send()
                .and_then(|r| r.error_for_status())
                .and_then(|r| r.bytes())
                .map_err(|e| {
                    NewsreelError::synthesis(format!("tts chunk {}/{total}: {e}", idx + 1))
                })?;
            if bytes.is_empty() {
                return Err(NewsreelError::synthesis(format!(
                    "tts chunk {}/{total} returned no audio",
                    idx + 1
                )));
            }
            audio.extend_from_slice(&bytes);
        }

        // MPEG audio frames are self-delimiting, so chunk responses concatenate cleanly.
        std::fs::write(dest, &audio).map_err(|e| {
            NewsreelError::synthesis(format!("write audio '{}': {e}", dest.display()))
        })?;
        tracing::info!(
            path = %dest.display(),
            chunks = total,
            bytes = audio.len(),
            "wrote narration audio"
        );
        Ok(())
    }
}

/// Split text into pieces of at most `max_chars` characters, breaking on whitespace.
///
/// Words longer than `max_chars` are hard-split. Newlines count as whitespace.
pub fn split_for_tts(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
