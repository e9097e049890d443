//! Background image acquisition with a locally rendered fallback.

use std::{path::Path, time::Duration};

use anyhow::Context as _;

use crate::{
    config::ImageConfig,
    foundation::error::{NewsreelError, NewsreelResult},
};

pub trait ImageService {
    /// Fetch encoded image bytes matching a comma-joined keyword `query`.
    fn fetch(&self, query: &str, width: u32, height: u32) -> NewsreelResult<Vec<u8>>;
}

/// Randomized keyword images from Unsplash Source.
pub struct UnsplashImages {
    base_url: String,
    timeout: Duration,
}

impl UnsplashImages {
    pub fn new(cfg: &ImageConfig) -> Self {
        Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            timeout: cfg.timeout(),
        }
    }

    pub fn image_url(&self, query: &str, width: u32, height: u32) -> String {
        format!("{}/random/{width}x{height}/?{query}", self.base_url)
    }
}

impl ImageService for UnsplashImages {
    fn fetch(&self, query: &str, width: u32, height: u32) -> NewsreelResult<Vec<u8>> {
        let url = self.image_url(query, width, height);
        tracing::debug!(%url, "requesting background image");

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| NewsreelError::fetch(format!("build image client: {e}")))?;

        let bytes = client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.bytes())
            .map_err(|e| NewsreelError::fetch(format!("image request to {url}: {e}")))?;
        if bytes.is_empty() {
            return Err(NewsreelError::fetch(format!(
                "image service returned no bytes for {url}"
            )));
        }
        Ok(bytes.to_vec())
    }
}

/// Which path produced the background image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageSource {
    Fetched,
    Placeholder,
}

#[derive(Clone, Debug)]
pub struct ImageRequest<'a> {
    pub query: &'a str,
    pub width: u32,
    pub height: u32,
    pub placeholder_rgb: [u8; 3],
}

/// Fetch a background image into `dest`, or render a solid placeholder there.
///
/// Never fails: the placeholder is the fallback for every fetch, decode or write error.
/// Fetched bytes are written verbatim once they decode as an image.
pub fn acquire_image(
    service: &dyn ImageService,
    req: &ImageRequest<'_>,
    dest: &Path,
) -> ImageSource {
    let fetched = service
        .fetch(req.query, req.width, req.height)
        .and_then(|bytes| {
            let format = image::guess_format(&bytes)
                .map_err(|e| NewsreelError::fetch(format!("image body is not an image: {e}")))?;
            image::load_from_memory_with_format(&bytes, format).map_err(|e| {
                NewsreelError::fetch(format!("image body does not decode as {format:?}: {e}"))
            })?;
            std::fs::write(dest, &bytes)
                .with_context(|| format!("write image '{}'", dest.display()))
                .map_err(NewsreelError::from)
        });

    match fetched {
        Ok(()) => {
            tracing::info!(path = %dest.display(), "downloaded background image");
            ImageSource::Fetched
        }
        Err(e) => {
            tracing::warn!(error = %e, "image service unavailable, using placeholder");
            if let Err(e) = write_placeholder(dest, req.width, req.height, req.placeholder_rgb) {
                tracing::error!(
                    error = %e,
                    path = %dest.display(),
                    "failed to write placeholder image"
                );
            }
            ImageSource::Placeholder
        }
    }
}

/// Solid-color image of `width`x`height`, encoded by `dest`'s extension.
pub fn write_placeholder(
    dest: &Path,
    width: u32,
    height: u32,
    rgb: [u8; 3],
) -> NewsreelResult<()> {
    let img = image::RgbImage::from_pixel(width.max(1), height.max(1), image::Rgb(rgb));
    img.save(dest)
        .with_context(|| format!("write placeholder '{}'", dest.display()))?;
    Ok(())
}
