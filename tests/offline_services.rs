//! Production capabilities pointed at a closed local port.

use newsreel::{
    FeedConfig, ImageConfig, ImageRequest, ImageSource, RedditFeed, TopicFeed, UnsplashImages,
    acquire_image, resolve_topics,
};

const CLOSED_PORT: &str = "http://127.0.0.1:9";

fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "newsreel_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn unreachable_feed_resolves_to_no_topics() {
    let feed = RedditFeed::new(&FeedConfig {
        base_url: CLOSED_PORT.to_string(),
        timeout_secs: 2,
        ..FeedConfig::default()
    });
    assert!(feed.fetch_top(5).is_err());
    assert!(resolve_topics(&[], &feed, 5).is_empty());
}

#[test]
fn unreachable_image_service_yields_placeholder_of_requested_size() {
    let dir = temp_dir("offline_image");
    let dest = dir.join("background.jpg");
    let svc = UnsplashImages::new(&ImageConfig {
        base_url: CLOSED_PORT.to_string(),
        timeout_secs: 2,
        ..ImageConfig::default()
    });

    let req = ImageRequest {
        query: "ai,technology",
        width: 1280,
        height: 720,
        placeholder_rgb: [0, 0, 0],
    };
    assert_eq!(acquire_image(&svc, &req, &dest), ImageSource::Placeholder);

    let img = image::open(&dest).unwrap();
    assert_eq!((img.width(), img.height()), (1280, 720));
    std::fs::remove_dir_all(&dir).ok();
}
