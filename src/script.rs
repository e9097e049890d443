//! Narration text.

use crate::topics::Topic;

pub const GREETING: &str = "Hello and welcome to today's AI news update.";
pub const NO_STORIES: &str =
    "Unfortunately, I could not retrieve the latest stories. Please check back later.";
pub const CLOSING: &str =
    "Thank you for watching. Don't forget to like and subscribe for more AI news!";

/// Render topics into narration text, one line per story, in input order.
pub fn compose_script(topics: &[Topic]) -> String {
    let mut lines = Vec::with_capacity(topics.len() + 2);
    lines.push(GREETING.to_string());
    if topics.is_empty() {
        lines.push(NO_STORIES.to_string());
    } else {
        lines.extend(
            topics
                .iter()
                .enumerate()
                .map(|(i, topic)| format!("Story {}: {}.", i + 1, topic.title)),
        );
    }
    lines.push(CLOSING.to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_topics_render_the_fallback_line() {
        let script = compose_script(&[]);
        assert_eq!(script, format!("{GREETING}\n{NO_STORIES}\n{CLOSING}"));
        assert!(!script.contains("Story"));
    }

    #[test]
    fn stories_are_numbered_in_input_order() {
        let script = compose_script(&[Topic::from_title("A"), Topic::from_title("B")]);
        let lines: Vec<&str> = script.lines().collect();
        assert_eq!(lines, vec![GREETING, "Story 1: A.", "Story 2: B.", CLOSING]);
    }

    #[test]
    fn composition_is_deterministic() {
        let topics = vec![
            Topic::new("Chips get faster", "https://reddit.com/r/a/1"),
            Topic::from_title("Models get bigger"),
        ];
        assert_eq!(compose_script(&topics), compose_script(&topics.clone()));
    }

    #[test]
    fn urls_do_not_leak_into_narration() {
        let script = compose_script(&[Topic::new("T", "https://reddit.com/r/x")]);
        assert!(!script.contains("reddit.com"));
    }
}
