use serde::{Deserialize, Serialize};

/// A video highlight of a finished match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub id: String,
    pub team1: String,
    pub team2: String,
    pub category: String,
    /// Display text, not necessarily a parseable date.
    pub date: String,
    pub link: String,
}

impl Highlight {
    /// The video id embedded in `link`: the `v=` query value, else the last path segment.
    pub fn video_id(&self) -> Option<&str> {
        let id = match self.link.split_once("v=") {
            Some((_, rest)) => rest.split('&').next().unwrap_or_default(),
            None => self.link.rsplit('/').next().unwrap_or_default(),
        };
        (!id.is_empty()).then_some(id)
    }

    pub fn thumbnail_url(&self) -> String {
        match self.video_id() {
            Some(video_id) => format!("https://img.youtube.com/vi/{video_id}/hqdefault.jpg"),
            None => format!("https://picsum.photos/seed/{}/800/450", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlight(link: &str) -> Highlight {
        Highlight {
            id: "h7".to_string(),
            team1: "A".to_string(),
            team2: "B".to_string(),
            category: "Cricket".to_string(),
            date: "TBD".to_string(),
            link: link.to_string(),
        }
    }

    #[test]
    fn thumbnail_from_watch_url() {
        let h = highlight("https://www.youtube.com/watch?v=abc123&t=4s");
        assert_eq!(h.thumbnail_url(), "https://img.youtube.com/vi/abc123/hqdefault.jpg");
    }

    #[test]
    fn thumbnail_from_short_url() {
        let h = highlight("https://youtu.be/xyz789");
        assert_eq!(h.video_id(), Some("xyz789"));
    }

    #[test]
    fn thumbnail_falls_back_to_seeded_placeholder() {
        assert_eq!(
            highlight("").thumbnail_url(),
            "https://picsum.photos/seed/h7/800/450"
        );
        assert_eq!(highlight("https://example.com/videos/").video_id(), None);
    }
}
