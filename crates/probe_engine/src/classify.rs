use scraper::{Html, Selector};

/// Structural heuristic deciding whether a response page carries real,
/// non-empty search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsabilityClassifier {
    min_content_chars: usize,
    link_threshold: usize,
}

impl ParsabilityClassifier {
    pub const DEFAULT_MIN_CONTENT_CHARS: usize = 500;
    pub const DEFAULT_LINK_THRESHOLD: usize = 5;

    pub fn new(min_content_chars: usize, link_threshold: usize) -> Self {
        Self {
            min_content_chars,
            link_threshold,
        }
    }

    /// A body is parsable when it is long enough to be a real document and
    /// contains strictly more than `link_threshold` anchor elements.
    /// Bodies below the length floor are rejected without parsing.
    /// Malformed markup never raises; it classifies as not parsable.
    pub fn is_parsable(&self, body: &str) -> bool {
        if body.chars().count() < self.min_content_chars {
            return false;
        }
        let Ok(anchors) = Selector::parse("a") else {
            return false;
        };
        let document = Html::parse_document(body);
        document.select(&anchors).count() > self.link_threshold
    }
}

impl Default for ParsabilityClassifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_CONTENT_CHARS, Self::DEFAULT_LINK_THRESHOLD)
    }
}
