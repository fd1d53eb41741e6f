use serde::{Deserialize, Serialize};

/// Decorative category chosen from keywords in a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionIcon {
    Trend,
    Analysis,
    Advice,
    Warning,
    Info,
}

impl SectionIcon {
    /// Case-insensitive keyword lookup; the first matching group wins.
    pub fn classify(heading: &str) -> Self {
        let h = heading.to_lowercase();
        if contains_any(&h, &["market", "trend"]) {
            SectionIcon::Trend
        } else if contains_any(&h, &["analysis", "performance"]) {
            SectionIcon::Analysis
        } else if contains_any(&h, &["recommendation", "advice"]) {
            SectionIcon::Advice
        } else if contains_any(&h, &["risk", "warning"]) {
            SectionIcon::Warning
        } else {
            SectionIcon::Info
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            SectionIcon::Trend => "📈",
            SectionIcon::Analysis => "📊",
            SectionIcon::Advice => "💲",
            SectionIcon::Warning => "⚠",
            SectionIcon::Info => "ℹ",
        }
    }
}

fn contains_any(haystack: &str, words: &[&str]) -> bool {
    words.iter().any(|w| haystack.contains(w))
}
