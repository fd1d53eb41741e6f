// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::SectionIcon;

/// Delimiter placed on both sides of a heading label.
pub const HEADING_MARKER: &str = "**";

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Non-greedy and single-line: `.` does not cross newlines.
    RE.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").unwrap())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Text,
    Heading,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub content: String,
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Self { kind: SegmentKind::Text, content: content.into() }
    }

    pub fn heading(content: impl Into<String>) -> Self {
        Self { kind: SegmentKind::Heading, content: content.into() }
    }

    pub fn is_heading(&self) -> bool {
        self.kind == SegmentKind::Heading
    }
}

/// A reply after section detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedMessage {
    /// No heading found; the reply is rendered verbatim.
    Plain(String),
    /// Text and heading segments in reply order.  `segments[0]` is always
    /// the (possibly empty) text before the first heading.  Text and
    /// headings alternate only when every heading is followed by body text.
    Sections(Vec<Segment>),
}

/// One heading together with its body, as consumed by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    /// Ordinal of the heading among all headings, starting at 0.
    pub index: usize,
    pub heading: &'a str,
    pub body: Option<&'a str>,
    pub icon: SectionIcon,
}

/// Split `text` on `**Heading**` markers.
///
/// Rules:
/// - No `**` at all, or no complete marker pair: [`FormattedMessage::Plain`]
///   with the text unchanged.
/// - Otherwise the leading text fragment is always kept, even when empty.
///   Any later empty fragment is dropped; an empty heading (`****`) is
///   dropped and the text on both sides of it is merged, so a text segment
///   is never followed by another text segment.
///
/// Text at even positions and headings at odd positions is guaranteed only
/// for well-formed replies, where each heading has a non-empty body.  Two
/// headings with nothing between them (`**One****Two**`) stay adjacent.
pub fn format(text: &str) -> FormattedMessage {
    if !text.contains(HEADING_MARKER) {
        return FormattedMessage::Plain(text.to_string());
    }
    let segments = split_segments(text);
    if segments.iter().any(Segment::is_heading) {
        trace!(segments = segments.len(), "reply split into sections");
        FormattedMessage::Sections(segments)
    } else {
        FormattedMessage::Plain(text.to_string())
    }
}

fn split_segments(text: &str) -> Vec<Segment> {
    let mut segments = vec![Segment::text("")];
    let mut last = 0;
    for caps in heading_re().captures_iter(text) {
        let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_text(&mut segments, &text[last..whole.start()]);
        if !label.as_str().is_empty() {
            segments.push(Segment::heading(label.as_str()));
        }
        last = whole.end();
    }
    push_text(&mut segments, &text[last..]);
    segments
}

fn push_text(segments: &mut Vec<Segment>, fragment: &str) {
    if fragment.is_empty() {
        return;
    }
    match segments.last_mut() {
        Some(prev) if prev.kind == SegmentKind::Text => prev.content.push_str(fragment),
        _ => segments.push(Segment::text(fragment)),
    }
}

impl FormattedMessage {
    pub fn has_sections(&self) -> bool {
        matches!(self, FormattedMessage::Sections(_))
    }

    /// All segments; empty for a plain message.
    pub fn segments(&self) -> &[Segment] {
        match self {
            FormattedMessage::Plain(_) => &[],
            FormattedMessage::Sections(s) => s,
        }
    }

    /// Body of the heading at segment position `i`: the next segment when it
    /// is text.  `None` when `i` is not a heading, when it is the last
    /// segment, or when another heading follows directly.
    pub fn body_for(&self, i: usize) -> Option<&str> {
        let segments = self.segments();
        if !segments.get(i)?.is_heading() {
            return None;
        }
        segments
            .get(i + 1)
            .filter(|s| s.kind == SegmentKind::Text)
            .map(|s| s.content.as_str())
    }

    /// Text before the first heading, when non-empty.
    pub fn preamble(&self) -> Option<&str> {
        self.segments()
            .first()
            .filter(|s| s.kind == SegmentKind::Text && !s.content.is_empty())
            .map(|s| s.content.as_str())
    }

    /// Headings in order, each paired with its body and icon.
    pub fn sections(&self) -> impl Iterator<Item = Section<'_>> + '_ {
        self.segments()
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_heading())
            .enumerate()
            .map(move |(index, (pos, s))| Section {
                index,
                heading: s.content.as_str(),
                body: self.body_for(pos),
                icon: SectionIcon::classify(&s.content),
            })
    }

    /// Re-join the segments into marker-delimited text.  Formatting the
    /// result yields the same segments again.
    pub fn to_marked_text(&self) -> String {
        match self {
            FormattedMessage::Plain(t) => t.clone(),
            FormattedMessage::Sections(segments) => segments
                .iter()
                .map(|s| match s.kind {
                    SegmentKind::Text => s.content.clone(),
                    SegmentKind::Heading => format!("{HEADING_MARKER}{}{HEADING_MARKER}", s.content),
                })
                .collect(),
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
