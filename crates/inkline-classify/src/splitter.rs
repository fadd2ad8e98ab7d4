//! Section splitter: breaks one captured page into typed spans.
//!
//! Splitting keys on **exact** marker occurrences over the entire input —
//! unbounded, unlike the windowed single-note scan. Each occurrence starts a
//! section running to the next occurrence or end of text; non-blank content
//! before the first marker becomes a leading untyped span. Markers are
//! stripped from stored content and excess blank lines are normalized;
//! sections left empty by stripping are dropped silently.
//!
//! This stage is pure and synchronous. Attaching classification results
//! (including the no-marker single-section path that may consult the LLM
//! fallback) happens in [`crate::engine`].

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::matcher::{TriggerMatch, TriggerMatcher};

static EXCESS_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// A typed span before classification results are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSection {
    /// The marker that opened this span, or `None` for the leading span and
    /// for the unsplit no-marker case.
    pub marker: Option<TriggerMatch>,
    /// Byte offset of the span start in the original input (the marker
    /// itself, when present).
    pub start_offset: usize,
    /// Byte offset one past the span end in the original input.
    pub end_offset: usize,
    /// Span text with the marker stripped and blank lines normalized.
    pub content: String,
}

/// Pure splitter over an immutable vocabulary.
#[derive(Debug, Clone)]
pub struct SectionSplitter {
    matcher: TriggerMatcher,
}

impl SectionSplitter {
    pub fn new(matcher: TriggerMatcher) -> Self {
        Self { matcher }
    }

    /// Split `text` on every exact marker occurrence.
    ///
    /// Always returns at least one span. With N marker occurrences the
    /// result holds between 1 and N+1 spans: N marker-opened (minus any
    /// emptied by stripping) plus an optional leading span. Spans are
    /// ordered and non-overlapping, and together with the discarded
    /// marker/whitespace text they cover the input exactly once.
    pub fn split(&self, text: &str) -> Vec<RawSection> {
        let matches = self.matcher.find_all(text);
        if matches.is_empty() {
            debug!(text_len = text.len(), "No markers; input stays unsplit");
            return vec![Self::unsplit(text)];
        }

        let mut sections = Vec::with_capacity(matches.len() + 1);

        let leading = &text[..matches[0].offset];
        if !leading.trim().is_empty() {
            sections.push(RawSection {
                marker: None,
                start_offset: 0,
                end_offset: matches[0].offset,
                content: normalize_blank_lines(leading),
            });
        }

        for (i, found) in matches.iter().enumerate() {
            let span_end = matches
                .get(i + 1)
                .map(|next| next.offset)
                .unwrap_or(text.len());
            let content = normalize_blank_lines(&text[found.end_offset()..span_end]);
            if content.is_empty() {
                // Marker with nothing behind it: dropped, not emitted as a
                // zero-length section.
                continue;
            }
            sections.push(RawSection {
                marker: Some(found.clone()),
                start_offset: found.offset,
                end_offset: span_end,
                content,
            });
        }

        // Stripping can empty every span (input was markers only). Degrade
        // to the unsplit form so the result is never empty.
        if sections.is_empty() {
            return vec![Self::unsplit(text)];
        }

        debug!(
            section_count = sections.len(),
            marker_count = matches.len(),
            "Input split into sections"
        );
        sections
    }

    fn unsplit(text: &str) -> RawSection {
        RawSection {
            marker: None,
            start_offset: 0,
            end_offset: text.len(),
            content: normalize_blank_lines(text),
        }
    }
}

/// Collapse runs of three or more newlines to one blank line and trim the
/// ends.
pub(crate) fn normalize_blank_lines(text: &str) -> String {
    EXCESS_BLANK_LINES
        .replace_all(text, "\n\n")
        .trim()
        .to_string()
}
