//! Classification engine: sequences the tiers into one result per note.
//!
//! A strict pipeline: exact match → fuzzy match → heuristic score → gate
//! check → optional LLM fallback. Each tier runs only if the previous one
//! produced nothing (matchers) or produced a result below the fallback gate
//! (heuristics). The resolved state always carries exactly one
//! [`ClassificationResult`]; a failed fallback degrades to the heuristic
//! result tagged `llm_fallback_failed` and is never surfaced as an error.
//!
//! Everything is injected — vocabulary tables and the fallback capability —
//! so tests run deterministically against a mock instead of a live model.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use inkline_core::defaults::FALLBACK_GATE;
use inkline_core::{
    ClassificationResult, FallbackClassifier, FallbackRequest, ImageHandle, NoteTypeTag, Section,
};

use crate::heuristics::HeuristicClassifier;
use crate::matcher::{find_ignore_ascii_case, TriggerMatcher};
use crate::splitter::{normalize_blank_lines, SectionSplitter};
use crate::vocabulary::TriggerVocabulary;

/// Orchestrates trigger matching, heuristics, splitting, and the fallback.
///
/// Cheap to share: the pure tiers hold only immutable tables, and callers
/// may classify concurrently. The only suspension point is the fallback
/// call, and cancellation is drop-based — abandoning a `classify` future
/// aborts any in-flight fallback request with no partial result escaping.
pub struct ClassificationEngine {
    matcher: TriggerMatcher,
    heuristics: HeuristicClassifier,
    splitter: SectionSplitter,
    fallback: Option<Arc<dyn FallbackClassifier>>,
    fallback_gate: f32,
}

impl ClassificationEngine {
    /// Build an engine over an injected vocabulary, without a fallback.
    pub fn new(vocabulary: TriggerVocabulary) -> Self {
        let vocabulary = Arc::new(vocabulary);
        let matcher = TriggerMatcher::new(vocabulary);
        Self {
            splitter: SectionSplitter::new(matcher.clone()),
            matcher,
            heuristics: HeuristicClassifier::new(),
            fallback: None,
            fallback_gate: FALLBACK_GATE,
        }
    }

    /// Engine over the builtin marker and variant tables.
    pub fn builtin() -> Self {
        Self::new(TriggerVocabulary::builtin())
    }

    /// Attach the LLM fallback capability.
    pub fn with_fallback(mut self, fallback: Arc<dyn FallbackClassifier>) -> Self {
        debug!(model = fallback.model_name(), "Fallback classifier attached");
        self.fallback = Some(fallback);
        self
    }

    /// Override the heuristic confidence gate below which the fallback is
    /// consulted.
    pub fn with_fallback_gate(mut self, gate: f32) -> Self {
        self.fallback_gate = gate.clamp(0.0, 1.0);
        self
    }

    pub fn vocabulary(&self) -> &TriggerVocabulary {
        self.matcher.vocabulary()
    }

    // -----------------------------------------------------------------------
    // Single-note classification
    // -----------------------------------------------------------------------

    /// Classify one text span.
    ///
    /// Total: malformed, empty, or marker-free input resolves to `general`
    /// at floor confidence, never an error.
    pub async fn classify(
        &self,
        text: &str,
        image: Option<&ImageHandle>,
        known_tags: &[String],
    ) -> ClassificationResult {
        if let Some(found) = self.matcher.match_exact(text) {
            return ClassificationResult::explicit(found.definition.tag, found.matched_text);
        }

        if let Some(found) = self.matcher.match_fuzzy(text) {
            return ClassificationResult::fuzzy(
                found.definition.tag,
                found.confidence(),
                found.matched_text,
            );
        }

        let heuristic = self.heuristics.classify(text);
        if heuristic.confidence >= self.fallback_gate {
            return heuristic;
        }

        let Some(fallback) = &self.fallback else {
            return heuristic;
        };

        debug!(
            confidence = heuristic.confidence,
            gate = self.fallback_gate,
            model = fallback.model_name(),
            "Heuristic below gate; consulting fallback"
        );

        let started = Instant::now();
        let mut request = FallbackRequest::new(text).with_known_tags(known_tags);
        if let Some(image) = image {
            request = request.with_image(image);
        }

        match fallback.classify_remote(request).await {
            Ok(outcome) => {
                debug!(
                    note_type = %outcome.note_type,
                    confidence = outcome.confidence,
                    duration_ms = started.elapsed().as_millis() as u64,
                    "Fallback classification resolved"
                );
                ClassificationResult::llm(outcome.note_type, outcome.confidence, outcome.reasoning)
            }
            Err(e) => {
                // Timeout, network, auth, cancellation: all degrade alike.
                warn!(
                    error = %e,
                    duration_ms = started.elapsed().as_millis() as u64,
                    "Fallback failed; keeping heuristic result"
                );
                heuristic.into_fallback_failed()
            }
        }
    }

    // -----------------------------------------------------------------------
    // Multi-note detection
    // -----------------------------------------------------------------------

    /// Split one capture into ordered, typed sections, each carrying its own
    /// classification result.
    ///
    /// Marker-opened sections are explicit matches by construction. A
    /// leading pre-marker span is emitted as `general`. When no marker
    /// exists anywhere the input comes back as a single section classified
    /// through the full pipeline (the only path here that may suspend);
    /// marker-free multi-note detection beyond that is delegated to the
    /// fallback capability and the preview layer above this core.
    pub async fn split_into_sections(
        &self,
        text: &str,
        image: Option<&ImageHandle>,
        known_tags: &[String],
    ) -> Vec<Section> {
        let raw_sections = self.splitter.split(text);
        // A lone marker-less section is unsplit only when it spans the whole
        // input. A preamble whose marker sections were all emptied and
        // dropped ends at the first marker and stays a preamble.
        let unsplit = raw_sections.len() == 1
            && raw_sections[0].marker.is_none()
            && raw_sections[0].start_offset == 0
            && raw_sections[0].end_offset == text.len();

        let mut sections = Vec::with_capacity(raw_sections.len());
        for raw in raw_sections {
            let result = match &raw.marker {
                Some(found) => {
                    ClassificationResult::explicit(found.definition.tag, found.matched_text.clone())
                }
                None if unsplit => self.classify(&raw.content, image, known_tags).await,
                // Pre-marker preamble is general by contract.
                None => ClassificationResult::heuristic(
                    NoteTypeTag::General,
                    inkline_core::defaults::HEURISTIC_FLOOR,
                    "content preceding first marker",
                ),
            };
            sections.push(Section {
                note_type: result.note_type,
                content: raw.content,
                start_offset: raw.start_offset,
                end_offset: raw.end_offset,
                result,
            });
        }

        debug!(section_count = sections.len(), "Sections resolved");
        sections
    }

    // -----------------------------------------------------------------------
    // Marker utilities
    // -----------------------------------------------------------------------

    /// Extract the exact trigger in the scan window and return it alongside
    /// the content with that one occurrence removed.
    pub fn extract_trigger_tag(&self, text: &str) -> Option<(String, String)> {
        let found = self.matcher.match_exact(text)?;
        let mut cleaned = String::with_capacity(text.len() - found.matched_text.len());
        cleaned.push_str(&text[..found.offset]);
        cleaned.push_str(&text[found.end_offset()..]);
        Some((found.matched_text, normalize_blank_lines(&cleaned)))
    }

    /// Remove every occurrence of every marker bound to `tag`, anywhere in
    /// the text, case-insensitively.
    pub fn strip_all_triggers(&self, text: &str, tag: NoteTypeTag) -> String {
        let mut out = text.to_string();
        for marker in self.vocabulary().markers_for(tag) {
            while let Some(offset) = find_ignore_ascii_case(&out, marker) {
                out.replace_range(offset..offset + marker.len(), "");
            }
        }
        normalize_blank_lines(&out)
    }
}
