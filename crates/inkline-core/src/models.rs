//! Result and vocabulary data model for classification.
//!
//! Everything here is created fresh per classification request and has no
//! persisted identity; ownership of produced [`Section`] lists passes to the
//! persistence collaborator immediately.

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::note_type::NoteTypeTag;

// =============================================================================
// CLASSIFICATION METHOD
// =============================================================================

/// The tier that produced a classification result.
///
/// Tiers are confidence-ordered: explicit = 1.0, fuzzy ∈ [0.85, 0.95),
/// heuristic ∈ [0.3, 0.9], llm ∈ [0.0, 1.0]. `LlmFallbackFailed` carries the
/// heuristic tier's result, so it shares the heuristic range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMethod {
    Explicit,
    Fuzzy,
    Heuristic,
    Llm,
    LlmFallbackFailed,
}

impl ClassificationMethod {
    /// Inclusive confidence bounds declared for this tier.
    pub fn confidence_bounds(&self) -> (f32, f32) {
        match self {
            Self::Explicit => (defaults::EXACT_CONFIDENCE, defaults::EXACT_CONFIDENCE),
            // Upper bound is exclusive in the contract; 0.95 is never emitted.
            Self::Fuzzy => (0.85, 0.95),
            Self::Heuristic | Self::LlmFallbackFailed => {
                (defaults::HEURISTIC_FLOOR, defaults::HEURISTIC_CEILING)
            }
            Self::Llm => (0.0, 1.0),
        }
    }
}

impl std::fmt::Display for ClassificationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit => write!(f, "explicit"),
            Self::Fuzzy => write!(f, "fuzzy"),
            Self::Heuristic => write!(f, "heuristic"),
            Self::Llm => write!(f, "llm"),
            Self::LlmFallbackFailed => write!(f, "llm_fallback_failed"),
        }
    }
}

// =============================================================================
// CLASSIFICATION RESULT
// =============================================================================

/// Outcome of classifying one text span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Resolved semantic category.
    pub note_type: NoteTypeTag,
    /// Confidence consistent with `method`'s declared range.
    pub confidence: f32,
    /// Tier that produced this result.
    pub method: ClassificationMethod,
    /// Optional human-readable rationale (heuristic check name, model
    /// reasoning).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Marker text that matched, when `method` is explicit or fuzzy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_marker: Option<String>,
}

impl ClassificationResult {
    /// Result for an exact marker match. Confidence is fixed at 1.0.
    pub fn explicit(note_type: NoteTypeTag, marker: impl Into<String>) -> Self {
        Self {
            note_type,
            confidence: defaults::EXACT_CONFIDENCE,
            method: ClassificationMethod::Explicit,
            reasoning: None,
            matched_marker: Some(marker.into()),
        }
    }

    /// Result for a fuzzy marker match at the given tier confidence.
    pub fn fuzzy(note_type: NoteTypeTag, confidence: f32, marker: impl Into<String>) -> Self {
        Self {
            note_type,
            confidence,
            method: ClassificationMethod::Fuzzy,
            reasoning: None,
            matched_marker: Some(marker.into()),
        }
    }

    /// Result from a content heuristic check.
    pub fn heuristic(note_type: NoteTypeTag, confidence: f32, reasoning: impl Into<String>) -> Self {
        Self {
            note_type,
            confidence,
            method: ClassificationMethod::Heuristic,
            reasoning: Some(reasoning.into()),
            matched_marker: None,
        }
    }

    /// The universal fallback: `general` at floor confidence.
    pub fn general_floor() -> Self {
        Self::heuristic(
            NoteTypeTag::General,
            defaults::HEURISTIC_FLOOR,
            "no heuristic check fired",
        )
    }

    /// Result reported by the LLM fallback.
    pub fn llm(note_type: NoteTypeTag, confidence: f32, reasoning: Option<String>) -> Self {
        Self {
            note_type,
            confidence: confidence.clamp(0.0, 1.0),
            method: ClassificationMethod::Llm,
            reasoning,
            matched_marker: None,
        }
    }

    /// Re-tag a heuristic result after the fallback failed. The type and
    /// confidence are kept; only the method changes so callers can see the
    /// degradation.
    pub fn into_fallback_failed(mut self) -> Self {
        self.method = ClassificationMethod::LlmFallbackFailed;
        self
    }

    /// Whether `confidence` sits inside `method`'s declared range.
    ///
    /// The fuzzy upper bound is exclusive; all other bounds are inclusive.
    pub fn is_confidence_consistent(&self) -> bool {
        let (lo, hi) = self.method.confidence_bounds();
        match self.method {
            ClassificationMethod::Fuzzy => self.confidence >= lo && self.confidence < hi,
            _ => self.confidence >= lo && self.confidence <= hi,
        }
    }
}

// =============================================================================
// TRIGGER VOCABULARY TYPES
// =============================================================================

/// One canonical marker string bound to exactly one note type.
///
/// Multiple definitions may map to the same tag (synonyms). Markers are
/// stored lowercase; matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerDefinition {
    /// Canonical marker text, e.g. `#todo#`.
    pub marker: String,
    /// The tag this marker signals.
    pub tag: NoteTypeTag,
}

impl TriggerDefinition {
    pub fn new(marker: impl Into<String>, tag: NoteTypeTag) -> Self {
        Self {
            marker: marker.into().to_lowercase(),
            tag,
        }
    }

    /// Marker length in characters (not bytes).
    pub fn marker_chars(&self) -> usize {
        self.marker.chars().count()
    }
}

/// A known OCR-corrupted spelling of a canonical marker.
///
/// Variants are precomputed, not derived at runtime, to keep matching
/// deterministic and fast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyVariant {
    /// Corrupted spelling as it appears in OCR output, lowercase.
    pub variant: String,
    /// The canonical marker this corruption resolves to.
    pub canonical: String,
}

impl FuzzyVariant {
    pub fn new(variant: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            variant: variant.into().to_lowercase(),
            canonical: canonical.into().to_lowercase(),
        }
    }
}

// =============================================================================
// SECTION
// =============================================================================

/// A contiguous, typed span of text produced by splitting one capture.
///
/// Sections from one input are ordered and non-overlapping; their spans plus
/// discarded marker/whitespace text cover the entire input exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Resolved category for this span.
    pub note_type: NoteTypeTag,
    /// Span content with the marker and excess blank lines stripped.
    pub content: String,
    /// Byte offset of the span start in the original input (marker
    /// included, when present).
    pub start_offset: usize,
    /// Byte offset one past the span end in the original input.
    pub end_offset: usize,
    /// Full classification result for this span.
    pub result: ClassificationResult,
}

// =============================================================================
// IMAGE HANDLE
// =============================================================================

/// Opaque handle to the captured image.
///
/// The core never inspects the bytes; they are passed through untouched to
/// the fallback classifier, which may use them for visual context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHandle {
    /// Raw image bytes as delivered by the capture pipeline.
    pub data: Vec<u8>,
    /// MIME type, when the capture pipeline knows it.
    pub mime_type: Option<String>,
}

impl ImageHandle {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}
