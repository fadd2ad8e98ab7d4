//! Trait definitions for injected capabilities.
//!
//! The fallback classifier is strictly an injected capability, not a concrete
//! network client: the classification engine depends only on this contract,
//! so tests can substitute a deterministic mock instead of a live model.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ImageHandle;
use crate::note_type::NoteTypeTag;

// =============================================================================
// FALLBACK CLASSIFIER
// =============================================================================

/// Inputs handed to the fallback classifier.
///
/// `known_tags` is a read-only consistency hint supplied by the persistence
/// collaborator so the model prefers established terminology; the core never
/// enforces it.
#[derive(Debug, Clone)]
pub struct FallbackRequest<'a> {
    /// Recognized text content of the span being classified.
    pub content: &'a str,
    /// Opaque captured image, passed through untouched.
    pub image: Option<&'a ImageHandle>,
    /// Known tag vocabulary for terminology consistency.
    pub known_tags: &'a [String],
}

impl<'a> FallbackRequest<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            image: None,
            known_tags: &[],
        }
    }

    pub fn with_image(mut self, image: &'a ImageHandle) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_known_tags(mut self, known_tags: &'a [String]) -> Self {
        self.known_tags = known_tags;
        self
    }
}

/// What the fallback classifier reports back.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackOutcome {
    /// Model-assigned category.
    pub note_type: NoteTypeTag,
    /// Model-reported confidence in [0.0, 1.0].
    pub confidence: f32,
    /// Model-provided rationale, when available.
    pub reasoning: Option<String>,
}

/// Asynchronous LLM-backed classification capability.
///
/// Invoked only when the local tiers are inconclusive. Implementations own
/// their transport, timeouts, and backpressure; the engine treats every
/// non-success identically and degrades to its pre-fallback result.
/// Cancellation is drop-based: abandoning the returned future must abort the
/// call without side effects.
#[async_trait]
pub trait FallbackClassifier: Send + Sync {
    /// Classify the given content remotely.
    async fn classify_remote(&self, request: FallbackRequest<'_>) -> Result<FallbackOutcome>;

    /// Identifier of the model or backend answering requests.
    fn model_name(&self) -> &str;
}
