//! Centralized default constants for the inkline system.
//!
//! **This module is the single source of truth** for all shared default
//! values. All crates should reference these constants instead of defining
//! their own magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// TRIGGER MATCHING
// =============================================================================

/// Prefix window (in characters) scanned for trigger markers when
/// classifying a single note. Markers past this window are ignored:
/// classification reflects intent stated at the start of a capture, not a
/// marker mentioned deep in body prose. Section splitting is NOT bounded by
/// this window.
pub const TRIGGER_SCAN_WINDOW: usize = 100;

/// Maximum Levenshtein distance accepted when comparing a candidate token
/// against a canonical marker.
pub const FUZZY_MAX_EDIT_DISTANCE: usize = 2;

/// Candidate length must be within this many characters of the canonical
/// marker length for edit-distance comparison to be attempted.
pub const FUZZY_LENGTH_SLACK: usize = 2;

// =============================================================================
// CONFIDENCE TIERS
// =============================================================================
// Tier ordering is an invariant: explicit > fuzzy table > fuzzy edit. The
// heuristic range [floor, ceiling] declares the method's bounds; the grades
// the checks actually emit stay below the fuzzy band.

/// Confidence for an exact trigger match.
pub const EXACT_CONFIDENCE: f32 = 1.0;

/// Confidence for a fuzzy match resolved via the precomputed variant table.
pub const FUZZY_TABLE_CONFIDENCE: f32 = 0.92;

/// Confidence for a fuzzy match resolved via bounded edit distance.
/// Lower than the table hit: a catalogued corruption is stronger evidence.
pub const FUZZY_EDIT_CONFIDENCE: f32 = 0.87;

/// Ceiling for heuristic confidences.
pub const HEURISTIC_CEILING: f32 = 0.9;

/// Floor confidence when no heuristic check fires and the result is
/// `general`.
pub const HEURISTIC_FLOOR: f32 = 0.3;

/// Heuristic results below this gate trigger the LLM fallback.
pub const FALLBACK_GATE: f32 = 0.7;

// =============================================================================
// INFERENCE
// =============================================================================

/// Default Ollama endpoint.
pub const OLLAMA_URL: &str = "http://localhost:11434";

/// Default generation model for the fallback classifier.
pub const GEN_MODEL: &str = "qwen3:8b";

/// Timeout for fallback classification requests (seconds).
pub const GEN_TIMEOUT_SECS: u64 = 120;
