//! Structured logging schema and field name constants for inkline.
//!
//! All crates use these constants for consistent structured logging fields.
//! This ensures log aggregation tools can query by standardized field names
//! across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (engine/backend construction) |
//! | DEBUG | Decision points: tier transitions, gate checks, match offsets |
//! | TRACE | Per-candidate iteration (fuzzy tokens, heuristic checks) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "classify", "inference"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "matcher", "heuristics", "splitter", "engine", "ollama"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "classify", "split_into_sections", "classify_remote"
pub const OPERATION: &str = "op";

// ─── Classification fields ─────────────────────────────────────────────────

/// Resolved note type tag.
pub const NOTE_TYPE: &str = "note_type";

/// Classification method that produced the result.
pub const METHOD: &str = "method";

/// Confidence of the resolved result.
pub const CONFIDENCE: &str = "confidence";

/// Marker text that matched (exact or fuzzy).
pub const MARKER: &str = "marker";

/// Byte offset of a matched marker.
pub const MATCH_OFFSET: &str = "match_offset";

/// Number of sections produced by a split.
pub const SECTION_COUNT: &str = "section_count";

/// Character length of the input text.
pub const TEXT_LEN: &str = "text_len";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for fallback inference.
pub const MODEL: &str = "model";

/// Byte length of a prompt sent to the fallback.
pub const PROMPT_LEN: &str = "prompt_len";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
