//! # inkline-classify
//!
//! Classification and section-splitting engine for captured note text.
//!
//! Text recognized by the capture pipeline flows through four tiers:
//! exact trigger match (bounded prefix window), fuzzy trigger match
//! (OCR-tolerant, same window), content heuristics (whole text), and an
//! injected asynchronous LLM fallback gated on heuristic confidence. The
//! section splitter reuses the exact matcher over the entire input to break
//! one capture into multiple typed sections.
//!
//! All local tiers are pure, synchronous, and deterministic over the input
//! plus immutable vocabulary tables; the fallback call is the only
//! suspension point.

pub mod engine;
pub mod heuristics;
pub mod matcher;
pub mod splitter;
pub mod vocabulary;

// Re-export commonly used types at crate root
pub use engine::ClassificationEngine;
pub use heuristics::HeuristicClassifier;
pub use matcher::{MatchKind, TriggerMatch, TriggerMatcher};
pub use splitter::{RawSection, SectionSplitter};
pub use vocabulary::TriggerVocabulary;
