//! # inkline-core
//!
//! Core types, traits, and abstractions for the inkline capture-classification
//! library.
//!
//! This crate provides the foundational data structures and trait definitions
//! that other inkline crates depend on: the note type vocabulary, the
//! classification result model, shared defaults, and the injected fallback
//! classifier contract.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod note_type;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{
    ClassificationMethod, ClassificationResult, FuzzyVariant, ImageHandle, Section,
    TriggerDefinition,
};
pub use note_type::NoteTypeTag;
pub use traits::{FallbackClassifier, FallbackOutcome, FallbackRequest};
