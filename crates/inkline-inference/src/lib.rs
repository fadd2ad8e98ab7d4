//! # inkline-inference
//!
//! LLM fallback classifier backends for inkline.
//!
//! The classification engine depends only on the
//! [`FallbackClassifier`](inkline_core::FallbackClassifier) contract; this
//! crate provides the concrete implementations: an Ollama-backed classifier
//! for production use and a deterministic mock (feature `mock`) for tests.

pub mod ollama;
pub mod prompt;

#[cfg(feature = "mock")]
pub mod mock;

pub use ollama::OllamaFallback;

#[cfg(feature = "mock")]
pub use mock::MockFallback;
