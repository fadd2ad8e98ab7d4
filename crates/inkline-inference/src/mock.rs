//! Mock fallback classifier for deterministic testing.
//!
//! Provides a configurable, deterministic stand-in for the LLM fallback so
//! engine tests never touch a live model.
//!
//! ## Usage
//!
//! ```rust
//! use inkline_core::NoteTypeTag;
//! use inkline_inference::mock::MockFallback;
//!
//! let fallback = MockFallback::new()
//!     .with_outcome(NoteTypeTag::Idea, 0.8)
//!     .with_latency_ms(5);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use inkline_core::{
    Error, FallbackClassifier, FallbackOutcome, FallbackRequest, NoteTypeTag, Result,
};

/// Mock fallback classifier for testing.
#[derive(Clone)]
pub struct MockFallback {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    default_outcome: FallbackOutcome,
    mapped_outcomes: HashMap<String, FallbackOutcome>,
    latency_ms: u64,
    failure_rate: f64,
    always_fail: bool,
}

/// One recorded invocation.
#[derive(Debug, Clone)]
pub struct MockCall {
    /// The content that was submitted.
    pub content: String,
    /// Whether an image handle accompanied the request.
    pub had_image: bool,
    /// Known-tag vocabulary passed through.
    pub known_tags: Vec<String>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            default_outcome: FallbackOutcome {
                note_type: NoteTypeTag::General,
                confidence: 0.5,
                reasoning: Some("mock default".to_string()),
            },
            mapped_outcomes: HashMap::new(),
            latency_ms: 0,
            failure_rate: 0.0,
            always_fail: false,
        }
    }
}

impl MockFallback {
    /// Create a new mock with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the default outcome for all requests.
    pub fn with_outcome(mut self, note_type: NoteTypeTag, confidence: f32) -> Self {
        Arc::make_mut(&mut self.config).default_outcome = FallbackOutcome {
            note_type,
            confidence,
            reasoning: None,
        };
        self
    }

    /// Set the reasoning attached to the default outcome.
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_outcome.reasoning = Some(reasoning.into());
        self
    }

    /// Add an outcome mapping for specific content.
    pub fn with_outcome_for(
        mut self,
        content: impl Into<String>,
        note_type: NoteTypeTag,
        confidence: f32,
    ) -> Self {
        Arc::make_mut(&mut self.config).mapped_outcomes.insert(
            content.into(),
            FallbackOutcome {
                note_type,
                confidence,
                reasoning: None,
            },
        );
        self
    }

    /// Set simulated latency for all requests.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        Arc::make_mut(&mut self.config).latency_ms = latency_ms;
        self
    }

    /// Fail every request, for testing degradation paths.
    pub fn always_failing(mut self) -> Self {
        Arc::make_mut(&mut self.config).always_fail = true;
        self
    }

    /// Set failure rate (0.0 - 1.0) for testing error handling.
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        Arc::make_mut(&mut self.config).failure_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Get all logged calls for assertion.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of requests received.
    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }

    fn should_fail(&self) -> bool {
        use rand::Rng;
        if self.config.always_fail {
            return true;
        }
        if self.config.failure_rate > 0.0 {
            rand::thread_rng().gen::<f64>() < self.config.failure_rate
        } else {
            false
        }
    }
}

impl Default for MockFallback {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FallbackClassifier for MockFallback {
    async fn classify_remote(&self, request: FallbackRequest<'_>) -> Result<FallbackOutcome> {
        self.call_log.lock().unwrap().push(MockCall {
            content: request.content.to_string(),
            had_image: request.image.is_some(),
            known_tags: request.known_tags.to_vec(),
        });

        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        if self.should_fail() {
            return Err(Error::Inference("simulated fallback failure".to_string()));
        }

        if let Some(outcome) = self.config.mapped_outcomes.get(request.content) {
            return Ok(outcome.clone());
        }

        Ok(self.config.default_outcome.clone())
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
