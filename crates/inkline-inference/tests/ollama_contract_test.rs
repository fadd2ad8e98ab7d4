//! HTTP contract tests for the Ollama fallback backend.
//!
//! Exercises request shape and response handling against a stubbed server:
//! no live Ollama instance is required.

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use inkline_core::{FallbackClassifier, FallbackRequest, ImageHandle, NoteTypeTag};
use inkline_inference::OllamaFallback;

fn backend_for(server: &MockServer) -> OllamaFallback {
    OllamaFallback::with_config(server.uri(), "test-model".to_string())
}

#[tokio::test]
async fn successful_reply_parses_into_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "{\"type\": \"todo\", \"confidence\": 0.88, \"reasoning\": \"imperative list\"}"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = backend_for(&server)
        .classify_remote(FallbackRequest::new("buy milk, clean room"))
        .await
        .unwrap();

    assert_eq!(outcome.note_type, NoteTypeTag::Todo);
    assert_eq!(outcome.confidence, 0.88);
    assert_eq!(outcome.reasoning.as_deref(), Some("imperative list"));
}

#[tokio::test]
async fn fenced_reply_is_tolerated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "```json\n{\"type\": \"recipe\", \"confidence\": 0.7}\n```"
        })))
        .mount(&server)
        .await;

    let outcome = backend_for(&server)
        .classify_remote(FallbackRequest::new("2 cups flour"))
        .await
        .unwrap();

    assert_eq!(outcome.note_type, NoteTypeTag::Recipe);
}

#[tokio::test]
async fn request_carries_model_and_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_string_contains("test-model"))
        .and(body_string_contains("buy milk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "{\"type\": \"general\", \"confidence\": 0.5}"
        })))
        .expect(1)
        .mount(&server)
        .await;

    backend_for(&server)
        .classify_remote(FallbackRequest::new("buy milk"))
        .await
        .unwrap();
}

#[tokio::test]
async fn known_tags_reach_the_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_string_contains("errands"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "{\"type\": \"general\", \"confidence\": 0.5}"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tags = vec!["errands".to_string()];
    backend_for(&server)
        .classify_remote(FallbackRequest::new("note").with_known_tags(&tags))
        .await
        .unwrap();
}

#[tokio::test]
async fn image_is_forwarded_base64_encoded() {
    let server = MockServer::start().await;
    // [1, 2, 3] encodes to "AQID".
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_string_contains("AQID"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "{\"type\": \"general\", \"confidence\": 0.5}"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let image = ImageHandle::new(vec![1, 2, 3]);
    backend_for(&server)
        .classify_remote(FallbackRequest::new("note").with_image(&image))
        .await
        .unwrap();
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .classify_remote(FallbackRequest::new("note"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Ollama request failed"));
}

#[tokio::test]
async fn unparseable_reply_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "I am not sure what this note is."
        })))
        .mount(&server)
        .await;

    let result = backend_for(&server)
        .classify_remote(FallbackRequest::new("note"))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn unknown_category_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "{\"type\": \"quote\", \"confidence\": 0.9}"
        })))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .classify_remote(FallbackRequest::new("a proverb"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("unknown note type"));
}
