//! Prompt construction and response parsing for fallback classification.
//!
//! Models do not reliably emit bare JSON: replies arrive wrapped in code
//! fences, prefixed with chatter, or with out-of-range confidences. Parsing
//! here is deliberately forgiving about the wrapping and strict about the
//! payload — an unknown type name is an error, not a silent `general`.

use serde::Deserialize;

use inkline_core::{Error, FallbackOutcome, NoteTypeTag, Result};

/// Build the classification prompt for one span of captured text.
///
/// `known_tags` is the persistence layer's existing tag vocabulary, included
/// only so the model prefers established terminology in its reasoning.
pub fn classification_prompt(content: &str, known_tags: &[String]) -> String {
    let type_list = NoteTypeTag::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let vocabulary_hint = if known_tags.is_empty() {
        String::new()
    } else {
        format!(
            "\nThe user's existing tags, for consistent terminology: {}.\n",
            known_tags.join(", ")
        )
    };

    format!(
        r#"You classify short handwritten notes captured by camera.

Assign exactly one category from this closed list: {type_list}.
Use "general" when nothing else clearly fits.
{vocabulary_hint}
Note content:
{content}

Answer with only a JSON object in this exact shape:
{{"type": "<category>", "confidence": <0.0-1.0>, "reasoning": "<one short sentence>"}}"#
    )
}

#[derive(Deserialize)]
struct RawClassification {
    #[serde(rename = "type")]
    note_type: String,
    confidence: f32,
    reasoning: Option<String>,
}

/// Parse the model's reply into a [`FallbackOutcome`].
///
/// Accepts the JSON object anywhere in the reply (code fences and
/// surrounding prose are ignored). Confidence is clamped to [0.0, 1.0].
pub fn parse_classification_response(raw: &str) -> Result<FallbackOutcome> {
    let json = extract_json_object(raw).ok_or_else(|| {
        Error::Inference(format!(
            "no JSON object in classification reply: {}",
            truncate(raw, 120)
        ))
    })?;

    let parsed: RawClassification = serde_json::from_str(json)?;

    let note_type = NoteTypeTag::parse(&parsed.note_type).ok_or_else(|| {
        Error::Inference(format!(
            "model returned unknown note type: {}",
            parsed.note_type
        ))
    })?;

    Ok(FallbackOutcome {
        note_type,
        confidence: parsed.confidence.clamp(0.0, 1.0),
        reasoning: parsed.reasoning.filter(|r| !r.trim().is_empty()),
    })
}

/// Slice out the outermost `{…}` object, if any.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_every_category() {
        let prompt = classification_prompt("buy milk", &[]);
        for tag in NoteTypeTag::ALL {
            assert!(prompt.contains(tag.as_str()), "missing {}", tag);
        }
        assert!(prompt.contains("buy milk"));
    }

    #[test]
    fn prompt_includes_vocabulary_hint_when_present() {
        let tags = vec!["errands".to_string(), "work".to_string()];
        let prompt = classification_prompt("buy milk", &tags);
        assert!(prompt.contains("errands, work"));

        let bare = classification_prompt("buy milk", &[]);
        assert!(!bare.contains("existing tags"));
    }

    #[test]
    fn parses_clean_json() {
        let outcome = parse_classification_response(
            r#"{"type": "todo", "confidence": 0.93, "reasoning": "imperative list"}"#,
        )
        .unwrap();
        assert_eq!(outcome.note_type, NoteTypeTag::Todo);
        assert_eq!(outcome.confidence, 0.93);
        assert_eq!(outcome.reasoning.as_deref(), Some("imperative list"));
    }

    #[test]
    fn parses_fenced_json() {
        let raw = "```json\n{\"type\": \"idea\", \"confidence\": 0.6, \"reasoning\": null}\n```";
        let outcome = parse_classification_response(raw).unwrap();
        assert_eq!(outcome.note_type, NoteTypeTag::Idea);
        assert_eq!(outcome.reasoning, None);
    }

    #[test]
    fn parses_json_with_surrounding_chatter() {
        let raw = "Sure! Here is my answer: {\"type\": \"expense\", \"confidence\": 0.8} Hope that helps.";
        let outcome = parse_classification_response(raw).unwrap();
        assert_eq!(outcome.note_type, NoteTypeTag::Expense);
    }

    #[test]
    fn clamps_out_of_range_confidence() {
        let outcome =
            parse_classification_response(r#"{"type": "todo", "confidence": 1.4}"#).unwrap();
        assert_eq!(outcome.confidence, 1.0);
    }

    #[test]
    fn unknown_type_is_an_error() {
        let err =
            parse_classification_response(r#"{"type": "quote", "confidence": 0.9}"#).unwrap_err();
        assert!(err.to_string().contains("unknown note type"));
    }

    #[test]
    fn missing_json_is_an_error() {
        let err = parse_classification_response("I cannot classify this.").unwrap_err();
        assert!(err.to_string().contains("no JSON object"));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let result = parse_classification_response("{not json}");
        assert!(result.is_err());
    }

    #[test]
    fn blank_reasoning_is_dropped() {
        let outcome = parse_classification_response(
            r#"{"type": "todo", "confidence": 0.9, "reasoning": "  "}"#,
        )
        .unwrap();
        assert_eq!(outcome.reasoning, None);
    }
}
