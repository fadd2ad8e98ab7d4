//! Closed enumeration of semantic note categories.
//!
//! `NoteTypeTag::General` is the universal fallback: every classification
//! path must be able to resolve to it, so it is always a valid result.

use serde::{Deserialize, Serialize};

/// Semantic category assigned to a captured note or section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteTypeTag {
    Todo,
    Email,
    Meeting,
    Reminder,
    Contact,
    Expense,
    Shopping,
    Recipe,
    Event,
    Idea,
    ExternalPrompt,
    General,
}

impl NoteTypeTag {
    /// All tags in declaration order. `General` is last.
    pub const ALL: [NoteTypeTag; 12] = [
        NoteTypeTag::Todo,
        NoteTypeTag::Email,
        NoteTypeTag::Meeting,
        NoteTypeTag::Reminder,
        NoteTypeTag::Contact,
        NoteTypeTag::Expense,
        NoteTypeTag::Shopping,
        NoteTypeTag::Recipe,
        NoteTypeTag::Event,
        NoteTypeTag::Idea,
        NoteTypeTag::ExternalPrompt,
        NoteTypeTag::General,
    ];

    /// Stable string form, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Email => "email",
            Self::Meeting => "meeting",
            Self::Reminder => "reminder",
            Self::Contact => "contact",
            Self::Expense => "expense",
            Self::Shopping => "shopping",
            Self::Recipe => "recipe",
            Self::Event => "event",
            Self::Idea => "idea",
            Self::ExternalPrompt => "external_prompt",
            Self::General => "general",
        }
    }

    /// Parse a tag from its string form. Case-insensitive; accepts both
    /// `external_prompt` and `externalprompt` spellings seen in model output.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Some(Self::Todo),
            "email" => Some(Self::Email),
            "meeting" => Some(Self::Meeting),
            "reminder" => Some(Self::Reminder),
            "contact" => Some(Self::Contact),
            "expense" => Some(Self::Expense),
            "shopping" => Some(Self::Shopping),
            "recipe" => Some(Self::Recipe),
            "event" => Some(Self::Event),
            "idea" => Some(Self::Idea),
            "external_prompt" | "externalprompt" | "external-prompt" => Some(Self::ExternalPrompt),
            "general" => Some(Self::General),
            _ => None,
        }
    }
}

impl std::fmt::Display for NoteTypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_contains_every_variant_once() {
        assert_eq!(NoteTypeTag::ALL.len(), 12);
        let mut seen = std::collections::HashSet::new();
        for tag in NoteTypeTag::ALL {
            assert!(seen.insert(tag), "duplicate tag in ALL: {}", tag);
        }
    }

    #[test]
    fn general_is_last() {
        assert_eq!(NoteTypeTag::ALL.last(), Some(&NoteTypeTag::General));
    }

    #[test]
    fn display_matches_as_str() {
        for tag in NoteTypeTag::ALL {
            assert_eq!(tag.to_string(), tag.as_str());
        }
    }

    #[test]
    fn parse_round_trips_every_tag() {
        for tag in NoteTypeTag::ALL {
            assert_eq!(NoteTypeTag::parse(tag.as_str()), Some(tag));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(NoteTypeTag::parse("TODO"), Some(NoteTypeTag::Todo));
        assert_eq!(NoteTypeTag::parse("Meeting"), Some(NoteTypeTag::Meeting));
    }

    #[test]
    fn parse_accepts_external_prompt_spellings() {
        assert_eq!(
            NoteTypeTag::parse("externalPrompt"),
            Some(NoteTypeTag::ExternalPrompt)
        );
        assert_eq!(
            NoteTypeTag::parse("external-prompt"),
            Some(NoteTypeTag::ExternalPrompt)
        );
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(NoteTypeTag::parse("quote"), None);
        assert_eq!(NoteTypeTag::parse(""), None);
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&NoteTypeTag::ExternalPrompt).unwrap();
        assert_eq!(json, "\"external_prompt\"");

        let tag: NoteTypeTag = serde_json::from_str("\"todo\"").unwrap();
        assert_eq!(tag, NoteTypeTag::Todo);
    }
}
