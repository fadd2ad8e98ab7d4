//! Content heuristic classifier: structural signals per note type.
//!
//! Invoked only when neither trigger matcher fired. Evaluates a **fixed,
//! documented priority order** of per-type checks; the first check that
//! fires wins. Several type pairs are structurally similar (todo vs.
//! reminder, idea vs. meeting) and nondeterministic resolution was a known
//! source of misclassification, so the order below is part of the contract
//! and must not be reshuffled without owner sign-off:
//!
//! 1. todo          — checkbox/checklist lines, "todo"/"to-do" lead-in
//! 2. shopping      — shopping/grocery vocabulary, bullet list + "buy"
//! 3. expense       — currency amounts, total/sum marker
//! 4. contact       — phone number plus address/contact vocabulary
//! 5. email         — to/from/subject header lines, greeting + sign-off
//! 6. meeting       — attendees/agenda/minutes headers, meeting word + time
//! 7. event         — occasion vocabulary with a date or time
//! 8. recipe        — ingredients header, measurement units
//! 9. reminder      — "remind me"/"don't forget" phrasing
//! 10. external_prompt — leading address to an assistant ("ai:", "ask:")
//! 11. idea         — "idea:"/"what if" lead-ins
//!
//! No check firing yields `general` at the floor confidence. This tier is
//! total: it never suspends and never fails.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use inkline_core::{ClassificationResult, NoteTypeTag};

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

static CHECKBOX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(?:[-*]\s*)?\[[ xX]?\]").unwrap());
static TODO_LEADIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(?:todo|to-do|to do)\b").unwrap());

static SHOPPING_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:shopping list|groceries|grocery)\b").unwrap());
static BULLET_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*[-*•]\s+\S").unwrap());
static BUY_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:buy|pick up)\b").unwrap());

static CURRENCY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[$€£]\s?\d+(?:[.,]\d{2})?").unwrap());
static TOTAL_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:total|subtotal|sum|amount due)\b").unwrap());

static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?\d[\d\s().-]{7,}\d").unwrap());
static EMAIL_ADDR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());
static CONTACT_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:phone|tel|mobile|cell|address)\b").unwrap());

static EMAIL_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^\s*(?:to|from|cc|bcc|subject)\s*:").unwrap());
static GREETING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:dear|hi|hello)\s+\w+\s*,").unwrap());
static SIGNOFF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:regards|sincerely|best wishes|cheers)\b").unwrap());

static MEETING_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^\s*(?:attendees|agenda|minutes|action items)\b").unwrap());
static MEETING_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:meeting|standup|sync|retro)\b").unwrap());

static TIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b\d{1,2}:\d{2}\s*(?:am|pm)?\b").unwrap());
static DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}[/.-]\d{1,2}(?:[/.-]\d{2,4})?\b").unwrap());
static EVENT_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:party|concert|wedding|birthday|conference|festival)\b").unwrap()
});

static INGREDIENTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?mi)^\s*ingredients\b").unwrap());
static MEASUREMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d+(?:[.,]\d+)?\s*(?:cups?|tbsp|tsp|tablespoons?|teaspoons?|grams?|kg|ml|oz|ounces?|g|l)\b")
        .unwrap()
});

static REMINDER_PHRASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:remind me|don'?t forget|remember to)\b").unwrap());

static PROMPT_LEADIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(?:ai\s*[:,]|hey ai\b|assistant\s*[:,]|ask\s*:|prompt\s*:)").unwrap());

static IDEA_LEADIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^\s*idea\s*[:\-]|\bwhat if\b|\bbrainstorm\b)").unwrap());

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

struct Check {
    tag: NoteTypeTag,
    name: &'static str,
    eval: fn(&str) -> Option<f32>,
}

/// The fixed priority list. Order is the contract documented in the module
/// header.
static CHECKS: &[Check] = &[
    Check {
        tag: NoteTypeTag::Todo,
        name: "checklist markers",
        eval: check_todo,
    },
    Check {
        tag: NoteTypeTag::Shopping,
        name: "shopping vocabulary",
        eval: check_shopping,
    },
    Check {
        tag: NoteTypeTag::Expense,
        name: "currency amounts",
        eval: check_expense,
    },
    Check {
        tag: NoteTypeTag::Contact,
        name: "contact details",
        eval: check_contact,
    },
    Check {
        tag: NoteTypeTag::Email,
        name: "message headers",
        eval: check_email,
    },
    Check {
        tag: NoteTypeTag::Meeting,
        name: "meeting structure",
        eval: check_meeting,
    },
    Check {
        tag: NoteTypeTag::Event,
        name: "occasion with date",
        eval: check_event,
    },
    Check {
        tag: NoteTypeTag::Recipe,
        name: "ingredients and measures",
        eval: check_recipe,
    },
    Check {
        tag: NoteTypeTag::Reminder,
        name: "reminder phrasing",
        eval: check_reminder,
    },
    Check {
        tag: NoteTypeTag::ExternalPrompt,
        name: "assistant address",
        eval: check_external_prompt,
    },
    Check {
        tag: NoteTypeTag::Idea,
        name: "idea lead-in",
        eval: check_idea,
    },
];

fn check_todo(text: &str) -> Option<f32> {
    let boxes = CHECKBOX.find_iter(text).count();
    let leadin = TODO_LEADIN.is_match(text);
    match (boxes, leadin) {
        (0, false) => None,
        (0, true) => Some(0.8),
        (1, _) => Some(0.7),
        _ => Some(0.85),
    }
}

fn check_shopping(text: &str) -> Option<f32> {
    if SHOPPING_WORD.is_match(text) {
        return Some(0.8);
    }
    let bullets = BULLET_LINE.find_iter(text).count();
    (bullets >= 3 && BUY_WORD.is_match(text)).then_some(0.6)
}

fn check_expense(text: &str) -> Option<f32> {
    let amounts = CURRENCY.find_iter(text).count();
    if amounts >= 1 && TOTAL_WORD.is_match(text) {
        Some(0.85)
    } else if amounts >= 2 {
        Some(0.6)
    } else {
        None
    }
}

fn check_contact(text: &str) -> Option<f32> {
    let phone = PHONE.is_match(text);
    let addr = EMAIL_ADDR.is_match(text);
    let word = CONTACT_WORD.is_match(text);
    if phone && (addr || word) {
        Some(0.8)
    } else if addr && word {
        Some(0.6)
    } else {
        None
    }
}

fn check_email(text: &str) -> Option<f32> {
    let headers = EMAIL_HEADER.find_iter(text).count();
    if headers >= 2 {
        Some(0.85)
    } else if headers == 1 {
        Some(0.6)
    } else if GREETING.is_match(text) && SIGNOFF.is_match(text) {
        Some(0.65)
    } else {
        None
    }
}

fn check_meeting(text: &str) -> Option<f32> {
    if MEETING_HEADER.is_match(text) {
        return Some(0.85);
    }
    (MEETING_WORD.is_match(text) && (TIME.is_match(text) || DATE.is_match(text))).then_some(0.7)
}

fn check_event(text: &str) -> Option<f32> {
    let dated = TIME.is_match(text) || DATE.is_match(text);
    if EVENT_WORD.is_match(text) && dated {
        Some(0.7)
    } else if TIME.is_match(text) && DATE.is_match(text) {
        Some(0.55)
    } else {
        None
    }
}

fn check_recipe(text: &str) -> Option<f32> {
    if INGREDIENTS.is_match(text) {
        return Some(0.8);
    }
    (MEASUREMENT.find_iter(text).count() >= 2).then_some(0.65)
}

fn check_reminder(text: &str) -> Option<f32> {
    REMINDER_PHRASE.is_match(text).then_some(0.8)
}

fn check_external_prompt(text: &str) -> Option<f32> {
    PROMPT_LEADIN.is_match(text).then_some(0.85)
}

fn check_idea(text: &str) -> Option<f32> {
    IDEA_LEADIN.is_match(text).then_some(0.6)
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Pure, total content classifier over the whole text.
#[derive(Debug, Clone, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the fixed priority list and return the first firing check,
    /// or `general` at the floor confidence.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        for check in CHECKS {
            trace!(check = check.name, note_type = %check.tag, "Evaluating heuristic check");
            if let Some(confidence) = (check.eval)(text) {
                debug!(
                    note_type = %check.tag,
                    confidence,
                    check = check.name,
                    "Heuristic check fired"
                );
                return ClassificationResult::heuristic(check.tag, confidence, check.name);
            }
        }
        debug!("No heuristic check fired; falling back to general");
        ClassificationResult::general_floor()
    }
}
