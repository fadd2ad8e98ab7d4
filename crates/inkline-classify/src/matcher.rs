//! Exact and fuzzy trigger matchers.
//!
//! Single-note classification scans only the first
//! [`TRIGGER_SCAN_WINDOW`](inkline_core::defaults::TRIGGER_SCAN_WINDOW)
//! characters: a marker states intent at the start of a capture, not deep in
//! body prose. The splitter's [`TriggerMatcher::find_all`] deliberately
//! ignores the window and scans the whole input.
//!
//! All tie-breaks are positional first (earliest occurrence wins), then
//! longest marker, then vocabulary order. Nothing here is nondeterministic.

use std::sync::Arc;

use tracing::{debug, trace};

use inkline_core::defaults::{
    EXACT_CONFIDENCE, FUZZY_EDIT_CONFIDENCE, FUZZY_LENGTH_SLACK, FUZZY_MAX_EDIT_DISTANCE,
    FUZZY_TABLE_CONFIDENCE, TRIGGER_SCAN_WINDOW,
};
use inkline_core::TriggerDefinition;

use crate::vocabulary::TriggerVocabulary;

// ---------------------------------------------------------------------------
// Match result
// ---------------------------------------------------------------------------

/// How a trigger match was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Marker found verbatim (case-insensitively).
    Exact,
    /// Token resolved through the precomputed OCR-variant table.
    VariantTable,
    /// Token resolved through bounded edit distance.
    EditDistance,
}

/// One resolved trigger occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerMatch {
    /// Canonical definition the occurrence resolved to.
    pub definition: TriggerDefinition,
    /// Byte offset of the occurrence in the scanned text.
    pub offset: usize,
    /// The text as it actually appeared (original casing, possibly
    /// corrupted spelling).
    pub matched_text: String,
    /// Resolution path.
    pub kind: MatchKind,
}

impl TriggerMatch {
    /// Byte offset one past the matched text.
    pub fn end_offset(&self) -> usize {
        self.offset + self.matched_text.len()
    }

    /// Tier confidence for this match kind.
    pub fn confidence(&self) -> f32 {
        match self.kind {
            MatchKind::Exact => EXACT_CONFIDENCE,
            MatchKind::VariantTable => FUZZY_TABLE_CONFIDENCE,
            MatchKind::EditDistance => FUZZY_EDIT_CONFIDENCE,
        }
    }
}

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

/// Scans text for trigger markers against an immutable vocabulary.
#[derive(Debug, Clone)]
pub struct TriggerMatcher {
    vocabulary: Arc<TriggerVocabulary>,
}

impl TriggerMatcher {
    pub fn new(vocabulary: Arc<TriggerVocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &TriggerVocabulary {
        &self.vocabulary
    }

    /// Exact marker scan over the bounded prefix window.
    ///
    /// Returns the first occurrence by text position; at equal positions the
    /// longer marker wins (so a marker is never shadowed by its own prefix).
    pub fn match_exact(&self, text: &str) -> Option<TriggerMatch> {
        let window = &text[..window_end(text)];
        let found = self.earliest_exact(window, 0)?;
        debug!(
            marker = %found.definition.marker,
            match_offset = found.offset,
            "Exact trigger match"
        );
        Some(found)
    }

    /// Fuzzy marker scan over the bounded prefix window, invoked only when
    /// [`match_exact`](Self::match_exact) found nothing.
    ///
    /// Candidate tokens are checked in text order: variant-table lookup
    /// first, then bounded Levenshtein against each canonical marker
    /// (distance ≤ 2, length within ±2). A candidate must retain at least
    /// one `#` delimiter; a corruption that lost both delimiters is
    /// indistinguishable from prose and is left to the heuristic tier.
    pub fn match_fuzzy(&self, text: &str) -> Option<TriggerMatch> {
        let window = &text[..window_end(text)];

        for (offset, token) in tokens(window) {
            let lower = token.to_lowercase();

            if let Some(def) = self.vocabulary.resolve_variant(&lower) {
                debug!(
                    marker = %def.marker,
                    matched = token,
                    match_offset = offset,
                    "Fuzzy trigger match via variant table"
                );
                return Some(TriggerMatch {
                    definition: def.clone(),
                    offset,
                    matched_text: token.to_string(),
                    kind: MatchKind::VariantTable,
                });
            }

            if !lower.contains('#') {
                continue;
            }

            let token_chars = lower.chars().count();
            let mut best: Option<(usize, &TriggerDefinition)> = None;
            for def in self.vocabulary.definitions() {
                let marker_chars = def.marker_chars();
                if token_chars.abs_diff(marker_chars) > FUZZY_LENGTH_SLACK {
                    continue;
                }
                trace!(candidate = %lower, marker = %def.marker, "Edit-distance comparison");
                if let Some(distance) =
                    levenshtein_bounded(&lower, &def.marker, FUZZY_MAX_EDIT_DISTANCE)
                {
                    // Distance 0 belongs to the exact tier.
                    if distance == 0 {
                        continue;
                    }
                    if best.map_or(true, |(d, _)| distance < d) {
                        best = Some((distance, def));
                    }
                }
            }

            if let Some((distance, def)) = best {
                debug!(
                    marker = %def.marker,
                    matched = token,
                    match_offset = offset,
                    edit_distance = distance,
                    "Fuzzy trigger match via edit distance"
                );
                return Some(TriggerMatch {
                    definition: def.clone(),
                    offset,
                    matched_text: token.to_string(),
                    kind: MatchKind::EditDistance,
                });
            }
        }

        None
    }

    /// Every exact marker occurrence in the **entire** input, in text order,
    /// non-overlapping. Used by the section splitter; unbounded on purpose,
    /// in contrast to the windowed single-note scan.
    pub fn find_all(&self, text: &str) -> Vec<TriggerMatch> {
        let mut matches = Vec::new();
        let mut pos = 0;
        while pos < text.len() {
            match self.earliest_exact(text, pos) {
                Some(found) => {
                    pos = found.end_offset();
                    matches.push(found);
                }
                None => break,
            }
        }
        matches
    }

    /// Earliest exact occurrence of any marker at byte offset ≥ `from`.
    fn earliest_exact(&self, text: &str, from: usize) -> Option<TriggerMatch> {
        let mut best: Option<(usize, &TriggerDefinition)> = None;
        for def in self.vocabulary.definitions() {
            if let Some(offset) = find_ignore_ascii_case(&text[from..], &def.marker) {
                let offset = from + offset;
                let better = match best {
                    None => true,
                    Some((best_offset, best_def)) => {
                        offset < best_offset
                            || (offset == best_offset && def.marker.len() > best_def.marker.len())
                    }
                };
                if better {
                    best = Some((offset, def));
                }
            }
        }
        best.map(|(offset, def)| TriggerMatch {
            definition: def.clone(),
            offset,
            matched_text: text[offset..offset + def.marker.len()].to_string(),
            kind: MatchKind::Exact,
        })
    }
}

// ---------------------------------------------------------------------------
// Scan helpers
// ---------------------------------------------------------------------------

/// Byte index just past the `TRIGGER_SCAN_WINDOW`th character.
fn window_end(text: &str) -> usize {
    text.char_indices()
        .nth(TRIGGER_SCAN_WINDOW)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// ASCII-case-insensitive substring search returning a byte offset.
///
/// Markers are ASCII; the haystack may not be. Slicing via `get` keeps the
/// scan UTF-8 safe without lowercasing the haystack (which would shift byte
/// offsets).
pub(crate) fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let n = needle.len();
    if n == 0 || n > haystack.len() {
        return None;
    }
    for (i, _) in haystack.char_indices() {
        if i + n > haystack.len() {
            break;
        }
        if let Some(slice) = haystack.get(i..i + n) {
            if slice.eq_ignore_ascii_case(needle) {
                return Some(i);
            }
        }
    }
    None
}

/// Whitespace-delimited tokens with byte offsets, trimmed of common
/// sentence punctuation (a trailing comma must not defeat the variant
/// lookup).
fn tokens(text: &str) -> Vec<(usize, &str)> {
    const TRIM: &[char] = &[',', '.', ';', ':', '!', '?', ')', '(', '"', '\''];
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                push_trimmed(text, s, i, TRIM, &mut out);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        push_trimmed(text, s, text.len(), TRIM, &mut out);
    }
    out
}

fn push_trimmed<'a>(
    text: &'a str,
    start: usize,
    end: usize,
    trim: &[char],
    out: &mut Vec<(usize, &'a str)>,
) {
    let raw = &text[start..end];
    let trimmed = raw.trim_matches(|c| trim.contains(&c));
    if trimmed.is_empty() {
        return;
    }
    let lead = raw.len() - raw.trim_start_matches(|c| trim.contains(&c)).len();
    out.push((start + lead, trimmed));
}

/// Levenshtein distance between `a` and `b`, or `None` if it exceeds `max`.
///
/// Operates on characters, not bytes. Bails out early on length difference
/// and on rows whose minimum already exceeds the bound.
fn levenshtein_bounded(a: &str, b: &str, max: usize) -> Option<usize> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.len().abs_diff(b.len()) > max {
        return None;
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        let mut row_min = curr[0];
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
            row_min = row_min.min(curr[j + 1]);
        }
        if row_min > max {
            return None;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let distance = prev[b.len()];
    (distance <= max).then_some(distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkline_core::NoteTypeTag;

    fn matcher() -> TriggerMatcher {
        TriggerMatcher::new(Arc::new(TriggerVocabulary::builtin()))
    }

    // -----------------------------------------------------------------------
    // Exact matching
    // -----------------------------------------------------------------------

    #[test]
    fn exact_match_at_start() {
        let found = matcher().match_exact("#todo# Buy milk").unwrap();
        assert_eq!(found.definition.tag, NoteTypeTag::Todo);
        assert_eq!(found.offset, 0);
        assert_eq!(found.matched_text, "#todo#");
        assert_eq!(found.kind, MatchKind::Exact);
        assert_eq!(found.confidence(), 1.0);
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let found = matcher().match_exact("#ToDo# Buy milk").unwrap();
        assert_eq!(found.definition.marker, "#todo#");
        assert_eq!(found.matched_text, "#ToDo#");
    }

    #[test]
    fn exact_match_first_by_position_not_priority() {
        // #email# occurs before #todo#; position wins regardless of any
        // type ordering.
        let found = matcher().match_exact("#email# then #todo#").unwrap();
        assert_eq!(found.definition.tag, NoteTypeTag::Email);
    }

    #[test]
    fn exact_match_ignores_marker_outside_window() {
        let mut text = "x".repeat(120);
        text.push_str(" #todo# late marker");
        assert!(matcher().match_exact(&text).is_none());
    }

    #[test]
    fn exact_match_inside_window_with_late_extra_marker() {
        let mut text = "#todo# early ".to_string();
        text.push_str(&"x".repeat(150));
        text.push_str(" #email#");
        let found = matcher().match_exact(&text).unwrap();
        assert_eq!(found.definition.tag, NoteTypeTag::Todo);
    }

    #[test]
    fn exact_match_none_without_marker() {
        assert!(matcher().match_exact("just some prose").is_none());
        assert!(matcher().match_exact("").is_none());
    }

    #[test]
    fn exact_match_survives_multibyte_prefix() {
        let found = matcher().match_exact("café ☕ #todo# milk").unwrap();
        assert_eq!(found.definition.tag, NoteTypeTag::Todo);
        assert_eq!(&"café ☕ #todo# milk"[found.offset..found.end_offset()], "#todo#");
    }

    // -----------------------------------------------------------------------
    // Fuzzy matching
    // -----------------------------------------------------------------------

    #[test]
    fn fuzzy_match_via_variant_table() {
        let found = matcher().match_fuzzy("#tod0# Buy milk").unwrap();
        assert_eq!(found.definition.tag, NoteTypeTag::Todo);
        assert_eq!(found.kind, MatchKind::VariantTable);
        assert_eq!(found.confidence(), 0.92);
        assert_eq!(found.matched_text, "#tod0#");
    }

    #[test]
    fn fuzzy_match_via_edit_distance() {
        // "#todoo#" is not in the variant table; distance 1 from "#todo#".
        let found = matcher().match_fuzzy("#todoo# Buy milk").unwrap();
        assert_eq!(found.definition.tag, NoteTypeTag::Todo);
        assert_eq!(found.kind, MatchKind::EditDistance);
        assert_eq!(found.confidence(), 0.87);
    }

    #[test]
    fn fuzzy_table_confidence_exceeds_edit_confidence() {
        let table = matcher().match_fuzzy("#tod0# x").unwrap();
        let edit = matcher().match_fuzzy("#todoo# x").unwrap();
        assert!(table.confidence() > edit.confidence());
    }

    #[test]
    fn fuzzy_match_trims_trailing_punctuation() {
        let found = matcher().match_fuzzy("#tod0#, then milk").unwrap();
        assert_eq!(found.kind, MatchKind::VariantTable);
    }

    #[test]
    fn fuzzy_match_requires_delimiter() {
        // "tasks" is 1 edit from "#task#"? No: without a '#' the token is
        // prose and must not fuzzy-match.
        assert!(matcher().match_fuzzy("tasks for the week").is_none());
        assert!(matcher().match_fuzzy("buy milk and eggs").is_none());
    }

    #[test]
    fn fuzzy_match_respects_window() {
        let mut text = "x".repeat(120);
        text.push_str(" #tod0# late");
        assert!(matcher().match_fuzzy(&text).is_none());
    }

    #[test]
    fn fuzzy_match_first_token_by_position_wins() {
        let found = matcher().match_fuzzy("#emall# before #tod0#").unwrap();
        assert_eq!(found.definition.tag, NoteTypeTag::Email);
    }

    #[test]
    fn fuzzy_match_rejects_distance_over_two() {
        // "#tdxyz#" is ≥ 3 edits from every marker of similar length.
        assert!(matcher().match_fuzzy("#tdxyz# stuff").is_none());
    }

    #[test]
    fn fuzzy_offset_points_at_token() {
        let text = "see #tod0# now";
        let found = matcher().match_fuzzy(text).unwrap();
        assert_eq!(&text[found.offset..found.end_offset()], "#tod0#");
    }

    // -----------------------------------------------------------------------
    // Unbounded scan
    // -----------------------------------------------------------------------

    #[test]
    fn find_all_returns_matches_in_text_order() {
        let text = "#todo# Buy groceries\n\n#email# Draft response";
        let all = matcher().find_all(text);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].definition.tag, NoteTypeTag::Todo);
        assert_eq!(all[1].definition.tag, NoteTypeTag::Email);
        assert!(all[0].offset < all[1].offset);
    }

    #[test]
    fn find_all_is_unbounded() {
        let mut text = "preamble ".to_string();
        text.push_str(&"x".repeat(300));
        text.push_str("\n#todo# late but found");
        let all = matcher().find_all(&text);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].definition.tag, NoteTypeTag::Todo);
    }

    #[test]
    fn find_all_empty_without_markers() {
        assert!(matcher().find_all("no markers here").is_empty());
    }

    #[test]
    fn find_all_does_not_match_fuzzy_variants() {
        // Splitting keys on exact markers only.
        assert!(matcher().find_all("#tod0# corrupted only").is_empty());
    }

    // -----------------------------------------------------------------------
    // Levenshtein
    // -----------------------------------------------------------------------

    #[test]
    fn levenshtein_identical() {
        assert_eq!(levenshtein_bounded("#todo#", "#todo#", 2), Some(0));
    }

    #[test]
    fn levenshtein_substitution() {
        assert_eq!(levenshtein_bounded("#tod0#", "#todo#", 2), Some(1));
    }

    #[test]
    fn levenshtein_insert_delete() {
        assert_eq!(levenshtein_bounded("#tdo#", "#todo#", 2), Some(1));
        assert_eq!(levenshtein_bounded("#todoo#", "#todo#", 2), Some(1));
    }

    #[test]
    fn levenshtein_exceeds_bound() {
        assert_eq!(levenshtein_bounded("#abcdef#", "#todo#", 2), None);
    }

    #[test]
    fn levenshtein_length_diff_short_circuits() {
        assert_eq!(levenshtein_bounded("#x#", "#meeting#", 2), None);
    }

    #[test]
    fn levenshtein_multibyte_chars() {
        assert_eq!(levenshtein_bounded("#tödo#", "#todo#", 2), Some(1));
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    #[test]
    fn window_end_short_text() {
        assert_eq!(window_end("abc"), 3);
    }

    #[test]
    fn window_end_counts_chars_not_bytes() {
        let text = "é".repeat(150); // 2 bytes per char
        assert_eq!(window_end(&text), 200);
    }

    #[test]
    fn find_ignore_ascii_case_basic() {
        assert_eq!(find_ignore_ascii_case("abc #TODO# def", "#todo#"), Some(4));
        assert_eq!(find_ignore_ascii_case("abc", "#todo#"), None);
    }

    #[test]
    fn tokens_reports_byte_offsets() {
        let toks = tokens("  #todo#  milk");
        assert_eq!(toks, vec![(2, "#todo#"), (10, "milk")]);
    }
}
