//! Decoding entry bytes and textual searches over the decoded document.

use regex::Regex;

use crate::error::{InspectError, Result};

/// Characters shown before a context-window hit
pub const CONTEXT_BEFORE: usize = 100;
/// Characters shown after the end of a context-window hit
pub const CONTEXT_AFTER: usize = 200;

/// Decode entry bytes as UTF-8, rejecting invalid sequences.
pub fn decode_utf8(name: &str, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|source| InspectError::Decode {
        name: name.to_string(),
        source,
    })
}

/// The first `max_chars` characters of `text`.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Start and end markers that bracket an element named `tag`.
pub fn tag_markers(tag: &str) -> (String, String) {
    (format!("<{tag}"), format!("</{tag}>"))
}

/// Every span from `start` through the nearest following `end`, in document order.
///
/// Matching is purely textual: a nested element with the same name closes
/// the span early, and `<Audio` also matches `<AudioClip`. Spans never
/// overlap.
pub fn bounded_matches<'a>(text: &'a str, start: &str, end: &str) -> Result<Vec<&'a str>> {
    let pattern = Regex::new(&format!(
        "(?s){}.*?{}",
        regex::escape(start),
        regex::escape(end)
    ))?;
    Ok(pattern.find_iter(text).map(|m| m.as_str()).collect())
}

/// Text around the first occurrence of `term`.
///
/// Spans from `CONTEXT_BEFORE` characters before the hit to `CONTEXT_AFTER`
/// characters after its end, clamped to the document.
pub fn context_window<'a>(text: &'a str, term: &str) -> Result<&'a str> {
    let hit = text
        .find(term)
        .ok_or_else(|| InspectError::TermNotFound(term.to_string()))?;

    let hit_char = text[..hit].chars().count();
    let first = hit_char.saturating_sub(CONTEXT_BEFORE);
    let last = hit_char + term.chars().count() + CONTEXT_AFTER;

    let byte_at = |char_idx: usize| {
        text.char_indices()
            .nth(char_idx)
            .map_or(text.len(), |(i, _)| i)
    };
    Ok(&text[byte_at(first)..byte_at(last)])
}
