//! Speakable-text normalization
//!
//! Model replies arrive with markdown, emoji and decorations that sound
//! terrible when synthesized. This strips them, and routes away fragments
//! not worth a remote synthesis call.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Markdown/markup punctuation that should never be spoken
    static ref MARKUP: Regex = Regex::new(r"[*_#`~>|\[\]()]").unwrap();
    /// Emoji and pictograph ranges, plus variation selectors
    static ref EMOJI: Regex = Regex::new(
        "[\u{1F300}-\u{1FAFF}\u{1F000}-\u{1F2FF}\u{2600}-\u{27BF}\u{2190}-\u{21FF}\u{FE0E}\u{FE0F}\u{200D}]"
    )
    .unwrap();
}

/// Minimum length for a non-Kannada fragment to be worth synthesizing
const MIN_LATIN_LEN: usize = 3;

/// True if any character is in the Kannada Unicode block
pub fn has_kannada(text: &str) -> bool {
    text.chars().any(|c| ('\u{0C80}'..='\u{0CFF}').contains(&c))
}

/// Strip markup and emoji, collapse whitespace
pub fn normalize(text: &str) -> String {
    let stripped = MARKUP.replace_all(text, " ");
    let stripped = EMOJI.replace_all(&stripped, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize and decide whether the result is worth speaking at all.
/// Returns `None` for empty text and for short non-Kannada fragments,
/// which would otherwise waste a remote synthesis round trip.
pub fn speakable(text: &str) -> Option<String> {
    let clean = normalize(text);
    if clean.is_empty() {
        return None;
    }
    if clean.chars().count() < MIN_LATIN_LEN && !has_kannada(&clean) {
        return None;
    }
    Some(clean)
}
