//! Word Bank
//!
//! Accumulates vocabulary learned across sessions, deduplicated by the
//! Kannada form. Category grouping is derived on demand for display.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Category used when a word arrives without one
pub const DEFAULT_CATEGORY: &str = "General";

/// A single vocabulary item. Identity is the `kannada` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub kannada: String,
    pub transliteration: String,
    pub english: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl Word {
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }
}

/// Deduplicated, most-recent-first vocabulary store
#[derive(Debug, Default)]
pub struct WordBank {
    words: Vec<Word>,
    seen: HashSet<String>,
}

impl WordBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add candidate words, returning the subset that was actually new.
    ///
    /// A candidate is accepted iff no existing entry shares its `kannada`
    /// value. Accepted words are prepended so the newest vocabulary shows
    /// first, preserving relative order among themselves. The returned
    /// delta is what callers feed to the progress ledger, so re-delivery
    /// of a word never counts twice.
    pub fn add(&mut self, candidates: &[Word]) -> Vec<Word> {
        let mut accepted = Vec::new();
        for word in candidates {
            let key = word.kannada.trim();
            if key.is_empty() || self.seen.contains(key) {
                continue;
            }
            // Dedup within the same batch as well
            if accepted
                .iter()
                .any(|w: &Word| w.kannada.trim() == key)
            {
                continue;
            }
            accepted.push(word.clone());
        }

        if !accepted.is_empty() {
            debug!("📚 Word bank accepted {} new word(s)", accepted.len());
            for word in &accepted {
                self.seen.insert(word.kannada.trim().to_string());
            }
            // Prepend, keeping the batch's own order
            let mut merged = accepted.clone();
            merged.append(&mut self.words);
            self.words = merged;
        }

        accepted
    }

    /// Number of distinct words ever accepted
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words, most recent first
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Derived projection: words grouped by category, insertion order
    /// preserved within each group. Recomputed on demand, not stored.
    pub fn by_category(&self) -> Vec<(String, Vec<&Word>)> {
        let mut groups: Vec<(String, Vec<&Word>)> = Vec::new();
        for word in &self.words {
            let cat = word.category();
            match groups.iter_mut().find(|(name, _)| name == cat) {
                Some((_, members)) => members.push(word),
                None => groups.push((cat.to_string(), vec![word])),
            }
        }
        groups
    }
}
