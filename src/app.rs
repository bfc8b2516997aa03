//! Application state
//!
//! The mode/navigation state machine and the state root owned by the host.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::progress::Ledger;
use crate::wordbank::WordBank;

/// Self-reported learner proficiency, sent with every inference request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearnerLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl LearnerLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LearnerLevel::Beginner => "beginner",
            LearnerLevel::Intermediate => "intermediate",
            LearnerLevel::Advanced => "advanced",
        }
    }
}

/// Top-level view the host is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Onboarding,
    Dashboard,
    Conversation,
    Lesson,
}

/// Root application state: mode, ledger, word bank, auxiliary UI flags.
/// Subordinate components borrow this rather than holding globals.
#[derive(Debug, Default)]
pub struct AppState {
    pub mode: Mode,
    pub level: LearnerLevel,
    pub ledger: Ledger,
    pub word_bank: WordBank,
    pub word_drawer_open: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Onboarding -> Dashboard, recording the chosen level
    pub fn complete_onboarding(&mut self, level: LearnerLevel) {
        if self.mode != Mode::Onboarding {
            return;
        }
        self.level = level;
        self.mode = Mode::Dashboard;
        debug!("🚪 Onboarding complete, level = {}", level.as_str());
    }

    /// Dashboard -> Conversation; collapses the word drawer
    pub fn start_conversation(&mut self) {
        if self.mode != Mode::Dashboard {
            return;
        }
        self.word_drawer_open = false;
        self.mode = Mode::Conversation;
    }

    /// Dashboard -> Lesson; collapses the word drawer
    pub fn start_lesson(&mut self) {
        if self.mode != Mode::Dashboard {
            return;
        }
        self.word_drawer_open = false;
        self.mode = Mode::Lesson;
    }

    /// Conversation/Lesson -> Dashboard
    pub fn return_to_dashboard(&mut self) {
        if matches!(self.mode, Mode::Conversation | Mode::Lesson) {
            self.mode = Mode::Dashboard;
        }
    }

    /// Dashboard -> Onboarding (explicit level change)
    pub fn change_level(&mut self) {
        if self.mode == Mode::Dashboard {
            self.mode = Mode::Onboarding;
        }
    }

    pub fn toggle_word_drawer(&mut self) {
        self.word_drawer_open = !self.word_drawer_open;
    }
}
