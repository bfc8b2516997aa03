//! Tutor session orchestration
//!
//! Sequences capture → inference → state update → playback for the two
//! session flows. State updates always land before audio starts, so the
//! picture of progress is consistent by the time the learner hears the
//! reply.

pub mod conversation;
pub mod lesson;

pub use conversation::ConversationSession;
pub use lesson::{LessonSession, QuizState};

use serde::{Deserialize, Serialize};

use crate::wordbank::Word;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Model,
}

/// One transcript entry; immutable once appended
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub role: Role,
    pub text: String,
    #[serde(default)]
    pub vocabulary: Option<Vec<Word>>,
    #[serde(default)]
    pub translation: Option<String>,
}

/// Today's date for streak accounting
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
