//! Tutor inference services
//!
//! Contracts for the hosted generative backend: conversational replies,
//! structured lessons, and semantic answer validation. The remote client
//! lives in `remote`; tests substitute mocks.

pub mod remote;

use crate::app::LearnerLevel;
use crate::config::Config;
use crate::wordbank::Word;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use remote::RemoteTutor;

/// One prior exchange turn sent as chat context
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: &'static str,
    pub text: String,
}

/// Response to a conversational utterance
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub reply: String,
    pub translation: Option<String>,
    pub follow_up: Option<String>,
    pub vocabulary: Vec<Word>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

/// A generated lesson, fetched once per session and immutable after
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonContent {
    pub title: String,
    pub concept: String,
    pub explanation: String,
    pub examples: Vec<Word>,
    pub quiz: QuizQuestion,
}

/// Trait for the hosted tutoring backend
#[async_trait]
pub trait TutorService: Send + Sync {
    /// Conversational reply for an utterance with prior context.
    /// Implementations absorb API failures into a canned apology reply;
    /// an `Err` here means the request never completed at all.
    async fn chat(
        &self,
        utterance: &str,
        history: &[ChatTurn],
        level: LearnerLevel,
    ) -> Result<ChatReply>;

    /// Generate a lesson for the learner level. Failures propagate; the
    /// caller renders an error state with a retry affordance.
    async fn generate_lesson(&self, level: LearnerLevel) -> Result<LessonContent>;

    /// Semantic equivalence check between a spoken answer and the
    /// expected one. Any failure means "not equivalent".
    async fn validate_answer(&self, candidate: &str, expected: &str) -> bool;
}

/// Factory to create the configured tutor service
pub fn create_service(config: &Config) -> Arc<dyn TutorService> {
    Arc::new(RemoteTutor::new(config))
}
