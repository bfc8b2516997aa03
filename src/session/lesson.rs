//! Lesson flow
//!
//! Fetches one lesson per session, feeds its example vocabulary through
//! the word bank and ledger, and runs the quiz state machine over the
//! learner's spoken answer: a cheap local containment check first, the
//! remote semantic check only when that fails.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::today;
use crate::app::AppState;
use crate::audio::PlaybackController;
use crate::error::{KalikeError, KalikeResult};
use crate::tutor::{LessonContent, TutorService};

/// How long after lesson fetch the concept explanation is spoken
const EXPLANATION_DELAY: Duration = Duration::from_millis(1200);

/// Fuzzy-match floor for the local answer check
const LOCAL_MATCH_THRESHOLD: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizState {
    #[default]
    Idle,
    Verifying,
    Success,
    Failure,
}

pub struct LessonSession {
    service: Arc<dyn TutorService>,
    content: Option<LessonContent>,
    quiz: QuizState,
}

impl LessonSession {
    pub fn new(service: Arc<dyn TutorService>) -> Self {
        Self {
            service,
            content: None,
            quiz: QuizState::Idle,
        }
    }

    pub fn content(&self) -> Option<&LessonContent> {
        self.content.as_ref()
    }

    pub fn quiz_state(&self) -> QuizState {
        self.quiz
    }

    /// Fetch the lesson and apply its vocabulary. Fetch failures
    /// propagate so the host can render an error state with a manual
    /// retry; everything after the fetch is local.
    pub async fn begin(
        &mut self,
        state: &mut AppState,
        playback: &PlaybackController,
    ) -> KalikeResult<()> {
        let lesson = self
            .service
            .generate_lesson(state.level)
            .await
            .map_err(|e| KalikeError::Lesson(e.to_string()))?;

        info!("📖 Lesson ready: {}", lesson.title);

        let accepted = state.word_bank.add(&lesson.examples);
        if !accepted.is_empty() {
            state.ledger.apply_words_learned(&accepted);
        }
        state.ledger.record_activity(today());

        // Give the learner a moment with the lesson before speaking
        let spoken = format!("{}. {}", lesson.concept, lesson.explanation);
        let delayed = playback.clone();
        tokio::spawn(async move {
            tokio::time::sleep(EXPLANATION_DELAY).await;
            delayed.play(&spoken).await;
        });

        self.content = Some(lesson);
        self.quiz = QuizState::Idle;
        Ok(())
    }

    /// Run the learner's spoken answer through the quiz machine.
    /// `Idle -> Verifying -> Success | Failure`; success is terminal and
    /// completes the lesson, returning the learner to the dashboard.
    pub async fn submit_answer(&mut self, answer: &str, state: &mut AppState) -> QuizState {
        let Some(content) = &self.content else {
            warn!("📖 Answer submitted before any lesson was loaded");
            return self.quiz;
        };
        if self.quiz != QuizState::Idle {
            debug!("📖 Answer ignored in state {:?}", self.quiz);
            return self.quiz;
        }

        self.quiz = QuizState::Verifying;
        let expected = content.quiz.correct_answer.clone();

        // Local check first; the remote round trip is only for answers
        // the containment check can't confirm
        let correct = local_match(answer, &expected)
            || self.service.validate_answer(answer, &expected).await;

        if correct {
            info!("✅ Quiz answered correctly");
            self.quiz = QuizState::Success;
            state.ledger.apply_lesson_complete();
            state.ledger.record_activity(today());
            state.return_to_dashboard();
        } else {
            self.quiz = QuizState::Failure;
        }
        self.quiz
    }

    /// Failure -> Idle so the learner can answer again
    pub fn retry(&mut self) {
        if self.quiz == QuizState::Failure {
            self.quiz = QuizState::Idle;
        }
    }
}

/// Case-insensitive containment either way, with a fuzzy fallback for
/// small transcription wobbles
fn local_match(candidate: &str, expected: &str) -> bool {
    let candidate = candidate.trim().to_lowercase();
    let expected = expected.trim().to_lowercase();
    if candidate.is_empty() || expected.is_empty() {
        return false;
    }
    if candidate.contains(&expected) || expected.contains(&candidate) {
        return true;
    }
    strsim::normalized_levenshtein(&candidate, &expected) >= LOCAL_MATCH_THRESHOLD
}
