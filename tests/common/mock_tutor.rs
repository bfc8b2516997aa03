//! Mock tutor service for testing
//!
//! Scripted replies, lessons and validation verdicts, plus call
//! recording so tests can assert which paths were taken.

use anyhow::Result;
use async_trait::async_trait;
use kalike::app::LearnerLevel;
use kalike::tutor::{ChatReply, ChatTurn, LessonContent, QuizQuestion, TutorService};
use kalike::wordbank::Word;
use std::sync::{Arc, Mutex};

pub struct MockTutor {
    pub reply: Mutex<Option<ChatReply>>,
    pub lesson: Mutex<Option<LessonContent>>,
    /// When set, `chat` returns a hard error (request never completed)
    pub chat_fails: Mutex<bool>,
    pub lesson_fails: Mutex<bool>,
    pub validation_verdict: Mutex<bool>,
    pub validation_calls: Arc<Mutex<u32>>,
    pub chat_calls: Arc<Mutex<u32>>,
}

impl MockTutor {
    pub fn new() -> Self {
        Self {
            reply: Mutex::new(None),
            lesson: Mutex::new(None),
            chat_fails: Mutex::new(false),
            lesson_fails: Mutex::new(false),
            validation_verdict: Mutex::new(false),
            validation_calls: Arc::new(Mutex::new(0)),
            chat_calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_reply(reply: ChatReply) -> Self {
        let mock = Self::new();
        *mock.reply.lock().unwrap() = Some(reply);
        mock
    }

    pub fn with_lesson(lesson: LessonContent) -> Self {
        let mock = Self::new();
        *mock.lesson.lock().unwrap() = Some(lesson);
        mock
    }
}

impl Default for MockTutor {
    fn default() -> Self {
        Self::new()
    }
}

/// A minimal reply carrying the given vocabulary
pub fn reply_with_words(reply: &str, vocabulary: Vec<Word>) -> ChatReply {
    ChatReply {
        reply: reply.to_string(),
        translation: Some("translation".to_string()),
        follow_up: Some("ಮುಂದೆ? And then?".to_string()),
        vocabulary,
    }
}

/// A small complete lesson for quiz-flow tests
pub fn sample_lesson(expected_answer: &str, examples: Vec<Word>) -> LessonContent {
    LessonContent {
        title: "Greetings".to_string(),
        concept: "Saying hello".to_string(),
        explanation: "ನಮಸ್ಕಾರ is the standard greeting.".to_string(),
        examples,
        quiz: QuizQuestion {
            question: "How do you greet someone?".to_string(),
            options: vec![
                "ನಮಸ್ಕಾರ".to_string(),
                "ಹೌದು".to_string(),
                "ಇಲ್ಲ".to_string(),
            ],
            correct_answer: expected_answer.to_string(),
            explanation: "ನಮಸ್ಕಾರ is used for hello.".to_string(),
        },
    }
}

#[async_trait]
impl TutorService for MockTutor {
    async fn chat(
        &self,
        _utterance: &str,
        _history: &[ChatTurn],
        _level: LearnerLevel,
    ) -> Result<ChatReply> {
        *self.chat_calls.lock().unwrap() += 1;
        if *self.chat_fails.lock().unwrap() {
            return Err(anyhow::anyhow!("Mock chat failure"));
        }
        Ok(self
            .reply
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| reply_with_words("ಸರಿ, ಮುಂದುವರಿಸೋಣ", Vec::new())))
    }

    async fn generate_lesson(&self, _level: LearnerLevel) -> Result<LessonContent> {
        if *self.lesson_fails.lock().unwrap() {
            return Err(anyhow::anyhow!("Mock lesson failure"));
        }
        self.lesson
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| anyhow::anyhow!("No lesson scripted"))
    }

    async fn validate_answer(&self, _candidate: &str, _expected: &str) -> bool {
        *self.validation_calls.lock().unwrap() += 1;
        *self.validation_verdict.lock().unwrap()
    }
}
