//! Orchestration flow tests over mock engines

mod common;

use common::mock_tts::MockTts;
use common::mock_tutor::{reply_with_words, sample_lesson, MockTutor};
use common::word;
use kalike::app::{AppState, LearnerLevel, Mode};
use kalike::audio::PlaybackController;
use kalike::progress::POINTS_PER_LESSON;
use kalike::session::{ConversationSession, LessonSession, QuizState, Role};
use kalike::tts::SystemVoice;
use std::sync::Arc;

fn playback() -> (PlaybackController, Arc<MockTts>) {
    let tts = Arc::new(MockTts::new());
    let controller = PlaybackController::new(tts.clone(), SystemVoice::new("kn-IN"));
    (controller, tts)
}

fn dashboard_state() -> AppState {
    let mut app = AppState::new();
    app.complete_onboarding(LearnerLevel::Beginner);
    app
}

#[tokio::test]
async fn test_conversation_applies_vocabulary_before_reply() {
    let tutor = Arc::new(MockTutor::with_reply(reply_with_words(
        "ನಮಸ್ಕಾರ! ಚೆನ್ನಾಗಿದ್ದೀನಿ",
        vec![word("ನಮಸ್ಕಾರ", "hello"), word("ಹೇಗಿದ್ದೀರಾ", "how are you")],
    )));
    let (playback, tts) = playback();
    let mut app = dashboard_state();
    app.start_conversation();
    let mut session = ConversationSession::new(tutor);

    session
        .handle_transcript("hello", &mut app, &playback)
        .await;

    // Both words accepted, ledger consistent, Rookie still locked
    assert_eq!(app.word_bank.len(), 2);
    assert_eq!(app.ledger.words_learned, 2);
    let rookie = app.ledger.badges.iter().find(|b| b.id == "rookie").unwrap();
    assert!(!rookie.unlocked);

    // Transcript: user then model
    let transcript = session.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].role, Role::User);
    assert_eq!(transcript[1].role, Role::Model);

    // Reply and follow-up were spoken
    assert!(tts.was_synthesized("ನಮಸ್ಕಾರ! ಚೆನ್ನಾಗಿದ್ದೀನಿ"));
}

#[tokio::test]
async fn test_conversation_failure_leaves_state_untouched() {
    let tutor = Arc::new(MockTutor::with_reply(reply_with_words(
        "ಸರಿ",
        vec![word("ಸರಿ", "okay")],
    )));
    *tutor.chat_fails.lock().unwrap() = true;
    let (playback, tts) = playback();
    let mut app = dashboard_state();
    let mut session = ConversationSession::new(tutor);

    session
        .handle_transcript("hello", &mut app, &playback)
        .await;

    // No model message, nothing learned, processing cleared, no audio
    assert_eq!(session.transcript().len(), 1);
    assert_eq!(session.transcript()[0].role, Role::User);
    assert!(!session.is_processing());
    assert_eq!(app.ledger.words_learned, 0);
    assert_eq!(app.ledger.points, 0);
    assert!(app.word_bank.is_empty());
    assert!(tts.get_synthesized().is_empty());
}

#[tokio::test]
async fn test_redelivered_word_counts_once() {
    let tutor = Arc::new(MockTutor::with_reply(reply_with_words(
        "ಹೌದು",
        vec![word("ಹೌದು", "yes")],
    )));
    let (playback, _) = playback();
    let mut app = dashboard_state();
    let mut session = ConversationSession::new(tutor);

    session.handle_transcript("one", &mut app, &playback).await;
    session.handle_transcript("two", &mut app, &playback).await;

    assert_eq!(app.word_bank.len(), 1);
    assert_eq!(app.ledger.words_learned, 1);
}

#[tokio::test]
async fn test_rookie_unlocks_on_crossing_exchange() {
    let first_nine: Vec<_> = (0..9).map(|i| word(&format!("ಪದ{}", i), "w")).collect();
    let tutor = Arc::new(MockTutor::with_reply(reply_with_words("ಸರಿ", first_nine)));
    let (playback, _) = playback();
    let mut app = dashboard_state();
    let mut session = ConversationSession::new(tutor.clone());

    session.handle_transcript("one", &mut app, &playback).await;
    assert!(!app.ledger.badges.iter().find(|b| b.id == "rookie").unwrap().unlocked);

    *tutor.reply.lock().unwrap() = Some(reply_with_words("ಸರಿ", vec![word("ಹತ್ತು", "ten")]));
    session.handle_transcript("two", &mut app, &playback).await;

    assert_eq!(app.ledger.words_learned, 10);
    assert!(app.ledger.badges.iter().find(|b| b.id == "rookie").unwrap().unlocked);
}

#[tokio::test]
async fn test_quiz_local_match_skips_remote_validation() {
    let tutor = Arc::new(MockTutor::with_lesson(sample_lesson(
        "ಹೌದು",
        vec![word("ಹೌದು", "yes")],
    )));
    let (playback, _) = playback();
    let mut app = dashboard_state();
    app.start_lesson();
    let mut session = LessonSession::new(tutor.clone());

    session.begin(&mut app, &playback).await.unwrap();
    let points_before = app.ledger.points;

    let outcome = session.submit_answer("ಹೌದು", &mut app).await;

    assert_eq!(outcome, QuizState::Success);
    assert_eq!(*tutor.validation_calls.lock().unwrap(), 0);
    assert_eq!(app.ledger.lessons_completed, 1);
    assert_eq!(app.ledger.points, points_before + POINTS_PER_LESSON);
    assert_eq!(app.mode, Mode::Dashboard);
}

#[tokio::test]
async fn test_quiz_failure_then_retry_uses_remote_validation() {
    let tutor = Arc::new(MockTutor::with_lesson(sample_lesson(
        "ನಮಸ್ಕಾರ",
        Vec::new(),
    )));
    let (playback, _) = playback();
    let mut app = dashboard_state();
    app.start_lesson();
    let mut session = LessonSession::new(tutor.clone());
    session.begin(&mut app, &playback).await.unwrap();

    // Wrong answer: local check misses, remote says no
    let outcome = session.submit_answer("ಇಲ್ಲ", &mut app).await;
    assert_eq!(outcome, QuizState::Failure);
    assert_eq!(*tutor.validation_calls.lock().unwrap(), 1);
    assert_eq!(app.ledger.lessons_completed, 0);
    assert_eq!(app.mode, Mode::Lesson);

    // Terminal states ignore further answers until retry
    assert_eq!(session.submit_answer("ಇಲ್ಲ", &mut app).await, QuizState::Failure);

    session.retry();
    assert_eq!(session.quiz_state(), QuizState::Idle);

    // Semantically equivalent answer accepted by the remote check
    *tutor.validation_verdict.lock().unwrap() = true;
    let outcome = session.submit_answer("greetings to you", &mut app).await;
    assert_eq!(outcome, QuizState::Success);
    assert_eq!(app.ledger.lessons_completed, 1);
}

#[tokio::test]
async fn test_lesson_fetch_failure_propagates() {
    let tutor = Arc::new(MockTutor::new());
    *tutor.lesson_fails.lock().unwrap() = true;
    let (playback, _) = playback();
    let mut app = dashboard_state();
    app.start_lesson();
    let mut session = LessonSession::new(tutor);

    let result = session.begin(&mut app, &playback).await;
    assert!(result.is_err());
    assert!(session.content().is_none());
    assert_eq!(app.ledger.words_learned, 0);
}

#[tokio::test]
async fn test_lesson_examples_feed_word_bank() {
    let tutor = Arc::new(MockTutor::with_lesson(sample_lesson(
        "ನಮಸ್ಕಾರ",
        vec![word("ನಮಸ್ಕಾರ", "hello"), word("ಶುಭೋದಯ", "good morning")],
    )));
    let (playback, _) = playback();
    let mut app = dashboard_state();
    app.start_lesson();
    let mut session = LessonSession::new(tutor);

    session.begin(&mut app, &playback).await.unwrap();

    assert_eq!(app.word_bank.len(), 2);
    assert_eq!(app.ledger.words_learned, 2);
}
