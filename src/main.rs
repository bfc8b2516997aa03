//! Kalike - Voice-driven Kannada tutor
//!
//! Terminal host for the tutoring core: push-to-talk with Enter, plus a
//! handful of navigation commands.

use anyhow::Result;
use clap::Parser;
use kalike::app::{AppState, LearnerLevel, Mode};
use kalike::audio::PlaybackController;
use kalike::capture::{CaptureController, CaptureOutcome, CaptureState};
use kalike::config::Config;
use kalike::session::{ConversationSession, LessonSession, QuizState, Role};
use kalike::{stt, tts, tutor};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Override the configured learner level (beginner/intermediate/advanced)
    #[arg(short, long)]
    level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("🗣️ Kalike v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load()?;
    if let Some(level) = &args.level {
        config.learner_level = parse_level(level)?;
        config.onboarding_complete = true;
        config.save()?;
    }

    // Wire the engines
    let playback = PlaybackController::new(
        tts::create_engine(&config),
        tts::SystemVoice::new(&config.locale),
    );
    let (stt_tx, mut stt_rx) = tokio::sync::mpsc::unbounded_channel();
    let stt_engine = stt::create_engine(&config, stt_tx);
    let mut capture = CaptureController::new(stt_engine, playback.clone(), &config.locale);

    let service = tutor::create_service(&config);
    let mut conversation = ConversationSession::new(service.clone());
    let mut lesson = LessonSession::new(service);

    let mut app = AppState::new();
    if config.onboarding_complete {
        app.complete_onboarding(config.learner_level);
    } else {
        println!("Choose your level: beginner / intermediate / advanced");
    }

    println!("Commands: Enter = hold/release the mic, 'talk', 'lesson', 'answer', 'words', 'progress', 'back', 'quit'");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut answering = false;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let cmd = line.trim().to_lowercase();
                match cmd.as_str() {
                    "" => {
                        // Push-to-talk toggle
                        if capture.state() == CaptureState::Listening {
                            capture.release().await?;
                        } else if let Err(e) = capture.press().await {
                            warn!("Cannot listen: {}", e);
                        }
                    }
                    "beginner" | "intermediate" | "advanced" if app.mode == Mode::Onboarding => {
                        let chosen = parse_level(&cmd)?;
                        app.complete_onboarding(chosen);
                        config.learner_level = chosen;
                        config.onboarding_complete = true;
                        config.save()?;
                        println!("Welcome! Say 'talk' to practice or 'lesson' to study.");
                    }
                    "talk" => {
                        app.start_conversation();
                        if app.mode == Mode::Conversation {
                            println!("Conversation started. Press Enter to talk.");
                        }
                    }
                    "lesson" => {
                        app.start_lesson();
                        if app.mode == Mode::Lesson {
                            match lesson.begin(&mut app, &playback).await {
                                Ok(()) => {
                                    if let Some(content) = lesson.content() {
                                        println!("📖 {}\n{}", content.title, content.explanation);
                                        println!("Quiz: {}", content.quiz.question);
                                        println!("Say 'answer', then press Enter and speak.");
                                    }
                                }
                                Err(e) => {
                                    warn!("Lesson unavailable: {}", e);
                                    println!("Could not fetch a lesson. Type 'lesson' to retry.");
                                    app.return_to_dashboard();
                                }
                            }
                        }
                    }
                    "answer" if app.mode == Mode::Lesson => {
                        answering = true;
                        println!("Press Enter and speak your answer.");
                    }
                    "words" => {
                        for (category, words) in app.word_bank.by_category() {
                            println!("{}:", category);
                            for word in words {
                                println!("  {} ({}) — {}", word.kannada, word.transliteration, word.english);
                            }
                        }
                    }
                    "progress" => {
                        let ledger = &app.ledger;
                        println!(
                            "⭐ {} points | 🔥 {} day streak | 📚 {} words | ✏️ {} lessons",
                            ledger.points, ledger.streak, ledger.words_learned, ledger.lessons_completed
                        );
                        for badge in ledger.unlocked_badges() {
                            println!("  {} {} — {}", badge.icon, badge.name, badge.description);
                        }
                    }
                    "back" => {
                        playback.stop();
                        app.return_to_dashboard();
                        answering = false;
                    }
                    "level" => {
                        app.change_level();
                        if app.mode == Mode::Onboarding {
                            println!("Choose your level: beginner / intermediate / advanced");
                        }
                    }
                    "quit" | "exit" => break,
                    other => println!("Unknown command: '{}'", other),
                }
            }
            Some(event) = stt_rx.recv() => {
                match capture.handle_event(event) {
                    CaptureOutcome::Transcript(text) => match app.mode {
                        Mode::Conversation => {
                            conversation.handle_transcript(&text, &mut app, &playback).await;
                            match conversation.transcript().last() {
                                Some(last) if last.role == Role::Model => {
                                    println!("🤖 {}", last.text);
                                    if let Some(translation) = &last.translation {
                                        println!("   ({})", translation);
                                    }
                                }
                                _ => println!("⚠️ No reply this time, try again."),
                            }
                        }
                        Mode::Lesson if answering => {
                            answering = false;
                            match lesson.submit_answer(&text, &mut app).await {
                                QuizState::Success => {
                                    println!("✅ Correct! Lesson complete.");
                                }
                                QuizState::Failure => {
                                    println!("❌ Not quite. Say 'answer' to try again.");
                                    lesson.retry();
                                }
                                _ => {}
                            }
                        }
                        _ => info!("📝 Heard (ignored outside a session): '{}'", text),
                    },
                    CaptureOutcome::Notice(notice) => println!("⚠️ {}", notice),
                    CaptureOutcome::Ignored => {}
                }
            }
        }
    }

    playback.stop();
    info!("👋 Kalike shutting down");
    Ok(())
}

fn parse_level(raw: &str) -> Result<LearnerLevel> {
    match raw.trim().to_lowercase().as_str() {
        "beginner" => Ok(LearnerLevel::Beginner),
        "intermediate" => Ok(LearnerLevel::Intermediate),
        "advanced" => Ok(LearnerLevel::Advanced),
        other => Err(anyhow::anyhow!("Unknown level: {}", other)),
    }
}
