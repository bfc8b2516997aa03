//! Conversation flow
//!
//! Finalized transcript in, spoken tutor reply out. One inference request
//! in flight at a time; new input while processing is rejected rather
//! than queued, and a failed request leaves the transcript and ledger
//! untouched.

use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{today, Message, Role};
use crate::app::AppState;
use crate::audio::PlaybackController;
use crate::tutor::{ChatTurn, TutorService};

/// Spoken after the reply when the model offers no follow-up of its own
const FOLLOW_UP_PROMPTS: &[&str] = &[
    "ಈಗ ನೀವು ಹೇಳಿ. Now you try.",
    "ಇನ್ನೇನು ಹೇಳುತ್ತೀರಿ? What else would you say?",
    "ಮುಂದುವರಿಸೋಣ. Let's keep going.",
];

pub struct ConversationSession {
    service: Arc<dyn TutorService>,
    transcript: Vec<Message>,
    processing: bool,
    next_id: u64,
}

impl ConversationSession {
    pub fn new(service: Arc<dyn TutorService>) -> Self {
        Self {
            service,
            transcript: Vec::new(),
            processing: false,
            next_id: 0,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    fn push(&mut self, message: Message) -> &Message {
        self.transcript.push(message);
        self.transcript.last().expect("just pushed")
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Handle one finalized transcript from the capture controller.
    ///
    /// Word bank and ledger updates land before playback begins. On a
    /// failed request nothing is appended and nothing is mutated; the
    /// processing flag is simply cleared.
    pub async fn handle_transcript(
        &mut self,
        utterance: &str,
        state: &mut AppState,
        playback: &PlaybackController,
    ) {
        if self.processing {
            debug!("🗣️ Utterance rejected, a request is already in flight");
            return;
        }

        // History excludes the utterance being sent
        let history: Vec<ChatTurn> = self
            .transcript
            .iter()
            .map(|m| ChatTurn {
                role: match m.role {
                    Role::User => "user",
                    Role::Model => "model",
                },
                text: m.text.clone(),
            })
            .collect();

        let id = self.next_id();
        self.push(Message {
            id,
            role: Role::User,
            text: utterance.to_string(),
            vocabulary: None,
            translation: None,
        });
        self.processing = true;

        let result = self.service.chat(utterance, &history, state.level).await;

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                warn!("❌ Chat exchange failed: {}", e);
                self.processing = false;
                return;
            }
        };

        let id = self.next_id();
        self.push(Message {
            id,
            role: Role::Model,
            text: reply.reply.clone(),
            vocabulary: if reply.vocabulary.is_empty() {
                None
            } else {
                Some(reply.vocabulary.clone())
            },
            translation: reply.translation.clone(),
        });

        // Progress before playback
        let accepted = state.word_bank.add(&reply.vocabulary);
        if !accepted.is_empty() {
            state.ledger.apply_words_learned(&accepted);
        }
        state.ledger.record_activity(today());
        self.processing = false;

        let follow_up = reply.follow_up.unwrap_or_else(|| {
            FOLLOW_UP_PROMPTS
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or(FOLLOW_UP_PROMPTS[0])
                .to_string()
        });
        playback.play(&format!("{} {}", reply.reply, follow_up)).await;
    }
}
