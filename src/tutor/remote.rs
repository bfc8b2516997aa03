//! Remote tutor client
//!
//! Talks to a hosted generative-language API. Prompts ask for strict JSON;
//! responses are parsed out of the model text by brace scanning since the
//! model may wrap its JSON in prose.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tokio_retry::strategy::FixedInterval;
use tokio_retry::Retry;
use tracing::{debug, warn};

use super::{ChatReply, ChatTurn, LessonContent, TutorService};
use crate::app::LearnerLevel;
use crate::config::Config;
use crate::wordbank::Word;

/// Substituted client-side when the chat backend fails
const CANNED_APOLOGY: &str =
    "ಕ್ಷಮಿಸಿ, ನನಗೆ ಈಗ ಉತ್ತರಿಸಲು ಆಗುತ್ತಿಲ್ಲ. Sorry, I could not respond just now. Please try again.";

/// Generation API response wrapper
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct ParsedChat {
    reply: String,
    #[serde(default)]
    translation: Option<String>,
    #[serde(default)]
    follow_up: Option<String>,
    #[serde(default)]
    vocabulary: Vec<Word>,
}

#[derive(Clone)]
pub struct RemoteTutor {
    url: String,
    model: String,
    api_key: String,
}

impl RemoteTutor {
    pub fn new(config: &Config) -> Self {
        Self {
            url: config.tutor_url.clone(),
            model: config.tutor_model.clone(),
            api_key: config.tutor_api_key.clone(),
        }
    }

    async fn generate(&self, prompt: String, timeout_secs: u64) -> Result<String> {
        let client = reqwest::Client::new();
        let mut request = client
            .post(format!("{}/api/generate", self.url))
            .json(&serde_json::json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
                "options": {
                    "temperature": 0.4,
                    "num_predict": 600
                }
            }))
            .timeout(std::time::Duration::from_secs(timeout_secs));

        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            anyhow::bail!("Tutor API error ({}): {}", status, body_text);
        }

        debug!("🧠 Tutor raw body: {}", body_text);
        let parsed: GenerateResponse = serde_json::from_str(&body_text)?;
        Ok(parsed.response)
    }

    fn chat_prompt(&self, utterance: &str, history: &[ChatTurn], level: LearnerLevel) -> String {
        let mut context = String::new();
        for turn in history {
            context.push_str(&format!("{}: {}\n", turn.role, turn.text));
        }

        format!(
            r#"You are a friendly Kannada tutor for a {level} learner. Continue the conversation and respond with ONLY valid JSON.

Conversation so far:
{context}
Learner said: "{utterance}"

Respond with JSON in this exact format:
{{"reply": "Kannada reply with transliteration", "translation": "English translation", "follow_up": "a short follow-up question", "vocabulary": [{{"kannada": "...", "transliteration": "...", "english": "...", "category": "..."}}]}}

JSON response:"#,
            level = level.as_str(),
        )
    }

    fn lesson_prompt(&self, level: LearnerLevel) -> String {
        format!(
            r#"Create one short Kannada lesson for a {level} learner. Respond with ONLY valid JSON in this exact format:
{{"title": "...", "concept": "...", "explanation": "two or three sentences", "examples": [{{"kannada": "...", "transliteration": "...", "english": "...", "category": "..."}}], "quiz": {{"question": "...", "options": ["...", "...", "..."], "correct_answer": "...", "explanation": "..."}}}}

JSON response:"#,
            level = level.as_str(),
        )
    }
}

/// Find the JSON object embedded in model output
fn extract_json(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&response[start..=end])
}

#[async_trait]
impl TutorService for RemoteTutor {
    async fn chat(
        &self,
        utterance: &str,
        history: &[ChatTurn],
        level: LearnerLevel,
    ) -> Result<ChatReply> {
        let prompt = self.chat_prompt(utterance, history, level);

        // Chat failures are absorbed here: the learner gets a canned
        // apology instead of a broken conversation (no vocabulary, so
        // the ledger stays untouched).
        let raw = match self.generate(prompt, 15).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("❌ Chat request failed: {}", e);
                return Ok(apology());
            }
        };

        let parsed = extract_json(&raw)
            .and_then(|json| serde_json::from_str::<ParsedChat>(json).ok());

        match parsed {
            Some(chat) => Ok(ChatReply {
                reply: chat.reply,
                translation: chat.translation,
                follow_up: chat.follow_up,
                vocabulary: chat.vocabulary,
            }),
            None => {
                warn!("❌ No parseable JSON in chat response: {}", raw);
                Ok(apology())
            }
        }
    }

    async fn generate_lesson(&self, level: LearnerLevel) -> Result<LessonContent> {
        let prompt = self.lesson_prompt(level);

        // Transient network errors retry briefly; a real failure
        // propagates so the caller can render a retry affordance
        let strategy = FixedInterval::from_millis(500).take(2);
        let raw = Retry::spawn(strategy, || self.generate(prompt.clone(), 20)).await?;

        let json = extract_json(&raw)
            .ok_or_else(|| anyhow::anyhow!("No JSON in lesson response"))?;
        let lesson: LessonContent = serde_json::from_str(json)?;
        Ok(lesson)
    }

    async fn validate_answer(&self, candidate: &str, expected: &str) -> bool {
        let prompt = format!(
            r#"Does the learner's answer mean the same thing as the expected answer? Respond with ONLY valid JSON: {{"equivalent": true}} or {{"equivalent": false}}.

Expected: "{expected}"
Learner answered: "{candidate}"

JSON response:"#
        );

        #[derive(Deserialize)]
        struct Verdict {
            equivalent: bool,
        }

        match self.generate(prompt, 10).await {
            Ok(raw) => extract_json(&raw)
                .and_then(|json| serde_json::from_str::<Verdict>(json).ok())
                .map(|v| v.equivalent)
                .unwrap_or(false),
            Err(e) => {
                warn!("❌ Answer validation failed, treating as incorrect: {}", e);
                false
            }
        }
    }
}

fn apology() -> ChatReply {
    ChatReply {
        reply: CANNED_APOLOGY.to_string(),
        translation: None,
        follow_up: None,
        vocabulary: Vec::new(),
    }
}
