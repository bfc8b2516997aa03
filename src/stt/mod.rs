//! STT (Speech-to-Text) Module
//!
//! Abstracts the recognition capability behind a start/stop engine trait.
//! Engines deliver at most one finalized transcript per listening session
//! over an event channel, or a terminal error event.

pub mod unsupported;
pub mod vosk;

use crate::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

pub use unsupported::UnsupportedStt;
pub use vosk::VoskStt;

/// Terminal recognition failures, per session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SttError {
    /// Nothing intelligible was heard; silently ignorable
    NoSpeech,
    /// The learner aborted the session; silently ignorable
    Aborted,
    /// Microphone access denied or unavailable; must surface a notice
    PermissionDenied,
    /// Anything else; logged and the session abandoned
    Other(String),
}

/// Events emitted by an engine during a listening session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SttEvent {
    /// Exactly one per successful session
    Transcript(String),
    Error(SttError),
}

/// Trait for speech recognition engines
#[async_trait]
pub trait SttEngine: Send + Sync {
    /// Begin a listening session for the given locale.
    /// Starting while already listening is a no-op.
    async fn start(&mut self, locale: &str) -> Result<()>;

    /// End the session, finalizing any pending recognition.
    /// Safe to call when not listening.
    async fn stop(&mut self) -> Result<()>;

    /// Get the engine name
    fn name(&self) -> &str;
}

/// Factory to create the configured STT engine
pub fn create_engine(config: &Config, events: UnboundedSender<SttEvent>) -> Box<dyn SttEngine> {
    match config.stt_engine.as_str() {
        "vosk" => Box::new(VoskStt::new(config, events)),
        other => {
            tracing::warn!("⚠️ No STT backend '{}' on this platform", other);
            Box::new(UnsupportedStt::new(other))
        }
    }
}
