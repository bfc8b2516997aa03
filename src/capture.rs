//! Voice Capture Controller
//!
//! Press-and-hold state machine around an STT engine. Only one listening
//! session is ever active; pressing while playback is in flight barges in
//! by preempting the audio slot first.

use anyhow::Result;
use tracing::{debug, warn};

use crate::audio::PlaybackController;
use crate::stt::{SttEngine, SttError, SttEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Listening,
}

/// What a terminal recognition event means for the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A finalized transcript, ready for the orchestrator
    Transcript(String),
    /// A blocking user-facing notice (e.g. microphone permission)
    Notice(String),
    /// Recoverable; nothing for the caller to do
    Ignored,
}

pub struct CaptureController {
    state: CaptureState,
    engine: Box<dyn SttEngine>,
    playback: PlaybackController,
    locale: String,
}

impl CaptureController {
    pub fn new(engine: Box<dyn SttEngine>, playback: PlaybackController, locale: &str) -> Self {
        Self {
            state: CaptureState::Idle,
            engine,
            playback,
            locale: locale.to_string(),
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Start a listening session. A press while already listening is a
    /// no-op. Barge-in: any in-flight playback is preempted before the
    /// microphone opens.
    pub async fn press(&mut self) -> Result<()> {
        if self.state == CaptureState::Listening {
            debug!("🎙️ Press ignored, already listening");
            return Ok(());
        }

        self.playback.stop();

        if let Err(e) = self.engine.start(&self.locale).await {
            warn!("🎙️ Could not start listening: {}", e);
            return Err(e);
        }
        self.state = CaptureState::Listening;
        Ok(())
    }

    /// End the listening session, finalizing recognition. A release while
    /// idle is a no-op.
    pub async fn release(&mut self) -> Result<()> {
        if self.state == CaptureState::Idle {
            return Ok(());
        }
        self.engine.stop().await
    }

    /// Fold a terminal engine event into the state machine. Always
    /// returns the machine to idle.
    pub fn handle_event(&mut self, event: SttEvent) -> CaptureOutcome {
        self.state = CaptureState::Idle;
        match event {
            SttEvent::Transcript(text) => CaptureOutcome::Transcript(text),
            SttEvent::Error(SttError::NoSpeech) | SttEvent::Error(SttError::Aborted) => {
                debug!("🎙️ Session ended without speech");
                CaptureOutcome::Ignored
            }
            SttEvent::Error(SttError::PermissionDenied) => CaptureOutcome::Notice(
                "Microphone access is blocked. Enable it to practice speaking.".to_string(),
            ),
            SttEvent::Error(SttError::Other(msg)) => {
                warn!("🎙️ Recognition error: {}", msg);
                CaptureOutcome::Ignored
            }
        }
    }
}
