//! On-device fallback voice
//!
//! Best-effort synthesis through system speech commands when the remote
//! engine fails. The spawned process is held so a preempting `stop()` can
//! kill pending speech.

use anyhow::Result;
use std::process::{Child, Command};
use std::sync::Mutex;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct SystemVoice {
    /// espeak/spd voice language, derived from the locale tag
    language: String,
    child: Mutex<Option<Child>>,
}

impl SystemVoice {
    pub fn new(locale: &str) -> Self {
        // "kn-IN" -> "kn"
        let language = locale
            .split(['-', '_'])
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("en")
            .to_lowercase();
        Self {
            language,
            child: Mutex::new(None),
        }
    }

    /// Speak via spd-say or espeak-ng, replacing any pending utterance
    pub fn speak(&self, text: &str) -> Result<()> {
        debug!("📢 System voice speaking: {}", text);
        self.halt();

        let spawned = Command::new("spd-say")
            .arg("-l")
            .arg(&self.language)
            .arg(text)
            .spawn()
            .or_else(|_| {
                Command::new("espeak-ng")
                    .arg("-v")
                    .arg(&self.language)
                    .arg(text)
                    .spawn()
            });

        match spawned {
            Ok(child) => {
                if let Ok(mut slot) = self.child.lock() {
                    *slot = Some(child);
                }
                Ok(())
            }
            Err(_) => Err(anyhow::anyhow!(
                "No system TTS command found (tried spd-say, espeak-ng)"
            )),
        }
    }

    /// Kill any pending synthesis process; safe when nothing is speaking
    pub fn halt(&self) {
        if let Ok(mut slot) = self.child.lock() {
            if let Some(mut child) = slot.take() {
                if let Err(e) = child.kill() {
                    warn!("Could not stop system voice: {}", e);
                }
                let _ = child.wait();
            }
        }
    }
}

impl Drop for SystemVoice {
    fn drop(&mut self) {
        self.halt();
    }
}
