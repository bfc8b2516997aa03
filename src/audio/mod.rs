//! Audio Playback Controller
//!
//! Single-slot "now playing" resource with preemption. Uses a
//! channel-based architecture to handle rodio's non-Send stream: a
//! dedicated audio thread owns the output stream and sink, and the newest
//! playback request always releases the prior holder first.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::{debug, info, warn};

use crate::tts::normalize::speakable;
use crate::tts::{AudioClip, SystemVoice, TtsEngine};

/// Commands sent to the audio thread
enum AudioCommand {
    Play(AudioClip),
    Stop,
}

/// Thread-safe handle to the playback controller
#[derive(Clone)]
pub struct PlaybackController {
    sender: mpsc::Sender<AudioCommand>,
    primary: Arc<dyn TtsEngine>,
    fallback: Arc<SystemVoice>,
    /// Generation of the clip currently holding the slot, if any
    now_playing: Arc<Mutex<Option<u64>>>,
    generation: Arc<AtomicU64>,
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController").finish()
    }
}

impl PlaybackController {
    pub fn new(primary: Arc<dyn TtsEngine>, fallback: SystemVoice) -> Self {
        let (sender, receiver) = mpsc::channel::<AudioCommand>();

        // Spawn dedicated audio thread
        thread::spawn(move || {
            Self::audio_thread(receiver);
        });

        Self {
            sender,
            primary,
            fallback: Arc::new(fallback),
            now_playing: Arc::new(Mutex::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    fn audio_thread(receiver: mpsc::Receiver<AudioCommand>) {
        use rodio::buffer::SamplesBuffer;
        use rodio::OutputStream;

        // Initialize audio output on this thread
        let (stream, stream_handle) = match OutputStream::try_default() {
            Ok(s) => s,
            Err(e) => {
                warn!("🔇 Failed to initialize audio output: {}", e);
                return;
            }
        };

        // Keep stream alive
        let _stream = stream;
        let mut sink = match rodio::Sink::try_new(&stream_handle) {
            Ok(s) => s,
            Err(e) => {
                warn!("❌ Failed to create audio sink: {}", e);
                return;
            }
        };

        info!("🔊 Audio thread started");

        while let Ok(cmd) = receiver.recv() {
            match cmd {
                AudioCommand::Play(clip) => {
                    // Release the prior holder before acquiring the slot
                    sink.stop();
                    if let Ok(new_sink) = rodio::Sink::try_new(&stream_handle) {
                        sink = new_sink;
                    }
                    debug!(
                        "🔊 Playing clip: {} samples @ {} Hz",
                        clip.samples.len(),
                        clip.sample_rate
                    );
                    sink.append(SamplesBuffer::new(
                        clip.channels,
                        clip.sample_rate,
                        clip.samples,
                    ));
                }
                AudioCommand::Stop => {
                    debug!("🛑 Stopping playback");
                    sink.stop();
                    // Re-create sink after stop as it becomes unusable if we want to play again
                    if let Ok(new_sink) = rodio::Sink::try_new(&stream_handle) {
                        sink = new_sink;
                    }
                }
            }
        }

        info!("🔇 Audio thread stopped");
    }

    /// Speak the given text, preempting whatever is playing.
    ///
    /// Text is normalized first; empty or sub-threshold fragments are a
    /// no-op and never reach the synthesis service. Remote synthesis
    /// failures degrade to the on-device system voice.
    pub async fn play(&self, text: &str) {
        let Some(clean) = speakable(text) else {
            debug!("🔇 Nothing speakable in: '{}'", text);
            return;
        };

        // Newest request wins: release the current holder up front
        self.stop();

        match self.primary.synthesize(&clean).await {
            Ok(clip) => {
                let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
                if let Ok(mut slot) = self.now_playing.lock() {
                    *slot = Some(generation);
                }
                if self.sender.send(AudioCommand::Play(clip)).is_err() {
                    warn!("Audio thread disconnected");
                }
            }
            Err(e) => {
                warn!("⚠️ Remote synthesis failed, using system voice: {}", e);
                if let Err(e) = self.fallback.speak(&clean) {
                    warn!("⚠️ System voice also unavailable: {}", e);
                }
            }
        }
    }

    /// Release the audio slot and cancel pending on-device synthesis.
    /// Safe to call when nothing is playing.
    pub fn stop(&self) {
        if let Ok(mut slot) = self.now_playing.lock() {
            *slot = None;
        }
        self.fallback.halt();
        if self.sender.send(AudioCommand::Stop).is_err() {
            warn!("Audio thread disconnected");
        }
    }

    /// Generation of the clip currently holding the slot, if any
    pub fn now_playing(&self) -> Option<u64> {
        self.now_playing.lock().ok().and_then(|slot| *slot)
    }
}
