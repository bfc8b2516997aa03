//! On-device recognition backend using Vosk over a cpal microphone stream

use anyhow::{Context, Result};
use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};
use vosk::{Model, Recognizer};

use super::{SttError, SttEvent};
use crate::config::Config;

const SAMPLE_RATE: u32 = 16000;
const CHUNK_SIZE: usize = 1024;

/// Vosk-based STT engine. Each listening session spawns a blocking worker
/// that owns the microphone stream and recognizer until a terminal event.
pub struct VoskStt {
    model_path: String,
    silence_timeout: Duration,
    events: UnboundedSender<SttEvent>,
    stop_flag: Arc<AtomicBool>,
    worker: Option<tokio::task::JoinHandle<()>>,
}

impl VoskStt {
    pub fn new(config: &Config, events: UnboundedSender<SttEvent>) -> Self {
        Self {
            model_path: config.vosk_model_path.clone(),
            silence_timeout: Duration::from_secs(config.silence_timeout_secs),
            events,
            stop_flag: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    fn listening(&self) -> bool {
        self.worker.as_ref().map(|w| !w.is_finished()).unwrap_or(false)
    }
}

#[async_trait]
impl super::SttEngine for VoskStt {
    async fn start(&mut self, locale: &str) -> Result<()> {
        if self.listening() {
            return Ok(());
        }

        info!("🎙️ Listening session starting (locale: {})", locale);
        self.stop_flag.store(false, Ordering::SeqCst);

        let model_path = self.model_path.clone();
        let silence_timeout = self.silence_timeout;
        let events = self.events.clone();
        let stop_flag = Arc::clone(&self.stop_flag);

        self.worker = Some(tokio::task::spawn_blocking(move || {
            run_session(&model_path, silence_timeout, &events, &stop_flag);
        }));

        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            worker
                .await
                .map_err(|e| anyhow::anyhow!("Recognition worker panicked: {}", e))?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "vosk"
    }
}

/// One complete listening session: capture, recognize, emit one terminal
/// event. Errors here never propagate; they become `SttEvent::Error`s.
fn run_session(
    model_path: &str,
    silence_timeout: Duration,
    events: &UnboundedSender<SttEvent>,
    stop_flag: &AtomicBool,
) {
    let (_stream, audio_rx) = match open_microphone() {
        Ok(pair) => pair,
        Err(e) => {
            warn!("🎙️ Microphone unavailable: {}", e);
            let _ = events.send(SttEvent::Error(SttError::PermissionDenied));
            return;
        }
    };

    let mut recognizer = match build_recognizer(model_path) {
        Ok(r) => r,
        Err(e) => {
            warn!("🎙️ Recognizer init failed: {}", e);
            let _ = events.send(SttEvent::Error(SttError::Other(e.to_string())));
            return;
        }
    };

    let started = Instant::now();
    let mut heard_speech = false;

    loop {
        if stop_flag.load(Ordering::SeqCst) {
            // Finalize whatever was captured before release
            let event = match final_text(&mut recognizer) {
                Some(text) => SttEvent::Transcript(text),
                None => SttEvent::Error(SttError::Aborted),
            };
            let _ = events.send(event);
            return;
        }

        if !heard_speech && started.elapsed() > silence_timeout {
            debug!("🔇 Silence timeout after {:?}", silence_timeout);
            let _ = events.send(SttEvent::Error(SttError::NoSpeech));
            return;
        }

        let samples = match audio_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(s) => s,
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                let _ = events.send(SttEvent::Error(SttError::Other(
                    "Audio stream disconnected".to_string(),
                )));
                return;
            }
        };

        if !heard_speech && calculate_energy(&samples) > 200.0 {
            heard_speech = true;
        }

        if recognizer.accept_waveform(&samples) == vosk::DecodingState::Finalized {
            match final_text(&mut recognizer) {
                Some(text) => {
                    info!("📝 Heard: '{}'", text);
                    let _ = events.send(SttEvent::Transcript(text));
                }
                None => {
                    let _ = events.send(SttEvent::Error(SttError::NoSpeech));
                }
            }
            return;
        }
    }
}

/// Open the default input device and stream mono 16kHz chunks to a channel
fn open_microphone() -> Result<(cpal::Stream, Receiver<Vec<i16>>)> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .context("No default input device")?;

    let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
    debug!("Using audio device: {}", device_name);

    let config = cpal::StreamConfig {
        channels: 1,
        sample_rate: cpal::SampleRate(SAMPLE_RATE),
        buffer_size: cpal::BufferSize::Fixed(CHUNK_SIZE as u32),
    };

    let (tx, rx) = mpsc::channel();

    let stream = device.build_input_stream(
        &config,
        move |data: &[i16], _: &cpal::InputCallbackInfo| {
            if tx.send(data.to_vec()).is_err() {
                warn!("Audio receiver dropped");
            }
        },
        |err| {
            warn!("Audio stream error: {}", err);
        },
        None,
    )?;

    stream.play()?;
    Ok((stream, rx))
}

fn build_recognizer(model_path: &str) -> Result<Recognizer> {
    let path = std::path::Path::new(model_path);
    if !path.exists() {
        anyhow::bail!("Vosk model not found at {}", path.display());
    }

    let model = Model::new(model_path).context("Failed to load Vosk model")?;
    Recognizer::new(&model, SAMPLE_RATE as f32).context("Failed to create Vosk recognizer")
}

/// Drain the recognizer's final result, filtering empty text
fn final_text(recognizer: &mut Recognizer) -> Option<String> {
    recognizer
        .final_result()
        .single()
        .and_then(|r| extract_text(r.text))
}

/// Extract text from a Vosk result, filtering empty results
fn extract_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Audio energy, used to distinguish silence from speech
fn calculate_energy(samples: &[i16]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: i64 = samples.iter().map(|&s| (s as i64).pow(2)).sum();
    (sum as f32 / samples.len() as f32).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text() {
        assert_eq!(extract_text(""), None);
        assert_eq!(extract_text("  "), None);
        assert_eq!(extract_text("ನಮಸ್ಕಾರ"), Some("ನಮಸ್ಕಾರ".to_string()));
        assert_eq!(extract_text("  ಹೌದು  "), Some("ಹೌದು".to_string()));
    }

    #[test]
    fn test_energy_calculation() {
        let silence = vec![0i16; 100];
        assert_eq!(calculate_energy(&silence), 0.0);

        let loud = vec![1000i16; 100];
        assert!(calculate_energy(&loud) > 0.0);
    }
}
