//! Mock TTS Engine for Testing
//!
//! Records all synthesized text for verification.

use anyhow::Result;
use async_trait::async_trait;
use kalike::tts::{AudioClip, TtsEngine};
use std::sync::{Arc, Mutex};

/// Mock TTS engine that records synthesized text
#[derive(Debug)]
pub struct MockTts {
    /// All text that was synthesized
    pub synthesized: Arc<Mutex<Vec<String>>>,
    /// Simulate failure on every synthesize call
    pub should_fail: Arc<Mutex<bool>>,
}

impl MockTts {
    pub fn new() -> Self {
        Self {
            synthesized: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Get all synthesized phrases
    pub fn get_synthesized(&self) -> Vec<String> {
        self.synthesized.lock().unwrap().clone()
    }

    /// Check if a phrase was synthesized
    pub fn was_synthesized(&self, text: &str) -> bool {
        self.synthesized
            .lock()
            .unwrap()
            .iter()
            .any(|s| s.contains(text))
    }
}

impl Default for MockTts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TtsEngine for MockTts {
    async fn synthesize(&self, text: &str) -> Result<AudioClip> {
        if *self.should_fail.lock().unwrap() {
            return Err(anyhow::anyhow!("Mock TTS failure"));
        }
        self.synthesized.lock().unwrap().push(text.to_string());
        Ok(AudioClip {
            samples: vec![0i16; 160],
            sample_rate: 16000,
            channels: 1,
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_tts_records_synthesis() {
        let mock = MockTts::new();
        mock.synthesize("ನಮಸ್ಕಾರ").await.unwrap();
        mock.synthesize("ಹೌದು").await.unwrap();

        assert!(mock.was_synthesized("ನಮಸ್ಕಾರ"));
        assert!(mock.was_synthesized("ಹೌದು"));
        assert_eq!(mock.get_synthesized().len(), 2);
    }
}
