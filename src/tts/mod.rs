//! TTS (Text-to-Speech) Module
//!
//! Provides a unified interface to synthesis backends. The primary engine
//! returns raw PCM for the playback controller; when it fails, playback
//! degrades to the on-device system voice (see `system`).

use crate::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

pub mod normalize;
pub mod remote;
pub mod system;

pub use system::SystemVoice;

/// Decoded audio returned by a synthesis engine. Samples are interleaved
/// signed 16-bit PCM.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub channels: u16,
}

/// Trait for synthesis engines
#[async_trait]
pub trait TtsEngine: Send + Sync + std::fmt::Debug {
    /// Synthesize the given text into a PCM clip
    async fn synthesize(&self, text: &str) -> Result<AudioClip>;

    /// Get the engine name
    fn name(&self) -> &str;
}

/// Factory to create the configured primary TTS engine
pub fn create_engine(config: &Config) -> Arc<dyn TtsEngine> {
    info!("🛠️ Creating TTS engine: {}", config.tts_engine);
    let engine: Arc<dyn TtsEngine> = match config.tts_engine.as_str() {
        "remote" => Arc::new(remote::RemoteTts::new(config)),
        other => {
            warn!("  - Unknown engine '{}', using remote defaults", other);
            Arc::new(remote::RemoteTts::new(config))
        }
    };
    info!("✅ TTS engine '{}' initialized", engine.name());
    engine
}
