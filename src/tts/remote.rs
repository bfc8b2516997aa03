//! Remote synthesis backend over HTTP
//!
//! Calls a hosted speech service and decodes its base64 PCM payload.

use anyhow::Result;
use async_trait::async_trait;
use base64::Engine as _;
use serde::Deserialize;
use tracing::debug;

use super::AudioClip;
use crate::config::Config;

const DEFAULT_SAMPLE_RATE: u32 = 24000;

/// Hosted speech synthesis API response
#[derive(Debug, Deserialize)]
struct SynthesisResponse {
    audio_content: String,
    #[serde(default)]
    sample_rate: Option<u32>,
    #[serde(default)]
    channels: Option<u16>,
}

#[derive(Debug)]
pub struct RemoteTts {
    url: String,
    voice: String,
}

impl RemoteTts {
    pub fn new(config: &Config) -> Self {
        Self {
            url: config.tts_url.clone(),
            voice: config.tts_voice.clone(),
        }
    }
}

#[async_trait]
impl super::TtsEngine for RemoteTts {
    async fn synthesize(&self, text: &str) -> Result<AudioClip> {
        debug!("📢 Remote synthesis request ({} chars)", text.chars().count());

        let client = reqwest::Client::new();
        let response = client
            .post(format!("{}/v1/synthesize", self.url))
            .json(&serde_json::json!({
                "text": text,
                "voice": self.voice,
            }))
            .timeout(std::time::Duration::from_secs(10))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Synthesis API error ({})", status);
        }

        let payload: SynthesisResponse = response.json().await?;
        let bytes = base64::engine::general_purpose::STANDARD.decode(&payload.audio_content)?;
        let samples = decode_pcm16(&bytes);
        if samples.is_empty() {
            anyhow::bail!("Synthesis API returned no audio");
        }

        Ok(AudioClip {
            samples,
            sample_rate: payload.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE),
            channels: payload.channels.unwrap_or(1),
        })
    }

    fn name(&self) -> &str {
        "remote"
    }
}

/// Interpret raw bytes as little-endian 16-bit PCM, dropping a trailing
/// odd byte
fn decode_pcm16(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}
