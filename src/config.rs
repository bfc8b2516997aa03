use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::app::LearnerLevel;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Learner
    pub learner_level: LearnerLevel,
    pub locale: String,

    // Speech
    pub stt_engine: String,
    pub tts_engine: String,
    pub vosk_model_path: String,
    pub silence_timeout_secs: u64,

    // Tutor backend
    pub tutor_url: String,
    pub tutor_model: String,
    pub tutor_api_key: String,

    // Synthesis backend
    pub tts_url: String,
    pub tts_voice: String,

    // Meta
    pub log_level: String,
    pub onboarding_complete: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            learner_level: LearnerLevel::Beginner,
            locale: "kn-IN".to_string(),
            stt_engine: "vosk".to_string(),
            tts_engine: "remote".to_string(),
            vosk_model_path: dirs::data_dir()
                .unwrap_or_default()
                .join("kalike/models/vosk-model-small-kn")
                .to_string_lossy()
                .to_string(),
            silence_timeout_secs: 6,
            tutor_url: "http://localhost:11434".to_string(),
            tutor_model: "gemma2".to_string(),
            tutor_api_key: "".to_string(),
            tts_url: "http://localhost:5500".to_string(),
            tts_voice: "kn-IN-standard".to_string(),
            log_level: "INFO".to_string(),
            onboarding_complete: false,
        }
    }
}

impl Config {
    /// Load config from file or create default
    pub fn load() -> Result<Self> {
        let config_path = config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            match serde_json::from_str(&content) {
                Ok(config) => Ok(config),
                Err(e) => {
                    // Graceful degradation: log warning and use defaults
                    tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                    // Backup corrupt file for debugging
                    let backup_path = config_path.with_extension("json.corrupt");
                    let _ = std::fs::rename(&config_path, &backup_path);
                    Ok(Self::default())
                }
            }
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let config_path = config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kalike")
        .join("config.json")
}
