//! Explicit "no recognition capability" engine
//!
//! Platforms without a usable backend get this instead of a silent panic:
//! starting a session fails with a capability error the host can surface
//! once at startup.

use anyhow::Result;
use async_trait::async_trait;

use crate::error::KalikeError;

pub struct UnsupportedStt {
    requested: String,
}

impl UnsupportedStt {
    pub fn new(requested: &str) -> Self {
        Self {
            requested: requested.to_string(),
        }
    }
}

#[async_trait]
impl super::SttEngine for UnsupportedStt {
    async fn start(&mut self, _locale: &str) -> Result<()> {
        Err(KalikeError::Unsupported(format!(
            "Speech recognition backend '{}' is not available",
            self.requested
        ))
        .into())
    }

    async fn stop(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "unsupported"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stt::SttEngine;

    #[tokio::test]
    async fn test_start_fails_with_capability_error() {
        let mut engine = UnsupportedStt::new("webspeech");
        let err = engine.start("kn-IN").await.unwrap_err();
        assert!(err.to_string().contains("webspeech"));
    }

    #[tokio::test]
    async fn test_stop_is_safe() {
        let mut engine = UnsupportedStt::new("webspeech");
        assert!(engine.stop().await.is_ok());
    }
}
