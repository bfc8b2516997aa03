//! Mock STT Engine for Testing
//!
//! Emits predetermined events when a session is stopped, and counts
//! start/stop calls for verification.

use anyhow::Result;
use async_trait::async_trait;
use kalike::stt::{SttEngine, SttEvent};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedSender;

/// Mock STT engine that replays scripted events
pub struct MockStt {
    events: UnboundedSender<SttEvent>,
    script: Arc<Mutex<VecDeque<SttEvent>>>,
    pub starts: Arc<Mutex<u32>>,
}

impl MockStt {
    pub fn new(events: UnboundedSender<SttEvent>, script: Vec<SttEvent>) -> Self {
        Self {
            events,
            script: Arc::new(Mutex::new(script.into())),
            starts: Arc::new(Mutex::new(0)),
        }
    }
}

#[async_trait]
impl SttEngine for MockStt {
    async fn start(&mut self, _locale: &str) -> Result<()> {
        *self.starts.lock().unwrap() += 1;
        Ok(())
    }

    // One scripted event per session, delivered on release
    async fn stop(&mut self) -> Result<()> {
        if let Some(event) = self.script.lock().unwrap().pop_front() {
            let _ = self.events.send(event);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
