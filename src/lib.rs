//! Kalike Library
//!
//! Core modules for the Kalike voice-driven Kannada tutor.

pub mod app;
pub mod audio;
pub mod capture;
pub mod config;
pub mod error;
pub mod progress;
pub mod session;
pub mod stt;
pub mod tts;
pub mod tutor;
pub mod wordbank;
