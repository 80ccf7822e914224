//! Audio module - playback device and the callback that feeds it
//!
//! This module provides:
//! - Audio format configuration and its cpal mapping
//! - The fill routine run on the audio thread
//! - Audio engine for cpal integration

mod callback;
mod engine;
mod format;

// Re-export public types
pub use callback::fill_from_handoff;
pub use engine::{AudioBackend, AudioError, CpalBackend, PlaybackDevice, RenderCallback};
pub use format::{AudioFormat, SampleBits};
