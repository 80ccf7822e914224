//! Audio engine - opens the playback device through cpal
//!
//! The engine is split along the two resources the program holds:
//! the audio subsystem (a cpal host) and one playback device (an output
//! stream). Each is released by `Drop`, so teardown runs on every exit
//! path and always closes the device before the subsystem goes away.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use thiserror::Error;

use super::format::AudioFormat;

/// Errors from the audio subsystem
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to initialize audio subsystem: {0}")]
    Init(#[from] cpal::HostUnavailable),

    #[error("No output device found")]
    NoDevice,

    #[error("Failed to open audio device: {0}")]
    Open(#[from] cpal::BuildStreamError),

    #[error("Failed to start playback: {0}")]
    Play(#[from] cpal::PlayStreamError),
}

/// Called from the audio thread with the device buffer to fill
pub type RenderCallback = Box<dyn FnMut(&mut [u8]) + Send + 'static>;

/// An initialized audio subsystem able to open playback devices
pub trait AudioBackend {
    type Device: PlaybackDevice;

    /// Open the default output device in pull mode
    ///
    /// The device starts paused; `render` is invoked whenever it needs data
    /// once resumed.
    fn open(
        &self,
        format: &AudioFormat,
        render: RenderCallback,
    ) -> Result<Self::Device, AudioError>;
}

/// An open playback device; dropping it closes the device
pub trait PlaybackDevice {
    /// Unpause playback
    fn resume(&self) -> Result<(), AudioError>;
}

/// cpal-backed audio subsystem
pub struct CpalBackend {
    host: cpal::Host,
}

impl CpalBackend {
    /// Initialize the platform's default audio host
    pub fn init() -> Result<Self, AudioError> {
        let id = cpal::default_host().id();
        let host = cpal::host_from_id(id)?;
        log::debug!("Audio subsystem initialized ({})", id.name());
        Ok(Self { host })
    }
}

impl Drop for CpalBackend {
    fn drop(&mut self) {
        log::debug!("Audio subsystem released");
    }
}

impl AudioBackend for CpalBackend {
    type Device = CpalDevice;

    fn open(
        &self,
        format: &AudioFormat,
        mut render: RenderCallback,
    ) -> Result<CpalDevice, AudioError> {
        let device = self.host.default_output_device().ok_or(AudioError::NoDevice)?;

        let name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        log::info!("Using output device: {}", name);

        let config = format.stream_config();
        let sample_format = format.sample_format();
        log::info!(
            "Audio config: {:?}, sample format: {:?} ({} bytes per buffer)",
            config,
            sample_format,
            format.buffer_bytes()
        );

        let stream = device.build_output_stream_raw(
            &config,
            sample_format,
            move |data: &mut cpal::Data, _: &cpal::OutputCallbackInfo| {
                render(data.bytes_mut());
            },
            |err| log::error!("Audio stream error: {}", err),
            None,
        )?;

        Ok(CpalDevice { stream, name })
    }
}

/// An open cpal output stream
pub struct CpalDevice {
    /// Kept alive for as long as playback should continue
    stream: cpal::Stream,
    name: String,
}

impl PlaybackDevice for CpalDevice {
    fn resume(&self) -> Result<(), AudioError> {
        self.stream.play()?;
        log::debug!("Playback started on {}", self.name);
        Ok(())
    }
}

impl Drop for CpalDevice {
    fn drop(&mut self) {
        // The stream field is dropped right after this, which closes it
        log::debug!("Closing audio device {}", self.name);
    }
}
