//! Audio format configuration
//!
//! Describes the raw sample layout the program expects on stdin and how it
//! maps onto a cpal output stream. No range checks happen here: whatever
//! the user asked for goes to the audio backend, which may reject it.

use cpal::{BufferSize, SampleFormat, SampleRate, StreamConfig};

/// Default sampling frequency (Hz)
pub const DEFAULT_FREQUENCY: u32 = 44000;
/// Default channel count
pub const DEFAULT_CHANNELS: u16 = 1;
/// Default device buffer size (frames)
pub const DEFAULT_BUFFER_FRAMES: u32 = 512;

/// Sample width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleBits {
    /// Signed 8-bit
    #[default]
    Eight,
    /// Signed 16-bit, native byte order
    Sixteen,
}

impl SampleBits {
    pub fn bits(&self) -> u16 {
        match self {
            SampleBits::Eight => 8,
            SampleBits::Sixteen => 16,
        }
    }

    pub fn bytes(&self) -> usize {
        self.bits() as usize / 8
    }

    /// The cpal sample format carrying these bytes unchanged
    pub fn sample_format(&self) -> SampleFormat {
        match self {
            SampleBits::Eight => SampleFormat::I8,
            SampleBits::Sixteen => SampleFormat::I16,
        }
    }
}

/// Format used to open the playback device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    /// Sampling frequency in Hz
    pub frequency: u32,
    /// Number of interleaved channels
    pub channels: u16,
    /// Sample width
    pub bits: SampleBits,
    /// Device buffer size in frames
    pub buffer_frames: u32,
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY,
            channels: DEFAULT_CHANNELS,
            bits: SampleBits::Eight,
            buffer_frames: DEFAULT_BUFFER_FRAMES,
        }
    }
}

impl AudioFormat {
    pub fn sample_format(&self) -> SampleFormat {
        self.bits.sample_format()
    }

    /// cpal stream configuration with a fixed buffer size
    pub fn stream_config(&self) -> StreamConfig {
        StreamConfig {
            channels: self.channels,
            sample_rate: SampleRate(self.frequency),
            buffer_size: BufferSize::Fixed(self.buffer_frames),
        }
    }

    pub fn bytes_per_frame(&self) -> usize {
        self.channels as usize * self.bits.bytes()
    }

    /// Bytes the device asks for per full buffer
    pub fn buffer_bytes(&self) -> usize {
        self.buffer_frames as usize * self.bytes_per_frame()
    }

    /// Log the format the way `-d` reports it
    pub fn log_summary(&self) {
        log::info!("Frequency: {}", self.frequency);
        log::info!("Channels:  {}", self.channels);
        log::info!("Bits:      {}", self.bits.bits());
        log::info!("Buffer:    {}", self.buffer_frames);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let format = AudioFormat::default();
        assert_eq!(format.frequency, 44000);
        assert_eq!(format.channels, 1);
        assert_eq!(format.bits, SampleBits::Eight);
        assert_eq!(format.buffer_frames, 512);
        assert_eq!(format.buffer_bytes(), 512);
    }

    #[test]
    fn test_stream_config_mapping() {
        let format = AudioFormat {
            frequency: 48000,
            channels: 2,
            bits: SampleBits::Sixteen,
            buffer_frames: 256,
        };

        let config = format.stream_config();
        assert_eq!(config.channels, 2);
        assert_eq!(config.sample_rate, SampleRate(48000));
        assert_eq!(config.buffer_size, BufferSize::Fixed(256));
        assert_eq!(format.sample_format(), SampleFormat::I16);
        assert_eq!(format.bytes_per_frame(), 4);
        assert_eq!(format.buffer_bytes(), 1024);
    }

    #[test]
    fn test_eight_bit_is_signed() {
        assert_eq!(SampleBits::Eight.sample_format(), SampleFormat::I8);
        assert_eq!(SampleBits::Eight.bytes(), 1);
    }
}
