//! Command line flags
//!
//! Flags mirror the classic single-dash style (`-f 48000 -c 2 -16 -d`).
//! `-16` is not a valid clap short flag, so it is rewritten to `--16`
//! before parsing.

use std::ffi::OsString;

use clap::Parser;

use crate::audio::{AudioFormat, SampleBits};

#[derive(Parser, Debug)]
#[command(name = "speaker-cat")]
#[command(about = "Play raw PCM bytes from stdin on the default audio output")]
#[command(version)]
pub struct Args {
    /// Sampling frequency
    #[arg(short = 'f', value_name = "HZ")]
    pub frequency: Option<u32>,

    /// Number of channels
    #[arg(short = 'c', value_name = "N")]
    pub channels: Option<u16>,

    /// Buffer size in frames
    #[arg(short = 's', value_name = "FRAMES")]
    pub buffer_frames: Option<u32>,

    /// Use 16-bit samples
    #[arg(long = "16")]
    pub sixteen_bit: bool,

    /// Debug mode
    #[arg(short = 'd')]
    pub debug: bool,
}

impl Args {
    /// Parse the process arguments
    pub fn from_env() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Resolve the final format; unset flags keep the built-in defaults
    pub fn resolve(&self) -> AudioFormat {
        let defaults = AudioFormat::default();
        AudioFormat {
            frequency: self.frequency.unwrap_or(defaults.frequency),
            channels: self.channels.unwrap_or(defaults.channels),
            bits: if self.sixteen_bit { SampleBits::Sixteen } else { defaults.bits },
            buffer_frames: self.buffer_frames.unwrap_or(defaults.buffer_frames),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Error
        }
    }
}

/// Rewrite `-16` to `--16` so clap sees a long flag
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| if arg == "-16" { OsString::from("--16") } else { arg })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["speaker-cat"];
        argv.extend_from_slice(args);
        Args::try_parse_from(normalize_args(argv)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert!(!args.debug);
        assert_eq!(args.log_level(), log::LevelFilter::Error);
        assert_eq!(args.resolve(), AudioFormat::default());
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&["-16", "-c", "2", "-f", "48000", "-s", "1024", "-d"]);
        assert!(args.debug);
        assert_eq!(args.log_level(), log::LevelFilter::Debug);

        let format = args.resolve();
        assert_eq!(format.frequency, 48000);
        assert_eq!(format.channels, 2);
        assert_eq!(format.bits, SampleBits::Sixteen);
        assert_eq!(format.buffer_frames, 1024);
    }

    #[test]
    fn test_double_dash_sixteen_also_works() {
        let args = parse(&["--16"]);
        assert!(args.sixteen_bit);
    }

    #[test]
    fn test_unset_flags_keep_fixed_defaults() {
        let format = parse(&["-c", "2"]).resolve();
        assert_eq!(format.frequency, 44000);
        assert_eq!(format.channels, 2);
        assert_eq!(format.bits, SampleBits::Eight);
        assert_eq!(format.buffer_frames, 512);
    }

    #[test]
    fn test_rejects_non_numeric_values() {
        assert!(Args::try_parse_from(["speaker-cat", "-f", "fast"]).is_err());
        assert!(Args::try_parse_from(["speaker-cat", "-c", "-1"]).is_err());
    }

    #[test]
    fn test_normalize_only_touches_sixteen() {
        let args = normalize_args(["speaker-cat", "-16", "-f", "16"]);
        assert_eq!(args, vec!["speaker-cat", "--16", "-f", "16"]);
    }
}
